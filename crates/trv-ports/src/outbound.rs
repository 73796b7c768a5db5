use async_trait::async_trait;

use crate::error::PortError;
use crate::types::{EntityState, ServiceCall};

/// Read access to the host's current entity states.
pub trait StateRegistry: Send + Sync {
    fn state(&self, entity_id: &str) -> Option<EntityState>;
    fn entity_ids(&self) -> Vec<String>;

    fn contains(&self, entity_id: &str) -> bool {
        self.state(entity_id).is_some()
    }
}

/// Issues service calls against the host. Rejections carry the host's message.
#[async_trait]
pub trait ServiceCaller: Send + Sync {
    async fn call_service(&self, call: &ServiceCall) -> Result<(), PortError>;
}
