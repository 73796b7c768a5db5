use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use trv_ports::error::PortError;
use trv_ports::outbound::{ServiceCaller, StateRegistry};
use trv_ports::types::{EntityState, ServiceCall, SCHEDULE_ATTRIBUTE};

const BUILTIN_SERVICES: [&str; 2] = ["text.set_value", "climate.set_schedule"];

#[derive(Debug, Default)]
struct HostState {
    states: BTreeMap<String, EntityState>,
    services: BTreeSet<String>,
    failures: BTreeMap<String, String>,
    calls: Vec<ServiceCall>,
}

/// Host stand-in that keeps entity states in memory and applies the schedule
/// services to them the way the real host would.
///
/// Clones share state.
#[derive(Clone, Debug)]
pub struct InMemoryHost {
    inner: Arc<Mutex<HostState>>,
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHost {
    pub fn new() -> Self {
        let state = HostState {
            services: BUILTIN_SERVICES.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn with_states(states: impl IntoIterator<Item = EntityState>) -> Self {
        let host = Self::new();
        for state in states {
            host.set_state(state);
        }
        host
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_state(&self, state: EntityState) {
        self.lock().states.insert(state.entity_id.clone(), state);
    }

    /// Makes `domain.service` callable, e.g. a vendor integration.
    pub fn register_service(&self, name: &str) {
        self.lock().services.insert(name.to_string());
    }

    /// Makes every call to `name` fail with `message`.
    pub fn fail_service(&self, name: &str, message: &str) {
        self.lock()
            .failures
            .insert(name.to_string(), message.to_string());
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HostState {
    fn entity_mut(&mut self, call: &ServiceCall) -> Result<&mut EntityState, PortError> {
        let id = call
            .str_field("entity_id")
            .ok_or_else(|| PortError::Dispatch(format!("{}: missing entity_id", call.name())))?;
        self.states.get_mut(id).ok_or(PortError::NotFound)
    }

    fn execute(&mut self, call: &ServiceCall) -> Result<(), PortError> {
        let name = call.name();
        if let Some(message) = self.failures.get(&name) {
            return Err(PortError::Dispatch(message.clone()));
        }
        if !self.services.contains(&name) {
            return Err(PortError::Dispatch(format!("service {name} not found")));
        }

        match name.as_str() {
            "text.set_value" => {
                let value = call.str_field("value").unwrap_or_default().to_string();
                self.entity_mut(call)?.state = value;
            }
            "climate.set_schedule" => {
                let schedule = call.str_field("schedule").unwrap_or_default().to_string();
                self.entity_mut(call)?
                    .attributes
                    .insert(SCHEDULE_ATTRIBUTE.to_string(), schedule.into());
            }
            _ => {}
        }
        Ok(())
    }
}

impl StateRegistry for InMemoryHost {
    fn state(&self, entity_id: &str) -> Option<EntityState> {
        self.lock().states.get(entity_id).cloned()
    }

    fn entity_ids(&self) -> Vec<String> {
        self.lock().states.keys().cloned().collect()
    }
}

#[async_trait]
impl ServiceCaller for InMemoryHost {
    async fn call_service(&self, call: &ServiceCall) -> Result<(), PortError> {
        let mut host = self.lock();
        host.calls.push(call.clone());
        let result = host.execute(call);
        match &result {
            Ok(()) => tracing::debug!(service = %call.name(), "service call handled"),
            Err(e) => tracing::debug!(service = %call.name(), error = %e, "service call rejected"),
        }
        result
    }
}
