use trv_core::entity_id::EntityId;
use trv_core::schedule::Schedule;
use trv_ports::outbound::{ServiceCaller, StateRegistry};
use trv_ports::types::ServiceCall;

use crate::error::AppError;
use crate::write_target::{self, WriteTarget};

const VENDOR_DOMAIN: &str = "tuya";

/// Outcome of a successful schedule write.
#[derive(Debug, Clone, PartialEq)]
pub struct Applied {
    pub target: WriteTarget,
    pub wire: String,
}

pub struct ScheduleService<R, C>
where
    R: StateRegistry,
    C: ServiceCaller,
{
    registry: R,
    caller: C,
}

impl<R, C> ScheduleService<R, C>
where
    R: StateRegistry,
    C: ServiceCaller,
{
    pub fn new(registry: R, caller: C) -> Self {
        Self { registry, caller }
    }

    pub fn caller(&self) -> &C {
        &self.caller
    }

    pub fn resolve(
        &self,
        entity: &EntityId,
        vendor_command: bool,
    ) -> Result<WriteTarget, AppError> {
        Ok(write_target::resolve(entity, &self.registry, vendor_command)?)
    }

    /// Serializes `schedule` and sends it to whichever entity can take it.
    pub async fn apply(
        &self,
        entity: &EntityId,
        schedule: &Schedule,
        vendor_command: bool,
    ) -> Result<Applied, AppError> {
        let wire = schedule.to_wire();
        let target = match self.resolve(entity, vendor_command) {
            Ok(target) => target,
            Err(e) => {
                tracing::error!(entity = %entity, error = %e, "cannot resolve schedule target");
                return Err(e);
            }
        };

        let result = match &target {
            WriteTarget::Text(id) => self.caller.call_service(&set_value(id, &wire)).await,
            WriteTarget::ClimateCommand(id) => self.send_climate_command(id, &wire).await,
        };
        if let Err(e) = result {
            tracing::error!(
                entity = %entity,
                write_target = %target.entity_id(),
                error = %e,
                "error applying schedule"
            );
            return Err(e.into());
        }

        tracing::info!(
            entity = %entity,
            write_target = %target.entity_id(),
            schedule = %wire,
            "applied schedule"
        );
        Ok(Applied { target, wire })
    }

    async fn send_climate_command(
        &self,
        id: &EntityId,
        wire: &str,
    ) -> Result<(), trv_ports::error::PortError> {
        let vendor = ServiceCall::new(VENDOR_DOMAIN, "send_command")
            .with("device_id", id.as_str())
            .with("command", "schedule")
            .with("params", wire);
        match self.caller.call_service(&vendor).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::warn!(
                    entity = %id,
                    error = %e,
                    "vendor schedule command failed, using climate.set_schedule"
                );
                let generic = ServiceCall::new("climate", "set_schedule")
                    .with("entity_id", id.as_str())
                    .with("schedule", wire);
                self.caller.call_service(&generic).await
            }
        }
    }
}

pub fn set_value(id: &EntityId, wire: &str) -> ServiceCall {
    ServiceCall::new("text", "set_value")
        .with("entity_id", id.as_str())
        .with("value", wire)
}
