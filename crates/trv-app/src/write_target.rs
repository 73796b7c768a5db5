use trv_core::entity_id::{EntityId, TEXT_DOMAIN};
use trv_ports::outbound::StateRegistry;

use crate::error::ResolveError;

/// Where a schedule string gets written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteTarget {
    /// `text.set_value` on this entity.
    Text(EntityId),
    /// Vendor `send_command`, then `climate.set_schedule` if that fails.
    ClimateCommand(EntityId),
}

impl WriteTarget {
    pub fn entity_id(&self) -> &EntityId {
        match self {
            Self::Text(id) | Self::ClimateCommand(id) => id,
        }
    }
}

/// Text entities that may back a climate entity's `schedule` attribute,
/// in lookup order.
pub fn sibling_candidates(climate: &EntityId) -> Vec<EntityId> {
    let name = climate.object_id();
    let names = [
        format!("{name}_schedule"),
        name.to_string(),
        format!("{}_schedule", name.replacen("_trv", "", 1)),
    ];
    names
        .iter()
        .filter_map(|n| EntityId::in_domain(TEXT_DOMAIN, n).ok())
        .collect()
}

pub fn resolve<R>(
    entity: &EntityId,
    registry: &R,
    vendor_command: bool,
) -> Result<WriteTarget, ResolveError>
where
    R: StateRegistry + ?Sized,
{
    let state = registry
        .state(entity.as_str())
        .ok_or_else(|| ResolveError::EntityNotFound(entity.to_string()))?;
    let has_attribute = state.has_schedule_attribute();

    if entity.is_text() && !has_attribute {
        return Ok(WriteTarget::Text(entity.clone()));
    }

    if entity.is_climate() {
        if has_attribute {
            if let Some(sibling) = sibling_candidates(entity)
                .into_iter()
                .find(|c| registry.contains(c.as_str()))
            {
                return Ok(WriteTarget::Text(sibling));
            }
        }
        if vendor_command {
            return Ok(WriteTarget::ClimateCommand(entity.clone()));
        }
        return Err(if has_attribute {
            ResolveError::NoWritableSibling(entity.to_string())
        } else {
            ResolveError::ReadOnly(entity.to_string())
        });
    }

    Ok(WriteTarget::Text(entity.clone()))
}
