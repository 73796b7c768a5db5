use std::path::Path;

use trv_ports::error::PortError;
use trv_ports::types::EntityState;

use super::InMemoryHost;

/// Builds a host from a JSON dump of the host's state listing (an array of
/// `{entity_id, state, attributes}` objects; other fields are ignored).
pub fn load_states(json: &str) -> Result<InMemoryHost, PortError> {
    let states: Vec<EntityState> =
        serde_json::from_str(json).map_err(|e| PortError::Snapshot(e.to_string()))?;
    tracing::info!(entities = states.len(), "loaded state snapshot");
    Ok(InMemoryHost::with_states(states))
}

pub fn load_states_file(path: &Path) -> Result<InMemoryHost, PortError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| PortError::Snapshot(format!("{}: {e}", path.display())))?;
    load_states(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trv_ports::outbound::StateRegistry;

    #[test]
    fn loads_state_listing() {
        let host = load_states(
            r#"[
                {"entity_id": "climate.bedroom_trv", "state": "heat",
                 "attributes": {"current_temperature": 19.5, "friendly_name": "Bedroom"},
                 "last_updated": "2025-01-13T10:00:00+00:00"},
                {"entity_id": "text.bedroom_trv_schedule", "state": "06:00/18°C"}
            ]"#,
        )
        .unwrap();

        assert_eq!(host.len(), 2);
        let bedroom = host.state("climate.bedroom_trv").unwrap();
        assert_eq!(bedroom.current_temperature(), Some(19.5));
        assert_eq!(bedroom.display_name(), "Bedroom");
        assert!(host
            .state("text.bedroom_trv_schedule")
            .unwrap()
            .attributes
            .is_empty());
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        assert!(matches!(
            load_states("{\"entity_id\": 1}"),
            Err(PortError::Snapshot(_))
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_states_file(Path::new("/nonexistent/states.json")).unwrap_err();
        assert!(err.to_string().starts_with("invalid state snapshot: /nonexistent/states.json"));
    }
}
