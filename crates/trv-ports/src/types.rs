use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const SCHEDULE_ATTRIBUTE: &str = "schedule";
pub const CURRENT_TEMPERATURE_ATTRIBUTE: &str = "current_temperature";
pub const FRIENDLY_NAME_ATTRIBUTE: &str = "friendly_name";

/// One entry of the host's state registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityState {
    pub entity_id: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntityState {
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn has_schedule_attribute(&self) -> bool {
        self.attributes.contains_key(SCHEDULE_ATTRIBUTE)
    }

    pub fn schedule_attribute(&self) -> Option<&str> {
        self.attributes.get(SCHEDULE_ATTRIBUTE).and_then(Value::as_str)
    }

    /// Numeric or numeric-string `current_temperature`.
    pub fn current_temperature(&self) -> Option<f64> {
        match self.attributes.get(CURRENT_TEMPERATURE_ATTRIBUTE)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.attributes
            .get(FRIENDLY_NAME_ATTRIBUTE)
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.friendly_name().unwrap_or(&self.entity_id)
    }
}

/// A `domain.service` invocation with its JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceCall {
    pub domain: String,
    pub service: String,
    pub data: Map<String, Value>,
}

impl ServiceCall {
    pub fn new(domain: &str, service: &str) -> Self {
        Self {
            domain: domain.to_string(),
            service: service.to_string(),
            data: Map::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }

    pub fn name(&self) -> String {
        format!("{}.{}", self.domain, self.service)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_schedule_attribute() {
        let e = EntityState::new("climate.hall", "heat")
            .with_attribute(SCHEDULE_ATTRIBUTE, "06:00/18°C");
        assert!(e.has_schedule_attribute());
        assert_eq!(e.schedule_attribute(), Some("06:00/18°C"));
    }

    #[test]
    fn null_schedule_attribute_still_counts_as_present() {
        let e = EntityState::new("text.hall", "x").with_attribute(SCHEDULE_ATTRIBUTE, Value::Null);
        assert!(e.has_schedule_attribute());
        assert_eq!(e.schedule_attribute(), None);
    }

    #[test]
    fn current_temperature_accepts_numbers_and_strings() {
        let num = EntityState::new("climate.a", "heat")
            .with_attribute(CURRENT_TEMPERATURE_ATTRIBUTE, 19.5);
        let text = EntityState::new("climate.b", "heat")
            .with_attribute(CURRENT_TEMPERATURE_ATTRIBUTE, "21");
        let junk = EntityState::new("climate.c", "heat")
            .with_attribute(CURRENT_TEMPERATURE_ATTRIBUTE, true);
        assert_eq!(num.current_temperature(), Some(19.5));
        assert_eq!(text.current_temperature(), Some(21.0));
        assert_eq!(junk.current_temperature(), None);
    }

    #[test]
    fn display_name_prefers_friendly_name() {
        let plain = EntityState::new("climate.hall", "heat");
        let named = plain.clone().with_attribute(FRIENDLY_NAME_ATTRIBUTE, "Hall TRV");
        assert_eq!(plain.display_name(), "climate.hall");
        assert_eq!(named.display_name(), "Hall TRV");
    }

    #[test]
    fn deserializes_host_state_object() {
        let e: EntityState = serde_json::from_str(
            r#"{"entity_id": "text.hall_schedule", "state": "06:00/18°C",
                "attributes": {"friendly_name": "Hall schedule"},
                "last_changed": "2025-01-13T06:00:00+00:00"}"#,
        )
        .unwrap();
        assert_eq!(e.entity_id, "text.hall_schedule");
        assert_eq!(e.display_name(), "Hall schedule");
    }

    #[test]
    fn service_call_builder() {
        let call = ServiceCall::new("text", "set_value")
            .with("entity_id", "text.hall")
            .with("value", "x");
        assert_eq!(call.name(), "text.set_value");
        assert_eq!(call.str_field("entity_id"), Some("text.hall"));
    }
}
