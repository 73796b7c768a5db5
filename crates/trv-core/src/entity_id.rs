use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const TEXT_DOMAIN: &str = "text";
pub const CLIMATE_DOMAIN: &str = "climate";

/// Host entity identifier of the form `domain.object_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.split_once('.') {
            Some((domain, object_id)) if !domain.is_empty() && !object_id.is_empty() => {
                Ok(Self(s.to_string()))
            }
            _ => Err(DomainError::InvalidEntityId(s.to_string())),
        }
    }

    pub fn in_domain(domain: &str, object_id: &str) -> Result<Self, DomainError> {
        Self::parse(&format!("{domain}.{object_id}"))
    }

    pub fn domain(&self) -> &str {
        self.0.split_once('.').map(|(d, _)| d).unwrap_or_default()
    }

    pub fn object_id(&self) -> &str {
        self.0.split_once('.').map(|(_, o)| o).unwrap_or_default()
    }

    pub fn is_text(&self) -> bool {
        self.domain() == TEXT_DOMAIN
    }

    pub fn is_climate(&self) -> bool {
        self.domain() == CLIMATE_DOMAIN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_domain_and_object_id() {
        let id = EntityId::parse("climate.bedroom_trv").unwrap();
        assert_eq!(id.domain(), "climate");
        assert_eq!(id.object_id(), "bedroom_trv");
        assert!(id.is_climate());
        assert!(!id.is_text());
    }

    #[test]
    fn object_id_keeps_later_dots() {
        let id = EntityId::parse("text.hall.schedule").unwrap();
        assert_eq!(id.domain(), "text");
        assert_eq!(id.object_id(), "hall.schedule");
    }

    #[test]
    fn parse_without_domain_fails() {
        assert_eq!(
            EntityId::parse("bedroom"),
            Err(DomainError::InvalidEntityId("bedroom".into()))
        );
        assert!(EntityId::parse(".bedroom").is_err());
        assert!(EntityId::parse("text.").is_err());
    }

    #[test]
    fn in_domain_builds_sibling_ids() {
        let id = EntityId::in_domain(TEXT_DOMAIN, "bedroom_schedule").unwrap();
        assert_eq!(id.as_str(), "text.bedroom_schedule");
        assert!(id.is_text());
    }

    #[test]
    fn deserializes_from_plain_string() {
        let id: EntityId = serde_json::from_str("\"text.kitchen_trv\"").unwrap();
        assert_eq!(id.to_string(), "text.kitchen_trv");
        assert!(serde_json::from_str::<EntityId>("\"kitchen\"").is_err());
    }
}
