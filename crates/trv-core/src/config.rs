use serde::{Deserialize, Serialize};

use crate::entity_id::EntityId;
use crate::error::DomainError;
use crate::schedule::SlotTime;

pub const DEFAULT_TITLE: &str = "TRV Schedule";

fn default_true() -> bool {
    true
}

fn default_min_temp() -> f64 {
    5.0
}

fn default_max_temp() -> f64 {
    35.0
}

fn default_temp_step() -> f64 {
    0.5
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

impl TimeFormat {
    pub fn display(&self, time: &SlotTime) -> String {
        match self {
            Self::TwentyFourHour => time.to_string(),
            Self::TwelveHour => {
                let (hour, minute) = time.hour_minute();
                let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
                let hour = match hour % 12 {
                    0 => 12,
                    h => h,
                };
                format!("{hour}:{minute:02} {suffix}")
            }
        }
    }
}

/// Card configuration as persisted by the dashboard host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub entity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub show_current_temp: bool,
    #[serde(default = "default_min_temp")]
    pub min_temp: f64,
    #[serde(default = "default_max_temp")]
    pub max_temp: f64,
    #[serde(default = "default_temp_step")]
    pub temp_step: f64,
    #[serde(default)]
    pub time_format: TimeFormat,
    /// Climate entities without a text sibling are written through the
    /// vendor command, falling back to the generic climate service.
    #[serde(default)]
    pub vendor_command: bool,
}

impl CardConfig {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            title: None,
            show_current_temp: default_true(),
            min_temp: default_min_temp(),
            max_temp: default_max_temp(),
            temp_step: default_temp_step(),
            time_format: TimeFormat::default(),
            vendor_command: false,
        }
    }

    /// Starting point offered when the card is first added to a dashboard.
    pub fn stub() -> Self {
        Self::new("climate.moes_trv")
    }

    /// Setup-time check; a card without an entity must not render.
    pub fn entity_id(&self) -> Result<EntityId, DomainError> {
        if self.entity.trim().is_empty() {
            return Err(DomainError::MissingEntity);
        }
        EntityId::parse(&self.entity)
    }

    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => DEFAULT_TITLE,
        }
    }
}
