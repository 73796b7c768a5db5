use chrono::Weekday;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayGroup {
    Weekdays,
    Saturday,
    Sunday,
}

impl DayGroup {
    /// Wire order.
    pub const ALL: [DayGroup; 3] = [Self::Weekdays, Self::Saturday, Self::Sunday];

    pub fn for_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sun => Self::Sunday,
            Weekday::Sat => Self::Saturday,
            _ => Self::Weekdays,
        }
    }

    /// Group that applies the day after `today`.
    pub fn tomorrow(today: Weekday) -> Self {
        Self::for_weekday(today.succ())
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Weekdays => "weekdays",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Weekdays => "Weekdays",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Weekdays => "Monday - Friday",
            Self::Saturday => "Saturday only",
            Self::Sunday => "Sunday only",
        }
    }
}
