use serde::Serialize;

use trv_core::config::{CardConfig, TimeFormat};
use trv_core::entity_id::{CLIMATE_DOMAIN, TEXT_DOMAIN};
use trv_ports::outbound::StateRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityOption {
    pub entity_id: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntityPicker {
    pub climate: Vec<EntityOption>,
    pub text: Vec<EntityOption>,
}

fn in_domain(entity_id: &str, domain: &str) -> bool {
    entity_id
        .split_once('.')
        .is_some_and(|(d, _)| d == domain)
}

/// Text entities only qualify when their id hints at a valve schedule.
fn is_schedule_text(entity_id: &str) -> bool {
    in_domain(entity_id, TEXT_DOMAIN) && (entity_id.contains("schedule") || entity_id.contains("trv"))
}

pub fn entity_picker<R>(registry: &R, config: &CardConfig) -> EntityPicker
where
    R: StateRegistry + ?Sized,
{
    let mut ids = registry.entity_ids();
    ids.sort();

    let option = |entity_id: &String| EntityOption {
        name: registry
            .state(entity_id)
            .map(|s| s.display_name().to_string())
            .unwrap_or_else(|| entity_id.clone()),
        selected: *entity_id == config.entity,
        entity_id: entity_id.clone(),
    };

    EntityPicker {
        climate: ids
            .iter()
            .filter(|id| in_domain(id, CLIMATE_DOMAIN))
            .map(option)
            .collect(),
        text: ids.iter().filter(|id| is_schedule_text(id)).map(option).collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEdit {
    Entity(String),
    Title(String),
    ShowCurrentTemp(bool),
    MinTemp(f64),
    MaxTemp(f64),
    TempStep(f64),
    Use24Hour(bool),
    VendorCommand(bool),
}

impl ConfigEdit {
    /// Returns the updated config; the host's copy is never modified in place.
    pub fn apply(self, config: &CardConfig) -> CardConfig {
        let mut next = config.clone();
        match self {
            Self::Entity(entity) => next.entity = entity,
            Self::Title(title) => next.title = Some(title),
            Self::ShowCurrentTemp(show) => next.show_current_temp = show,
            Self::MinTemp(v) => next.min_temp = v,
            Self::MaxTemp(v) => next.max_temp = v,
            Self::TempStep(v) => next.temp_step = v,
            Self::Use24Hour(on) => {
                next.time_format = if on {
                    TimeFormat::TwentyFourHour
                } else {
                    TimeFormat::TwelveHour
                }
            }
            Self::VendorCommand(on) => next.vendor_command = on,
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use trv_ports::types::{EntityState, FRIENDLY_NAME_ATTRIBUTE};

    struct MockRegistry {
        states: BTreeMap<String, EntityState>,
    }

    impl StateRegistry for MockRegistry {
        fn state(&self, entity_id: &str) -> Option<EntityState> {
            self.states.get(entity_id).cloned()
        }
        fn entity_ids(&self) -> Vec<String> {
            // Unsorted on purpose: the picker sorts.
            self.states.keys().rev().cloned().collect()
        }
    }

    fn registry() -> MockRegistry {
        let states = [
            EntityState::new("climate.lounge", "heat")
                .with_attribute(FRIENDLY_NAME_ATTRIBUTE, "Lounge TRV"),
            EntityState::new("climate.bedroom_trv", "heat"),
            EntityState::new("text.bedroom_trv_schedule", "x"),
            EntityState::new("text.kitchen_trv", "x"),
            EntityState::new("text.shopping_list", "x"),
            EntityState::new("sensor.hall_schedule", "x"),
        ];
        MockRegistry {
            states: states
                .into_iter()
                .map(|s| (s.entity_id.clone(), s))
                .collect(),
        }
    }

    fn ids(options: &[EntityOption]) -> Vec<&str> {
        options.iter().map(|o| o.entity_id.as_str()).collect()
    }

    #[test]
    fn picker_lists_climate_and_schedule_text_entities() {
        let picker = entity_picker(&registry(), &CardConfig::new("text.kitchen_trv"));
        assert_eq!(ids(&picker.climate), vec!["climate.bedroom_trv", "climate.lounge"]);
        assert_eq!(
            ids(&picker.text),
            vec!["text.bedroom_trv_schedule", "text.kitchen_trv"]
        );
    }

    #[test]
    fn picker_uses_friendly_names_and_marks_selection() {
        let picker = entity_picker(&registry(), &CardConfig::new("climate.lounge"));
        let lounge = &picker.climate[1];
        assert_eq!(lounge.name, "Lounge TRV");
        assert!(lounge.selected);
        assert_eq!(picker.climate[0].name, "climate.bedroom_trv");
        assert!(!picker.climate[0].selected);
    }

    #[test]
    fn edits_produce_new_config() {
        let original = CardConfig::stub();
        let edited = ConfigEdit::Entity("text.kitchen_trv".into()).apply(&original);
        let edited = ConfigEdit::Use24Hour(false).apply(&edited);
        let edited = ConfigEdit::MinTemp(7.5).apply(&edited);
        let edited = ConfigEdit::Title("Kitchen".into()).apply(&edited);
        let edited = ConfigEdit::ShowCurrentTemp(false).apply(&edited);

        assert_eq!(original, CardConfig::stub());
        assert_eq!(edited.entity, "text.kitchen_trv");
        assert_eq!(edited.time_format, TimeFormat::TwelveHour);
        assert_eq!(edited.min_temp, 7.5);
        assert_eq!(edited.display_title(), "Kitchen");
        assert!(!edited.show_current_temp);
    }

    #[test]
    fn remaining_edits_touch_their_field() {
        let cfg = CardConfig::stub();
        assert_eq!(ConfigEdit::MaxTemp(28.0).apply(&cfg).max_temp, 28.0);
        assert_eq!(ConfigEdit::TempStep(0.1).apply(&cfg).temp_step, 0.1);
        assert!(ConfigEdit::VendorCommand(true).apply(&cfg).vendor_command);
        assert_eq!(
            ConfigEdit::Use24Hour(true).apply(&cfg).time_format,
            TimeFormat::TwentyFourHour
        );
    }
}
