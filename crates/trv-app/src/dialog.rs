use chrono::NaiveDateTime;
use serde::Serialize;

use trv_core::config::CardConfig;
use trv_core::error::DomainError;
use trv_core::schedule::{DayGroup, Schedule};

use crate::status::{self, StatusMessage};

/// Popup schedule editor. Holds its own copy of the schedule so edits stay
/// private until applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleDialog {
    working: Schedule,
    open_group: DayGroup,
    status: Option<StatusMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodView {
    pub index: usize,
    /// Raw `HH:MM` for the time input.
    pub time: String,
    /// Time rendered in the configured format.
    pub label: String,
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub group: DayGroup,
    pub label: &'static str,
    pub description: &'static str,
    pub expanded: bool,
    pub periods: Vec<PeriodView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogView {
    pub groups: Vec<GroupView>,
    pub min_temp: f64,
    pub max_temp: f64,
    pub temp_step: f64,
    pub status: Option<StatusMessage>,
}

impl ScheduleDialog {
    pub fn new(schedule: &Schedule, today: DayGroup) -> Self {
        Self {
            working: schedule.clone(),
            open_group: today,
            status: None,
        }
    }

    pub fn working_copy(&self) -> &Schedule {
        &self.working
    }

    pub fn open_group(&self) -> DayGroup {
        self.open_group
    }

    /// Accordion: one group open at a time. Returns false if `group` was
    /// already open.
    pub fn select_group(&mut self, group: DayGroup) -> bool {
        if self.open_group == group {
            return false;
        }
        self.open_group = group;
        true
    }

    pub fn set_time(&mut self, group: DayGroup, index: usize, time: &str) -> Result<(), DomainError> {
        self.working.set_time(group, index, time)
    }

    pub fn set_temp(&mut self, group: DayGroup, index: usize, temp: f64) -> Result<(), DomainError> {
        self.working.set_temp(group, index, temp)
    }

    pub fn remove_period(
        &mut self,
        group: DayGroup,
        index: usize,
        now: NaiveDateTime,
    ) -> Result<(), DomainError> {
        let result = self.working.remove_period(group, index);
        if let Err(e) = &result {
            self.status = Some(StatusMessage::error(e.to_string(), now));
        }
        result
    }

    pub fn reset_to_default(&mut self, now: NaiveDateTime) {
        self.working = Schedule::default();
        self.status = Some(StatusMessage::success("Schedule reset to defaults", now));
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub(crate) fn set_status(&mut self, message: StatusMessage) {
        self.status = Some(message);
    }

    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        status::clear_expired(&mut self.status, now)
    }

    pub fn view(&self, config: &CardConfig) -> DialogView {
        let groups = DayGroup::ALL
            .into_iter()
            .map(|group| GroupView {
                group,
                label: group.label(),
                description: group.description(),
                expanded: group == self.open_group,
                periods: self
                    .working
                    .group(group)
                    .iter()
                    .enumerate()
                    .map(|(index, p)| PeriodView {
                        index,
                        time: p.time.to_string(),
                        label: config.time_format.display(&p.time),
                        temp: p.temp,
                    })
                    .collect(),
            })
            .collect();

        DialogView {
            groups,
            min_temp: config.min_temp,
            max_temp: config.max_temp,
            temp_step: config.temp_step,
            status: self.status.clone(),
        }
    }
}
