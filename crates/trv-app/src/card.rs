use chrono::NaiveDateTime;
use serde::Serialize;

use trv_core::config::CardConfig;
use trv_core::entity_id::EntityId;
use trv_core::error::DomainError;
use trv_core::evaluator;
use trv_core::schedule::{DayGroup, Schedule, SlotTime};
use trv_ports::outbound::{ServiceCaller, StateRegistry};
use trv_ports::types::EntityState;

use crate::dialog::ScheduleDialog;
use crate::error::AppError;
use crate::schedule_service::{Applied, ScheduleService};
use crate::status::{self, StatusMessage};

const APPLIED_TEXT: &str = "Schedule applied successfully!";

#[derive(Debug, Clone, PartialEq)]
pub enum EditSession {
    Idle,
    Editing(ScheduleDialog),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotView {
    pub time: String,
    pub label: String,
    pub temp: f64,
}

impl SlotView {
    fn new(time: &SlotTime, temp: f64, config: &CardConfig) -> Self {
        Self {
            time: time.to_string(),
            label: config.time_format.display(time),
            temp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub title: String,
    pub entity_name: String,
    pub current_temperature: Option<f64>,
    pub group: DayGroup,
    pub current: SlotView,
    pub next: SlotView,
    pub next_is_today: bool,
    pub status: Option<StatusMessage>,
}

/// The schedule string a device entity currently reports: its `schedule`
/// attribute, or the state itself for text entities.
pub fn device_schedule<'a>(entity: &EntityId, state: &'a EntityState) -> Option<&'a str> {
    if let Some(wire) = state.schedule_attribute().filter(|s| !s.is_empty()) {
        return Some(wire);
    }
    let reported = state.state.as_str();
    let known = !reported.is_empty() && reported != "unknown" && reported != "unavailable";
    (entity.is_text() && known).then_some(reported)
}

pub fn render(
    config: &CardConfig,
    schedule: &Schedule,
    state: Option<&EntityState>,
    status: Option<&StatusMessage>,
    now: NaiveDateTime,
) -> CardView {
    let eval = evaluator::evaluate(schedule, now);
    let entity_name = state
        .map(|s| s.display_name().to_string())
        .unwrap_or_else(|| config.entity.clone());
    let current_temperature = state
        .filter(|_| config.show_current_temp)
        .and_then(EntityState::current_temperature);

    CardView {
        title: config.display_title().to_string(),
        entity_name,
        current_temperature,
        group: eval.group,
        current: SlotView::new(&eval.current.time, eval.current.temp, config),
        next: SlotView::new(&eval.next.time, eval.next.temp, config),
        next_is_today: eval.next.today,
        status: status.cloned(),
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleCard {
    config: CardConfig,
    entity: EntityId,
    schedule: Schedule,
    session: EditSession,
    status: Option<StatusMessage>,
}

impl ScheduleCard {
    pub fn new(config: CardConfig) -> Result<Self, DomainError> {
        let entity = config.entity_id()?;
        Ok(Self {
            config,
            entity,
            schedule: Schedule::default(),
            session: EditSession::Idle,
            status: None,
        })
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn entity(&self) -> &EntityId {
        &self.entity
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.session, EditSession::Editing(_))
    }

    pub fn dialog(&self) -> Option<&ScheduleDialog> {
        match &self.session {
            EditSession::Editing(dialog) => Some(dialog),
            EditSession::Idle => None,
        }
    }

    pub fn dialog_mut(&mut self) -> Option<&mut ScheduleDialog> {
        match &mut self.session {
            EditSession::Editing(dialog) => Some(dialog),
            EditSession::Idle => None,
        }
    }

    /// Returns `None` while a dialog is open.
    pub fn on_state_push<R>(&mut self, registry: &R, now: NaiveDateTime) -> Option<CardView>
    where
        R: StateRegistry + ?Sized,
    {
        if self.is_editing() {
            tracing::warn!(entity = %self.entity, "state push ignored while editing");
            return None;
        }
        self.sync_from_device(registry);
        status::clear_expired(&mut self.status, now);
        Some(self.view(registry, now))
    }

    pub fn view<R>(&self, registry: &R, now: NaiveDateTime) -> CardView
    where
        R: StateRegistry + ?Sized,
    {
        let state = registry.state(self.entity.as_str());
        render(
            &self.config,
            &self.schedule,
            state.as_ref(),
            self.status.as_ref(),
            now,
        )
    }

    fn sync_from_device<R>(&mut self, registry: &R) -> bool
    where
        R: StateRegistry + ?Sized,
    {
        let Some(state) = registry.state(self.entity.as_str()) else {
            return false;
        };
        let Some(wire) = device_schedule(&self.entity, &state) else {
            return false;
        };
        let applied = self.schedule.sync_from_wire(wire);
        if applied {
            tracing::info!(entity = %self.entity, "schedule synced from device");
        } else {
            tracing::debug!(entity = %self.entity, schedule = wire, "ignoring malformed schedule");
        }
        applied
    }

    pub fn open_editor(&mut self, now: NaiveDateTime) -> bool {
        if self.is_editing() {
            return false;
        }
        let dialog = ScheduleDialog::new(&self.schedule, evaluator::today_group(now));
        self.session = EditSession::Editing(dialog);
        true
    }

    pub fn dismiss_editor<R>(&mut self, registry: &R)
    where
        R: StateRegistry + ?Sized,
    {
        self.session = EditSession::Idle;
        self.sync_from_device(registry);
    }

    /// Sends the working copy to the device. On success it becomes the live
    /// schedule and the session ends; on failure the session stays open with
    /// the edits intact and an error banner.
    pub async fn apply_editor<R, C>(
        &mut self,
        service: &ScheduleService<R, C>,
        now: NaiveDateTime,
    ) -> Result<Applied, AppError>
    where
        R: StateRegistry,
        C: ServiceCaller,
    {
        let working = match &self.session {
            EditSession::Editing(dialog) => dialog.working_copy().clone(),
            EditSession::Idle => return Err(AppError::NotEditing),
        };

        match service
            .apply(&self.entity, &working, self.config.vendor_command)
            .await
        {
            Ok(applied) => {
                self.schedule = working;
                self.session = EditSession::Idle;
                self.status = Some(StatusMessage::success(APPLIED_TEXT, now));
                Ok(applied)
            }
            Err(e) => {
                if let Some(dialog) = self.dialog_mut() {
                    dialog.set_status(StatusMessage::error(
                        format!("Error applying schedule: {e}"),
                        now,
                    ));
                }
                Err(e)
            }
        }
    }

    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        let card = status::clear_expired(&mut self.status, now);
        let dialog = self.dialog_mut().is_some_and(|d| d.tick(now));
        card || dialog
    }
}
