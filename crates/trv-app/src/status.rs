use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

/// How long a status banner stays up.
pub const STATUS_TTL_SECS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

/// Transient banner shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    pub expires_at: NaiveDateTime,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>, now: NaiveDateTime) -> Self {
        Self::new(StatusKind::Success, text.into(), now)
    }

    pub fn error(text: impl Into<String>, now: NaiveDateTime) -> Self {
        Self::new(StatusKind::Error, text.into(), now)
    }

    fn new(kind: StatusKind, text: String, now: NaiveDateTime) -> Self {
        Self {
            kind,
            text,
            expires_at: now + Duration::seconds(STATUS_TTL_SECS),
        }
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        now >= self.expires_at
    }
}

/// Drops `slot`'s message once it has expired; returns whether it did.
pub fn clear_expired(slot: &mut Option<StatusMessage>, now: NaiveDateTime) -> bool {
    if slot.as_ref().is_some_and(|m| m.is_expired(now)) {
        *slot = None;
        return true;
    }
    false
}
