use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const FALLBACK_TIME: &str = "00:00";
const FALLBACK_TEMP: f64 = 15.0;

/// Zero-padded 24-hour `HH:MM`, ordered as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(String);

impl SlotTime {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if !Self::is_slot_pattern(s.as_bytes()) {
            return Err(DomainError::InvalidTime(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn of(time: NaiveTime) -> Self {
        Self(format!("{:02}:{:02}", time.hour(), time.minute()))
    }

    pub(crate) fn fixed(s: &'static str) -> Self {
        Self(s.to_string())
    }

    fn is_slot_pattern(bytes: &[u8]) -> bool {
        bytes.len() == 5
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[2] == b':'
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit()
    }

    /// Hour and minute as numbers. Values are not range-checked: `25:99` is a
    /// well-formed slot time as far as the device format is concerned.
    pub fn hour_minute(&self) -> (u32, u32) {
        let digits = |range: std::ops::Range<usize>| -> u32 {
            self.0.as_bytes()[range]
                .iter()
                .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
        };
        (digits(0..2), digits(3..5))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlotTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SlotTime> for String {
    fn from(time: SlotTime) -> Self {
        time.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub time: SlotTime,
    pub temp: f64,
}

impl Period {
    pub fn new(time: &str, temp: f64) -> Result<Self, DomainError> {
        if !temp.is_finite() {
            return Err(DomainError::InvalidTemperature);
        }
        Ok(Self {
            time: SlotTime::parse(time)?,
            temp,
        })
    }

    pub(crate) fn fixed(time: &'static str, temp: f64) -> Self {
        Self {
            time: SlotTime::fixed(time),
            temp,
        }
    }

    pub fn fallback() -> Self {
        Self::fixed(FALLBACK_TIME, FALLBACK_TEMP)
    }

    /// The first `HH:MM/<number>` anywhere in the fragment wins.
    pub fn from_fragment(fragment: &str) -> Self {
        (0..fragment.len())
            .find_map(|start| Self::match_at(fragment, start))
            .unwrap_or_else(Self::fallback)
    }

    fn match_at(fragment: &str, start: usize) -> Option<Self> {
        let rest = &fragment.as_bytes()[start..];
        if rest.len() < 7 || !SlotTime::is_slot_pattern(&rest[..5]) || rest[5] != b'/' {
            return None;
        }

        let whole = rest[6..].iter().take_while(|b| b.is_ascii_digit()).count();
        if whole == 0 {
            return None;
        }
        let mut end = 6 + whole;
        if rest.get(end) == Some(&b'.') {
            end += 1;
            end += rest[end..].iter().take_while(|b| b.is_ascii_digit()).count();
        }

        // Every byte matched so far is ASCII, so these are char boundaries.
        let time = &fragment[start..start + 5];
        let temp = fragment[start + 6..start + end]
            .trim_end_matches('.')
            .parse::<f64>()
            .ok()?;
        Some(Self {
            time: SlotTime(time.to_string()),
            temp,
        })
    }

    pub fn to_fragment(&self) -> String {
        // `-0.0` would print as `-0`, which the fragment reader rejects.
        let temp = if self.temp == 0.0 { 0.0 } else { self.temp };
        format!("{}/{}°C", self.time, temp)
    }

    pub fn is_well_formed(&self) -> bool {
        self.temp.is_finite()
    }
}
