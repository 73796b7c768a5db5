use std::fmt;

use super::{DayGroup, GroupPeriods, Period, Schedule, PERIODS_PER_GROUP};

pub const SEPARATOR: &str = "  ";

const ENTRY_COUNT: usize = PERIODS_PER_GROUP * DayGroup::ALL.len();

pub fn format(schedule: &Schedule) -> String {
    schedule
        .periods()
        .map(Period::to_fragment)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// `None` unless there are exactly twelve non-blank entries.
pub fn parse(text: &str) -> Option<Schedule> {
    let fragments: Vec<&str> = text
        .split(SEPARATOR)
        .filter(|f| !f.trim().is_empty())
        .collect();
    if fragments.len() != ENTRY_COUNT {
        return None;
    }

    let group = |offset: usize| -> GroupPeriods {
        std::array::from_fn(|i| Period::from_fragment(fragments[offset + i]))
    };
    Some(Schedule::new(
        group(0),
        group(PERIODS_PER_GROUP),
        group(2 * PERIODS_PER_GROUP),
    ))
}

pub fn round_trips(schedule: &Schedule) -> bool {
    parse(&format(schedule)).as_ref() == Some(schedule)
}

impl Schedule {
    pub fn from_wire(text: &str) -> Option<Self> {
        parse(text)
    }

    pub fn to_wire(&self) -> String {
        format(self)
    }

    /// Malformed input leaves the schedule untouched.
    pub fn sync_from_wire(&mut self, text: &str) -> bool {
        match parse(text) {
            Some(parsed) => {
                *self = parsed;
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}
