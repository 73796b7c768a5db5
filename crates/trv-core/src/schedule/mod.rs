mod day_group;
mod period;
pub mod wire;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub use day_group::DayGroup;
pub use period::{Period, SlotTime};

/// The device protocol is fixed-width: every group carries exactly this many periods.
pub const PERIODS_PER_GROUP: usize = 4;

pub type GroupPeriods = [Period; PERIODS_PER_GROUP];

/// Weekly program of a radiator valve: three day groups of four periods each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    weekdays: GroupPeriods,
    saturday: GroupPeriods,
    sunday: GroupPeriods,
}

impl Default for Schedule {
    fn default() -> Self {
        let weekend = || {
            [
                Period::fixed("06:00", 15.0),
                Period::fixed("10:00", 15.0),
                Period::fixed("17:00", 15.0),
                Period::fixed("22:00", 15.0),
            ]
        };
        Self {
            weekdays: [
                Period::fixed("06:00", 18.0),
                Period::fixed("10:00", 15.0),
                Period::fixed("17:00", 18.0),
                Period::fixed("22:00", 15.0),
            ],
            saturday: weekend(),
            sunday: weekend(),
        }
    }
}

impl Schedule {
    pub fn new(weekdays: GroupPeriods, saturday: GroupPeriods, sunday: GroupPeriods) -> Self {
        Self {
            weekdays,
            saturday,
            sunday,
        }
    }

    pub fn group(&self, group: DayGroup) -> &GroupPeriods {
        match group {
            DayGroup::Weekdays => &self.weekdays,
            DayGroup::Saturday => &self.saturday,
            DayGroup::Sunday => &self.sunday,
        }
    }

    fn group_mut(&mut self, group: DayGroup) -> &mut GroupPeriods {
        match group {
            DayGroup::Weekdays => &mut self.weekdays,
            DayGroup::Saturday => &mut self.saturday,
            DayGroup::Sunday => &mut self.sunday,
        }
    }

    fn period_mut(&mut self, group: DayGroup, index: usize) -> Result<&mut Period, DomainError> {
        self.group_mut(group)
            .get_mut(index)
            .ok_or(DomainError::PeriodIndexOutOfRange(index))
    }

    /// All periods in wire order.
    pub fn periods(&self) -> impl Iterator<Item = &Period> {
        DayGroup::ALL
            .into_iter()
            .flat_map(move |g| self.group(g).iter())
    }

    pub fn set_time(&mut self, group: DayGroup, index: usize, time: &str) -> Result<(), DomainError> {
        let time = SlotTime::parse(time)?;
        self.period_mut(group, index)?.time = time;
        Ok(())
    }

    pub fn set_temp(&mut self, group: DayGroup, index: usize, temp: f64) -> Result<(), DomainError> {
        if !temp.is_finite() {
            return Err(DomainError::InvalidTemperature);
        }
        self.period_mut(group, index)?.temp = temp;
        Ok(())
    }

    /// Groups cannot shrink; this always refuses.
    pub fn remove_period(&mut self, group: DayGroup, index: usize) -> Result<(), DomainError> {
        self.period_mut(group, index)?;
        Err(DomainError::FixedPeriodCount)
    }

    pub fn is_well_formed(&self) -> bool {
        self.periods().all(Period::is_well_formed)
    }
}
