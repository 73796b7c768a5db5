use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::schedule::{DayGroup, Period, Schedule, SlotTime};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub time: SlotTime,
    pub temp: f64,
    /// `false` when the transition is the first period of tomorrow's group.
    pub today: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub group: DayGroup,
    pub current: Period,
    pub next: Transition,
}

pub fn today_group(now: NaiveDateTime) -> DayGroup {
    DayGroup::for_weekday(now.weekday())
}

/// Active period: the last one already started today. Before the first
/// period of the day the first period applies.
pub fn current_slot(schedule: &Schedule, now: NaiveDateTime) -> &Period {
    let at = SlotTime::of(now.time());
    let periods = schedule.group(today_group(now));
    periods
        .iter()
        .rev()
        .find(|p| p.time <= at)
        .unwrap_or(&periods[0])
}

pub fn next_transition(schedule: &Schedule, now: NaiveDateTime) -> Transition {
    let at = SlotTime::of(now.time());
    let upcoming = schedule
        .group(today_group(now))
        .iter()
        .find(|p| p.time > at);

    match upcoming {
        Some(p) => Transition {
            time: p.time.clone(),
            temp: p.temp,
            today: true,
        },
        None => {
            let first = &schedule.group(DayGroup::tomorrow(now.weekday()))[0];
            Transition {
                time: first.time.clone(),
                temp: first.temp,
                today: false,
            }
        }
    }
}

pub fn evaluate(schedule: &Schedule, now: NaiveDateTime) -> Evaluation {
    Evaluation {
        group: today_group(now),
        current: current_slot(schedule, now).clone(),
        next: next_transition(schedule, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2025-01-13 is a Monday.
    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn weekend_program() -> Schedule {
        let mut s = Schedule::default();
        s.set_time(DayGroup::Saturday, 0, "08:00").unwrap();
        s.set_temp(DayGroup::Saturday, 0, 20.0).unwrap();
        s.set_time(DayGroup::Sunday, 0, "09:00").unwrap();
        s.set_temp(DayGroup::Sunday, 0, 19.5).unwrap();
        s
    }

    fn slot(time: &str, temp: f64) -> Period {
        Period::new(time, temp).unwrap()
    }

    fn transition(time: &str, temp: f64, today: bool) -> Transition {
        Transition {
            time: SlotTime::parse(time).unwrap(),
            temp,
            today,
        }
    }

    #[test]
    fn before_first_period_wraps_to_first() {
        let s = Schedule::default();
        let now = at(13, 5, 59);
        assert_eq!(current_slot(&s, now), &slot("06:00", 18.0));
        assert_eq!(next_transition(&s, now), transition("06:00", 18.0, true));
    }

    #[test]
    fn mid_day_picks_latest_started_period() {
        let s = Schedule::default();
        let now = at(13, 11, 0);
        assert_eq!(current_slot(&s, now), &slot("10:00", 15.0));
        assert_eq!(next_transition(&s, now), transition("17:00", 18.0, true));
    }

    #[test]
    fn period_starts_on_its_minute() {
        let s = Schedule::default();
        let now = at(13, 17, 0);
        assert_eq!(current_slot(&s, now), &slot("17:00", 18.0));
        assert_eq!(next_transition(&s, now), transition("22:00", 15.0, true));
    }

    #[test]
    fn seconds_are_ignored() {
        let s = Schedule::default();
        let now = at(13, 5, 59) + chrono::Duration::seconds(59);
        assert_eq!(current_slot(&s, now), &slot("06:00", 18.0));
    }

    #[test]
    fn friday_night_rolls_to_saturday() {
        let s = weekend_program();
        let now = at(17, 23, 0);
        assert_eq!(current_slot(&s, now), &slot("22:00", 15.0));
        assert_eq!(next_transition(&s, now), transition("08:00", 20.0, false));
    }

    #[test]
    fn saturday_night_rolls_to_sunday() {
        let s = weekend_program();
        assert_eq!(
            next_transition(&s, at(18, 22, 30)),
            transition("09:00", 19.5, false)
        );
    }

    #[test]
    fn sunday_night_rolls_to_weekdays() {
        let s = weekend_program();
        assert_eq!(
            next_transition(&s, at(19, 23, 0)),
            transition("06:00", 18.0, false)
        );
    }

    #[test]
    fn midweek_night_stays_on_weekdays() {
        let mut s = Schedule::default();
        s.set_temp(DayGroup::Weekdays, 0, 19.0).unwrap();
        assert_eq!(
            next_transition(&s, at(15, 22, 0)),
            transition("06:00", 19.0, false)
        );
    }

    #[test]
    fn weekend_uses_its_own_group() {
        let s = weekend_program();
        let now = at(18, 8, 30);
        assert_eq!(today_group(now), DayGroup::Saturday);
        assert_eq!(current_slot(&s, now), &slot("08:00", 20.0));
    }

    #[test]
    fn evaluate_bundles_all_answers() {
        let s = Schedule::default();
        let e = evaluate(&s, at(14, 11, 0));
        assert_eq!(e.group, DayGroup::Weekdays);
        assert_eq!(e.current, slot("10:00", 15.0));
        assert_eq!(e.next, transition("17:00", 18.0, true));
    }
}
