//! Weekly time windows that gate blocked-service enforcement.
//!
//! Each weekday carries at most one half-open window `[start, end)` measured
//! in minutes since local midnight. Windows never span midnight.

use crate::DomainError;
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDayRange")]
pub struct DayRange {
    start: u16,
    end: u16,
}

#[derive(Deserialize)]
struct RawDayRange {
    start: u32,
    end: u32,
}

impl TryFrom<RawDayRange> for DayRange {
    type Error = DomainError;

    fn try_from(raw: RawDayRange) -> Result<Self, Self::Error> {
        let start = u16::try_from(raw.start).map_err(|_| out_of_range(raw.start))?;
        let end = u16::try_from(raw.end).map_err(|_| out_of_range(raw.end))?;
        Self::new(start, end)
    }
}

fn out_of_range(value: u32) -> DomainError {
    DomainError::InvalidSchedule(format!(
        "minute {value} is outside of [0, {MINUTES_PER_DAY})"
    ))
}

impl DayRange {
    pub fn new(start: u16, end: u16) -> Result<Self, DomainError> {
        if start >= MINUTES_PER_DAY {
            return Err(out_of_range(start.into()));
        }
        if end >= MINUTES_PER_DAY {
            return Err(out_of_range(end.into()));
        }
        if end < start {
            return Err(DomainError::InvalidSchedule(format!(
                "window end {end} is before start {start}"
            )));
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, minute_of_day: u16) -> bool {
        self.start <= minute_of_day && minute_of_day < self.end
    }
}

fn default_time_zone() -> Tz {
    Tz::UTC
}

/// Per-weekday blocking windows in a fixed time zone.
///
/// `Clone` is a deep copy: the schedule owns all of its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default = "default_time_zone")]
    time_zone: Tz,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    mon: Option<DayRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tue: Option<DayRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wed: Option<DayRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thu: Option<DayRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fri: Option<DayRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sat: Option<DayRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sun: Option<DayRange>,
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeeklySchedule {
    /// The neutral schedule: nothing is ever blocked.
    pub fn empty() -> Self {
        Self {
            time_zone: default_time_zone(),
            mon: None,
            tue: None,
            wed: None,
            thu: None,
            fri: None,
            sat: None,
            sun: None,
        }
    }

    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn with_day(mut self, weekday: Weekday, range: DayRange) -> Self {
        self.set_day(weekday, Some(range));
        self
    }

    pub fn set_day(&mut self, weekday: Weekday, range: Option<DayRange>) {
        *self.day_mut(weekday) = range;
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn day(&self, weekday: Weekday) -> Option<DayRange> {
        match weekday {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        }
    }

    fn day_mut(&mut self, weekday: Weekday) -> &mut Option<DayRange> {
        match weekday {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        }
    }

    pub fn is_empty(&self) -> bool {
        [
            self.mon, self.tue, self.wed, self.thu, self.fri, self.sat, self.sun,
        ]
        .iter()
        .all(|d| d.map_or(true, |r| r.is_empty()))
    }

    #[inline]
    pub fn is_blocked(&self, weekday: Weekday, minute_of_day: u16) -> bool {
        self.day(weekday)
            .is_some_and(|range| range.contains(minute_of_day))
    }

    /// Evaluates the schedule for `now` converted into the schedule's zone.
    pub fn is_blocked_at(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.time_zone);
        // hour() < 24 and minute() < 60, so this always fits in u16.
        let minute = (local.hour() * 60 + local.minute()) as u16;
        self.is_blocked(local.weekday(), minute)
    }
}
