//! The base schedule of an event and the all-day classification.

use crate::error::{Result, ValidationError};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Start and end date/time of the base (seed) event.
///
/// The start time applies to the first day and the end time to the last, so
/// an event may span several calendar days. Only `start_date <= end_date` is
/// enforced; a same-day event whose end time precedes its start time is
/// accepted and simply has a negative duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Record")]
pub struct Schedule {
    start_date: NaiveDate,
    start_time: NaiveTime,
    end_date: NaiveDate,
    end_time: NaiveTime,
}

/// A schedule as persisted, where either time of day may be blank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub start_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
}

impl Schedule {
    pub fn new(
        start_date: NaiveDate,
        start_time: NaiveTime,
        end_date: NaiveDate,
        end_time: NaiveTime,
    ) -> Result<Self> {
        if end_date < start_date {
            return Err(ValidationError::ScheduleEndsBeforeStart {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Schedule {
            start_date,
            start_time,
            end_date,
            end_time,
        })
    }

    /// A schedule running from `00:00` on `start_date` to `23:59` on `end_date`.
    pub fn all_day(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        Schedule::new(start_date, start_of_day(), end_date, all_day_end())
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// The seed instant every recurrence is stepped from.
    pub fn start(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    /// Fixed length shared by every occurrence.
    pub fn duration(&self) -> Duration {
        self.end() - self.start()
    }

    pub fn is_all_day(&self) -> bool {
        is_all_day(self)
    }
}

impl TryFrom<Record> for Schedule {
    type Error = ValidationError;

    fn try_from(record: Record) -> Result<Self> {
        Schedule::new(
            record.start_date,
            record.start_time.unwrap_or_else(start_of_day),
            record.end_date,
            record.end_time.unwrap_or_else(end_of_day),
        )
    }
}

/// Whether the schedule starts exactly at `00:00:00.000000` and ends exactly
/// at `23:59:00.000000`.
///
/// The end bound is minute precision on purpose: `23:59:59` is not all day,
/// and neither is anything a microsecond off either bound. Calling code
/// filters on this exact pair.
pub fn is_all_day(schedule: &Schedule) -> bool {
    schedule.start_time == start_of_day() && schedule.end_time == all_day_end()
}

pub(crate) fn start_of_day() -> NaiveTime {
    NaiveTime::MIN
}

/// `23:59:00`, the end time the CMS writes for all-day events.
pub(crate) fn all_day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).expect("bug: 23:59:00 is a valid time")
}

/// Last representable microsecond of a day, used for blank end times and
/// inclusive end dates.
pub(crate) fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).expect("bug: 23:59:59.999999 is a valid time")
}
