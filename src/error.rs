use crate::Frequency;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Rejected schedule, rule, window or filter input.
///
/// Every variant is raised at construction time. Once a generator exists it
/// cannot fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("schedule ends on {end} before it starts on {start}")]
    ScheduleEndsBeforeStart { start: NaiveDate, end: NaiveDate },

    #[error("recurrence interval must be at least 1, got {0}")]
    NonPositiveInterval(i32),

    #[error("invalid weekday {0}, expected 0 (Monday) through 6 (Sunday)")]
    InvalidWeekday(i32),

    #[error("invalid week of month {0}, expected 1 through 5, -1 (last) or 0 (same as seed)")]
    InvalidWeekOfMonth(i32),

    #[error("weekday for monthly recurrence given for {0} frequency")]
    MonthlyWeekdayOnNonMonthly(Frequency),

    #[error("weekdays for weekly recurrence given for {0} frequency")]
    WeeklyWeekdaysOnNonWeekly(Frequency),

    #[error("week of month given without a weekday")]
    WeekWithoutWeekday,

    #[error("window ends at {end} before it starts at {start}")]
    InvertedWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
