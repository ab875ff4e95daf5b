//! Recurrence rules and the options they are built from.

use crate::error::{Result, ValidationError};
use crate::schedule::end_of_day;
use crate::Frequency;
use chrono::{Datelike as _, NaiveDate, NaiveDateTime, Weekday};
use serde::Deserialize;

/// What to do when a monthly or yearly recurrence lands on a day the target
/// month does not have (the 31st in April, Feb 29 outside leap years).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthOverflow {
    /// The month contributes no occurrence.
    #[default]
    Skip,
    /// The occurrence moves to the last day of the month.
    Clamp,
}

/// Which occurrence of `weekday_for_monthly` inside a month is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeekOfMonth {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Last,
    /// The ordinal the seed date itself has within its month: a seed on the
    /// 9th is in its month's second week, so every month uses the second
    /// matching weekday.
    SameAsSeed,
}

impl TryFrom<i32> for WeekOfMonth {
    type Error = ValidationError;

    fn try_from(week: i32) -> Result<Self> {
        match week {
            1 => Ok(WeekOfMonth::First),
            2 => Ok(WeekOfMonth::Second),
            3 => Ok(WeekOfMonth::Third),
            4 => Ok(WeekOfMonth::Fourth),
            5 => Ok(WeekOfMonth::Fifth),
            -1 => Ok(WeekOfMonth::Last),
            0 => Ok(WeekOfMonth::SameAsSeed),
            other => Err(ValidationError::InvalidWeekOfMonth(other)),
        }
    }
}

/// Rule parameters as the storage layer hands them over. A stored record
/// (frequency plus these fields, `weekdays_for_weekly` possibly `null`)
/// deserializes straight into a validated [`RecurrenceRule`].
///
/// Weekdays are `0` (Monday) through `6` (Sunday). Weeks are `1` through `5`,
/// `-1` for the last one and `0` for the seed's own week.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub interval: Option<i32>,
    pub weekdays_for_weekly: Vec<i32>,
    pub weekday_for_monthly: Option<i32>,
    pub week_for_monthly: Option<i32>,
    pub end_date: Option<NaiveDate>,
    pub month_overflow: MonthOverflow,
}

#[derive(Deserialize)]
struct Record {
    frequency: Frequency,
    #[serde(default)]
    interval: Option<i32>,
    #[serde(default)]
    weekdays_for_weekly: Option<Vec<i32>>,
    #[serde(default)]
    weekday_for_monthly: Option<i32>,
    #[serde(default)]
    week_for_monthly: Option<i32>,
    #[serde(default, alias = "recurrence_end_date")]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    month_overflow: MonthOverflow,
}

/// A validated recurrence rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "Record")]
pub struct RecurrenceRule {
    frequency: Frequency,
    interval: u32,
    weekdays_for_weekly: Vec<Weekday>,
    weekday_for_monthly: Option<Weekday>,
    week_for_monthly: Option<WeekOfMonth>,
    end_date: Option<NaiveDate>,
    month_overflow: MonthOverflow,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, options: Options) -> Result<Self> {
        let interval = match options.interval {
            None => 1,
            Some(interval) if interval >= 1 => interval as u32,
            Some(interval) => return Err(ValidationError::NonPositiveInterval(interval)),
        };

        let mut weekdays_for_weekly = options
            .weekdays_for_weekly
            .iter()
            .map(|&day| weekday_from_index(day))
            .collect::<Result<Vec<_>>>()?;
        weekdays_for_weekly.sort_by_key(Weekday::num_days_from_monday);
        weekdays_for_weekly.dedup();

        let weekday_for_monthly = options.weekday_for_monthly.map(weekday_from_index).transpose()?;
        let week_for_monthly = options.week_for_monthly.map(WeekOfMonth::try_from).transpose()?;

        if !weekdays_for_weekly.is_empty() && frequency != Frequency::Weekly {
            return Err(ValidationError::WeeklyWeekdaysOnNonWeekly(frequency));
        }
        if weekday_for_monthly.is_some() && frequency != Frequency::Monthly {
            return Err(ValidationError::MonthlyWeekdayOnNonMonthly(frequency));
        }
        if week_for_monthly.is_some() && weekday_for_monthly.is_none() {
            return Err(ValidationError::WeekWithoutWeekday);
        }

        Ok(RecurrenceRule {
            frequency,
            interval,
            weekdays_for_weekly,
            weekday_for_monthly,
            week_for_monthly,
            end_date: options.end_date,
            month_overflow: options.month_overflow,
        })
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Sorted Monday first, without duplicates.
    pub fn weekdays_for_weekly(&self) -> &[Weekday] {
        &self.weekdays_for_weekly
    }

    pub fn weekday_for_monthly(&self) -> Option<Weekday> {
        self.weekday_for_monthly
    }

    pub fn week_for_monthly(&self) -> Option<WeekOfMonth> {
        self.week_for_monthly
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn month_overflow(&self) -> MonthOverflow {
        self.month_overflow
    }

    /// Last instant an occurrence may start at. The end date is inclusive.
    pub fn until(&self) -> Option<NaiveDateTime> {
        self.end_date.map(|date| date.and_time(end_of_day()))
    }
}

impl TryFrom<Record> for RecurrenceRule {
    type Error = ValidationError;

    fn try_from(record: Record) -> Result<Self> {
        let options = Options {
            interval: record.interval,
            weekdays_for_weekly: record.weekdays_for_weekly.unwrap_or_default(),
            weekday_for_monthly: record.weekday_for_monthly,
            week_for_monthly: record.week_for_monthly,
            end_date: record.end_date,
            month_overflow: record.month_overflow,
        };
        RecurrenceRule::new(record.frequency, options)
    }
}

fn weekday_from_index(day: i32) -> Result<Weekday> {
    match day {
        0 => Ok(Weekday::Mon),
        1 => Ok(Weekday::Tue),
        2 => Ok(Weekday::Wed),
        3 => Ok(Weekday::Thu),
        4 => Ok(Weekday::Fri),
        5 => Ok(Weekday::Sat),
        6 => Ok(Weekday::Sun),
        other => Err(ValidationError::InvalidWeekday(other)),
    }
}

/// 1-based count of `date`'s weekday within its month (the 9th is always
/// the second of its weekday).
pub(crate) fn weekday_ordinal(date: NaiveDate) -> u8 {
    ((date.day() - 1) / 7 + 1) as u8
}
