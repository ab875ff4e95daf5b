use crate::Schedule;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_time(time(hour, minute))
}

pub fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day).and_time(NaiveTime::MIN)
}

/// 2020-11-01 13:20 until 2020-11-30 14:20, the event the CMS model tests use.
pub fn november_event() -> Schedule {
    Schedule::new(date(2020, 11, 1), time(13, 20), date(2020, 11, 30), time(14, 20)).unwrap()
}

/// A one hour event on `start` at `hour:minute`.
pub fn one_hour_at(start: NaiveDate, hour: u32, minute: u32) -> Schedule {
    Schedule::new(start, time(hour, minute), start, time(hour + 1, minute)).unwrap()
}
