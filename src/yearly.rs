use crate::monthly::day_in_month;
use crate::occurrences::Period;
use crate::rule::MonthOverflow;
use chrono::{Datelike as _, NaiveDate};

#[derive(Clone, Debug)]
pub(crate) struct Yearly {
    seed: NaiveDate,
    interval: u32,
    overflow: MonthOverflow,
}

impl Yearly {
    pub(crate) fn new(seed: NaiveDate, interval: u32, overflow: MonthOverflow) -> Self {
        Yearly {
            seed,
            interval,
            overflow,
        }
    }

    pub(crate) fn period(&self, k: u64) -> Option<Period> {
        let years = i32::try_from(k.checked_mul(u64::from(self.interval))?).ok()?;
        let year = self.seed.year().checked_add(years)?;
        let first = NaiveDate::from_ymd_opt(year, self.seed.month(), 1)?;

        Some(Period {
            first_day: first,
            dates: day_in_month(first, self.seed.day(), self.overflow)
                .into_iter()
                .collect(),
        })
    }

    /// Index of the last period in a year up to `min`'s.
    pub(crate) fn first_period(&self, min: NaiveDate) -> u64 {
        let years = i64::from(min.year()) - i64::from(self.seed.year());

        if years <= 0 {
            0
        } else {
            years as u64 / u64::from(self.interval)
        }
    }
}
