use crate::occurrences::Period;
use chrono::{Days, NaiveDate};

/// Every `step` days starting on the seed.
///
/// Also backs plain weekly rules, which are daily rules with a step of
/// seven times the interval.
#[derive(Clone, Debug)]
pub(crate) struct Daily {
    seed: NaiveDate,
    step: u64,
}

impl Daily {
    pub(crate) fn new(seed: NaiveDate, step: u64) -> Self {
        Daily { seed, step }
    }

    pub(crate) fn period(&self, k: u64) -> Option<Period> {
        let date = self.seed.checked_add_days(Days::new(k.checked_mul(self.step)?))?;

        Some(Period {
            first_day: date,
            dates: vec![date],
        })
    }

    /// Index of the last period starting on or before `min`.
    pub(crate) fn first_period(&self, min: NaiveDate) -> u64 {
        if min <= self.seed {
            0
        } else {
            (min - self.seed).num_days() as u64 / self.step
        }
    }
}
