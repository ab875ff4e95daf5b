use crate::occurrences::Period;
use chrono::{Datelike as _, Days, NaiveDate, Weekday};

const DAYS_IN_WEEK: u64 = 7;

/// Selected weekdays of every `interval`th week.
///
/// Weeks start on Monday and the first one is the week containing the seed.
/// Days of that week before the seed itself are not occurrences. Dates are
/// offset from the seed rather than from its Monday, which may precede
/// `NaiveDate::MIN`.
#[derive(Clone, Debug)]
pub(crate) struct Weekly {
    seed: NaiveDate,
    since_monday: u64,
    step: u64,
    weekdays: Vec<Weekday>,
}

impl Weekly {
    pub(crate) fn new(seed: NaiveDate, interval: u32, weekdays: &[Weekday]) -> Self {
        Weekly {
            seed,
            since_monday: u64::from(seed.weekday().num_days_from_monday()),
            step: DAYS_IN_WEEK * u64::from(interval),
            weekdays: weekdays.to_vec(),
        }
    }

    pub(crate) fn period(&self, k: u64) -> Option<Period> {
        let anchor = self
            .seed
            .checked_add_days(Days::new(k.checked_mul(self.step)?))?;
        let monday = anchor
            .checked_sub_days(Days::new(self.since_monday))
            .unwrap_or(self.seed);

        let dates = self
            .weekdays
            .iter()
            .filter_map(|day| {
                let offset = u64::from(day.num_days_from_monday());
                if offset >= self.since_monday {
                    anchor.checked_add_days(Days::new(offset - self.since_monday))
                } else {
                    anchor.checked_sub_days(Days::new(self.since_monday - offset))
                }
            })
            .filter(|date| *date >= self.seed)
            .collect();

        Some(Period {
            first_day: monday,
            dates,
        })
    }

    pub(crate) fn first_period(&self, min: NaiveDate) -> u64 {
        if min <= self.seed {
            0
        } else {
            ((min - self.seed).num_days() as u64 + self.since_monday) / self.step
        }
    }
}
