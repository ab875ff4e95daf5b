use crate::occurrences::Period;
use crate::rule::{weekday_ordinal, MonthOverflow, WeekOfMonth};
use crate::RecurrenceRule;
use chrono::{Datelike as _, Months, NaiveDate, Weekday};

/// Which days of a target month occur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Selection {
    DayOfMonth(u32),
    EveryWeekday(Weekday),
    NthWeekday(Weekday, u8),
    LastWeekday(Weekday),
}

#[derive(Clone, Debug)]
pub(crate) struct Monthly {
    seed: NaiveDate,
    first_month: NaiveDate,
    interval: u32,
    selection: Selection,
    overflow: MonthOverflow,
}

impl Monthly {
    pub(crate) fn new(seed: NaiveDate, rule: &RecurrenceRule) -> Self {
        let selection = match (rule.weekday_for_monthly(), rule.week_for_monthly()) {
            (None, _) => Selection::DayOfMonth(seed.day()),
            (Some(weekday), None) => Selection::EveryWeekday(weekday),
            (Some(weekday), Some(week)) => match week {
                WeekOfMonth::First => Selection::NthWeekday(weekday, 1),
                WeekOfMonth::Second => Selection::NthWeekday(weekday, 2),
                WeekOfMonth::Third => Selection::NthWeekday(weekday, 3),
                WeekOfMonth::Fourth => Selection::NthWeekday(weekday, 4),
                WeekOfMonth::Fifth => Selection::NthWeekday(weekday, 5),
                WeekOfMonth::Last => Selection::LastWeekday(weekday),
                // resolved once, every month reuses the seed's ordinal
                WeekOfMonth::SameAsSeed => Selection::NthWeekday(weekday, weekday_ordinal(seed)),
            },
        };

        Monthly {
            seed,
            first_month: first_of_month(seed),
            interval: rule.interval(),
            selection,
            overflow: rule.month_overflow(),
        }
    }

    pub(crate) fn period(&self, k: u64) -> Option<Period> {
        let months = u32::try_from(k.checked_mul(u64::from(self.interval))?).ok()?;
        let first = self.first_month.checked_add_months(Months::new(months))?;

        let mut dates: Vec<NaiveDate> = match self.selection {
            Selection::DayOfMonth(day) => day_in_month(first, day, self.overflow)
                .into_iter()
                .collect(),
            Selection::EveryWeekday(weekday) => every_weekday(first, weekday),
            Selection::NthWeekday(weekday, n) => nth_weekday(first, weekday, n)
                .into_iter()
                .collect(),
            Selection::LastWeekday(weekday) => last_weekday(first, weekday).into_iter().collect(),
        };
        dates.retain(|date| *date >= self.seed);

        Some(Period { first_day: first, dates })
    }

    /// Index of the last period whose month starts on or before `min`.
    pub(crate) fn first_period(&self, min: NaiveDate) -> u64 {
        let months = (i64::from(min.year()) - i64::from(self.first_month.year())) * 12
            + i64::from(min.month())
            - i64::from(self.first_month.month());

        if months <= 0 {
            0
        } else {
            months as u64 / u64::from(self.interval)
        }
    }
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("bug: every month has a first day")
}

pub(crate) fn last_of_month(first: NaiveDate) -> Option<NaiveDate> {
    first.checked_add_months(Months::new(1))?.pred_opt()
}

/// `day` of the month starting at `first`, or the overflow policy's answer
/// when the month is too short.
pub(crate) fn day_in_month(first: NaiveDate, day: u32, overflow: MonthOverflow) -> Option<NaiveDate> {
    match first.with_day(day) {
        Some(date) => Some(date),
        None => match overflow {
            MonthOverflow::Skip => None,
            MonthOverflow::Clamp => last_of_month(first),
        },
    }
}

/// The `n`th `weekday` of the month, `None` if the month has fewer.
fn nth_weekday(first: NaiveDate, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(first.year(), first.month(), weekday, n)
}

fn last_weekday(first: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let last = last_of_month(first)?;
    let back = (last.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    last.with_day(last.day() - back)
}

fn every_weekday(first: NaiveDate, weekday: Weekday) -> Vec<NaiveDate> {
    (1..=5)
        .filter_map(|n| nth_weekday(first, weekday, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Options;
    use crate::test_helpers::*;
    use crate::Frequency;

    fn monthly(seed: NaiveDate, options: Options) -> Monthly {
        Monthly::new(seed, &RecurrenceRule::new(Frequency::Monthly, options).unwrap())
    }

    #[test]
    fn every_monday_of_november() {
        assert_eq!(
            every_weekday(date(2020, 11, 1), Weekday::Mon),
            vec![
                date(2020, 11, 2),
                date(2020, 11, 9),
                date(2020, 11, 16),
                date(2020, 11, 23),
                date(2020, 11, 30),
            ]
        );
    }

    #[test]
    fn fifth_weekday_missing() {
        assert_eq!(nth_weekday(date(2020, 11, 1), Weekday::Tue, 5), None);
        assert_eq!(nth_weekday(date(2020, 11, 1), Weekday::Mon, 5), Some(date(2020, 11, 30)));
    }

    #[test]
    fn last_weekday_of_month() {
        assert_eq!(last_weekday(date(2020, 11, 1), Weekday::Mon), Some(date(2020, 11, 30)));
        assert_eq!(last_weekday(date(2020, 11, 1), Weekday::Sun), Some(date(2020, 11, 29)));
        assert_eq!(last_weekday(date(2021, 2, 1), Weekday::Sun), Some(date(2021, 2, 28)));
    }

    #[test]
    fn overflow_policies() {
        assert_eq!(day_in_month(date(2021, 4, 1), 31, MonthOverflow::Skip), None);
        assert_eq!(
            day_in_month(date(2021, 4, 1), 31, MonthOverflow::Clamp),
            Some(date(2021, 4, 30))
        );
        assert_eq!(
            day_in_month(date(2020, 2, 1), 31, MonthOverflow::Clamp),
            Some(date(2020, 2, 29))
        );
    }

    #[test]
    fn seed_ordinal_is_fixed() {
        // 2020-11-09 is the second Monday of November
        let dates = monthly(
            date(2020, 11, 9),
            Options {
                weekday_for_monthly: Some(0),
                week_for_monthly: Some(0),
                ..Options::default()
            },
        );

        assert_eq!(dates.period(0).unwrap().dates, vec![date(2020, 11, 9)]);
        assert_eq!(dates.period(1).unwrap().dates, vec![date(2020, 12, 14)]);
        assert_eq!(dates.period(2).unwrap().dates, vec![date(2021, 1, 11)]);
    }

    #[test]
    fn weekdays_before_seed_are_dropped() {
        let dates = monthly(
            date(2020, 11, 10),
            Options {
                weekday_for_monthly: Some(0),
                ..Options::default()
            },
        );

        assert_eq!(
            dates.period(0).unwrap().dates,
            vec![date(2020, 11, 16), date(2020, 11, 23), date(2020, 11, 30)]
        );
    }

    #[test]
    fn nth_week_selectors() {
        let third_friday = monthly(
            date(2020, 11, 1),
            Options {
                weekday_for_monthly: Some(4),
                week_for_monthly: Some(3),
                ..Options::default()
            },
        );

        assert_eq!(third_friday.period(0).unwrap().dates, vec![date(2020, 11, 20)]);
        assert_eq!(third_friday.period(1).unwrap().dates, vec![date(2020, 12, 18)]);
    }

    #[test]
    fn skips_to_window_month() {
        let dates = monthly(
            date(2020, 1, 15),
            Options {
                interval: Some(5),
                ..Options::default()
            },
        );

        assert_eq!(dates.first_period(date(2019, 6, 1)), 0);
        assert_eq!(dates.first_period(date(2020, 5, 31)), 0);
        assert_eq!(dates.first_period(date(2020, 6, 1)), 1);
        // period 2 is November 2020, period 3 April 2021
        assert_eq!(dates.first_period(date(2021, 3, 10)), 2);
    }

    #[test]
    fn interval_steps_months_from_seed() {
        let dates = monthly(
            date(2020, 1, 31),
            Options {
                interval: Some(3),
                month_overflow: MonthOverflow::Clamp,
                ..Options::default()
            },
        );

        assert_eq!(dates.period(1).unwrap().dates, vec![date(2020, 4, 30)]);
        // no drift after clamping
        assert_eq!(dates.period(2).unwrap().dates, vec![date(2020, 7, 31)]);
    }
}
