//! Expansion of a schedule and its rule into concrete occurrences.

use crate::{
    daily::Daily, monthly::Monthly, weekly::Weekly, yearly::Yearly, Frequency, RecurrenceRule,
    Schedule, Window,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::VecDeque;

/// One realization of an event in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Occurrence {
    /// An occurrence lasting `duration` from `start`. An end outside the
    /// representable range is pinned to that range's bound.
    pub(crate) fn starting_at(start: NaiveDateTime, duration: Duration) -> Self {
        let end = match start.checked_add_signed(duration) {
            Some(end) => end,
            None if duration < Duration::zero() => NaiveDateTime::MIN,
            None => NaiveDateTime::MAX,
        };

        Occurrence { start, end }
    }
}

/// Candidate dates of one recurrence step, ascending, none before
/// `first_day`.
#[derive(Debug)]
pub(crate) struct Period {
    pub first_day: NaiveDate,
    pub dates: Vec<NaiveDate>,
}

#[derive(Clone, Debug)]
enum Stepper {
    Once(NaiveDate),
    Daily(Daily),
    Weekly(Weekly),
    Monthly(Monthly),
    Yearly(Yearly),
}

impl Stepper {
    fn new(seed: NaiveDate, rule: Option<&RecurrenceRule>) -> Self {
        let rule = match rule {
            Some(rule) => rule,
            None => return Stepper::Once(seed),
        };
        let interval = u64::from(rule.interval());

        match rule.frequency() {
            Frequency::Daily => Stepper::Daily(Daily::new(seed, interval)),
            Frequency::Weekly if rule.weekdays_for_weekly().is_empty() => {
                Stepper::Daily(Daily::new(seed, 7 * interval))
            }
            Frequency::Weekly => Stepper::Weekly(Weekly::new(
                seed,
                rule.interval(),
                rule.weekdays_for_weekly(),
            )),
            Frequency::Monthly => Stepper::Monthly(Monthly::new(seed, rule)),
            Frequency::Yearly => Stepper::Yearly(Yearly::new(
                seed,
                rule.interval(),
                rule.month_overflow(),
            )),
        }
    }

    fn period(&self, k: u64) -> Option<Period> {
        match self {
            Stepper::Once(seed) if k == 0 => Some(Period {
                first_day: *seed,
                dates: vec![*seed],
            }),
            Stepper::Once(_) => None,
            Stepper::Daily(daily) => daily.period(k),
            Stepper::Weekly(weekly) => weekly.period(k),
            Stepper::Monthly(monthly) => monthly.period(k),
            Stepper::Yearly(yearly) => yearly.period(k),
        }
    }

    /// First period worth computing for a window starting at `min`.
    fn first_period(&self, min: NaiveDate) -> u64 {
        match self {
            Stepper::Daily(daily) => daily.first_period(min),
            Stepper::Weekly(weekly) => weekly.first_period(min),
            Stepper::Monthly(monthly) => monthly.first_period(min),
            Stepper::Yearly(yearly) => yearly.first_period(min),
            Stepper::Once(_) => 0,
        }
    }
}

/// Lazy, finite iterator over occurrence start instants.
///
/// Starts come out strictly ascending. The iterator owns copies of its
/// inputs: a clone continues from the same position, and a fresh one built
/// from the same inputs yields the same sequence.
#[derive(Clone, Debug)]
pub struct Occurrences {
    stepper: Stepper,
    start_time: NaiveTime,
    duration: Duration,
    window: Window,
    limit: NaiveDateTime,
    next_period: u64,
    pending: VecDeque<NaiveDate>,
    done: bool,
}

impl Occurrences {
    /// Pairs every start with its end.
    pub fn intervals(self) -> impl Iterator<Item = Occurrence> {
        let duration = self.duration;
        self.map(move |start| Occurrence::starting_at(start, duration))
    }

    fn finish(&mut self) -> Option<NaiveDateTime> {
        self.done = true;
        self.pending.clear();
        None
    }
}

impl Iterator for Occurrences {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        loop {
            if let Some(date) = self.pending.pop_front() {
                let start = date.and_time(self.start_time);
                if start > self.limit {
                    return self.finish();
                }
                if self.window.admits(start, self.duration) {
                    tracing::trace!(%start, "occurrence");
                    return Some(start);
                }
                continue;
            }

            if self.done {
                return None;
            }

            let period = match self.stepper.period(self.next_period) {
                Some(period) if period.first_day <= self.limit.date() => period,
                _ => return self.finish(),
            };
            self.pending.extend(period.dates);
            self.next_period = match self.next_period.checked_add(1) {
                Some(next) => next,
                None => return self.finish(),
            };
        }
    }
}

impl std::iter::FusedIterator for Occurrences {}

/// Occurrences of `schedule` repeated by `rule` that `window` admits.
///
/// Without a rule the schedule occurs once, on its own start. With a rule,
/// stepping stops at the window's end or at the rule's end date, whichever
/// comes first, so unbounded rules still terminate.
pub fn occurrences(
    schedule: &Schedule,
    rule: Option<&RecurrenceRule>,
    window: &Window,
) -> Occurrences {
    let seed = schedule.start_date();
    let stepper = Stepper::new(seed, rule);
    let duration = schedule.duration();

    let limit = match rule.and_then(RecurrenceRule::until) {
        Some(until) if until < window.end() => until,
        _ => window.end(),
    };
    let next_period = stepper.first_period(window.earliest_start(duration).date());

    tracing::debug!(
        seed = %schedule.start(),
        frequency = ?rule.map(RecurrenceRule::frequency),
        interval = rule.map(RecurrenceRule::interval),
        window_start = %window.start(),
        window_end = %window.end(),
        %limit,
        next_period,
        "expanding occurrences"
    );

    Occurrences {
        stepper,
        start_time: schedule.start_time(),
        duration,
        window: *window,
        limit,
        next_period,
        pending: VecDeque::new(),
        done: false,
    }
}

/// Start instants of every occurrence `window` admits, ascending.
#[tracing::instrument(skip_all, fields(seed = %schedule.start()))]
pub fn generate(
    schedule: &Schedule,
    rule: Option<&RecurrenceRule>,
    window: &Window,
) -> Vec<NaiveDateTime> {
    let starts: Vec<_> = occurrences(schedule, rule, window).collect();
    tracing::debug!(count = starts.len(), "generated occurrences");
    starts
}

/// Like [`generate`] for a raw `[start, end]` range. An inverted range
/// yields nothing instead of an error.
pub fn generate_between(
    schedule: &Schedule,
    rule: Option<&RecurrenceRule>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<NaiveDateTime> {
    match Window::new(start, end) {
        Ok(window) => generate(schedule, rule, &window),
        Err(err) => {
            tracing::debug!(%err, "empty result for inverted range");
            Vec::new()
        }
    }
}
