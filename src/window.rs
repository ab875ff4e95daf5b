use crate::error::{Result, ValidationError};
use crate::schedule::end_of_day;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;

/// How an occurrence has to relate to a window to be reported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusion {
    /// The occurrence starts inside the window.
    #[default]
    Start,
    /// The occurrence starts or ends inside the window.
    Touching,
}

/// Closed query range `[start, end]`, both ends inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Window {
    start: NaiveDateTime,
    end: NaiveDateTime,
    inclusion: Inclusion,
}

impl Window {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(ValidationError::InvertedWindow { start, end });
        }

        Ok(Window {
            start,
            end,
            inclusion: Inclusion::default(),
        })
    }

    /// Midnight of `start` through midnight of `end`.
    ///
    /// The end bound is the very beginning of `end`, so an occurrence later
    /// that day is outside the window.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Window::new(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    /// Every instant of every day from `first` through `last`.
    pub fn whole_days(first: NaiveDate, last: NaiveDate) -> Result<Self> {
        Window::new(first.and_time(NaiveTime::MIN), last.and_time(end_of_day()))
    }

    pub fn with_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.inclusion = inclusion;
        self
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn inclusion(&self) -> Inclusion {
        self.inclusion
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether an occurrence starting at `start` and lasting `duration` is
    /// reported for this window.
    pub fn admits(&self, start: NaiveDateTime, duration: Duration) -> bool {
        match self.inclusion {
            Inclusion::Start => self.contains(start),
            Inclusion::Touching => {
                self.contains(start)
                    || start
                        .checked_add_signed(duration)
                        .map_or(false, |end| self.contains(end))
            }
        }
    }

    /// No occurrence starting before this instant can be admitted.
    pub(crate) fn earliest_start(&self, duration: Duration) -> NaiveDateTime {
        match self.inclusion {
            Inclusion::Start => self.start,
            Inclusion::Touching if duration > Duration::zero() => self
                .start
                .checked_sub_signed(duration)
                .unwrap_or(NaiveDateTime::MIN),
            Inclusion::Touching => self.start,
        }
    }
}
