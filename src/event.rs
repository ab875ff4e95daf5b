use crate::{occurrences, Occurrence, RecurrenceRule, Schedule, Window};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// An event as the CMS stores it: the base schedule and, for recurring
/// events, the rule repeating it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub schedule: Schedule,
    #[serde(default)]
    pub recurrence_rule: Option<RecurrenceRule>,
}

impl Event {
    pub fn new(schedule: Schedule, recurrence_rule: Option<RecurrenceRule>) -> Self {
        Event {
            schedule,
            recurrence_rule,
        }
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule.is_some()
    }

    pub fn is_all_day(&self) -> bool {
        self.schedule.is_all_day()
    }

    /// Start instants of the occurrences `window` admits.
    pub fn occurrences(&self, window: &Window) -> Vec<NaiveDateTime> {
        occurrences::generate(&self.schedule, self.recurrence_rule.as_ref(), window)
    }

    pub fn occurrence_intervals(&self, window: &Window) -> Vec<Occurrence> {
        self.iter_occurrences(window).intervals().collect()
    }

    pub(crate) fn iter_occurrences(&self, window: &Window) -> occurrences::Occurrences {
        occurrences::occurrences(&self.schedule, self.recurrence_rule.as_ref(), window)
    }
}
