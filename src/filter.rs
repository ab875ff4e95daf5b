//! Event list filtering as the CMS list view applies it.

use crate::error::Result;
use crate::schedule::end_of_day;
use crate::{Event, Window};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllDay {
    #[default]
    Both,
    /// Only events for which [`Event::is_all_day`] holds.
    AllDay,
    NotAllDay,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurring {
    #[default]
    Any,
    Recurring,
    NotRecurring,
}

/// Filter values submitted with the event list. Every field is optional.
///
/// Date and time bounds are compared field by field against the base
/// schedule, not against occurrences: `after_time` constrains the start
/// time of day whatever the date.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EventFilter {
    pub after_date: Option<NaiveDate>,
    pub after_time: Option<NaiveTime>,
    pub before_date: Option<NaiveDate>,
    pub before_time: Option<NaiveTime>,
    pub all_day: AllDay,
    pub recurring: Recurring,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let schedule = &event.schedule;

        let in_range = self.after_date.map_or(true, |after| schedule.start_date() >= after)
            && self.after_time.map_or(true, |after| schedule.start_time() >= after)
            && self.before_date.map_or(true, |before| schedule.end_date() <= before)
            && self.before_time.map_or(true, |before| schedule.end_time() <= before);

        let all_day = match self.all_day {
            AllDay::Both => true,
            AllDay::AllDay => event.is_all_day(),
            AllDay::NotAllDay => !event.is_all_day(),
        };

        let recurring = match self.recurring {
            Recurring::Any => true,
            Recurring::Recurring => event.is_recurring(),
            Recurring::NotRecurring => !event.is_recurring(),
        };

        in_range && all_day && recurring
    }

    pub fn apply<'a, I>(&'a self, events: I) -> impl Iterator<Item = &'a Event> + 'a
    where
        I: IntoIterator<Item = &'a Event>,
        I::IntoIter: 'a,
    {
        events.into_iter().filter(move |event| self.matches(event))
    }

    /// The range to expand occurrences over, if the filter bounds one.
    ///
    /// Without a `before_date` there is no finite window and `None` comes
    /// back. Missing times widen the range to the whole day.
    pub fn window(&self) -> Result<Option<Window>> {
        let before = match self.before_date {
            Some(before) => before.and_time(self.before_time.unwrap_or_else(end_of_day)),
            None => return Ok(None),
        };
        let after = match self.after_date {
            Some(after) => after.and_time(self.after_time.unwrap_or(NaiveTime::MIN)),
            None => chrono::NaiveDateTime::MIN,
        };

        let window = Window::new(after, before).map_err(|err| {
            tracing::debug!(%err, "could not apply filter");
            err
        })?;
        Ok(Some(window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Options;
    use crate::test_helpers::*;
    use crate::{Frequency, RecurrenceRule, Schedule, ValidationError};

    fn events() -> Vec<Event> {
        let daily = RecurrenceRule::new(Frequency::Daily, Options::default()).unwrap();

        vec![
            Event::new(november_event(), None),
            Event::new(Schedule::all_day(date(2020, 11, 5), date(2020, 11, 5)).unwrap(), None),
            Event::new(one_hour_at(date(2020, 12, 1), 9, 0), Some(daily)),
        ]
    }

    fn matching(filter: &EventFilter, events: &[Event]) -> Vec<usize> {
        events
            .iter()
            .enumerate()
            .filter(|(_, event)| filter.matches(event))
            .map(|(index, _)| index)
            .collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = EventFilter::default();

        assert_eq!(filter.all_day, AllDay::Both);
        assert_eq!(filter.recurring, Recurring::Any);
        assert_eq!(matching(&filter, &events()), vec![0, 1, 2]);
    }

    #[test]
    fn all_day_toggle() {
        let events = events();
        let only = EventFilter {
            all_day: AllDay::AllDay,
            ..EventFilter::default()
        };
        let except = EventFilter {
            all_day: AllDay::NotAllDay,
            ..EventFilter::default()
        };

        assert_eq!(matching(&only, &events), vec![1]);
        assert_eq!(matching(&except, &events), vec![0, 2]);
    }

    #[test]
    fn recurring_toggle() {
        let events = events();
        let only = EventFilter {
            recurring: Recurring::Recurring,
            ..EventFilter::default()
        };
        let except = EventFilter {
            recurring: Recurring::NotRecurring,
            ..EventFilter::default()
        };

        assert_eq!(matching(&only, &events), vec![2]);
        assert_eq!(matching(&except, &events), vec![0, 1]);
    }

    #[test]
    fn date_and_time_bounds() {
        let events = events();
        let after = EventFilter {
            after_date: Some(date(2020, 11, 2)),
            ..EventFilter::default()
        };
        let before = EventFilter {
            before_date: Some(date(2020, 11, 30)),
            ..EventFilter::default()
        };
        let late_start = EventFilter {
            after_time: Some(time(12, 0)),
            ..EventFilter::default()
        };

        assert_eq!(matching(&after, &events), vec![1, 2]);
        assert_eq!(matching(&before, &events), vec![0, 1]);
        assert_eq!(matching(&late_start, &events), vec![0]);
    }

    #[test]
    fn apply_keeps_order() {
        let events = events();
        let filter = EventFilter {
            all_day: AllDay::NotAllDay,
            ..EventFilter::default()
        };

        let kept: Vec<_> = filter.apply(&events).collect();
        assert_eq!(kept, vec![&events[0], &events[2]]);
    }

    #[test]
    fn window_needs_an_end() {
        let filter = EventFilter {
            after_date: Some(date(2020, 11, 1)),
            ..EventFilter::default()
        };

        assert_eq!(filter.window().unwrap(), None);
    }

    #[test]
    fn window_from_dates_and_times() {
        let whole_days = EventFilter {
            after_date: Some(date(2020, 11, 1)),
            before_date: Some(date(2020, 11, 4)),
            ..EventFilter::default()
        };
        let with_times = EventFilter {
            after_time: Some(time(8, 0)),
            before_time: Some(time(18, 0)),
            ..whole_days.clone()
        };

        assert_eq!(
            whole_days.window().unwrap(),
            Some(Window::whole_days(date(2020, 11, 1), date(2020, 11, 4)).unwrap())
        );
        assert_eq!(
            with_times.window().unwrap(),
            Some(Window::new(at(2020, 11, 1, 8, 0), at(2020, 11, 4, 18, 0)).unwrap())
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let filter = EventFilter {
            after_date: Some(date(2020, 11, 4)),
            before_date: Some(date(2020, 11, 1)),
            ..EventFilter::default()
        };

        assert!(matches!(
            filter.window(),
            Err(ValidationError::InvertedWindow { .. })
        ));
    }

    #[test]
    fn deserializes_form_values() {
        let filter: EventFilter = serde_json::from_str(
            r#"{ "after_date": "2020-11-01", "after_time": "08:00:00",
                 "all_day": "not_all_day", "recurring": "recurring" }"#,
        )
        .unwrap();

        assert_eq!(filter.after_date, Some(date(2020, 11, 1)));
        assert_eq!(filter.after_time, Some(time(8, 0)));
        assert_eq!(filter.before_date, None);
        assert_eq!(filter.all_day, AllDay::NotAllDay);
        assert_eq!(filter.recurring, Recurring::Recurring);
    }
}
