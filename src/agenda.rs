use crate::{occurrences::Occurrences, Event, Occurrence, Window};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Several events whose occurrences are listed together in time order.
#[derive(Clone, Debug, Default)]
pub struct Agenda {
    events: Vec<Event>,
}

/// One occurrence in an [`Agenda`] and the event it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgendaEntry<'a> {
    pub event: &'a Event,
    pub occurrence: Occurrence,
}

impl Agenda {
    pub fn new() -> Self {
        Agenda::default()
    }

    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Every occurrence of every event `window` admits, ascending by start.
    ///
    /// Events starting at the same instant come out in the order they were
    /// added. Identical events are both listed.
    pub fn between<'a>(&'a self, window: &Window) -> impl Iterator<Item = AgendaEntry<'a>> + 'a {
        let mut min_heap: BinaryHeap<_> = self
            .events
            .iter()
            .enumerate()
            .map(|(index, event)| (index, event.iter_occurrences(window)))
            .filter_map(|(index, mut iter)| {
                iter.next().map(|cursor| Reverse(IterHolder { cursor, index, iter }))
            })
            .collect();

        tracing::debug!(
            events = self.events.len(),
            active = min_heap.len(),
            "merging agenda"
        );

        let duration_of = move |index: usize| self.events[index].schedule.duration();

        std::iter::from_fn(move || {
            let Reverse(IterHolder {
                cursor,
                index,
                mut iter,
            }) = min_heap.pop()?;

            if let Some(next) = iter.next() {
                min_heap.push(Reverse(IterHolder {
                    cursor: next,
                    index,
                    iter,
                }));
            }

            Some(AgendaEntry {
                event: &self.events[index],
                occurrence: Occurrence::starting_at(cursor, duration_of(index)),
            })
        })
    }
}

/// Holds an event's occurrence iterator and the latest start that came out
/// of it
struct IterHolder {
    cursor: chrono::NaiveDateTime,
    index: usize,
    iter: Occurrences,
}

impl Eq for IterHolder {}

impl PartialEq for IterHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for IterHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ties broken by insertion order so equal starts come out deterministically
impl Ord for IterHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cursor
            .cmp(&other.cursor)
            .then(self.index.cmp(&other.index))
    }
}
