//! Occurrence engine for recurring CMS events.
//!
//! An [`Event`] is a [`Schedule`] (start and end date/time of the base event)
//! plus an optional [`RecurrenceRule`]. Given a closed [`Window`] the engine
//! produces the ascending start instants of every occurrence the window
//! admits. Nothing is cached between calls and nothing touches storage.
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use event_recurrence::{rule, Frequency, RecurrenceRule, Schedule, Window};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2020, 11, d).unwrap();
//! let schedule = Schedule::new(
//!     day(1),
//!     NaiveTime::from_hms_opt(13, 20, 0).unwrap(),
//!     day(1),
//!     NaiveTime::from_hms_opt(14, 20, 0).unwrap(),
//! )
//! .unwrap();
//! let daily = RecurrenceRule::new(Frequency::Daily, rule::Options::default()).unwrap();
//! let window = Window::from_dates(day(1), day(4)).unwrap();
//!
//! let starts = event_recurrence::generate(&schedule, Some(&daily), &window);
//! assert_eq!(starts.len(), 3);
//! ```

mod agenda;
mod daily;
mod error;
mod event;
pub mod filter;
mod monthly;
mod occurrences;
pub mod rule;
pub mod schedule;
mod tz;
mod weekly;
mod window;
mod yearly;

#[cfg(test)]
mod test_helpers;

pub use agenda::{Agenda, AgendaEntry};
pub use error::{Result, ValidationError};
pub use event::Event;
pub use filter::EventFilter;
pub use occurrences::{generate, generate_between, occurrences, Occurrence, Occurrences};
pub use rule::{MonthOverflow, RecurrenceRule, WeekOfMonth};
pub use schedule::{is_all_day, Schedule};
pub use tz::{localize, parse_timezone};
pub use window::{Inclusion, Window};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        };
        f.write_str(name)
    }
}
