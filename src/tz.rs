//! Placing naive occurrence instants into a concrete time zone.

use crate::error::{Result, ValidationError};
use crate::Occurrence;
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset as _, TimeZone as _};
use chrono_tz::Tz;

/// Resolves an IANA zone name such as `Europe/Berlin`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| ValidationError::UnknownTimezone(name.to_string()))
}

/// Interprets a wall-clock instant in `timezone`.
///
/// When clocks fall back the earlier of the two instants is used. When they
/// spring forward the wall time is read with the offset in effect before
/// the gap, so 02:30 on a night that skips 02:00-03:00 becomes 03:30.
pub fn localize(naive: NaiveDateTime, timezone: Tz) -> DateTime<Tz> {
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(instant) => instant,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            let before_gap = timezone
                .offset_from_utc_datetime(&(naive - Duration::days(1)))
                .fix()
                .local_minus_utc();
            let utc = naive - Duration::seconds(i64::from(before_gap));
            timezone.from_utc_datetime(&utc)
        }
    }
}

impl Occurrence {
    /// Start and end placed in `timezone`.
    ///
    /// Both ends are localized separately, so across a DST change the
    /// elapsed time differs from the naive duration by the offset change.
    pub fn localize(&self, timezone: Tz) -> (DateTime<Tz>, DateTime<Tz>) {
        (localize(self.start, timezone), localize(self.end, timezone))
    }
}
