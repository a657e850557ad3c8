//! One-minute time bucketing.

use chrono::{DateTime, TimeDelta, TimeZone, Timelike};

/// Returns the start of the one-minute bucket containing `timestamp`.
///
/// Seconds and sub-second components are set to zero. The result stays in
/// the time zone of the input; no conversion is performed.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tickbar_aggregate::bucket;
///
/// let t = Utc.with_ymd_and_hms(2024, 1, 15, 14, 37, 45).unwrap();
/// assert_eq!(bucket(&t), Utc.with_ymd_and_hms(2024, 1, 15, 14, 37, 0).unwrap());
/// assert_eq!(bucket(&bucket(&t)), bucket(&t));
/// ```
#[must_use]
pub fn bucket<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> DateTime<Tz> {
    let into_minute = TimeDelta::seconds(i64::from(timestamp.second()))
        + TimeDelta::nanoseconds(i64::from(timestamp.nanosecond()));

    // A minute start is always representable, so this only falls back at
    // the very edge of chrono's range.
    timestamp
        .clone()
        .checked_sub_signed(into_minute)
        .unwrap_or_else(|| timestamp.clone())
}

/// Returns true if `timestamp` is the start of a one-minute bucket.
#[must_use]
pub fn is_bucket_aligned<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> bool {
    timestamp.second() == 0 && timestamp.nanosecond() == 0
}
