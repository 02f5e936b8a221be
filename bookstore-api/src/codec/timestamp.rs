use thiserror::Error;
use time::{Date, OffsetDateTime};

use crate::proto::Timestamp;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("invalid nanoseconds `{0}`")]
    InvalidNanoseconds(i32),
    #[error("seconds `{0}` out of range")]
    OutOfRange(i64),
}

pub type TimestampResult<T> = Result<T, TimestampError>;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

impl Timestamp {
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(date_time: OffsetDateTime) -> Self {
        Self {
            seconds: date_time.unix_timestamp(),
            nanos: date_time.nanosecond() as i32,
        }
    }
}

/// Decodes into a UTC date-time.
///
/// Nanos outside `0..1_000_000_000` and seconds outside the representable
/// range are rejected.
impl TryFrom<Timestamp> for OffsetDateTime {
    type Error = TimestampError;

    fn try_from(timestamp: Timestamp) -> TimestampResult<Self> {
        if !(0..NANOS_PER_SECOND).contains(&timestamp.nanos) {
            return Err(TimestampError::InvalidNanoseconds(timestamp.nanos));
        }
        Self::from_unix_timestamp_nanos(
            i128::from(timestamp.seconds) * i128::from(NANOS_PER_SECOND)
                + i128::from(timestamp.nanos),
        )
        .map_err(|_| TimestampError::OutOfRange(timestamp.seconds))
    }
}

/// Encodes a calendar date as the instant of its start of day in UTC.
impl From<Date> for Timestamp {
    fn from(date: Date) -> Self {
        date.midnight().assume_utc().into()
    }
}

/// Decodes the UTC calendar date containing the instant.
impl TryFrom<Timestamp> for Date {
    type Error = TimestampError;

    fn try_from(timestamp: Timestamp) -> TimestampResult<Self> {
        OffsetDateTime::try_from(timestamp).map(OffsetDateTime::date)
    }
}
