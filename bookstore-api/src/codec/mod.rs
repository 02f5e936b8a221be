//! Conversions between wire types and domain values.

/// `google.protobuf.Timestamp` conversions for dates and date-times.
pub mod timestamp;
