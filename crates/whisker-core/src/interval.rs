// File: crates/whisker-core/src/interval.rs
// Summary: Time intervals in epoch milliseconds and their optional values.

use chrono::{DateTime, Utc};

use crate::error::ChartError;

/// A span of time in epoch milliseconds. Spans in a series may overlap and
/// can have irregular lengths.
/// Contract: `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: i64,
    pub end: i64,
}

impl TimeInterval {
    /// Create an interval, rejecting `start > end`.
    pub fn new(start: i64, end: i64) -> Result<Self, ChartError> {
        if start > end {
            return Err(ChartError::InvalidArgument {
                name: "interval",
                reason: "start is after end",
            });
        }
        Ok(Self { start, end })
    }

    /// Create an interval from UTC datetimes (millisecond precision).
    pub fn from_datetimes(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, ChartError> {
        Self::new(start.timestamp_millis(), end.timestamp_millis())
    }

    /// Midpoint of the span: `start + (end - start) / 2`. Integer division,
    /// so odd-length spans floor toward the start.
    pub const fn middle(&self) -> i64 {
        self.start + (self.end - self.start) / 2
    }
}

/// One interval/value pair in a series. The value may be absent (a gap).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalValue {
    pub interval: TimeInterval,
    pub value: Option<f64>,
}

impl IntervalValue {
    pub const fn new(interval: TimeInterval, value: Option<f64>) -> Self {
        Self { interval, value }
    }
}
