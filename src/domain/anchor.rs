use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A user-chosen swing extreme: a calendar date plus optional time-of-day,
/// bound to exactly one bar at evaluation time.
///
/// With `time: None` the anchor binds to the first bar of that UTC date.
/// Intraday profiles are expected to carry an exact open time; date-only
/// references are the norm for D1/W1 structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<NaiveTime>,
}

impl AnchorPoint {
    pub fn new(date: NaiveDate, time: Option<NaiveTime>) -> Self {
        Self { date, time }
    }

    /// True when a bar opened at `timestamp_ms` matches this reference.
    pub(crate) fn matches(&self, timestamp_ms: i64) -> bool {
        let Some(dt) = DateTime::from_timestamp_millis(timestamp_ms) else {
            return false;
        };
        if dt.date_naive() != self.date {
            return false;
        }
        match self.time {
            Some(t) => dt.time() == t,
            None => true,
        }
    }
}

impl std::fmt::Display for AnchorPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.time {
            Some(t) => write!(f, "{} {}", self.date, t.format("%H:%M")),
            None => write!(f, "{}", self.date),
        }
    }
}
