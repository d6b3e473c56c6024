use serde::{Deserialize, Serialize};

use crate::config::Price;
use crate::domain::{AnchorPoint, Bar, Timeframe};

/// Ordered bar history for one timeframe (oldest -> newest, unique
/// timestamps). The engine never mutates a series; it only scans it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub timeframe: Timeframe,
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(timeframe: Timeframe, bars: Vec<Bar>) -> Self {
        debug_assert!(
            bars.windows(2).all(|w| w[0].timestamp_ms < w[1].timestamp_ms),
            "bar feed must be strictly time-ordered with unique timestamps"
        );
        Self { timeframe, bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_close(&self) -> Option<Price> {
        self.bars.last().map(|b| b.close)
    }

    /// First bar matching the anchor reference, or None (anchor-resolution
    /// failure) when the feed has no such bar.
    pub(crate) fn resolve(&self, anchor: &AnchorPoint) -> Option<Bar> {
        self.bars.iter().find(|b| anchor.matches(b.timestamp_ms)).copied()
    }

    /// Bars from `timestamp_ms` onward, inclusive.
    pub(crate) fn tail_from(&self, timestamp_ms: i64) -> &[Bar] {
        let start = self.bars.partition_point(|b| b.timestamp_ms < timestamp_ms);
        &self.bars[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    fn day_series(closes: &[f64]) -> BarSeries {
        // 2024-01-01 onwards, one bar per day
        let epoch = 1_704_067_200_000; // 2024-01-01T00:00:00Z
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(epoch + i as i64 * DAY_MS, c, c + 1.0, c - 1.0, c))
            .collect();
        BarSeries::new(Timeframe::D1, bars)
    }

    #[test]
    fn resolves_date_only_anchor_to_first_bar_of_day() {
        let series = day_series(&[100.0, 101.0, 102.0]);
        let anchor = AnchorPoint::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), None);
        let bar = series.resolve(&anchor).unwrap();
        assert_eq!(bar.close.value(), 101.0);
    }

    #[test]
    fn missing_anchor_resolves_to_none() {
        let series = day_series(&[100.0, 101.0]);
        let anchor = AnchorPoint::new(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), None);
        assert!(series.resolve(&anchor).is_none());
    }

    #[test]
    fn tail_from_is_inclusive() {
        let series = day_series(&[100.0, 101.0, 102.0]);
        let second_ts = series.bars()[1].timestamp_ms;
        let tail = series.tail_from(second_ts);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].timestamp_ms, second_ts);
    }

    #[test]
    fn empty_series_is_tolerated() {
        let series = BarSeries::new(Timeframe::H1, vec![]);
        assert!(series.last_close().is_none());
        let anchor = AnchorPoint::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), None);
        assert!(series.resolve(&anchor).is_none());
    }
}
