use serde::{Deserialize, Serialize};

use crate::config::Price;
use crate::domain::Timeframe;
use crate::models::BarSeries;

/// Read-only source of bar history, one series per timeframe.
///
/// The engine performs no I/O of its own; whatever fetched these bars (HTTP
/// proxy, websocket, test fixture) sits behind this trait. A missing or
/// empty series is an anchor-resolution failure for the evaluation that
/// needed it, never a panic.
pub trait BarFeed {
    fn series(&self, timeframe: Timeframe) -> Option<&BarSeries>;
}

/// Latest quote from the upstream price feed. Optional everywhere: with no
/// live price the evaluator falls back to the most recent bar close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LivePrice {
    pub price: Price,
    pub timestamp_ms: i64,
}

/// Owns one series per timeframe. The reference feed used by the CLI and
/// the test suite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InMemoryFeed {
    series: Vec<BarSeries>,
}

impl InMemoryFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a series, replacing any existing one for the same timeframe.
    pub fn insert(&mut self, series: BarSeries) {
        self.series.retain(|s| s.timeframe != series.timeframe);
        self.series.push(series);
    }

    pub fn with(mut self, series: BarSeries) -> Self {
        self.insert(series);
        self
    }

    pub fn timeframes(&self) -> impl Iterator<Item = Timeframe> + '_ {
        self.series.iter().map(|s| s.timeframe)
    }
}

impl BarFeed for InMemoryFeed {
    fn series(&self, timeframe: Timeframe) -> Option<&BarSeries> {
        self.series.iter().find(|s| s.timeframe == timeframe)
    }
}
