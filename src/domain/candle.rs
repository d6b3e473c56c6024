use serde::{Deserialize, Serialize};

use crate::config::Price;
use crate::domain::Direction;

/// One OHLC bar. Immutable, sourced externally, timestamped by its UTC open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp_ms: i64,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Bar {
    pub fn new(timestamp_ms: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp_ms,
            open: Price::new(open),
            high: Price::new(high),
            low: Price::new(low),
            close: Price::new(close),
        }
    }

    /// All four prices finite.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }

    /// Wick extreme in the trade direction: high for Buy, low for Sell.
    #[inline]
    pub fn forward_extreme(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Buy => self.high.value(),
            Direction::Sell => self.low.value(),
        }
    }

    /// Wick extreme on the swing-base side: low for Buy, high for Sell.
    /// This is the price the A and C anchors take.
    #[inline]
    pub fn base_extreme(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Buy => self.low.value(),
            Direction::Sell => self.high.value(),
        }
    }

    /// True when the bar's [low, high] range intersects the inclusive band [lo, hi].
    #[inline]
    pub fn intersects(&self, lo: f64, hi: f64) -> bool {
        self.low.value() <= hi && self.high.value() >= lo
    }
}
