use serde::{Deserialize, Serialize};

use crate::domain::FibRatio;

/// The fifteen extension prices of one structure, indexed by ratio.
/// Computed once per evaluation and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    prices: [f64; FibRatio::COUNT],
}

impl LevelSet {
    pub(crate) fn from_fn(f: impl Fn(FibRatio) -> f64) -> Self {
        let mut prices = [0.0; FibRatio::COUNT];
        for ratio in FibRatio::ALL {
            prices[ratio.index()] = f(ratio);
        }
        Self { prices }
    }

    #[inline]
    pub fn price(&self, ratio: FibRatio) -> f64 {
        self.prices[ratio.index()]
    }

    /// Midpoint between two levels. The cascade uses mid(1.618, 2.618) as a
    /// pre-2.618 tripwire.
    pub fn midpoint(&self, a: FibRatio, b: FibRatio) -> f64 {
        (self.price(a) + self.price(b)) / 2.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (FibRatio, f64)> + '_ {
        FibRatio::ALL.into_iter().map(|r| (r, self.price(r)))
    }
}
