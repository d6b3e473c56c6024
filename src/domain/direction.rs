use serde::{Deserialize, Serialize};

/// Trade side of a swing structure.
///
/// `Buy` is anchored on a low-high-low swing (A=low, B=high, C=low);
/// `Sell` is the mirror. Every "crossed in the trade direction" test in the
/// engine goes through the two comparators below, so the mirror logic lives
/// in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Self::Buy => 1.0,
            Self::Sell => -1.0,
        }
    }

    /// True when `price` has reached or passed `level` in the trade direction.
    #[inline]
    pub fn reaches(self, price: f64, level: f64) -> bool {
        match self {
            Self::Buy => price >= level,
            Self::Sell => price <= level,
        }
    }

    /// True when `level` still lies strictly ahead of `price` in the trade direction.
    #[inline]
    pub fn ahead_of(self, level: f64, price: f64) -> bool {
        match self {
            Self::Buy => level > price,
            Self::Sell => level < price,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}
