use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::config::Weight;

const MS_IN_MIN: i64 = 60 * 1000;
const MS_IN_H: i64 = MS_IN_MIN * 60;
const MS_IN_D: i64 = MS_IN_H * 24;

/// Chart timeframes a profile can be bound to.
///
/// Each carries a fixed fusion weight; the weekly structure outranks the
/// daily, and so on down to 15 minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    M15,
    M30,
    H1,
    H4,
    D1,
    W1,
}

impl Timeframe {
    pub const fn weight(self) -> Weight {
        match self {
            Self::M15 => Weight::new(10),
            Self::M30 => Weight::new(20),
            Self::H1 => Weight::new(30),
            Self::H4 => Weight::new(40),
            Self::D1 => Weight::new(50),
            Self::W1 => Weight::new(60),
        }
    }

    pub const fn interval_ms(self) -> i64 {
        match self {
            Self::M15 => 15 * MS_IN_MIN,
            Self::M30 => 30 * MS_IN_MIN,
            Self::H1 => MS_IN_H,
            Self::H4 => 4 * MS_IN_H,
            Self::D1 => MS_IN_D,
            Self::W1 => 7 * MS_IN_D,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::M15 => write!(f, "15m"),
            Self::M30 => write!(f, "30m"),
            Self::H1 => write!(f, "1h"),
            Self::H4 => write!(f, "4h"),
            Self::D1 => write!(f, "1D"),
            Self::W1 => write!(f, "1W"),
        }
    }
}
