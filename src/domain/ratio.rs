use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The fixed extension-ratio ladder projected from the A->B swing.
///
/// A closed enum rather than raw f64 keys: a level set always carries exactly
/// these fifteen ratios, and lookups can never miss.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum FibRatio {
    R0,
    R0_236,
    R0_382,
    R0_500,
    R0_618,
    R0_786,
    R1_000,
    R1_272,
    R1_382,
    R1_414,
    R1_618,
    R2_272,
    R2_618,
    R3_618,
    R4_236,
}

impl FibRatio {
    pub const COUNT: usize = 15;

    /// All ratios, shallow to deep.
    pub const ALL: [Self; Self::COUNT] = [
        Self::R0,
        Self::R0_236,
        Self::R0_382,
        Self::R0_500,
        Self::R0_618,
        Self::R0_786,
        Self::R1_000,
        Self::R1_272,
        Self::R1_382,
        Self::R1_414,
        Self::R1_618,
        Self::R2_272,
        Self::R2_618,
        Self::R3_618,
        Self::R4_236,
    ];

    /// Entry candidates for the nearest-entry readout.
    pub const ENTRY: [Self; 4] = [Self::R0_500, Self::R0_618, Self::R0_786, Self::R1_000];

    /// Key zones: tracked by the engagement machine and targeted by
    /// cross-timeframe confluence.
    pub const KEY_ZONES: [Self; 4] = [Self::R0_500, Self::R1_000, Self::R1_382, Self::R1_618];

    /// Post-breakout checkpoints.
    pub const CHECKPOINTS: [Self; 3] = [Self::R1_382, Self::R1_618, Self::R2_618];

    /// Deep extensions compared against a higher profile's key zones.
    pub const DEEP: [Self; 3] = [Self::R2_618, Self::R3_618, Self::R4_236];

    /// The ladder walked by the next-checkpoint readout before breakout.
    pub const PRE_BREAK_PATH: [Self; 3] = [Self::R0_500, Self::R0_786, Self::R1_000];

    pub const fn value(self) -> f64 {
        match self {
            Self::R0 => 0.0,
            Self::R0_236 => 0.236,
            Self::R0_382 => 0.382,
            Self::R0_500 => 0.5,
            Self::R0_618 => 0.618,
            Self::R0_786 => 0.786,
            Self::R1_000 => 1.0,
            Self::R1_272 => 1.272,
            Self::R1_382 => 1.382,
            Self::R1_414 => 1.414,
            Self::R1_618 => 1.618,
            Self::R2_272 => 2.272,
            Self::R2_618 => 2.618,
            Self::R3_618 => 3.618,
            Self::R4_236 => 4.236,
        }
    }

    /// Position in the shallow-to-deep order; indexes the per-level arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for FibRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::R0 => write!(f, "0"),
            Self::R1_000 => write!(f, "1"),
            other => write!(f, "{}", other.value()),
        }
    }
}
