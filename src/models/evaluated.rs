use serde::{Deserialize, Serialize};

use crate::config::{Pips, Price, StageScore, Weight};
use crate::domain::{FibRatio, Profile};
use crate::models::{Classification, EngagementMap, LevelSet};

/// Where the reference price sits relative to the entry ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestEntry {
    pub ratio: FibRatio,
    pub price: Price,
    pub distance: Pips,
    /// Within the entry band: "currently at" rather than merely nearest.
    pub at_level: bool,
}

impl std::fmt::Display for NearestEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.at_level {
            write!(f, "currently at {} ({})", self.ratio, self.price)
        } else {
            write!(f, "nearest {} ({}, {})", self.ratio, self.price, self.distance)
        }
    }
}

/// The next level still ahead of price in the trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextCheckpoint {
    pub ratio: FibRatio,
    pub price: Price,
    pub distance: Pips,
}

impl std::fmt::Display for NextCheckpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {} ({})", self.ratio, self.price, self.distance)
    }
}

/// Entry validity against the deep extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionStatus {
    Valid,
    /// Price at or beyond 2.618: entries under this structure are gone.
    EntryInvalid,
    /// Price at or beyond 3.618.
    ExtHigh,
    /// Price at or beyond 4.236: the extension is exhausted.
    ExtDone,
    /// Inputs were not finite.
    Unknown,
}

impl std::fmt::Display for ExtensionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::EntryInvalid => write!(f, "entry_invalid"),
            Self::ExtHigh => write!(f, "ext_high"),
            Self::ExtDone => write!(f, "ext_done"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Structural stage of one profile, the input to fusion scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Unknown,
    /// On the pre-swing side of the anchor (level 0).
    Below,
    /// Past the anchor but not engaged with the entry ladder.
    Above,
    /// Sitting inside the entry band of an entry level.
    EntryZone,
    /// Level 1.0 broken.
    PostBreak,
    /// Broken and the first checkpoint (1.382) reached.
    Checkpoint,
    /// At or beyond 2.618.
    Extended,
}

impl Stage {
    pub const fn score(self) -> StageScore {
        match self {
            Self::Unknown | Self::Below | Self::Above | Self::EntryZone => StageScore::new(1),
            Self::PostBreak => StageScore::new(2),
            Self::Checkpoint => StageScore::new(3),
            Self::Extended => StageScore::new(4),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Below => write!(f, "below"),
            Self::Above => write!(f, "above"),
            Self::EntryZone => write!(f, "entry zone"),
            Self::PostBreak => write!(f, "post-break"),
            Self::Checkpoint => write!(f, "checkpoint"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

/// The full snapshot computed for one profile.
///
/// Recomputed from scratch on every evaluation off the full bar history;
/// never mutated incrementally, never reused across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedProfile {
    pub profile: Profile,
    /// Swing prices the anchors resolved to (A/C on the base side, B forward).
    pub anchor_a: Price,
    pub anchor_b: Price,
    pub anchor_c: Price,
    pub levels: LevelSet,
    pub classification: Classification,
    pub engagement: EngagementMap,
    /// Live price when present, else the most recent bar close.
    pub reference_price: Price,
    pub nearest_entry: NearestEntry,
    pub next_checkpoint: Option<NextCheckpoint>,
    pub extension: ExtensionStatus,
    pub stage: Stage,
}

impl EvaluatedProfile {
    #[inline]
    pub fn breakout(&self) -> bool {
        self.classification.breakout
    }

    #[inline]
    pub fn weight(&self) -> Weight {
        self.profile.timeframe.weight()
    }

    /// Timeframe weight x stage score; one side's fusion contribution.
    pub fn fusion_score(&self) -> u32 {
        self.weight().value() * self.stage.score().value()
    }
}

impl std::fmt::Display for EvaluatedProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | stage: {} | entry: {} | ext: {}",
            self.profile,
            if self.breakout() { "broken" } else { "not broken" },
            self.stage,
            self.nearest_entry,
            self.extension,
        )?;
        if let Some(cp) = &self.next_checkpoint {
            write!(f, " | next: {}", cp)?;
        }
        Ok(())
    }
}
