use serde::{Deserialize, Serialize};

use crate::domain::FibRatio;

/// Risk tier attached to a level by the classifier cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Anchor,
    LowRisk,
    MediumRisk,
    HighRisk,
    SuperHighRisk,
    BreakoutRisk,
    Checkpoint,
    PossibleReverse,
    HighRiskPossibleReversal,
    Invalid,
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anchor => write!(f, "Anchor"),
            Self::LowRisk => write!(f, "Low Risk"),
            Self::MediumRisk => write!(f, "Medium Risk"),
            Self::HighRisk => write!(f, "High Risk"),
            Self::SuperHighRisk => write!(f, "Super High Risk"),
            Self::BreakoutRisk => write!(f, "Breakout Risk"),
            Self::Checkpoint => write!(f, "Checkpoint"),
            Self::PossibleReverse => write!(f, "Possible Reverse/New Structure"),
            Self::HighRiskPossibleReversal => write!(f, "High Risk / Possible Reversal"),
            Self::Invalid => write!(f, "INVALID"),
        }
    }
}

/// Per-level classification outcome.
///
/// INVARIANT: `invalidated` is monotonic within one evaluation. `relabel`
/// refuses to touch an invalidated level, so no later cascade rule can
/// resurrect one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub label: RiskLabel,
    pub invalidated: bool,
}

impl LevelState {
    pub(crate) fn labelled(label: RiskLabel) -> Self {
        Self {
            label,
            invalidated: false,
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.label = RiskLabel::Invalid;
        self.invalidated = true;
    }

    pub(crate) fn relabel(&mut self, label: RiskLabel) {
        if !self.invalidated {
            self.label = label;
        }
    }
}

/// How deep price has actually engaged a level: a wick into it (yellow on
/// the reference charts) versus a close beyond it (green).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ReachTone {
    #[default]
    Untouched,
    Touched,
    Broken,
}

impl std::fmt::Display for ReachTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Untouched => write!(f, "untouched"),
            Self::Touched => write!(f, "touched"),
            Self::Broken => write!(f, "broken"),
        }
    }
}

/// Full classifier output for one structure: the breakout flag plus the
/// per-ratio label and engagement tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Level 1.0 reached by the current price in the trade direction.
    /// A live-price check only; history never sets this flag.
    pub breakout: bool,
    states: [LevelState; FibRatio::COUNT],
    tones: [ReachTone; FibRatio::COUNT],
}

impl Classification {
    pub(crate) fn with_defaults(breakout: bool) -> Self {
        Self {
            breakout,
            states: [LevelState::labelled(RiskLabel::LowRisk); FibRatio::COUNT],
            tones: [ReachTone::Untouched; FibRatio::COUNT],
        }
    }

    #[inline]
    pub fn state(&self, ratio: FibRatio) -> LevelState {
        self.states[ratio.index()]
    }

    #[inline]
    pub fn tone(&self, ratio: FibRatio) -> ReachTone {
        self.tones[ratio.index()]
    }

    pub(crate) fn state_mut(&mut self, ratio: FibRatio) -> &mut LevelState {
        &mut self.states[ratio.index()]
    }

    pub(crate) fn set_tone(&mut self, ratio: FibRatio, tone: ReachTone) {
        self.tones[ratio.index()] = tone;
    }

    pub fn iter(&self) -> impl Iterator<Item = (FibRatio, LevelState, ReachTone)> + '_ {
        FibRatio::ALL.into_iter().map(|r| (r, self.state(r), self.tone(r)))
    }
}
