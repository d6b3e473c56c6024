use serde::{Deserialize, Serialize};

use crate::config::Pips;
use crate::domain::{Direction, FibRatio, ProfileId};
use crate::models::EvaluatedProfile;

/// Directional bias of the fused multi-timeframe view.
///
/// A tied weighted score is a distinct outcome, not silently resolved: the
/// primary profile's side rides along for display context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    Buy,
    Sell,
    Mixed { htf_side: Direction },
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Mixed { htf_side } => write!(f, "MIXED (HTF {})", htf_side),
        }
    }
}

/// How the lower-weighted profiles sit relative to the primary's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    FullyAligned,
    FullyOpposed,
    MajorityOpposed,
    MajorityAlignedMixed,
}

impl std::fmt::Display for Alignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullyAligned => write!(f, "all lower timeframes share the primary's side"),
            Self::FullyOpposed => write!(f, "every lower timeframe opposes the primary"),
            Self::MajorityOpposed => write!(f, "most lower timeframes oppose the primary"),
            Self::MajorityAlignedMixed => {
                write!(f, "lower timeframes lean with the primary, but not unanimously")
            }
        }
    }
}

/// One narrative/confluence observation produced by fusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Finding {
    Alignment(Alignment),
    /// A lower profile's deep extension landing inside the band around one
    /// of the primary's key zones.
    Confluence {
        profile: ProfileId,
        deep: FibRatio,
        zone: FibRatio,
        distance: Pips,
    },
    /// Every resolved profile shares one side; there is no lower-weighted
    /// set to compare against.
    NoLowerProfiles,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alignment(a) => write!(f, "{}", a),
            Self::Confluence {
                profile,
                deep,
                zone,
                distance,
            } => write!(
                f,
                "{}'s {} extension sits {} from the primary's {} zone",
                profile, deep, distance, zone
            ),
            Self::NoLowerProfiles => {
                write!(f, "no lower-weighted profiles to compare against the primary")
            }
        }
    }
}

/// Aggregated verdict over up to seven evaluated profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    pub bias: Bias,
    /// The highest-weight fully-resolved profile; narrative anchor
    /// regardless of which side won the score.
    pub primary: EvaluatedProfile,
    /// Every profile that resolved, primary included.
    pub members: Vec<EvaluatedProfile>,
    pub score_buy: u32,
    pub score_sell: u32,
    pub findings: Vec<Finding>,
}
