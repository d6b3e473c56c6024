mod engagement;
mod evaluated;
mod fusion;
mod level_set;
mod series;
mod status;

pub use engagement::{EngagePhase, EngagementMap, EngagementState};
pub use evaluated::{EvaluatedProfile, ExtensionStatus, NearestEntry, NextCheckpoint, Stage};
pub use fusion::{Alignment, Bias, Finding, FusionResult};
pub use level_set::LevelSet;
pub use series::BarSeries;
pub use status::{Classification, LevelState, ReachTone, RiskLabel};
