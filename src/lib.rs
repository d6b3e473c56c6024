#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate
pub use analysis::{evaluate_fusion, evaluate_profile};
pub use config::InstrumentSpec;
pub use data::{BarFeed, InMemoryFeed, LivePrice};
pub use domain::{AnchorPoint, Bar, Direction, FibRatio, Profile, ProfileId, Timeframe};
pub use error::EvalError;
pub use models::{BarSeries, EvaluatedProfile, FusionResult};
