// Level projection, structural classification, engagement tracking, fusion
mod classifier;
mod engagement;
mod evaluator;
mod fusion;
mod levels;

pub use classifier::classify;
pub use engagement::track_engagement;
pub use evaluator::evaluate_profile;
pub use fusion::evaluate_fusion;
pub use levels::derive_levels;
