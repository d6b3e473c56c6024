// Domain types and value objects
mod anchor;
mod candle;
mod direction;
mod profile;
mod ratio;
mod timeframe;

// Re-export commonly used types
pub use anchor::AnchorPoint;
pub use candle::Bar;
pub use direction::Direction;
pub use profile::{Profile, ProfileId};
pub use ratio::FibRatio;
pub use timeframe::Timeframe;
