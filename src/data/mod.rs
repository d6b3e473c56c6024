// The engine's read-only boundary: bar feeds and the live quote
mod cache;
mod feed;

pub use cache::{CacheFile, load_cache, load_profiles};
pub use feed::{BarFeed, InMemoryFeed, LivePrice};
