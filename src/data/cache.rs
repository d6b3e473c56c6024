use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{InMemoryFeed, LivePrice};
use crate::domain::Profile;
use crate::models::BarSeries;

/// On-disk JSON cache consumed by the `analyze` binary: one series per
/// timeframe plus an optional live quote. The engine does not own this
/// format; it exists so offline runs have something to feed the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    pub series: Vec<BarSeries>,
    #[serde(default)]
    pub live: Option<LivePrice>,
}

pub fn load_cache(path: &Path) -> Result<(InMemoryFeed, Option<LivePrice>)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read bar cache {}", path.display()))?;
    let cache: CacheFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse bar cache {}", path.display()))?;

    let mut feed = InMemoryFeed::new();
    for series in cache.series {
        feed.insert(series);
    }
    Ok((feed, cache.live))
}

pub fn load_profiles(path: &Path) -> Result<Vec<Profile>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read profiles file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse profiles file {}", path.display()))
}
