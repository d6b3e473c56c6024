use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use strum::IntoEnumIterator;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use fib_sniper::config::Price;
use fib_sniper::data::{load_cache, load_profiles};
use fib_sniper::utils::epoch_ms_to_utc;
use fib_sniper::{
    BarFeed, EvaluatedProfile, InstrumentSpec, Timeframe, evaluate_fusion,
};

/// Evaluate fib swing structures from a JSON bar cache and print the fused
/// multi-timeframe verdict.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON bar cache (series per timeframe, optional live price)
    #[arg(long, default_value = "bars.json")]
    cache: PathBuf,

    /// Path to the profiles JSON file
    #[arg(long, default_value = "profiles.json")]
    profiles: PathBuf,

    /// Override the pip size for non-reference instruments
    #[arg(long)]
    pip_size: Option<f64>,
}

#[derive(Tabled)]
struct LevelRow {
    ratio: String,
    price: String,
    label: String,
    tone: String,
    collected: String,
}

fn level_rows(member: &EvaluatedProfile) -> Vec<LevelRow> {
    member
        .classification
        .iter()
        .map(|(ratio, state, tone)| LevelRow {
            ratio: ratio.to_string(),
            price: Price::new(member.levels.price(ratio)).to_string(),
            label: state.label.to_string(),
            tone: tone.to_string(),
            collected: member
                .engagement
                .get(ratio)
                .map(|s| s.collected.to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    // 1. Load the offline data
    let (feed, live) = load_cache(&args.cache).context("loading bar cache")?;
    let profiles = load_profiles(&args.profiles).context("loading profiles")?;

    let loaded: Vec<String> = Timeframe::iter()
        .filter(|tf| feed.series(*tf).is_some())
        .map(|tf| tf.to_string())
        .collect();
    log::info!("loaded series for: {}", loaded.join(", "));
    if let Some(quote) = live {
        log::info!("live price {} @ {}", quote.price, epoch_ms_to_utc(quote.timestamp_ms));
    } else {
        log::info!("no live price; falling back to last closes");
    }

    // 2. Instrument calibration
    let mut instrument = InstrumentSpec::default();
    if let Some(pip) = args.pip_size {
        instrument.pip_size = pip;
    }

    // 3. Evaluate and fuse
    let fusion = evaluate_fusion(&profiles, &feed, live, &instrument)
        .context("fusion over the configured profiles")?;

    println!(
        "BIAS: {}  (buy {} vs sell {})",
        fusion.bias, fusion.score_buy, fusion.score_sell
    );
    println!("PRIMARY: {}", fusion.primary);
    for finding in &fusion.findings {
        println!("  - {}", finding);
    }

    // 4. Per-profile level tables
    for member in &fusion.members {
        println!();
        println!("{}", member);
        let mut table = Table::new(level_rows(member));
        table.with(Style::rounded());
        println!("{}", table);
    }

    Ok(())
}
