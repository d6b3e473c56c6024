use crate::analysis::{classify, derive_levels, track_engagement};
use crate::config::{InstrumentSpec, Price};
use crate::data::{BarFeed, LivePrice};
use crate::domain::{Direction, FibRatio, Profile};
use crate::error::EvalError;
use crate::models::{
    Classification, EvaluatedProfile, ExtensionStatus, LevelSet, NearestEntry, NextCheckpoint,
    Stage,
};

/// Resolves one profile against its bar feed and composes the full snapshot.
///
/// The one canonical evaluation path: chart annotation, textual preview and
/// fusion all consume this output rather than re-deriving levels locally.
/// Fails with `InsufficientData` when an anchor matches no bar or a derived
/// price is non-finite; never returns a partial result.
pub fn evaluate_profile<F: BarFeed + ?Sized>(
    profile: &Profile,
    feed: &F,
    live: Option<LivePrice>,
    instrument: &InstrumentSpec,
) -> Result<EvaluatedProfile, EvalError> {
    let series = feed
        .series(profile.timeframe)
        .ok_or_else(|| EvalError::insufficient(format!("no {} bars in feed", profile.timeframe)))?;

    let resolve = |name: &str, anchor| {
        series.resolve(anchor).ok_or_else(|| {
            EvalError::insufficient(format!(
                "anchor {} ({}) matches no {} bar",
                name, anchor, profile.timeframe
            ))
        })
    };
    let bar_a = resolve("A", &profile.a)?;
    let bar_b = resolve("B", &profile.b)?;
    let bar_c = resolve("C", &profile.c)?;

    // Buy reads A/C off the lows and B off the high; Sell is the mirror.
    let price_a = bar_a.base_extreme(profile.direction);
    let price_b = bar_b.forward_extreme(profile.direction);
    let price_c = bar_c.base_extreme(profile.direction);
    let levels = derive_levels(profile.direction, price_a, price_b, price_c)?;

    let reference = live
        .map(|l| l.price.value())
        .or_else(|| series.last_close().map(|p| p.value()))
        .ok_or_else(|| EvalError::insufficient("empty bar series"))?;

    let bars_from_c = series.tail_from(bar_c.timestamp_ms);
    let classification = classify(profile.direction, &levels, bars_from_c, Some(reference));

    // Engagement scans from the breakout bar onward: the first bar since C
    // whose wick crossed level 1.0. A live-only breakout has no such bar
    // yet, so every count stays 0.
    let level_one = levels.price(FibRatio::R1_000);
    let break_idx = bars_from_c
        .iter()
        .position(|b| profile.direction.reaches(b.forward_extreme(profile.direction), level_one));
    let engagement_bars = break_idx.map_or(&[][..], |i| &bars_from_c[i..]);
    let engagement = track_engagement(&levels, classification.breakout, engagement_bars, instrument);

    let nearest_entry = find_nearest_entry(&levels, reference, instrument);
    let next_checkpoint = find_next_checkpoint(
        profile.direction,
        &levels,
        reference,
        classification.breakout,
        &nearest_entry,
        instrument,
    );
    let extension = extension_status(profile.direction, &levels, reference);
    let stage = derive_stage(
        profile.direction,
        &levels,
        reference,
        &classification,
        extension,
        &nearest_entry,
    );

    log::debug!(
        "{}: stage {}, breakout {}, extension {}",
        profile,
        stage,
        classification.breakout,
        extension
    );

    Ok(EvaluatedProfile {
        profile: *profile,
        anchor_a: Price::new(price_a),
        anchor_b: Price::new(price_b),
        anchor_c: Price::new(price_c),
        levels,
        classification,
        engagement,
        reference_price: Price::new(reference),
        nearest_entry,
        next_checkpoint,
        extension,
        stage,
    })
}

/// Closest entry-ladder level to the reference price; inside the entry band
/// it reads "currently at" rather than merely nearest.
fn find_nearest_entry(levels: &LevelSet, price: f64, instrument: &InstrumentSpec) -> NearestEntry {
    let mut best = FibRatio::ENTRY[0];
    let mut best_dist = instrument.pips_between(price, levels.price(best));
    for ratio in &FibRatio::ENTRY[1..] {
        let dist = instrument.pips_between(price, levels.price(*ratio));
        if dist < best_dist {
            best = *ratio;
            best_dist = dist;
        }
    }
    NearestEntry {
        ratio: best,
        price: Price::new(levels.price(best)),
        distance: best_dist,
        at_level: best_dist <= instrument.entry_band,
    }
}

/// Pre-break: the next untried level of the 0.5 / 0.786 / 1.0 path still
/// ahead of price, with 0.786 collapsing into 1.0 when it coincides with the
/// nearest-entry pick. Post-break: the nearest checkpoint still ahead.
fn find_next_checkpoint(
    direction: Direction,
    levels: &LevelSet,
    price: f64,
    breakout: bool,
    nearest: &NearestEntry,
    instrument: &InstrumentSpec,
) -> Option<NextCheckpoint> {
    let candidates: &[FibRatio] = if breakout {
        &FibRatio::CHECKPOINTS
    } else {
        &FibRatio::PRE_BREAK_PATH
    };

    let mut pick = candidates
        .iter()
        .copied()
        .filter(|r| direction.ahead_of(levels.price(*r), price))
        .min_by(|a, b| {
            let da = instrument.pips_between(price, levels.price(*a));
            let db = instrument.pips_between(price, levels.price(*b));
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })?;

    if !breakout && pick == FibRatio::R0_786 && nearest.ratio == FibRatio::R0_786 {
        pick = FibRatio::R1_000;
    }

    Some(NextCheckpoint {
        ratio: pick,
        price: Price::new(levels.price(pick)),
        distance: instrument.pips_between(price, levels.price(pick)),
    })
}

fn extension_status(direction: Direction, levels: &LevelSet, price: f64) -> ExtensionStatus {
    if !price.is_finite() {
        return ExtensionStatus::Unknown;
    }
    if direction.reaches(price, levels.price(FibRatio::R4_236)) {
        ExtensionStatus::ExtDone
    } else if direction.reaches(price, levels.price(FibRatio::R3_618)) {
        ExtensionStatus::ExtHigh
    } else if direction.reaches(price, levels.price(FibRatio::R2_618)) {
        ExtensionStatus::EntryInvalid
    } else {
        ExtensionStatus::Valid
    }
}

fn derive_stage(
    direction: Direction,
    levels: &LevelSet,
    price: f64,
    classification: &Classification,
    extension: ExtensionStatus,
    nearest: &NearestEntry,
) -> Stage {
    if !price.is_finite() {
        return Stage::Unknown;
    }
    match extension {
        ExtensionStatus::EntryInvalid | ExtensionStatus::ExtHigh | ExtensionStatus::ExtDone => {
            return Stage::Extended;
        }
        ExtensionStatus::Valid | ExtensionStatus::Unknown => {}
    }
    if classification.breakout {
        if direction.reaches(price, levels.price(FibRatio::R1_382)) {
            return Stage::Checkpoint;
        }
        return Stage::PostBreak;
    }
    if nearest.at_level {
        return Stage::EntryZone;
    }
    if direction.reaches(price, levels.price(FibRatio::R0)) {
        Stage::Above
    } else {
        Stage::Below
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::InMemoryFeed;
    use crate::domain::{AnchorPoint, Bar, ProfileId, Timeframe};
    use crate::models::BarSeries;
    use chrono::NaiveDate;

    const DAY_MS: i64 = 24 * 60 * 60 * 1000;
    const EPOCH: i64 = 1_704_067_200_000; // 2024-01-01T00:00:00Z

    fn anchor(day: u32) -> AnchorPoint {
        AnchorPoint::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), None)
    }

    fn day_bar(day: u32, open: f64, high: f64, low: f64, close: f64) -> Bar {
        Bar::new(EPOCH + (day as i64 - 1) * DAY_MS, open, high, low, close)
    }

    /// Buy swing: A low 100 (day 1), B high 200 (day 2), C low 100 (day 3).
    fn swing_feed(later_bars: Vec<Bar>) -> InMemoryFeed {
        let mut bars = vec![
            day_bar(1, 120.0, 130.0, 100.0, 125.0),
            day_bar(2, 125.0, 200.0, 120.0, 190.0),
            day_bar(3, 190.0, 195.0, 100.0, 110.0),
        ];
        bars.extend(later_bars);
        InMemoryFeed::new().with(BarSeries::new(Timeframe::D1, bars))
    }

    fn buy_profile() -> Profile {
        Profile {
            id: ProfileId::new(1).unwrap(),
            direction: Direction::Buy,
            timeframe: Timeframe::D1,
            a: anchor(1),
            b: anchor(2),
            c: anchor(3),
        }
    }

    fn live(price: f64) -> Option<LivePrice> {
        Some(LivePrice {
            price: Price::new(price),
            timestamp_ms: EPOCH + 10 * DAY_MS,
        })
    }

    #[test]
    fn resolves_anchors_and_derives_the_ladder() {
        let feed = swing_feed(vec![]);
        let out =
            evaluate_profile(&buy_profile(), &feed, live(150.0), &InstrumentSpec::REFERENCE)
                .unwrap();
        assert_eq!(out.anchor_a.value(), 100.0);
        assert_eq!(out.anchor_b.value(), 200.0);
        assert_eq!(out.anchor_c.value(), 100.0);
        assert_eq!(out.levels.price(FibRatio::R1_000), 200.0);
        assert!(!out.breakout());
    }

    #[test]
    fn missing_anchor_is_insufficient_data() {
        let feed = swing_feed(vec![]);
        let mut profile = buy_profile();
        profile.c = anchor(20); // no bar on that date
        let err = evaluate_profile(&profile, &feed, live(150.0), &InstrumentSpec::REFERENCE)
            .unwrap_err();
        assert!(matches!(err, EvalError::InsufficientData { .. }));
    }

    #[test]
    fn missing_timeframe_is_insufficient_data() {
        let feed = swing_feed(vec![]);
        let mut profile = buy_profile();
        profile.timeframe = Timeframe::H4;
        assert!(
            evaluate_profile(&profile, &feed, live(150.0), &InstrumentSpec::REFERENCE).is_err()
        );
    }

    #[test]
    fn no_live_price_falls_back_to_last_close() {
        let feed = swing_feed(vec![day_bar(4, 110.0, 165.0, 108.0, 161.8)]);
        let out = evaluate_profile(&buy_profile(), &feed, None, &InstrumentSpec::REFERENCE)
            .unwrap();
        assert_eq!(out.reference_price.value(), 161.8);
        // sitting exactly on the 0.618 level
        assert_eq!(out.nearest_entry.ratio, FibRatio::R0_618);
        assert!(out.nearest_entry.at_level);
        assert_eq!(out.stage, Stage::EntryZone);
    }

    #[test]
    fn next_checkpoint_collapses_0786_into_level_one() {
        // price 178.0: nearest entry is 0.786 (178.6) and the next level
        // ahead is also 0.786, so the checkpoint readout jumps to 1.0
        let feed = swing_feed(vec![]);
        let out =
            evaluate_profile(&buy_profile(), &feed, live(178.0), &InstrumentSpec::REFERENCE)
                .unwrap();
        assert_eq!(out.nearest_entry.ratio, FibRatio::R0_786);
        let next = out.next_checkpoint.unwrap();
        assert_eq!(next.ratio, FibRatio::R1_000);
        assert_eq!(next.price.value(), 200.0);
    }

    #[test]
    fn post_break_checkpoint_is_the_nearest_ahead() {
        let feed = swing_feed(vec![day_bar(4, 110.0, 210.0, 108.0, 205.0)]);
        let out =
            evaluate_profile(&buy_profile(), &feed, live(205.0), &InstrumentSpec::REFERENCE)
                .unwrap();
        assert!(out.breakout());
        assert_eq!(out.stage, Stage::PostBreak);
        let next = out.next_checkpoint.unwrap();
        assert_eq!(next.ratio, FibRatio::R1_382); // 238.2 is closest ahead
    }

    #[test]
    fn deep_price_is_extended_and_entry_invalid() {
        let feed = swing_feed(vec![day_bar(4, 110.0, 370.0, 108.0, 365.0)]);
        let out =
            evaluate_profile(&buy_profile(), &feed, live(365.0), &InstrumentSpec::REFERENCE)
                .unwrap();
        assert_eq!(out.extension, ExtensionStatus::EntryInvalid);
        assert_eq!(out.stage, Stage::Extended);
        assert!(out.classification.state(FibRatio::R0_500).invalidated);
    }

    #[test]
    fn exhausted_extension_is_ext_done() {
        let feed = swing_feed(vec![]);
        let out =
            evaluate_profile(&buy_profile(), &feed, live(530.0), &InstrumentSpec::REFERENCE)
                .unwrap();
        assert_eq!(out.extension, ExtensionStatus::ExtDone);
    }

    #[test]
    fn live_only_breakout_collects_nothing() {
        // No historical bar ever crossed 200; live price alone broke out.
        let feed = swing_feed(vec![day_bar(4, 110.0, 199.0, 108.0, 198.0)]);
        let out =
            evaluate_profile(&buy_profile(), &feed, live(201.0), &InstrumentSpec::REFERENCE)
                .unwrap();
        assert!(out.breakout());
        assert!(out.engagement.iter().all(|(_, s)| s.collected == 0));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let feed = swing_feed(vec![day_bar(4, 110.0, 240.0, 108.0, 238.0)]);
        let first =
            evaluate_profile(&buy_profile(), &feed, live(239.0), &InstrumentSpec::REFERENCE)
                .unwrap();
        let second =
            evaluate_profile(&buy_profile(), &feed, live(239.0), &InstrumentSpec::REFERENCE)
                .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn sell_profile_reads_mirrored_anchor_prices() {
        let bars = vec![
            day_bar(1, 180.0, 200.0, 170.0, 175.0), // A high 200
            day_bar(2, 175.0, 178.0, 100.0, 105.0), // B low 100
            day_bar(3, 105.0, 200.0, 102.0, 190.0), // C high 200
        ];
        let feed = InMemoryFeed::new().with(BarSeries::new(Timeframe::D1, bars));
        let profile = Profile {
            direction: Direction::Sell,
            ..buy_profile()
        };
        let out = evaluate_profile(&profile, &feed, live(150.0), &InstrumentSpec::REFERENCE)
            .unwrap();
        assert_eq!(out.anchor_a.value(), 200.0);
        assert_eq!(out.anchor_b.value(), 100.0);
        assert_eq!(out.anchor_c.value(), 200.0);
        assert_eq!(out.levels.price(FibRatio::R1_000), 100.0);
    }
}
