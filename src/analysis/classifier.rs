use crate::domain::{Bar, Direction, FibRatio};
use crate::models::{Classification, LevelSet, ReachTone, RiskLabel};

/// Classifies the structural state of one level ladder.
///
/// `bars_from_c` is the history from the C anchor onward, inclusive.
/// The breakout flag is a live-price check only; the history scan feeds the
/// reach tests behind the invalidation cascade and the reach tones.
pub fn classify(
    direction: Direction,
    levels: &LevelSet,
    bars_from_c: &[Bar],
    current_price: Option<f64>,
) -> Classification {
    // Wick and close extremes since C, in the trade direction.
    let wick_extreme = extreme(bars_from_c, direction, |b| b.forward_extreme(direction));
    let close_extreme = extreme(bars_from_c, direction, |b| b.close.value());

    let reached = |level: f64| -> bool {
        wick_extreme.is_some_and(|x| direction.reaches(x, level))
            || current_price.is_some_and(|p| direction.reaches(p, level))
    };
    // Closes only, history only: the "definitively broken" test.
    let closed_beyond = |level: f64| -> bool {
        close_extreme.is_some_and(|x| direction.reaches(x, level))
    };

    let breakout =
        current_price.is_some_and(|p| direction.reaches(p, levels.price(FibRatio::R1_000)));

    let mut out = Classification::with_defaults(breakout);

    // Default labels. 0.786 and 1.0 escalate once price has tried the first
    // checkpoints: a return to the entry ladder from up there is a different
    // trade than the one the user planned.
    let checkpoint_tried =
        reached(levels.price(FibRatio::R1_382)) || reached(levels.price(FibRatio::R1_618));

    out.state_mut(FibRatio::R0).relabel(RiskLabel::Anchor);
    out.state_mut(FibRatio::R0_236).relabel(RiskLabel::LowRisk);
    out.state_mut(FibRatio::R0_382).relabel(RiskLabel::LowRisk);
    out.state_mut(FibRatio::R0_500).relabel(RiskLabel::LowRisk);
    out.state_mut(FibRatio::R0_618).relabel(RiskLabel::MediumRisk);
    out.state_mut(FibRatio::R0_786).relabel(if checkpoint_tried {
        RiskLabel::SuperHighRisk
    } else {
        RiskLabel::HighRisk
    });
    out.state_mut(FibRatio::R1_000).relabel(if checkpoint_tried {
        RiskLabel::SuperHighRisk
    } else {
        RiskLabel::BreakoutRisk
    });
    for ratio in [
        FibRatio::R1_272,
        FibRatio::R1_382,
        FibRatio::R1_414,
        FibRatio::R1_618,
        FibRatio::R2_272,
        FibRatio::R2_618,
    ] {
        out.state_mut(ratio).relabel(RiskLabel::Checkpoint);
    }
    out.state_mut(FibRatio::R3_618).relabel(RiskLabel::PossibleReverse);
    out.state_mut(FibRatio::R4_236).relabel(RiskLabel::PossibleReverse);

    // Invalidation cascade, shallow tripwire first. Later rules override
    // earlier labels; invalidation itself is one-way.
    let reached_2618 = reached(levels.price(FibRatio::R2_618));
    let midpoint = levels.midpoint(FibRatio::R1_618, FibRatio::R2_618);

    if reached(midpoint) && !reached_2618 {
        out.state_mut(FibRatio::R0).relabel(RiskLabel::HighRiskPossibleReversal);
        out.state_mut(FibRatio::R0_500).relabel(RiskLabel::SuperHighRisk);
        for ratio in [FibRatio::R0_618, FibRatio::R0_786, FibRatio::R1_000] {
            out.state_mut(ratio).invalidate();
        }
    }

    if reached_2618 {
        out.state_mut(FibRatio::R0).relabel(RiskLabel::HighRiskPossibleReversal);
        out.state_mut(FibRatio::R0_500).relabel(RiskLabel::SuperHighRisk);
        for ratio in [
            FibRatio::R0_500,
            FibRatio::R0_618,
            FibRatio::R0_786,
            FibRatio::R1_000,
        ] {
            out.state_mut(ratio).invalidate();
        }
    }

    if reached(levels.price(FibRatio::R4_236)) {
        // Extension exhausted: nothing under this structure is tradeable.
        for ratio in FibRatio::ALL {
            out.state_mut(ratio).invalidate();
        }
    }

    for (ratio, price) in levels.iter() {
        let tone = if closed_beyond(price) {
            ReachTone::Broken
        } else if reached(price) {
            ReachTone::Touched
        } else {
            ReachTone::Untouched
        };
        out.set_tone(ratio, tone);
    }

    out
}

fn extreme(bars: &[Bar], direction: Direction, pick: impl Fn(&Bar) -> f64) -> Option<f64> {
    bars.iter().map(|b| pick(b)).reduce(|acc, v| match direction {
        Direction::Buy => acc.max(v),
        Direction::Sell => acc.min(v),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::derive_levels;
    use crate::models::LevelState;

    fn buy_levels() -> LevelSet {
        // span 100: level[1]=200, 1.618=261.8, 2.618=361.8, 4.236=523.6
        derive_levels(Direction::Buy, 100.0, 200.0, 100.0).unwrap()
    }

    fn bar(high: f64, low: f64, close: f64) -> Bar {
        Bar::new(0, low, high, low, close)
    }

    #[test]
    fn deep_reach_invalidates_entry_ladder() {
        let levels = buy_levels();
        let out = classify(Direction::Buy, &levels, &[], Some(365.0));

        for ratio in [
            FibRatio::R0_500,
            FibRatio::R0_618,
            FibRatio::R0_786,
            FibRatio::R1_000,
        ] {
            let state = out.state(ratio);
            assert!(state.invalidated, "{} must be invalid at 365", ratio);
            assert_eq!(state.label, RiskLabel::Invalid);
        }
        assert_eq!(
            out.state(FibRatio::R0),
            LevelState {
                label: RiskLabel::HighRiskPossibleReversal,
                invalidated: false,
            }
        );
        // shallow minors survive the 2.618 rule
        assert!(!out.state(FibRatio::R0_236).invalidated);
    }

    #[test]
    fn midpoint_tripwire_spares_the_half_level() {
        let levels = buy_levels();
        // mid(261.8, 361.8) = 311.8; price between mid and 2.618
        let out = classify(Direction::Buy, &levels, &[], Some(320.0));

        assert_eq!(out.state(FibRatio::R0).label, RiskLabel::HighRiskPossibleReversal);
        assert_eq!(out.state(FibRatio::R0_500).label, RiskLabel::SuperHighRisk);
        assert!(!out.state(FibRatio::R0_500).invalidated);
        for ratio in [FibRatio::R0_618, FibRatio::R0_786, FibRatio::R1_000] {
            assert!(out.state(ratio).invalidated);
        }
    }

    #[test]
    fn exhaustion_invalidates_everything() {
        let levels = buy_levels();
        let out = classify(Direction::Buy, &levels, &[], Some(530.0));
        for ratio in FibRatio::ALL {
            assert!(out.state(ratio).invalidated, "{} must be invalid past 4.236", ratio);
        }
    }

    #[test]
    fn breakout_is_a_live_price_check_only() {
        let levels = buy_levels();
        // History pushed through level 1.0, but price has come back under it.
        let history = [bar(250.0, 180.0, 190.0)];
        let out = classify(Direction::Buy, &levels, &history, Some(150.0));
        assert!(!out.breakout);

        // The history still drives the reach-based escalation: 1.382 (238.2)
        // was tried, so the entry ceiling is Super High Risk now.
        assert_eq!(out.state(FibRatio::R0_786).label, RiskLabel::SuperHighRisk);
        assert_eq!(out.state(FibRatio::R1_000).label, RiskLabel::SuperHighRisk);

        let broken = classify(Direction::Buy, &levels, &history, Some(201.0));
        assert!(broken.breakout);
    }

    #[test]
    fn default_labels_before_any_escalation() {
        let levels = buy_levels();
        let out = classify(Direction::Buy, &levels, &[], Some(150.0));
        assert_eq!(out.state(FibRatio::R0).label, RiskLabel::Anchor);
        assert_eq!(out.state(FibRatio::R0_500).label, RiskLabel::LowRisk);
        assert_eq!(out.state(FibRatio::R0_618).label, RiskLabel::MediumRisk);
        assert_eq!(out.state(FibRatio::R0_786).label, RiskLabel::HighRisk);
        assert_eq!(out.state(FibRatio::R1_000).label, RiskLabel::BreakoutRisk);
        assert_eq!(out.state(FibRatio::R1_618).label, RiskLabel::Checkpoint);
        assert_eq!(out.state(FibRatio::R3_618).label, RiskLabel::PossibleReverse);
        assert!(FibRatio::ALL.iter().all(|&r| !out.state(r).invalidated));
    }

    #[test]
    fn sell_side_mirrors_the_reach_tests() {
        // span 100 downward from C=200: level[1]=100, 2.618=-61.8... use a
        // realistic ladder instead: A=2400, B=2300, C=2400.
        let levels = derive_levels(Direction::Sell, 2400.0, 2300.0, 2400.0).unwrap();
        // 2.618 => 2400 - 261.8 = 2138.2
        let out = classify(Direction::Sell, &levels, &[], Some(2130.0));
        assert!(out.state(FibRatio::R1_000).invalidated);
        assert_eq!(out.state(FibRatio::R0).label, RiskLabel::HighRiskPossibleReversal);
    }

    #[test]
    fn close_extreme_separates_broken_from_touched() {
        let levels = buy_levels();
        // Wick through 1.618 (261.8), close back below it.
        let wick_only = [bar(270.0, 200.0, 255.0)];
        let out = classify(Direction::Buy, &levels, &wick_only, Some(255.0));
        assert_eq!(out.tone(FibRatio::R1_618), ReachTone::Touched);

        let closed = [bar(270.0, 200.0, 265.0)];
        let out = classify(Direction::Buy, &levels, &closed, Some(265.0));
        assert_eq!(out.tone(FibRatio::R1_618), ReachTone::Broken);
        assert_eq!(out.tone(FibRatio::R2_618), ReachTone::Untouched);
    }

    #[test]
    fn classification_is_idempotent() {
        let levels = buy_levels();
        let history = [bar(250.0, 180.0, 240.0), bar(320.0, 230.0, 315.0)];
        let first = classify(Direction::Buy, &levels, &history, Some(318.0));
        let second = classify(Direction::Buy, &levels, &history, Some(318.0));
        assert_eq!(first, second);
    }
}
