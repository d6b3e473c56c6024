use crate::config::InstrumentSpec;
use crate::domain::{Bar, FibRatio};
use crate::models::{EngagePhase, EngagementMap, LevelSet};

/// Counts completed touch->depart cycles per key zone after breakout.
///
/// `bars` is the history from the breakout bar onward. Per level the machine
/// waits for a bar whose range enters the touch band, then for a close that
/// departs by at least the move band; each completed pair bumps the
/// collected count. One phase transition per bar, scanned in time order.
///
/// Without a breakout every count stays 0 by definition.
pub fn track_engagement(
    levels: &LevelSet,
    breakout: bool,
    bars: &[Bar],
    instrument: &InstrumentSpec,
) -> EngagementMap {
    let mut map = EngagementMap::default();
    if !breakout {
        return map;
    }

    let touch = instrument.price_distance(instrument.touch_band);
    let depart = instrument.price_distance(instrument.move_band);

    for ratio in FibRatio::KEY_ZONES {
        let level = levels.price(ratio);
        let Some(state) = map.get_mut(ratio) else {
            continue;
        };
        for bar in bars {
            match state.phase {
                EngagePhase::SeekTouch => {
                    if bar.intersects(level - touch, level + touch) {
                        state.phase = EngagePhase::SeekMove;
                    }
                }
                EngagePhase::SeekMove => {
                    if (bar.close.value() - level).abs() >= depart {
                        state.collected += 1;
                        state.phase = EngagePhase::SeekTouch;
                    }
                }
            }
        }
    }

    map
}
