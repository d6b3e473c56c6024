use serde::{Deserialize, Serialize};

use crate::domain::FibRatio;

/// Phase of the per-level hysteresis machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EngagePhase {
    #[default]
    SeekTouch,
    SeekMove,
}

/// Touch-then-depart progress for one key zone.
///
/// INVARIANT: `collected` never decreases within one evaluation; the scan
/// only increments it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngagementState {
    pub phase: EngagePhase,
    pub collected: u32,
}

/// Collected counts for the four key zones, all reset at evaluation start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngagementMap {
    states: [EngagementState; 4],
}

impl EngagementMap {
    fn slot(ratio: FibRatio) -> Option<usize> {
        FibRatio::KEY_ZONES.iter().position(|&r| r == ratio)
    }

    /// Some only for the key zones; other ratios carry no engagement state.
    pub fn get(&self, ratio: FibRatio) -> Option<EngagementState> {
        Self::slot(ratio).map(|i| self.states[i])
    }

    pub(crate) fn get_mut(&mut self, ratio: FibRatio) -> Option<&mut EngagementState> {
        Self::slot(ratio).map(|i| &mut self.states[i])
    }

    /// Completed touch->depart cycles for a level; 0 for non-key ratios.
    pub fn collected(&self, ratio: FibRatio) -> u32 {
        self.get(ratio).map(|s| s.collected).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FibRatio, EngagementState)> + '_ {
        FibRatio::KEY_ZONES.into_iter().zip(self.states.into_iter())
    }
}
