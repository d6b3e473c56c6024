use serde::{Deserialize, Serialize};

use crate::domain::{AnchorPoint, Direction, Timeframe};

/// Identifier of a structure slot. The reference deployment exposes seven
/// slots to the user; slot gating (ids >= 3 behind an access policy) is the
/// caller's business, not the engine's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(u8);

impl ProfileId {
    pub const MAX_SLOTS: usize = 7;

    pub const fn new(id: u8) -> Option<Self> {
        if id >= 1 && id <= Self::MAX_SLOTS as u8 {
            Some(Self(id))
        } else {
            None
        }
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// One user-authored swing structure: side, timeframe, and the three anchor
/// references. An explicit immutable value handed into the evaluator; no
/// ambient state behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub direction: Direction,
    pub timeframe: Timeframe,
    pub a: AnchorPoint,
    pub b: AnchorPoint,
    pub c: AnchorPoint,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.id, self.direction, self.timeframe)
    }
}
