use serde::{Deserialize, Serialize};

use crate::config::Pips;

/// Instrument calibration injected into every evaluation.
///
/// The reference deployment analyzed gold, where one pip is 0.10 price units
/// and the zone bands below were tuned by hand. None of these are engine
/// constants: a caller analyzing another instrument supplies its own values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Price units per pip.
    pub pip_size: f64,
    /// Half-width of the touch band around a level.
    pub touch_band: Pips,
    /// Minimum close distance from a level that counts as a departure.
    pub move_band: Pips,
    /// Pairing band for cross-timeframe confluence.
    pub confluence_band: Pips,
    /// "Currently at" proximity for the nearest-entry readout.
    pub entry_band: Pips,
}

impl InstrumentSpec {
    /// The reference instrument: gold, XAUUSD-style pricing.
    pub const REFERENCE: Self = Self {
        pip_size: 0.10,
        touch_band: Pips::new(50.0),
        move_band: Pips::new(100.0),
        confluence_band: Pips::new(50.0),
        entry_band: Pips::new(50.0),
    };

    /// Converts a pip count into a price distance for this instrument.
    #[inline]
    pub fn price_distance(&self, pips: Pips) -> f64 {
        pips.value() * self.pip_size
    }

    /// Absolute distance between two prices, in pips.
    #[inline]
    pub fn pips_between(&self, a: f64, b: f64) -> Pips {
        Pips::new((a - b).abs() / self.pip_size)
    }
}

impl Default for InstrumentSpec {
    fn default() -> Self {
        Self::REFERENCE
    }
}
