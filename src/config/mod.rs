// Instrument calibration and shared numeric newtypes
mod instrument;
mod types;

pub use instrument::InstrumentSpec;
pub use types::{Pips, Price, StageScore, Weight};
