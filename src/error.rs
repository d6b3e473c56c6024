use thiserror::Error;

/// Failures at the evaluation boundary.
///
/// Reaching or breaking a level is domain data, never an error; these cover
/// only inputs the engine cannot compute from. Callers must be able to tell
/// "computed, structure not yet broken" apart from "could not compute", so
/// the engine never fabricates a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An anchor point did not resolve to a bar, or a derived price was
    /// non-finite. Local to one profile; fusion skips it and carries on.
    #[error("insufficient data: {reason}")]
    InsufficientData { reason: String },

    /// Fusion found zero resolvable profiles. Surfaced verbatim; no partial
    /// bias is fabricated.
    #[error("no profile could be evaluated")]
    NoData,
}

impl EvalError {
    pub(crate) fn insufficient(reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            reason: reason.into(),
        }
    }
}
