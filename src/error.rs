use std::fmt;

use thiserror::Error;

use crate::model::PositionGroup;

/// Typed failures crossing the engine boundary. Every engine operation
/// returns one of these rather than panicking; none is fatal to the process.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The caller named a position group the registry does not know.
    /// Programmer error at the call site, not a user-recoverable condition.
    #[error("unknown position group '{0}' (expected Guard, Wing, or Big)")]
    UnknownGroup(String),

    /// A submission payload is missing an attribute its group's schema requires.
    #[error("submission for {group} is missing required attribute '{attribute}'")]
    MissingAttribute {
        group: PositionGroup,
        attribute: String,
    },

    /// The remote scoring call failed; no local state was changed.
    #[error("prediction request failed: {0:#}")]
    PredictionFailed(anyhow::Error),

    /// The one-time historical fetch failed; the session degrades to an
    /// empty historical set.
    #[error("historical results fetch failed: {0:#}")]
    FetchFailed(anyhow::Error),
}

/// Out-of-range attribute value. Non-fatal: surfaced to the user while the
/// submission proceeds — the remote service is the final arbiter of validity.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub attribute: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = {} is outside the expected range [{}, {}]",
            self.attribute, self.value, self.min, self.max
        )
    }
}
