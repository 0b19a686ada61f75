/// Convenience result type used across ptv.
pub type PtvResult<T> = Result<T, PtvError>;

/// Top-level error taxonomy. Each variant names the stage that failed.
#[derive(thiserror::Error, Debug)]
pub enum PtvError {
    /// Invalid user-provided settings (resolution, fps, style, config file).
    #[error("validation error: {0}")]
    Validation(String),

    /// The ordered image sequence violates a compositor precondition.
    #[error("precondition error: {0}")]
    Precondition(String),

    /// A region copy fell outside its buffer. Pacing or rebuild arithmetic drifted.
    #[error("internal bounds error: {0}")]
    Bounds(String),

    /// Loading, rasterizing or decoding input images failed.
    #[error("source error: {0}")]
    Source(String),

    /// Writing frames to the output sink failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PtvError {
    /// Build a [`PtvError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PtvError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`PtvError::Bounds`] value.
    pub fn bounds(msg: impl Into<String>) -> Self {
        Self::Bounds(msg.into())
    }

    /// Build a [`PtvError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`PtvError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
