/// Convenience result type used across wavyte-compose.
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Top-level error taxonomy used by crate APIs.
///
/// Construction-time rejection (a NaN lerp weight) and per-record decode failures are reported as
/// `None` by the factories and decoders; this enum covers the `Result`-returning surfaces.
#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    /// Invalid user-provided data (shader descriptions, render options).
    #[error("validation error: {0}")]
    Validation(String),

    /// A shader could not append its stages to a raster pipeline.
    #[error("pipeline error: {0}")]
    Pipeline(String),

    /// A serialized shader stream was malformed.
    #[error("decode error: {0}")]
    Decode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ComposeError {
    /// Build a [`ComposeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ComposeError::Pipeline`] value.
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Build a [`ComposeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
