/// Convenience result type used across seqgif.
pub type SeqgifResult<T> = Result<T, SeqgifError>;

/// Top-level error taxonomy used by library APIs.
///
/// Overlay problems (degenerate geometry, a full color table) are never errors; the overlay
/// is skipped or degraded instead. Only input validation, decoding and encoding can fail.
#[derive(thiserror::Error, Debug)]
pub enum SeqgifError {
    /// Invalid user-provided request data (e.g. no readable images).
    #[error("validation error: {0}")]
    Validation(String),

    /// An input image could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A still image or the animated sequence could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing request data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SeqgifError {
    /// Build a [`SeqgifError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SeqgifError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SeqgifError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`SeqgifError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors that should be shown to the user as a form/request problem.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The bare message of a validation error, without the display prefix.
    pub fn validation_message(&self) -> Option<&str> {
        match self {
            Self::Validation(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
