/// Result alias used across the crate.
pub type NodeweaveResult<T> = Result<T, NodeweaveError>;

/// Errors surfaced by the engine.
///
/// Only initialization and configuration paths return these. Runtime drawing of malformed
/// nodes or edges degrades by skipping the primitive instead.
#[derive(thiserror::Error, Debug)]
pub enum NodeweaveError {
    /// The drawing surface could not be created. Fatal; callers must not proceed.
    #[error("surface error: {0}")]
    Surface(String),

    /// Configuration or input documents failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A layout request could not be satisfied.
    #[error("layout error: {0}")]
    Layout(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NodeweaveError {
    /// Build a [`NodeweaveError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`NodeweaveError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NodeweaveError::Layout`].
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`NodeweaveError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for NodeweaveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
