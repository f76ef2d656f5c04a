/// Convenience result type used across flipstrip.
pub type FlipResult<T> = Result<T, FlipError>;

/// Top-level error taxonomy used by player APIs.
///
/// Loading stalls are not represented here: a sprite that never becomes ready keeps the
/// loader pending instead of producing an error.
#[derive(thiserror::Error, Debug)]
pub enum FlipError {
    /// Invalid caller-provided parameters (scheduler preconditions, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// The sprite manifest could not be read or parsed.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// Fetching sprite or manifest bytes failed.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Sprite bytes could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A scene-graph operation referenced an unknown node or broke the tree shape.
    #[error("scene error: {0}")]
    Scene(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipError {
    /// Build a [`FlipError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlipError::Manifest`] value.
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    /// Build a [`FlipError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`FlipError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FlipError::Scene`] value.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
