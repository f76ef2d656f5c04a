use crate::foundation::error::{FlipError, FlipResult};

pub use kurbo::Size;

/// Zero-based logical frame index.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Index following this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical playback rate in frames per second.
///
/// Unlike the host refresh rate, this is the rate at which new frames become due.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameRate(f64);

impl FrameRate {
    /// Build a rate; must be finite and strictly positive.
    ///
    /// An infinite rate (zero duration) is refused here rather than left to stall playback
    /// silently, so callers get an error while the first frame stays on screen.
    pub fn new(fps: f64) -> FlipResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(FlipError::validation(format!(
                "frame rate must be finite and > 0 (got {fps})"
            )));
        }
        Ok(Self(fps))
    }

    /// Frames per second.
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Milliseconds between two logical frames.
    pub fn draw_interval_ms(self) -> f64 {
        1000.0 / self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
