use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::core::{FrameIndex, Size};
use crate::foundation::error::{FlipError, FlipResult};

/// Per-instance sprite manifest, as served next to each player mount.
///
/// Only the JSON shape is checked. Numeric fields are taken as-is, so inconsistent values
/// surface later as NaN or infinite geometry and rates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteManifest {
    /// Raw sprite-sheet identifiers (host + path, no scheme), in any order.
    pub images: Vec<String>,
    /// Width of one frame in pixels.
    pub frame_width: f64,
    /// Height of one frame in pixels.
    pub frame_height: f64,
    /// Total number of frames across all sheets.
    pub num_frames: u64,
    /// Declared frame rate. Not used for timing, see [`SpriteManifest::playback_fps`].
    pub framerate: f64,
    /// Duration of the source video in seconds.
    pub duration: f64,
    /// Link target for the whole player.
    pub video_url: String,
}

impl SpriteManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json_str(s: &str) -> FlipResult<Self> {
        serde_json::from_str(s).map_err(|e| FlipError::manifest(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FlipResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FlipError::manifest(format!("parse manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FlipResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlipError::manifest(format!("open manifest '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Size of a single frame, which is also the viewport size.
    pub fn frame_size(&self) -> Size {
        Size::new(self.frame_width, self.frame_height)
    }

    /// Frames packed into each sheet. Fractional when frames do not divide evenly.
    pub fn frames_per_sheet(&self) -> f64 {
        self.num_frames as f64 / self.images.len() as f64
    }

    /// Rate the strip is animated at: every frame spread evenly over the duration.
    pub fn playback_fps(&self) -> f64 {
        self.num_frames as f64 / self.duration
    }

    /// Number of scheduler frames. The first frame is visible before playback starts.
    pub fn playback_frames(&self) -> u64 {
        self.num_frames.saturating_sub(1)
    }

    /// Final frame index reported by a complete playback.
    ///
    /// A single-frame manifest still advances once, so this is never below 1.
    pub fn last_frame(&self) -> FrameIndex {
        FrameIndex(self.playback_frames().max(1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/manifest/model.rs"]
mod tests;
