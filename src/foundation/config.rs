use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::error::{FlipError, FlipResult};

/// Player-wide settings shared by every instance started from one bootstrap.
///
/// Missing JSON fields fall back to [`PlayerConfig::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Prefix prepended to every raw sprite identifier.
    pub url_scheme: String,
    /// Marker immediately preceding the sprite ordering number.
    pub sprite_prefix: String,
    /// Marker immediately following the sprite ordering number.
    pub sprite_suffix: String,
    /// Rate of the host refresh timer driving the scheduler, in Hz.
    pub native_tick_hz: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            url_scheme: "http://".to_string(),
            sprite_prefix: "sprite-".to_string(),
            sprite_suffix: ".jpg".to_string(),
            native_tick_hz: 60.0,
        }
    }
}

impl PlayerConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FlipResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| FlipError::validation(format!("parse player config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FlipResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlipError::validation(format!("open player config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the values the player cannot run without.
    pub fn validate(&self) -> FlipResult<()> {
        if !self.native_tick_hz.is_finite() || self.native_tick_hz <= 0.0 {
            return Err(FlipError::validation(format!(
                "nativeTickHz must be finite and > 0 (got {})",
                self.native_tick_hz
            )));
        }
        if self.sprite_prefix.is_empty() || self.sprite_suffix.is_empty() {
            return Err(FlipError::validation("sprite markers must not be empty"));
        }
        Ok(())
    }

    /// Host refresh period in milliseconds.
    pub fn native_tick_ms(&self) -> f64 {
        1000.0 / self.native_tick_hz
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
