use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{FlipError, FlipResult};

/// Decoded sprite sheet in straight-alpha RGBA8.
#[derive(Clone, Debug)]
pub struct SpriteImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Decoded pixels, row-major.
    pub pixels: Arc<image::RgbaImage>,
}

/// Decode encoded sprite bytes (JPEG or PNG).
pub fn decode_sprite(bytes: &[u8]) -> FlipResult<SpriteImage> {
    if bytes.is_empty() {
        return Err(FlipError::decode("sprite body is empty"));
    }
    let dyn_img = image::load_from_memory(bytes)
        .context("decode sprite from memory")
        .map_err(|e| FlipError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(SpriteImage {
        width,
        height,
        pixels: Arc::new(rgba),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
