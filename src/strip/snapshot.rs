use std::collections::HashMap;

use image::{RgbaImage, imageops::FilterType};

use crate::assets::loader::SpriteAsset;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FlipError, FlipResult};
use crate::strip::assembler::StripGeometry;

/// Pixels visible through the viewport while `frame` is shown.
///
/// Sheets are scaled to their cell size like a browser would, then the strip is sampled at the
/// translation playback applies for `frame`. Rows past the end of the strip stay transparent.
pub fn render_viewport(
    assets: &[SpriteAsset],
    geometry: &StripGeometry,
    frame: FrameIndex,
) -> FlipResult<RgbaImage> {
    let width = pixel_extent(geometry.frame.width, "frame width")?;
    let height = pixel_extent(geometry.frame.height, "frame height")?;
    let cell_w = pixel_extent(geometry.cell.width, "cell width")?;
    let cell_h = geometry.cell.height;
    pixel_extent(cell_h, "cell height")?;

    let mut out = RgbaImage::new(width, height);
    let mut scaled: HashMap<usize, RgbaImage> = HashMap::new();
    let offset = frame.0 as f64 * geometry.frame.height;

    for y in 0..height {
        let strip_y = offset + f64::from(y);
        let sheet = (strip_y / cell_h).floor() as usize;
        let Some(asset) = assets.get(sheet) else {
            continue;
        };
        let cell = scaled.entry(sheet).or_insert_with(|| {
            image::imageops::resize(
                asset.image.pixels.as_ref(),
                cell_w,
                cell_h.round().max(1.0) as u32,
                FilterType::Triangle,
            )
        });

        let local_y = ((strip_y - sheet as f64 * cell_h).floor() as u32).min(cell.height() - 1);
        for x in 0..width.min(cell.width()) {
            out.put_pixel(x, y, *cell.get_pixel(x, local_y));
        }
    }

    Ok(out)
}

fn pixel_extent(v: f64, what: &str) -> FlipResult<u32> {
    if !v.is_finite() || v < 1.0 || v > f64::from(u32::MAX) {
        return Err(FlipError::validation(format!(
            "{what} must be a finite size of at least 1px (got {v})"
        )));
    }
    Ok(v.round() as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/strip/snapshot.rs"]
mod tests;
