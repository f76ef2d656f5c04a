use tracing::debug;

use crate::assets::loader::SpriteAsset;
use crate::foundation::core::Size;
use crate::foundation::error::FlipResult;
use crate::manifest::model::SpriteManifest;
use crate::strip::scene::{Element, NodeId, SceneGraph};

/// Derived sizes of the strip and its viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripGeometry {
    /// One frame; also the visible viewport.
    pub frame: Size,
    /// Frames stacked in each sheet (may be fractional).
    pub frames_per_sheet: f64,
    /// Display size of one sheet inside the strip.
    pub cell: Size,
    /// Number of sheets in the strip.
    pub sheets: usize,
}

impl StripGeometry {
    /// Geometry for `sheets` loaded sheets of `manifest`.
    pub fn new(manifest: &SpriteManifest, sheets: usize) -> Self {
        let frames_per_sheet = manifest.frames_per_sheet();
        Self {
            frame: manifest.frame_size(),
            frames_per_sheet,
            cell: Size::new(
                manifest.frame_width,
                manifest.frame_height * frames_per_sheet,
            ),
            sheets,
        }
    }

    /// Size of the clipping viewport.
    pub fn viewport(&self) -> Size {
        self.frame
    }

    /// Height of all sheets stacked without gaps.
    pub fn strip_height(&self) -> f64 {
        if self.sheets == 0 {
            return 0.0;
        }
        self.cell.height * self.sheets as f64
    }
}

/// The assembled strip: the only node that moves during playback.
#[derive(Clone, Debug, PartialEq)]
pub struct Strip {
    /// Strip container.
    pub node: NodeId,
    /// One image node per sheet, top to bottom.
    pub cells: Vec<NodeId>,
    /// Sizes used when building the strip.
    pub geometry: StripGeometry,
}

/// Build the strip, clip it with a frame-sized viewport, link it to the video and attach the
/// result to the scene's mount point.
///
/// Returns the inner strip so callers can translate it without touching the wrapper.
#[tracing::instrument(skip_all, fields(sheets = assets.len()))]
pub fn assemble<S: SceneGraph + ?Sized>(
    scene: &mut S,
    assets: &[SpriteAsset],
    manifest: &SpriteManifest,
) -> FlipResult<Strip> {
    let geometry = StripGeometry::new(manifest, assets.len());

    let mut cells = Vec::with_capacity(assets.len());
    for asset in assets {
        cells.push(scene.create(Element::Image {
            src: asset.url.clone(),
            size: geometry.cell,
        })?);
    }

    let strip = scene.create(Element::Container {
        class: "strip".to_string(),
        size: None,
        clip: false,
    })?;
    for &cell in &cells {
        scene.append_child(strip, cell)?;
    }

    let frame = scene.create(Element::Container {
        class: "frame".to_string(),
        size: Some(geometry.viewport()),
        clip: true,
    })?;
    scene.append_child(frame, strip)?;

    let link = scene.create(Element::Link {
        href: manifest.video_url.clone(),
    })?;
    scene.append_child(link, frame)?;

    let mount = scene.mount_point();
    scene.append_child(mount, link)?;

    debug!(
        cell_height = geometry.cell.height,
        strip_height = geometry.strip_height(),
        "strip assembled"
    );
    Ok(Strip {
        node: strip,
        cells,
        geometry,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/strip/assembler.rs"]
mod tests;
