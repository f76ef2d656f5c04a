use std::sync::Arc;

use super::*;
use crate::assets::decode::SpriteImage;
use crate::foundation::core::Size;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn solid_sheet(url: &str, w: u32, h: u32, rgba: [u8; 4]) -> SpriteAsset {
    SpriteAsset {
        url: url.to_string(),
        image: SpriteImage {
            width: w,
            height: h,
            pixels: Arc::new(RgbaImage::from_pixel(w, h, image::Rgba(rgba))),
        },
    }
}

fn geometry() -> StripGeometry {
    StripGeometry {
        frame: Size::new(4.0, 3.0),
        frames_per_sheet: 2.0,
        cell: Size::new(4.0, 6.0),
        sheets: 2,
    }
}

#[test]
fn frames_map_onto_their_sheets() {
    // Natural sizes differ from the cell size; sheets are scaled to fit.
    let assets = [
        solid_sheet("a", 8, 12, RED),
        solid_sheet("b", 2, 3, BLUE),
    ];
    let g = geometry();
    for (frame, color) in [(0, RED), (1, RED), (2, BLUE), (3, BLUE)] {
        let img = render_viewport(&assets, &g, FrameIndex(frame)).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(0, 0).0, color, "frame {frame} top");
        assert_eq!(img.get_pixel(3, 2).0, color, "frame {frame} bottom");
    }
}

#[test]
fn frames_past_the_strip_are_transparent() {
    let assets = [solid_sheet("a", 4, 6, RED), solid_sheet("b", 4, 6, BLUE)];
    let img = render_viewport(&assets, &geometry(), FrameIndex(4)).unwrap();
    assert!(img.pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[test]
fn rejects_degenerate_geometry() {
    let assets = [solid_sheet("a", 4, 6, RED)];
    let mut g = geometry();
    g.frame = Size::new(f64::NAN, 3.0);
    assert!(matches!(
        render_viewport(&assets, &g, FrameIndex(0)),
        Err(FlipError::Validation(_))
    ));
}
