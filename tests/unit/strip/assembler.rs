use std::sync::Arc;

use super::*;
use crate::assets::decode::SpriteImage;
use crate::strip::scene::RetainedScene;

fn asset(url: &str) -> SpriteAsset {
    SpriteAsset {
        url: url.to_string(),
        image: SpriteImage {
            width: 1,
            height: 1,
            pixels: Arc::new(image::RgbaImage::new(1, 1)),
        },
    }
}

fn manifest(images: usize, num_frames: u64) -> SpriteManifest {
    SpriteManifest {
        images: (0..images).map(|i| format!("cdn/sprite-{i}.jpg")).collect(),
        frame_width: 80.0,
        frame_height: 50.0,
        num_frames,
        framerate: 24.0,
        duration: 1.0,
        video_url: "http://example.com/v/1".to_string(),
    }
}

#[test]
fn cells_strip_and_viewport_sizes() {
    let m = manifest(2, 6);
    let assets = [asset("http://cdn/sprite-0.jpg"), asset("http://cdn/sprite-1.jpg")];
    let mut scene = RetainedScene::new("/p.json");
    let strip = assemble(&mut scene, &assets, &m).unwrap();

    assert_eq!(strip.geometry.cell, Size::new(80.0, 150.0));
    assert_eq!(strip.geometry.strip_height(), 300.0);
    assert_eq!(strip.geometry.viewport().height, 50.0);
    assert_eq!(strip.cells.len(), 2);
    for (cell, a) in strip.cells.iter().zip(&assets) {
        assert_eq!(
            scene.element(*cell),
            Some(&Element::Image {
                src: a.url.clone(),
                size: Size::new(80.0, 150.0),
            })
        );
    }
}

#[test]
fn wraps_strip_in_clipping_frame_and_link_under_mount() {
    let m = manifest(2, 6);
    let assets = [asset("http://cdn/sprite-0.jpg"), asset("http://cdn/sprite-1.jpg")];
    let mut scene = RetainedScene::new("/p.json");
    let strip = assemble(&mut scene, &assets, &m).unwrap();

    assert_eq!(scene.children(strip.node), strip.cells.as_slice());

    let frame = scene.parent(strip.node).unwrap();
    assert_eq!(
        scene.element(frame),
        Some(&Element::Container {
            class: "frame".to_string(),
            size: Some(Size::new(80.0, 50.0)),
            clip: true,
        })
    );

    let link = scene.parent(frame).unwrap();
    assert_eq!(
        scene.element(link),
        Some(&Element::Link {
            href: "http://example.com/v/1".to_string(),
        })
    );
    assert_eq!(scene.parent(link), Some(scene.mount_point()));
    assert_eq!(scene.children(scene.mount_point()), &[link]);
    assert_eq!(scene.translate_y(strip.node), None);
}

#[test]
fn fractional_frames_per_sheet_pass_through() {
    let m = manifest(3, 10);
    let assets = [asset("a"), asset("b"), asset("c")];
    let mut scene = RetainedScene::new("/p.json");
    let strip = assemble(&mut scene, &assets, &m).unwrap();
    let expected = 50.0 * (10.0 / 3.0);
    assert!((strip.geometry.cell.height - expected).abs() < 1e-9);
    assert!((strip.geometry.strip_height() - 500.0).abs() < 1e-9);
}

#[test]
fn empty_asset_list_still_builds_the_frame() {
    let m = manifest(0, 4);
    let mut scene = RetainedScene::new("/p.json");
    let strip = assemble(&mut scene, &[], &m).unwrap();
    assert!(strip.cells.is_empty());
    assert_eq!(strip.geometry.strip_height(), 0.0);
    assert!(scene.to_html().contains("class=\"frame\""));
}
