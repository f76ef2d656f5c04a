use super::*;

#[test]
fn sorts_numerically_not_lexicographically() {
    let raw = ["cdn/sprite-2.jpg", "cdn/sprite-10.jpg", "cdn/sprite-1.jpg"];
    let urls = order_sprite_urls(&raw, "http://", SpriteMarkers::default());
    assert_eq!(
        urls,
        vec![
            "http://cdn/sprite-1.jpg",
            "http://cdn/sprite-2.jpg",
            "http://cdn/sprite-10.jpg",
        ]
    );
}

#[test]
fn key_parses_leading_digits_only() {
    let m = SpriteMarkers::default();
    assert_eq!(sprite_order_key("a/sprite-12b.jpg", m), SpriteOrderKey::Numbered(12));
    assert_eq!(sprite_order_key("a/sprite-007.jpg", m), SpriteOrderKey::Numbered(7));
    assert_eq!(sprite_order_key("a/sprite-x1.jpg", m), SpriteOrderKey::Unnumbered);
    assert_eq!(sprite_order_key("a/sprite-.jpg", m), SpriteOrderKey::Unnumbered);
}

#[test]
fn signed_numbers_are_unnumbered() {
    let m = SpriteMarkers::default();
    assert_eq!(sprite_order_key("a/sprite--3.jpg", m), SpriteOrderKey::Unnumbered);
    assert_eq!(sprite_order_key("a/sprite-+3.jpg", m), SpriteOrderKey::Unnumbered);
    let urls = order_sprite_urls(&["a/sprite--3.jpg", "a/sprite-2.jpg"], "http://", m);
    assert_eq!(urls, vec!["http://a/sprite-2.jpg", "http://a/sprite--3.jpg"]);
}

#[test]
fn missing_markers_are_unnumbered() {
    let m = SpriteMarkers::default();
    assert_eq!(sprite_order_key("a/frame-3.jpg", m), SpriteOrderKey::Unnumbered);
    assert_eq!(sprite_order_key("a/sprite-3.png", m), SpriteOrderKey::Unnumbered);
    // Suffix before the prefix does not count.
    assert_eq!(sprite_order_key(".jpg/sprite-3", m), SpriteOrderKey::Unnumbered);
}

#[test]
fn huge_numbers_saturate() {
    let key = sprite_order_key(
        "sprite-99999999999999999999999.jpg",
        SpriteMarkers::default(),
    );
    assert_eq!(key, SpriteOrderKey::Numbered(u64::MAX));
}

#[test]
fn comparison_contract_is_explicit() {
    let m = SpriteMarkers::default();
    assert_eq!(compare_sprites("sprite-1.jpg", "sprite-2.jpg", m), Ordering::Less);
    assert_eq!(compare_sprites("sprite-9.jpg", "sprite-2.jpg", m), Ordering::Greater);
    assert_eq!(compare_sprites("x/sprite-4.jpg", "y/sprite-4.jpg", m), Ordering::Equal);
    assert_eq!(compare_sprites("sprite-4.jpg", "cover.png", m), Ordering::Less);
    assert_eq!(compare_sprites("cover.png", "thumb.png", m), Ordering::Equal);
}

#[test]
fn unparsable_identifiers_degrade_without_panicking() {
    let raw = ["cdn/poster.png", "cdn/sprite-3.jpg", "cdn/other", "cdn/sprite-1.jpg"];
    let urls = order_sprite_urls(&raw, "http://", SpriteMarkers::default());
    assert_eq!(
        urls,
        vec![
            "http://cdn/sprite-1.jpg",
            "http://cdn/sprite-3.jpg",
            "http://cdn/poster.png",
            "http://cdn/other",
        ]
    );
}

#[test]
fn custom_markers() {
    let m = SpriteMarkers {
        prefix: "sheet_",
        suffix: ".webp",
    };
    let urls = order_sprite_urls(&["h/sheet_20.webp", "h/sheet_3.webp"], "https://", m);
    assert_eq!(urls, vec!["https://h/sheet_3.webp", "https://h/sheet_20.webp"]);
}
