use super::*;

fn container(class: &str) -> Element {
    Element::Container {
        class: class.to_string(),
        size: None,
        clip: false,
    }
}

#[test]
fn append_builds_tree_under_mount() {
    let mut scene = RetainedScene::new("/players/1.json");
    let root = scene.mount_point();
    let a = scene.create(container("a")).unwrap();
    let b = scene.create(container("b")).unwrap();
    scene.append_child(root, a).unwrap();
    scene.append_child(a, b).unwrap();

    assert_eq!(scene.children(root), &[a]);
    assert_eq!(scene.children(a), &[b]);
    assert_eq!(scene.parent(b), Some(a));
    assert_eq!(scene.len(), 3);
    assert!(!scene.is_empty());
}

#[test]
fn rejects_unknown_reattached_and_cyclic_nodes() {
    let mut scene = RetainedScene::new("p");
    let root = scene.mount_point();
    let a = scene.create(container("a")).unwrap();
    let b = scene.create(container("b")).unwrap();
    scene.append_child(a, b).unwrap();

    assert!(scene.append_child(root, NodeId::from_raw(99)).is_err());
    assert!(scene.append_child(root, b).is_err());
    assert!(scene.append_child(b, a).is_err());
    assert!(scene.append_child(a, a).is_err());
    assert!(scene.append_child(a, root).is_err());
}

#[test]
fn images_are_leaves() {
    let mut scene = RetainedScene::new("p");
    let img = scene
        .create(Element::Image {
            src: "http://x/sprite-1.jpg".to_string(),
            size: Size::new(10.0, 20.0),
        })
        .unwrap();
    let c = scene.create(container("c")).unwrap();
    assert!(matches!(
        scene.append_child(img, c),
        Err(FlipError::Scene(_))
    ));
}

#[test]
fn html_carries_inline_styles_and_transform() {
    let mut scene = RetainedScene::new("/m.json?a=1&b=2");
    let root = scene.mount_point();
    let link = scene
        .create(Element::Link {
            href: "http://v/\"42\"".to_string(),
        })
        .unwrap();
    let frame = scene
        .create(Element::Container {
            class: "frame".to_string(),
            size: Some(Size::new(160.0, 90.0)),
            clip: true,
        })
        .unwrap();
    let strip = scene.create(container("strip")).unwrap();
    let img = scene
        .create(Element::Image {
            src: "http://x/sprite-1.jpg".to_string(),
            size: Size::new(160.0, 450.0),
        })
        .unwrap();
    scene.append_child(root, link).unwrap();
    scene.append_child(link, frame).unwrap();
    scene.append_child(frame, strip).unwrap();
    scene.append_child(strip, img).unwrap();
    scene.set_translate_y(strip, -90.0).unwrap();

    let html = scene.to_html();
    assert!(html.contains(r#"<div data-player-url="/m.json?a=1&amp;b=2">"#));
    assert!(html.contains(r#"href="http://v/&quot;42&quot;""#));
    assert!(html.contains(r#"target="_blank""#));
    assert!(html.contains(
        r#"<div class="frame" style="width: 160px; height: 90px; overflow: hidden;">"#
    ));
    assert!(html.contains(r#"<div class="strip" style="transform: translateY(-90px);">"#));
    assert!(html.contains(
        r#"<img src="http://x/sprite-1.jpg" style="width: 160px; height: 450px; display: block;">"#
    ));
    assert_eq!(scene.translate_y(strip), Some(-90.0));
}
