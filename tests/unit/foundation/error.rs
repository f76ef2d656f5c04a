use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FlipError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FlipError::manifest("x")
            .to_string()
            .contains("manifest error:")
    );
    assert!(FlipError::fetch("x").to_string().contains("fetch error:"));
    assert!(FlipError::decode("x").to_string().contains("decode error:"));
    assert!(FlipError::scene("x").to_string().contains("scene error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FlipError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
