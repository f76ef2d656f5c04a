use std::cmp::Ordering;

/// Sort key extracted from a sprite URL.
///
/// Numbered sprites sort ascending by value and always precede unnumbered ones. Unnumbered
/// sprites compare equal to each other, so a stable sort keeps their input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteOrderKey {
    /// The integer found between the sprite markers.
    Numbered(u64),
    /// Markers missing or no digits between them.
    Unnumbered,
}

impl Ord for SpriteOrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numbered(a), Self::Numbered(b)) => a.cmp(b),
            (Self::Numbered(_), Self::Unnumbered) => Ordering::Less,
            (Self::Unnumbered, Self::Numbered(_)) => Ordering::Greater,
            (Self::Unnumbered, Self::Unnumbered) => Ordering::Equal,
        }
    }
}

impl PartialOrd for SpriteOrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Markers delimiting the ordering number inside a sprite URL.
#[derive(Clone, Copy, Debug)]
pub struct SpriteMarkers<'a> {
    /// Text right before the number, e.g. `sprite-`.
    pub prefix: &'a str,
    /// Text after the number, e.g. `.jpg`.
    pub suffix: &'a str,
}

impl Default for SpriteMarkers<'static> {
    fn default() -> Self {
        Self {
            prefix: "sprite-",
            suffix: ".jpg",
        }
    }
}

/// Extract the ordering key of `url`.
///
/// Takes the first `prefix`, then the first `suffix` after it, and parses the leading decimal
/// digits in between (`sprite-12b.jpg` is 12). Values too large for `u64` saturate. Signs are
/// not accepted, so `sprite--3.jpg` is unnumbered.
pub fn sprite_order_key(url: &str, markers: SpriteMarkers<'_>) -> SpriteOrderKey {
    let Some(start) = url.find(markers.prefix).map(|i| i + markers.prefix.len()) else {
        return SpriteOrderKey::Unnumbered;
    };
    let Some(len) = url[start..].find(markers.suffix) else {
        return SpriteOrderKey::Unnumbered;
    };

    let token = url[start..start + len].trim_start();
    let digits = token.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return SpriteOrderKey::Unnumbered;
    }
    let value = token[..digits].bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    });
    SpriteOrderKey::Numbered(value)
}

/// Total-order comparison of two sprite URLs by their embedded numbers.
pub fn compare_sprites(a: &str, b: &str, markers: SpriteMarkers<'_>) -> Ordering {
    sprite_order_key(a, markers).cmp(&sprite_order_key(b, markers))
}

/// Turn a raw identifier into a fetchable URL.
pub fn resolve_url(scheme: &str, raw: &str) -> String {
    format!("{scheme}{raw}")
}

/// Resolve and sort raw identifiers into playback order.
pub fn order_sprite_urls<S: AsRef<str>>(
    raw: &[S],
    scheme: &str,
    markers: SpriteMarkers<'_>,
) -> Vec<String> {
    let mut urls: Vec<String> = raw.iter().map(|r| resolve_url(scheme, r.as_ref())).collect();
    urls.sort_by_cached_key(|u| sprite_order_key(u, markers));
    urls
}

#[cfg(test)]
#[path = "../../tests/unit/assets/order.rs"]
mod tests;
