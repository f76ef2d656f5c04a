//! flipstrip plays sprite-sheet "movie previews" as flip-books.
//!
//! A preview is a handful of numbered sprite sheets, each holding a vertical run of video
//! frames. The player stitches the sheets into one tall strip, clips it to a single frame and
//! slides it upward in frame-height steps, locked to the rate `numFrames / duration`.
//!
//! # Pipeline overview
//!
//! 1. **Order**: raw sprite identifiers become URLs sorted by the number between `sprite-` and
//!    `.jpg` ([`order_sprite_urls`]).
//! 2. **Load**: every sheet is fetched and decoded concurrently; the batch settles once all of
//!    them have ([`AssetLoader`]).
//! 3. **Assemble**: cells go into a strip, the strip into a clipping frame, the frame into a link
//!    to the full video ([`assemble`]).
//! 4. **Animate**: a [`FrameScheduler`] driven by a [`TickSource`] moves the strip one frame per
//!    reached interval ([`PlaybackSession`]).
//!
//! Pages with several players go through [`Bootstrap`], which records every player in a
//! [`PlayerRegistry`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod bootstrap;
mod foundation;
mod manifest;
mod playback;
mod schedule;
mod strip;

pub use assets::decode::{SpriteImage, decode_sprite};
pub use assets::fetch::{DirFetcher, HttpFetcher, SpriteFetcher};
pub use assets::loader::{AssetLoader, SpriteAsset};
pub use assets::order::{
    SpriteMarkers, SpriteOrderKey, compare_sprites, order_sprite_urls, resolve_url,
    sprite_order_key,
};
pub use bootstrap::discover::{
    Bootstrap, DirManifestSource, DiscoveredMount, ManifestSource, TickFactory,
};
pub use bootstrap::registry::{PlayerEntry, PlayerId, PlayerOutcome, PlayerRegistry, PlayerStatus};
pub use foundation::config::PlayerConfig;
pub use foundation::core::{FrameIndex, FrameRate, Size};
pub use foundation::error::{FlipError, FlipResult};
pub use manifest::model::SpriteManifest;
pub use playback::session::{PlaybackSession, play};
pub use schedule::scheduler::{FrameScheduler, PlaybackState, Tick};
pub use schedule::ticks::{FixedStepTicks, IntervalTicks, ScriptedTicks, TickSource};
pub use strip::assembler::{Strip, StripGeometry, assemble};
pub use strip::scene::{Element, NodeId, RetainedScene, SceneGraph};
pub use strip::snapshot::render_viewport;
