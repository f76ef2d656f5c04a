use std::sync::Arc;

use tracing::{debug, info};

use crate::assets::loader::AssetLoader;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{FlipError, FlipResult};
use crate::manifest::model::SpriteManifest;
use crate::schedule::scheduler::FrameScheduler;
use crate::schedule::ticks::TickSource;
use crate::strip::assembler::{Strip, assemble};
use crate::strip::scene::{NodeId, SceneGraph};

/// One player instance: a manifest, the scene it renders into, and its playback pipeline.
///
/// Playback runs load, assemble and animate in sequence. Once assembled, the strip's vertical
/// translation is the only thing the session changes.
#[derive(Debug)]
pub struct PlaybackSession<S> {
    manifest: Arc<SpriteManifest>,
    mount: S,
    strip: Option<Strip>,
}

impl<S: SceneGraph> PlaybackSession<S> {
    /// Session rendering `manifest` into `mount`.
    pub fn new(manifest: impl Into<Arc<SpriteManifest>>, mount: S) -> Self {
        Self {
            manifest: manifest.into(),
            mount,
            strip: None,
        }
    }

    /// Manifest being played.
    pub fn manifest(&self) -> &SpriteManifest {
        &self.manifest
    }

    /// Scene the player renders into.
    pub fn mount(&self) -> &S {
        &self.mount
    }

    /// Assembled strip, once loading has finished.
    pub fn strip(&self) -> Option<&Strip> {
        self.strip.as_ref()
    }

    /// Give the scene back to the host.
    pub fn into_mount(self) -> S {
        self.mount
    }

    /// Load every sheet, build the strip and play it to the end.
    ///
    /// Resolves with the final frame index. If a sheet never loads, this never resolves.
    #[tracing::instrument(skip_all, fields(video = %self.manifest.video_url))]
    pub async fn play(
        &mut self,
        loader: &AssetLoader,
        ticks: &mut dyn TickSource,
    ) -> FlipResult<FrameIndex> {
        self.prepare(loader).await?;
        self.animate(ticks).await
    }

    /// Load every sheet and attach the strip to the mount point, showing the first frame.
    pub async fn prepare(&mut self, loader: &AssetLoader) -> FlipResult<&Strip> {
        let assets = loader.load(&self.manifest.images).await;
        let strip = assemble(&mut self.mount, &assets, &self.manifest)?;
        Ok(&*self.strip.insert(strip))
    }

    /// Slide the prepared strip up one frame height per scheduler frame.
    pub async fn animate(&mut self, ticks: &mut dyn TickSource) -> FlipResult<FrameIndex> {
        let strip: NodeId = self
            .strip
            .as_ref()
            .map(|s| s.node)
            .ok_or_else(|| FlipError::validation("animate called before the strip was prepared"))?;

        let manifest = Arc::clone(&self.manifest);
        if manifest.framerate != manifest.playback_fps() {
            debug!(
                declared = manifest.framerate,
                derived = manifest.playback_fps(),
                "manifest framerate differs from numFrames/duration; using the derived rate"
            );
        }
        let scheduler = FrameScheduler::new(manifest.playback_frames(), manifest.playback_fps())?;

        let frame_height = manifest.frame_height;
        let mount = &mut self.mount;
        let mut offset = 0.0;
        let mut scene_result = Ok(());
        let last = scheduler
            .run(
                ticks,
                |frame| {
                    offset += frame_height;
                    debug!(frame = frame.0, offset, "advance strip");
                    if scene_result.is_ok() {
                        scene_result = mount.set_translate_y(strip, -offset);
                    }
                },
                |last| info!(last = last.0, "playback finished"),
            )
            .await;
        scene_result?;
        Ok(last)
    }
}

/// Play `raw` sprite identifiers from `manifest` into `mount`.
///
/// Convenience form of [`PlaybackSession::play`] that hands the scene back with the result.
pub async fn play<S: SceneGraph>(
    raw: &[String],
    mount: S,
    manifest: &SpriteManifest,
    loader: &AssetLoader,
    ticks: &mut dyn TickSource,
) -> (S, FlipResult<FrameIndex>) {
    let manifest = SpriteManifest {
        images: raw.to_vec(),
        ..manifest.clone()
    };
    let mut session = PlaybackSession::new(manifest, mount);
    let result = session.play(loader, ticks).await;
    (session.into_mount(), result)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/session.rs"]
mod tests;
