use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{Instrument, debug, info_span, warn};

use crate::assets::fetch::HttpFetcher;
use crate::assets::loader::AssetLoader;
use crate::bootstrap::registry::{PlayerEntry, PlayerId, PlayerOutcome, PlayerRegistry, PlayerStatus};
use crate::foundation::error::{FlipError, FlipResult};
use crate::manifest::model::SpriteManifest;
use crate::playback::session::PlaybackSession;
use crate::schedule::ticks::TickSource;
use crate::strip::scene::SceneGraph;

/// Source of per-instance sprite manifests.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Fetch and parse the manifest published at `url`.
    async fn fetch_manifest(&self, url: &str) -> FlipResult<SpriteManifest>;
}

#[async_trait]
impl ManifestSource for HttpFetcher {
    async fn fetch_manifest(&self, url: &str) -> FlipResult<SpriteManifest> {
        let agent = self.agent().clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || -> FlipResult<SpriteManifest> {
            let mut resp = agent
                .get(&url)
                .call()
                .map_err(|e| FlipError::fetch(format!("GET '{url}': {e}")))?;
            resp.body_mut()
                .read_json::<SpriteManifest>()
                .map_err(|e| FlipError::manifest(format!("parse manifest from '{url}': {e}")))
        })
        .await
        .map_err(|e| FlipError::fetch(format!("manifest task failed: {e}")))?
    }
}

/// Reads manifests from disk; relative URLs resolve against a root directory.
#[derive(Clone, Debug)]
pub struct DirManifestSource {
    root: PathBuf,
}

impl DirManifestSource {
    /// Source resolving relative manifest paths against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path a manifest URL maps to.
    pub fn path_for(&self, url: &str) -> PathBuf {
        let p = Path::new(url);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

#[async_trait]
impl ManifestSource for DirManifestSource {
    async fn fetch_manifest(&self, url: &str) -> FlipResult<SpriteManifest> {
        let path = self.path_for(url);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FlipError::fetch(format!("read manifest '{}': {e}", path.display())))?;
        SpriteManifest::from_json_str(&text)
    }
}

/// Builds a fresh refresh timer for each player.
pub type TickFactory = Arc<dyn Fn() -> Box<dyn TickSource> + Send + Sync>;

/// A mount point found by the host, with the manifest URL it advertises.
#[derive(Clone, Debug)]
pub struct DiscoveredMount<S> {
    /// Per-instance manifest URL.
    pub manifest_url: String,
    /// Scene the player renders into.
    pub mount: S,
}

/// Starts one player per discovered mount and records it in a [`PlayerRegistry`].
#[derive(Clone)]
pub struct Bootstrap {
    manifests: Arc<dyn ManifestSource>,
    loader: AssetLoader,
    ticks: TickFactory,
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

impl Bootstrap {
    /// Bootstrap sharing one manifest source, loader and timer factory across players.
    pub fn new(manifests: Arc<dyn ManifestSource>, loader: AssetLoader, ticks: TickFactory) -> Self {
        Self {
            manifests,
            loader,
            ticks,
        }
    }

    /// Spawn a player task per mount, appending each to `registry` in discovery order.
    ///
    /// Must be called within a tokio runtime. Players run independently; one stuck loading does
    /// not hold back the others.
    pub fn start<S>(
        &self,
        registry: &mut PlayerRegistry<S>,
        discovered: impl IntoIterator<Item = DiscoveredMount<S>>,
    ) -> Vec<PlayerId>
    where
        S: SceneGraph + Send + 'static,
    {
        let mut ids = Vec::new();
        for DiscoveredMount { manifest_url, mount } in discovered {
            let (status_tx, status_rx) = watch::channel(PlayerStatus::FetchingManifest);
            let span = info_span!("player", url = %manifest_url);
            let task = tokio::spawn(
                run_player(
                    Arc::clone(&self.manifests),
                    self.loader.clone(),
                    (self.ticks)(),
                    manifest_url.clone(),
                    mount,
                    status_tx,
                )
                .instrument(span),
            );
            ids.push(registry.register(PlayerEntry::new(manifest_url, status_rx, task)));
        }
        ids
    }
}

async fn run_player<S: SceneGraph>(
    manifests: Arc<dyn ManifestSource>,
    loader: AssetLoader,
    mut ticks: Box<dyn TickSource>,
    manifest_url: String,
    mount: S,
    status: watch::Sender<PlayerStatus>,
) -> PlayerOutcome<S> {
    let manifest = match manifests.fetch_manifest(&manifest_url).await {
        Ok(m) => m,
        Err(e) => {
            warn!(error = %e, "manifest unavailable; player stays empty");
            status.send_replace(PlayerStatus::Failed(e.to_string()));
            return PlayerOutcome {
                mount,
                result: Err(e),
            };
        }
    };
    debug!(?manifest, "manifest received");
    status.send_replace(PlayerStatus::Loading);

    let mut session = PlaybackSession::new(manifest, mount);
    let prepared = session.prepare(&loader).await.map(|_| ());
    let result = match prepared {
        Ok(()) => {
            status.send_replace(PlayerStatus::Playing);
            session.animate(ticks.as_mut()).await
        }
        Err(e) => Err(e),
    };

    status.send_replace(match &result {
        Ok(last) => PlayerStatus::Finished(*last),
        Err(e) => PlayerStatus::Failed(e.to_string()),
    });
    PlayerOutcome {
        mount: session.into_mount(),
        result,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bootstrap/discover.rs"]
mod tests;
