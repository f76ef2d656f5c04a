use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::assets::decode::{SpriteImage, decode_sprite};
use crate::assets::fetch::SpriteFetcher;
use crate::assets::order::{SpriteMarkers, order_sprite_urls};
use crate::foundation::config::PlayerConfig;

/// A loaded sprite sheet and the URL it came from.
#[derive(Clone, Debug)]
pub struct SpriteAsset {
    /// Fully-qualified URL the sheet was fetched from.
    pub url: String,
    /// Decoded sheet.
    pub image: SpriteImage,
}

/// Resolves, orders and loads sprite sheets.
///
/// Loads run concurrently as spawned tasks and are joined in sorted order. A sheet that fails to
/// fetch or decode is reported once and then never becomes ready, which keeps the whole load
/// pending: there is no failure result and no timeout.
#[derive(Clone)]
pub struct AssetLoader {
    fetcher: Arc<dyn SpriteFetcher>,
    config: Arc<PlayerConfig>,
}

impl std::fmt::Debug for AssetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetLoader")
            .field("fetcher_ptr", &Arc::as_ptr(&self.fetcher))
            .field("config", &self.config)
            .finish()
    }
}

impl AssetLoader {
    /// Loader fetching through `fetcher` with URL rules from `config`.
    pub fn new(fetcher: Arc<dyn SpriteFetcher>, config: PlayerConfig) -> Self {
        Self {
            fetcher,
            config: Arc::new(config),
        }
    }

    /// URL rules in use.
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// URLs for `raw`, in playback order.
    pub fn ordered_urls<S: AsRef<str>>(&self, raw: &[S]) -> Vec<String> {
        let markers = SpriteMarkers {
            prefix: &self.config.sprite_prefix,
            suffix: &self.config.sprite_suffix,
        };
        order_sprite_urls(raw, &self.config.url_scheme, markers)
    }

    /// Load every sheet named by `raw` and return them in playback order.
    ///
    /// Must be called within a tokio runtime.
    #[tracing::instrument(skip_all, fields(count = raw.len()))]
    pub async fn load<S: AsRef<str>>(&self, raw: &[S]) -> Vec<SpriteAsset> {
        let urls = self.ordered_urls(raw);

        let pending: Vec<_> = urls
            .into_iter()
            .map(|url| tokio::spawn(load_one(Arc::clone(&self.fetcher), url)))
            .collect();

        let mut assets = Vec::with_capacity(pending.len());
        for handle in pending {
            match handle.await {
                Ok(asset) => assets.push(asset),
                Err(e) => {
                    warn!(error = %e, "sprite load task died; playback will not start");
                    std::future::pending::<()>().await;
                }
            }
        }

        info!(count = assets.len(), "all sprites loaded");
        assets
    }
}

async fn load_one(fetcher: Arc<dyn SpriteFetcher>, url: String) -> SpriteAsset {
    debug!(%url, "loading sprite");
    let image = match fetcher.fetch(&url).await.and_then(|bytes| decode_sprite(&bytes)) {
        Ok(image) => image,
        Err(e) => {
            warn!(%url, error = %e, "sprite never became ready");
            return std::future::pending().await;
        }
    };
    debug!(%url, width = image.width, height = image.height, "loaded sprite");
    SpriteAsset { url, image }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
