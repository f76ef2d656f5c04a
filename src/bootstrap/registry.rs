use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::FlipResult;

/// Index of a player in its [`PlayerRegistry`], in construction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

/// Coarse lifecycle of one player.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerStatus {
    /// Waiting for the per-instance manifest.
    FetchingManifest,
    /// Manifest received; sprites are loading.
    Loading,
    /// Strip attached and sliding.
    Playing,
    /// Playback reached its final frame.
    Finished(FrameIndex),
    /// The manifest could not be fetched or playback could not start.
    Failed(String),
}

/// What a player task hands back when it ends.
#[derive(Debug)]
pub struct PlayerOutcome<S> {
    /// The mount scene, as left by the player.
    pub mount: S,
    /// Final frame index, or why the player stopped.
    pub result: FlipResult<FrameIndex>,
}

/// One registered player.
#[derive(Debug)]
pub struct PlayerEntry<S> {
    manifest_url: String,
    status: watch::Receiver<PlayerStatus>,
    task: Option<JoinHandle<PlayerOutcome<S>>>,
}

impl<S> PlayerEntry<S> {
    pub(crate) fn new(
        manifest_url: String,
        status: watch::Receiver<PlayerStatus>,
        task: JoinHandle<PlayerOutcome<S>>,
    ) -> Self {
        Self {
            manifest_url,
            status,
            task: Some(task),
        }
    }

    /// Manifest URL the player was discovered with.
    pub fn manifest_url(&self) -> &str {
        &self.manifest_url
    }

    /// Latest reported status.
    pub fn status(&self) -> PlayerStatus {
        self.status.borrow().clone()
    }

    /// Receiver following every status change.
    pub fn subscribe(&self) -> watch::Receiver<PlayerStatus> {
        self.status.clone()
    }
}

/// Players constructed by one bootstrap, in construction order.
///
/// Owned by whoever runs discovery. Players are only ever appended; an entry stays registered
/// after its task ends.
#[derive(Debug)]
pub struct PlayerRegistry<S> {
    players: Vec<PlayerEntry<S>>,
}

impl<S> Default for PlayerRegistry<S> {
    fn default() -> Self {
        Self {
            players: Vec::new(),
        }
    }
}

impl<S> PlayerRegistry<S> {
    /// Empty registry, created when discovery starts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly constructed player.
    pub fn register(&mut self, entry: PlayerEntry<S>) -> PlayerId {
        self.players.push(entry);
        PlayerId(self.players.len() - 1)
    }

    /// Number of registered players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// `true` when discovery found nothing.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Entry for `id`.
    pub fn get(&self, id: PlayerId) -> Option<&PlayerEntry<S>> {
        self.players.get(id.0)
    }

    /// Entries in construction order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &PlayerEntry<S>)> {
        self.players.iter().enumerate().map(|(i, e)| (PlayerId(i), e))
    }

    /// Wait for player `id` to end and take its outcome.
    ///
    /// Returns `None` for unknown ids and when the outcome was already taken. Waits forever for
    /// a player stuck loading.
    pub async fn join(&mut self, id: PlayerId) -> Option<PlayerOutcome<S>> {
        let task = self.players.get_mut(id.0)?.task.take()?;
        task.await.ok()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/bootstrap/registry.rs"]
mod tests;
