use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::foundation::error::{FlipError, FlipResult};

/// Source of encoded sprite bytes.
#[async_trait]
pub trait SpriteFetcher: Send + Sync {
    /// Fetch the full body behind `url`.
    async fn fetch(&self, url: &str) -> FlipResult<Vec<u8>>;
}

/// Fetches over HTTP(S) with a shared `ureq` agent.
///
/// Requests run on tokio's blocking pool. The agent has no global timeout, so a server that
/// never answers keeps the request open.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Fetcher using `ureq` defaults.
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }

    /// Fetcher using a preconfigured agent.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    pub(crate) fn agent(&self) -> &ureq::Agent {
        &self.agent
    }
}

#[async_trait]
impl SpriteFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FlipResult<Vec<u8>> {
        let agent = self.agent.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || -> FlipResult<Vec<u8>> {
            let mut resp = agent
                .get(&url)
                .call()
                .map_err(|e| FlipError::fetch(format!("GET '{url}': {e}")))?;
            resp.body_mut()
                .read_to_vec()
                .map_err(|e| FlipError::fetch(format!("read body of '{url}': {e}")))
        })
        .await
        .map_err(|e| FlipError::fetch(format!("fetch task failed: {e}")))?
    }
}

/// Serves sprites from a local directory, keyed by the URL's file name.
///
/// `http://cdn.example.com/m/sprite-3.jpg?v=2` is read from `<root>/sprite-3.jpg`.
#[derive(Clone, Debug)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    /// Fetcher reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory sprites are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path a URL maps to.
    pub fn path_for(&self, url: &str) -> FlipResult<PathBuf> {
        let name = url_file_name(url)
            .ok_or_else(|| FlipError::fetch(format!("no file name in '{url}'")))?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl SpriteFetcher for DirFetcher {
    async fn fetch(&self, url: &str) -> FlipResult<Vec<u8>> {
        let path = self.path_for(url)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| FlipError::fetch(format!("read '{}': {e}", path.display())))
    }
}

/// Last path segment of a URL with query and fragment removed.
pub(crate) fn url_file_name(url: &str) -> Option<&str> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let name = path.rsplit('/').next()?;
    if name.is_empty() || name == "." || name == ".." {
        return None;
    }
    Some(name)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
