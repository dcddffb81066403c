use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use super::error::PlacesError;

/// Load state of the address-lookup service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStatus {
    Loading,
    Ready,
    Failed,
}

#[mutants::skip]
impl fmt::Display for ScriptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScriptStatus::Loading => "loading",
            ScriptStatus::Ready => "ready",
            ScriptStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Owns the one-shot ready signal for the address-lookup service.
///
/// Any number of [`ScriptReady`] subscribers can wait on it independently.
/// The status moves from `Loading` to either `Ready` or `Failed` exactly
/// once; later attempts to change it are ignored.
#[derive(Debug, Clone)]
pub struct ScriptLoader {
    tx: Arc<watch::Sender<ScriptStatus>>,
}

impl Default for ScriptLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptLoader {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ScriptStatus::Loading);
        Self { tx: Arc::new(tx) }
    }

    /// A loader that has already failed, for when lookups are not configured.
    pub fn failed() -> Self {
        let loader = Self::new();
        loader.mark_failed();
        loader
    }

    pub fn subscribe(&self) -> ScriptReady {
        ScriptReady {
            rx: self.tx.subscribe(),
        }
    }

    pub fn status(&self) -> ScriptStatus {
        *self.tx.borrow()
    }

    /// Returns `true` if this call moved the status to `Ready`.
    pub fn mark_ready(&self) -> bool {
        self.settle(ScriptStatus::Ready)
    }

    /// Returns `true` if this call moved the status to `Failed`.
    pub fn mark_failed(&self) -> bool {
        self.settle(ScriptStatus::Failed)
    }

    fn settle(&self, outcome: ScriptStatus) -> bool {
        let changed = self.tx.send_if_modified(|status| {
            if *status == ScriptStatus::Loading {
                *status = outcome;
                true
            } else {
                false
            }
        });
        if changed {
            info!(%outcome, "address lookup settled");
        }
        changed
    }

    /// Runs `probe` and settles on its outcome. A probe still running after
    /// `limit` counts as a failed load.
    pub async fn load<F>(&self, probe: F, limit: Duration) -> ScriptStatus
    where
        F: Future<Output = Result<(), PlacesError>>,
    {
        match tokio::time::timeout(limit, probe).await {
            Ok(Ok(())) => {
                self.mark_ready();
            }
            Ok(Err(e)) => {
                warn!(error = %e, "address lookup failed to load");
                self.mark_failed();
            }
            Err(_) => {
                warn!(?limit, "address lookup timed out while loading");
                self.mark_failed();
            }
        }
        self.status()
    }
}

/// A subscriber to a [`ScriptLoader`]'s ready signal.
#[derive(Debug, Clone)]
pub struct ScriptReady {
    rx: watch::Receiver<ScriptStatus>,
}

impl ScriptReady {
    pub fn status(&self) -> ScriptStatus {
        *self.rx.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.status() == ScriptStatus::Ready
    }

    pub fn has_failed(&self) -> bool {
        self.status() == ScriptStatus::Failed
    }

    /// Resolves once the loader settles: `Ok` when ready, an error when the
    /// load failed or the loader was dropped while still loading.
    pub async fn wait(&mut self) -> Result<(), PlacesError> {
        let status = *self
            .rx
            .wait_for(|s| *s != ScriptStatus::Loading)
            .await
            .map_err(|_| PlacesError::LoaderDropped)?;
        match status {
            ScriptStatus::Ready => Ok(()),
            _ => Err(PlacesError::ScriptFailed),
        }
    }

    /// Like [`wait`](Self::wait), giving up after `limit`. Giving up does not
    /// change the loader's status for other subscribers.
    pub async fn wait_timeout(&mut self, limit: Duration) -> Result<(), PlacesError> {
        tokio::time::timeout(limit, self.wait())
            .await
            .map_err(|_| PlacesError::Timeout(limit))?
    }
}
