//! Shared clone workspace.
//!
//! License detection and code-review coverage both read the working tree.
//! The orchestrator asks for it once before dispatch; concurrent requests for
//! the same repository wait on one clone.

use crate::config::RunConfig;
use crate::github::error::{FetchError, FetchResult};
use crate::scoring::RepoIdentity;
use log::{info, warn};
use lru::LruCache;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::{Mutex, OnceCell};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// How long an interrupted clone worker may take to wind down.
const CANCEL_GRACE: Duration = Duration::from_secs(5);

/// Clone directory plus the per-repository clone cells.
pub struct CloneWorkspace {
    root: PathBuf,
    // Keeps a private root alive (and deletes it) for the workspace's lifetime.
    _temp: Option<TempDir>,
    entries: Mutex<LruCache<String, Arc<OnceCell<PathBuf>>>>,
    timeout: Duration,
}

impl CloneWorkspace {
    pub fn new(config: &RunConfig) -> FetchResult<Self> {
        let (root, temp) = match &config.clone_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                (root.clone(), None)
            }
            None => {
                let temp = TempDir::new()?;
                (temp.path().to_path_buf(), Some(temp))
            }
        };

        let capacity =
            NonZeroUsize::new(config.clone_cache_capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Ok(Self {
            root,
            _temp: temp,
            entries: Mutex::new(LruCache::new(capacity)),
            timeout: config.clone_timeout,
        })
    }

    /// Directory holding the working tree of `identity`.
    #[must_use]
    pub fn path_for(&self, identity: &RepoIdentity) -> PathBuf {
        self.root
            .join(format!("{}__{}", identity.owner, identity.repo))
    }

    /// Clone `identity` unless it already is, returning the working tree.
    pub async fn ensure_cloned(&self, identity: &RepoIdentity) -> FetchResult<PathBuf> {
        let cell = {
            let mut entries = self.entries.lock().await;
            let key = identity.full_name();
            match entries.get(&key) {
                Some(cell) => cell.clone(),
                None => {
                    let cell = Arc::new(OnceCell::new());
                    entries.put(key, cell.clone());
                    cell
                }
            }
        };

        cell.get_or_try_init(|| self.clone_into(identity))
            .await
            .cloned()
    }

    async fn clone_into(&self, identity: &RepoIdentity) -> FetchResult<PathBuf> {
        let dest = self.path_for(identity);
        if dest.join(".git").is_dir() {
            info!("Reusing clone of {} at {}", identity.full_name(), dest.display());
            return Ok(dest);
        }
        if dest.exists() {
            tokio::fs::remove_dir_all(&dest).await?;
        }

        info!("Cloning {} into {}", identity.canonical_url, dest.display());
        let url = identity.canonical_url.clone();
        let dest_owned = dest.clone();
        let interrupt = Arc::new(AtomicBool::new(false));
        let worker_interrupt = interrupt.clone();
        let mut worker = tokio::task::spawn_blocking(move || {
            clone_blocking(&url, &dest_owned, &worker_interrupt)
        });

        let failure = match tokio::time::timeout(self.timeout, &mut worker).await {
            Ok(Ok(Ok(()))) => return Ok(dest),
            Ok(Ok(Err(e))) => FetchError::Clone(e.to_string()),
            Ok(Err(e)) => FetchError::Clone(format!("clone task failed: {e}")),
            Err(_) => {
                // The worker must stop writing before the tree is removed.
                interrupt.store(true, Ordering::Relaxed);
                if tokio::time::timeout(CANCEL_GRACE, worker).await.is_err() {
                    warn!(
                        "Clone of {} still running {CANCEL_GRACE:?} after interrupt",
                        identity.full_name()
                    );
                }
                FetchError::Timeout {
                    operation: format!("git_clone_{}", identity.full_name()),
                    duration: self.timeout,
                }
            }
        };

        if let Err(e) = tokio::fs::remove_dir_all(&dest).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!("Failed to remove partial clone {}: {e}", dest.display());
        }
        Err(failure)
    }
}

/// Shallow clone and checkout of the default branch.
///
/// Stops early once `interrupt` is set; nothing is written when it is set
/// before the clone starts.
fn clone_blocking(url: &str, dest: &Path, interrupt: &AtomicBool) -> Result<(), BoxError> {
    if interrupt.load(Ordering::Relaxed) {
        return Err("clone interrupted before start".into());
    }
    let parsed_url = gix::url::parse(url.into())?;

    let mut prep = gix::prepare_clone(parsed_url, dest)?
        .with_shallow(gix::remote::fetch::Shallow::DepthAtRemote(NonZeroU32::MIN));
    let (mut checkout, _outcome) = prep.fetch_then_checkout(gix::progress::Discard, interrupt)?;
    checkout.main_worktree(gix::progress::Discard, interrupt)?;
    Ok(())
}
