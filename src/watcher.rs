use crate::mode::{load_mode_file, Mode};
use crate::session::SharedMode;
use anyhow::Result;
use notify::{RecommendedWatcher, RecursiveMode, Result as NotifyResult, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Reloads the mode whenever its file changes on disk
pub struct ModeWatcher {
    _watcher: RecommendedWatcher,
}

impl std::fmt::Debug for ModeWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeWatcher")
            .field("_watcher", &"<watcher>")
            .finish()
    }
}

/// Quiet period after the first event before the file is read.
const DEBOUNCE: Duration = Duration::from_millis(500);

impl ModeWatcher {
    /// Must be called from within a tokio runtime.
    pub fn new(path: &Path, mode: SharedMode) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut watcher = notify::recommended_watcher(move |res: NotifyResult<notify::Event>| {
            match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let _ = tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("Mode file watch error: {}", e),
            }
        })?;
        watcher.watch(path, RecursiveMode::NonRecursive)?;
        tracing::info!("Watching mode file {}", path.display());

        tokio::spawn(coalesce_reloads(rx, mode, path.to_path_buf()));

        Ok(ModeWatcher { _watcher: watcher })
    }
}

/// Turns each burst of change events into a single reload. Returns the
/// number of reloads attempted once the sender side is dropped.
async fn coalesce_reloads(
    mut events: mpsc::UnboundedReceiver<()>,
    mode: SharedMode,
    path: PathBuf,
) -> usize {
    let mut reloads = 0;
    while events.recv().await.is_some() {
        tokio::time::sleep(DEBOUNCE).await;
        while events.try_recv().is_ok() {}

        match reload(&mode, &path).await {
            Ok(()) => tracing::info!("Mode reloaded from {}", path.display()),
            Err(e) => {
                tracing::error!("Failed to reload mode: {:#}", e);
                tracing::error!("Keeping existing mode active");
            }
        }
        reloads += 1;
    }
    reloads
}

pub async fn reload(mode: &SharedMode, path: &Path) -> Result<()> {
    let doc = load_mode_file(path)?;
    let compiled = Mode::from_document(&doc)?;
    *mode.write().await = Arc::new(compiled);
    Ok(())
}
