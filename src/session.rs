//! Runtime call surface used by a front end
//!
//! A session ties a shared mode, a command executor and the current row set
//! together: `search` turns a key into rows, `resolve_actions` offers actions
//! for a selection of row indices, and `invoke` runs one of them against
//! every selected row in order.

use crate::error::{ModeError, Result};
use crate::executor::CommandExecutor;
use crate::mode::{Mode, ModeDocument};
use crate::search::{parse_rows, reselect, resolve_actions, resolve_command, ResolvedAction, Row};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Mode shared between a session and a reloader; always swapped wholesale.
pub type SharedMode = Arc<RwLock<Arc<Mode>>>;

pub fn create_shared_mode(mode: Mode) -> SharedMode {
    Arc::new(RwLock::new(Arc::new(mode)))
}

/// Outcome of invoking one action against a selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvokeReport {
    /// Commands that were started and ran to completion.
    pub ran: usize,
    /// Rows that no longer matched the action's pattern.
    pub skipped: usize,
    /// Commands that could not be started.
    pub failed: usize,
    pub refresh_requested: bool,
}

pub struct ModeSession {
    mode: SharedMode,
    executor: Arc<dyn CommandExecutor>,
    rows: Arc<Vec<Row>>,
    last_key: Option<String>,
}

impl ModeSession {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self::with_shared_mode(create_shared_mode(Mode::default()), executor)
    }

    pub fn with_shared_mode(mode: SharedMode, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            mode,
            executor,
            rows: Arc::new(Vec::new()),
            last_key: None,
        }
    }

    pub fn shared_mode(&self) -> SharedMode {
        Arc::clone(&self.mode)
    }

    /// Snapshot of the current mode.
    pub async fn mode(&self) -> Arc<Mode> {
        Arc::clone(&*self.mode.read().await)
    }

    /// Compile `doc` and replace the current mode. On error the current mode
    /// is left untouched.
    pub async fn load_mode(&self, doc: &ModeDocument) -> Result<()> {
        let mode = Mode::from_document(doc)?;
        *self.mode.write().await = Arc::new(mode);
        Ok(())
    }

    pub async fn save_mode(&self) -> ModeDocument {
        self.mode().await.to_document()
    }

    pub fn rows(&self) -> Arc<Vec<Row>> {
        Arc::clone(&self.rows)
    }

    pub fn last_key(&self) -> Option<&str> {
        self.last_key.as_deref()
    }

    /// Resolve `key` to a command, run it and rebuild the row set from its
    /// output. A command that fails to start or exits non-zero still yields
    /// rows from whatever text it produced.
    pub async fn search(&mut self, key: &str) -> Result<Arc<Vec<Row>>> {
        let mode = self.mode().await;
        let command = resolve_command(key, &mode.search_rules)?;
        info!("Searching {:?} with: {}", key, command);

        let stdout = match self.executor.execute(&command).await {
            Ok(output) => {
                if !output.success() {
                    warn!(
                        "Search command exited with {:?}, parsing partial output",
                        output.exit_code
                    );
                }
                output.stdout
            }
            Err(e) => {
                warn!("Search command failed: {}", e);
                String::new()
            }
        };

        self.rows = Arc::new(parse_rows(&stdout, &mode.line_rules, &mode.column_titles));
        self.last_key = Some(key.to_string());
        Ok(self.rows())
    }

    /// Rows addressed by `indices`, in selection order with repeats removed.
    pub fn selected_rows(&self, indices: &[usize]) -> Result<Vec<&Row>> {
        let mut seen = Vec::with_capacity(indices.len());
        let mut selected = Vec::with_capacity(indices.len());
        for &index in indices {
            if seen.contains(&index) {
                continue;
            }
            let row = self.rows.get(index).ok_or(ModeError::RowOutOfRange {
                index,
                len: self.rows.len(),
            })?;
            seen.push(index);
            selected.push(row);
        }
        Ok(selected)
    }

    pub async fn resolve_actions(&self, indices: &[usize]) -> Result<Vec<ResolvedAction>> {
        let mode = self.mode().await;
        let selected = self.selected_rows(indices)?;
        Ok(resolve_actions(&selected, &mode.line_rules))
    }

    /// Run `action` once per selected row, strictly one after another.
    pub async fn invoke(&self, action: &ResolvedAction, indices: &[usize]) -> Result<InvokeReport> {
        let selected = self.selected_rows(indices)?;
        let mut report = InvokeReport {
            refresh_requested: action.refresh_after,
            ..Default::default()
        };

        for row in selected {
            let Some(command) = action.command_for(row) else {
                warn!(
                    "Row {:?} no longer matches {:?}, skipping action '{}'",
                    row.source_text,
                    action.pattern().as_str(),
                    action.name
                );
                report.skipped += 1;
                continue;
            };

            info!("Running action '{}': {}", action.name, command);
            match self.executor.execute(&command).await {
                Ok(output) => {
                    if !output.success() {
                        warn!(
                            "Action '{}' exited with {:?}: {}",
                            action.name,
                            output.exit_code,
                            output.stderr.trim()
                        );
                    }
                    report.ran += 1;
                }
                Err(e) => {
                    warn!("Action '{}' failed: {}", action.name, e);
                    report.failed += 1;
                }
            }
        }

        debug!("Invocation report for '{}': {:?}", action.name, report);
        Ok(report)
    }

    /// Re-run the last search and reselect rows by text. Rows with the same
    /// text as a previously selected row are all selected. Returns an empty
    /// selection when nothing has been searched yet.
    pub async fn refresh(&mut self, indices: &[usize]) -> Result<Vec<usize>> {
        let texts: Vec<String> = self
            .selected_rows(indices)?
            .into_iter()
            .map(|row| row.source_text.clone())
            .collect();

        let Some(key) = self.last_key.clone() else {
            return Ok(Vec::new());
        };

        let rows = self.search(&key).await?;
        let reselected = reselect(&rows, &texts);
        debug!(
            "Reselected {} of {} rows after refresh",
            reselected.len(),
            texts.len()
        );
        Ok(reselected)
    }
}

impl std::fmt::Debug for ModeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeSession")
            .field("rows", &self.rows.len())
            .field("last_key", &self.last_key)
            .finish()
    }
}
