pub mod error;
pub mod executor;
pub mod mode;
pub mod pattern;
pub mod search;
pub mod session;
pub mod watcher;

// Public API
pub use error::ModeError;
pub use executor::{CommandExecutor, ExecutionOutput, RecordingExecutor, ShellExecutor};
pub use mode::{ActionBinding, ActionRule, LineRule, Mode, ModeDocument, SearchRule};
pub use pattern::{replace_placeholders, CaptureList, Pattern};
pub use search::{ResolvedAction, Row};
pub use session::{create_shared_mode, InvokeReport, ModeSession, SharedMode};
pub use watcher::ModeWatcher;
