//! Matching and templating over a loaded mode
//!
//! - `command`: key to command via search rules
//! - `rows`: command output to rows via line rules
//! - `actions`: row selection to follow-up actions via action rules

pub mod actions;
pub mod command;
pub mod rows;

pub use actions::{bind_command, resolve_actions, ResolvedAction};
pub use command::resolve_command;
pub use rows::{parse_rows, reselect, Row};
