pub mod args;
pub mod helpers;
pub mod interactive;

pub use args::{Cli, Commands};
pub use helpers::{format_actions, print_report, print_rows, shell_executor};
pub use interactive::run_interactive;
