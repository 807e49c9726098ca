use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to mode file (JSON, or YAML by .yaml/.yml extension)
    #[arg(long, global = true, default_value = "mode.json")]
    pub mode: PathBuf,

    /// Enable debug logging for internal details
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Shell used to run commands, followed by its arguments (e.g. "bash -c")
    #[arg(long, global = true)]
    pub shell: Option<String>,

    /// Print commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Reload the mode file when it changes (interactive mode)
    #[arg(long)]
    pub watch: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the search for KEY and print the rows
    Search(SearchArgs),
    /// List the actions offered for the selected rows
    Actions(SelectArgs),
    /// Run an action against the selected rows
    Run(RunArgs),
    /// Show the loaded mode
    Show,
    /// Write the loaded mode to OUT (JSON, or YAML by extension)
    Save(SaveArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    pub key: String,

    /// Comma-separated row indices
    #[arg(long, value_delimiter = ',', required = true)]
    pub rows: Vec<usize>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Action name as listed by `actions`
    #[arg(long)]
    pub action: String,
}

#[derive(Args, Debug)]
pub struct SaveArgs {
    pub out: PathBuf,
}
