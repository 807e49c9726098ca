use super::helpers::{format_actions, parse_selection, print_report, print_rows};
use anyhow::{anyhow, Context, Result};
use mode_runner::{watcher, ModeSession};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line of interactive input
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Search(String),
    Actions(Vec<usize>),
    Run(usize, Vec<usize>),
    Reload,
    Quit,
    Empty,
}

pub fn parse_input(line: &str) -> Result<Input> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Input::Empty);
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Input::Search(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("actions") | Some("a") => Ok(Input::Actions(parse_selection(
            parts.next().unwrap_or_default(),
        )?)),
        Some("run") | Some("r") => {
            let index = parts
                .next()
                .ok_or_else(|| anyhow!("Usage: :run <action> <rows>"))?
                .parse()
                .context("Invalid action number")?;
            let rows = parse_selection(parts.next().unwrap_or_default())?;
            Ok(Input::Run(index, rows))
        }
        Some("reload") => Ok(Input::Reload),
        Some("quit") | Some("q") => Ok(Input::Quit),
        Some(other) => Err(anyhow!("Unknown command: :{}", other)),
        None => Ok(Input::Empty),
    }
}

/// Read keys and commands from stdin until EOF, `:quit` or Ctrl+C
pub async fn run_interactive(session: &mut ModeSession, mode_path: &Path) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut selection: Vec<usize> = Vec::new();

    println!("🎯 mode-runner interactive");
    println!("💡 <key> search | :actions 0,1 | :run <n> 0,1 | :reload | :quit");

    loop {
        let hint = session.mode().await.placeholder_hint.clone().unwrap_or_default();
        if hint.is_empty() {
            print!("> ");
        } else {
            print!("[{}] > ", hint);
        }
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };

        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("❌ {}", e);
                continue;
            }
        };

        if input == Input::Quit {
            break;
        }
        if let Err(e) = handle_input(session, mode_path, input, &mut selection).await {
            eprintln!("❌ {:#}", e);
        }
    }

    println!("🛑 Bye");
    Ok(())
}

async fn handle_input(
    session: &mut ModeSession,
    mode_path: &Path,
    input: Input,
    selection: &mut Vec<usize>,
) -> Result<()> {
    match input {
        Input::Empty | Input::Quit => {}
        Input::Reload => {
            watcher::reload(&session.shared_mode(), mode_path).await?;
            println!("✅ Mode reloaded from {}", mode_path.display());
        }
        Input::Search(key) => {
            session.search(&key).await?;
            selection.clear();
            let titles = session.mode().await.column_titles.clone();
            print_rows(session, &titles);
        }
        Input::Actions(rows) => {
            let actions = session.resolve_actions(&rows).await?;
            *selection = rows;
            print!("{}", format_actions(&actions));
        }
        Input::Run(index, rows) => {
            let rows = if rows.is_empty() { selection.clone() } else { rows };
            let actions = session.resolve_actions(&rows).await?;
            let action = actions
                .get(index)
                .ok_or_else(|| anyhow!("No action {} for this selection", index))?;

            let report = session.invoke(action, &rows).await?;
            print_report(action, &report);

            if report.refresh_requested {
                *selection = session.refresh(&rows).await?;
                let titles = session.mode().await.column_titles.clone();
                print_rows(session, &titles);
                println!("🔁 Reselected rows: {:?}", selection);
            }
        }
    }
    Ok(())
}
