mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{format_actions, print_report, print_rows, run_interactive, shell_executor, Cli, Commands};
use mode_runner::mode::{load_mode_file, save_mode_file};
use mode_runner::{CommandExecutor, ModeSession, ModeWatcher, RecordingExecutor};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first to get debug flag
    let cli = Cli::parse();

    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let executor: Arc<dyn CommandExecutor> = if cli.dry_run {
        Arc::new(RecordingExecutor::new())
    } else {
        let shell = shell_executor(cli.shell.as_deref())?;
        tracing::debug!("Running commands through {}", shell.program());
        Arc::new(shell)
    };

    let mut session = ModeSession::new(executor);
    let doc = load_mode_file(&cli.mode)?;
    session
        .load_mode(&doc)
        .await
        .with_context(|| format!("Invalid mode file: {}", cli.mode.display()))?;

    match cli.command {
        None => {
            let _watcher = if cli.watch {
                Some(ModeWatcher::new(&cli.mode, session.shared_mode())?)
            } else {
                None
            };
            run_interactive(&mut session, &cli.mode).await?
        }
        Some(command) => match command {
            Commands::Search(args) => {
                session.search(&args.key).await?;
                let titles = session.mode().await.column_titles.clone();
                print_rows(&session, &titles);
            }
            Commands::Actions(args) => {
                session.search(&args.key).await?;
                let actions = session.resolve_actions(&args.rows).await?;
                print!("{}", format_actions(&actions));
            }
            Commands::Run(args) => handle_run_command(&mut session, &args).await?,
            Commands::Show => handle_show_command(&session).await,
            Commands::Save(args) => {
                save_mode_file(&args.out, &session.save_mode().await)?;
                println!("✅ Mode saved to {}", args.out.display());
            }
        },
    }

    Ok(())
}

/// Search, pick the named action for the selection and run it
async fn handle_run_command(session: &mut ModeSession, args: &cli::args::RunArgs) -> Result<()> {
    let rows = &args.select.rows;
    session.search(&args.select.key).await?;

    let actions = session.resolve_actions(rows).await?;
    let action = actions
        .iter()
        .find(|action| action.name == args.action)
        .ok_or_else(|| anyhow!("Action '{}' is not offered for rows {:?}", args.action, rows))?;

    let report = session.invoke(action, rows).await?;
    print_report(action, &report);

    if report.refresh_requested {
        let reselected = session.refresh(rows).await?;
        let titles = session.mode().await.column_titles.clone();
        print_rows(session, &titles);
        println!("🔁 Reselected rows: {:?}", reselected);
    }
    Ok(())
}

/// Handle show command
async fn handle_show_command(session: &ModeSession) {
    let mode = session.mode().await;

    if let Some(hint) = mode.placeholder_hint.as_deref().filter(|hint| !hint.is_empty()) {
        println!("Placeholder: {}", hint);
    }
    println!("Columns: {}", mode.column_titles.join(" | "));

    println!("\nSearch rules:");
    for (i, rule) in mode.search_rules.iter().enumerate() {
        println!(
            "  {}: {} -> {}",
            i + 1,
            rule.key_pattern.as_str(),
            rule.command_template
        );
    }

    println!("\nLine rules:");
    for (i, rule) in mode.line_rules.iter().enumerate() {
        let ignore = if rule.ignore { " (ignore)" } else { "" };
        println!("  {}: {}{}", i + 1, rule.pattern.as_str(), ignore);
        for action in &rule.actions {
            println!(
                "     - {}: {} {:?}{}",
                action.name,
                action.command_template,
                action.binding,
                if action.refresh_after { " (refresh)" } else { "" }
            );
        }
    }
}
