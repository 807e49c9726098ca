use anyhow::{anyhow, Result};
use mode_runner::{InvokeReport, ModeSession, ResolvedAction, Row, ShellExecutor};

/// Build the shell executor from a `--shell` value such as "bash -c"
pub fn shell_executor(shell: Option<&str>) -> Result<ShellExecutor> {
    let Some(shell) = shell else {
        return Ok(ShellExecutor::default());
    };
    let mut parts = shell.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| anyhow!("Empty --shell value"))?;
    Ok(ShellExecutor::new(program, parts.map(str::to_string).collect()))
}

/// Parse "0,2, 5" into row indices
pub fn parse_selection(text: &str) -> Result<Vec<usize>> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse()
                .map_err(|_| anyhow!("Invalid row index: {}", part))
        })
        .collect()
}

/// Render rows as an aligned table; missing cells are blank.
pub fn format_rows(titles: &[String], rows: &[Row]) -> String {
    let columns = titles.len();
    let mut widths: Vec<usize> = titles.iter().map(|t| t.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let index_width = rows.len().saturating_sub(1).to_string().len().max(1);
    let mut out = String::new();
    out.push_str(&format!("{:>index_width$}", "#"));
    for (title, width) in titles.iter().zip(&widths) {
        out.push_str(&format!("  {:<width$}", title));
    }
    out.push('\n');

    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("{:>index_width$}", i));
        for (col, width) in widths.iter().enumerate().take(columns) {
            let cell = row.cells.get(col).map(String::as_str).unwrap_or("");
            out.push_str(&format!("  {:<width$}", cell));
        }
        out.push('\n');
    }
    out
}

pub fn format_actions(actions: &[ResolvedAction]) -> String {
    if actions.is_empty() {
        return "No actions for this selection\n".to_string();
    }
    actions
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let refresh = if action.refresh_after { " (refresh)" } else { "" };
            format!("{}: {} -> {}{}\n", i, action.name, action.bound_command, refresh)
        })
        .collect()
}

pub fn print_rows(session: &ModeSession, titles: &[String]) {
    let rows = session.rows();
    print!("{}", format_rows(titles, &rows));
    println!("{} rows", rows.len());
}

pub fn print_report(action: &ResolvedAction, report: &InvokeReport) {
    println!(
        "✅ '{}' ran {} command(s), skipped {}, failed {}",
        action.name, report.ran, report.skipped, report.failed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("0, 2,5").unwrap(), vec![0, 2, 5]);
        assert!(parse_selection("").unwrap().is_empty());
        assert!(parse_selection("1,x").is_err());
    }

    #[test]
    fn test_shell_executor_from_flag() {
        assert_eq!(shell_executor(Some("bash -c")).unwrap().program(), "bash");
        assert!(shell_executor(Some("   ")).is_err());
    }

    #[test]
    fn test_format_rows_blank_missing_cells() {
        let titles = vec!["Name".to_string(), "PID".to_string()];
        let rows = vec![
            Row {
                source_text: "init 1".to_string(),
                cells: vec!["init".to_string(), "1".to_string()],
            },
            Row {
                source_text: "orphan".to_string(),
                cells: vec!["orphan".to_string()],
            },
        ];
        let table = format_rows(&titles, &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "#  Name    PID");
        assert_eq!(lines[1], "0  init    1  ");
        assert_eq!(lines[2], "1  orphan     ");
    }
}
