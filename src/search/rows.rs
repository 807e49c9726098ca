use crate::mode::LineRule;
use std::collections::HashSet;

/// One structured record extracted from one output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub source_text: String,
    pub cells: Vec<String>,
}

/// Parses command output into rows.
///
/// Output is split on any run of CR/LF characters and empty lines are
/// discarded. For each line the first matching line rule decides: an ignore
/// rule drops the line, any other rule emits a row whose cells are the
/// capture groups, cut to the number of titles. Lines no rule matches are
/// dropped.
pub fn parse_rows(output: &str, line_rules: &[LineRule], titles: &[String]) -> Vec<Row> {
    let mut rows = Vec::new();

    for line in output.split(['\r', '\n']).filter(|line| !line.is_empty()) {
        let matched = line_rules
            .iter()
            .find_map(|rule| rule.pattern.captures(line).map(|captures| (rule, captures)));

        let Some((rule, captures)) = matched else {
            tracing::trace!("No line rule matched: {:?}", line);
            continue;
        };
        if rule.ignore {
            tracing::trace!("Ignoring line: {:?}", line);
            continue;
        }

        let cells = captures
            .groups()
            .iter()
            .take(titles.len())
            .cloned()
            .collect();
        rows.push(Row {
            source_text: line.to_string(),
            cells,
        });
    }

    tracing::debug!("Parsed {} rows from {} bytes of output", rows.len(), output.len());
    rows
}

/// Best-effort reselection after a refresh: every row whose text equals one
/// of `texts` is selected. Rows sharing a text are reselected together.
pub fn reselect(rows: &[Row], texts: &[String]) -> Vec<usize> {
    let wanted: HashSet<&str> = texts.iter().map(String::as_str).collect();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| wanted.contains(row.source_text.as_str()))
        .map(|(i, _)| i)
        .collect()
}
