use super::rows::Row;
use crate::mode::{ActionBinding, ActionRule, LineRule};
use crate::pattern::{replace_placeholders, CaptureList, Pattern};

/// An action offered for a selection, ready to be invoked.
///
/// Carries its own matching pattern and binding so invocation does not
/// depend on the mode it was resolved from.
#[derive(Debug, Clone)]
pub struct ResolvedAction {
    pub name: String,
    /// Command bound against the first selected row.
    pub bound_command: String,
    pub refresh_after: bool,
    template: String,
    pattern: Pattern,
    binding: ActionBinding,
}

impl ResolvedAction {
    fn new(rule: &ActionRule, pattern: &Pattern, representative: &CaptureList) -> Self {
        Self {
            name: rule.name.clone(),
            bound_command: bind_command(&rule.command_template, &rule.binding, representative),
            refresh_after: rule.refresh_after,
            template: rule.command_template.clone(),
            pattern: pattern.clone(),
            binding: rule.binding.clone(),
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Re-match this action's pattern against `row` and bind the command
    /// for it. `None` when the row no longer matches.
    pub fn command_for(&self, row: &Row) -> Option<String> {
        let captures = self.pattern.captures(&row.source_text)?;
        Some(bind_command(&self.template, &self.binding, &captures))
    }
}

/// Fill an action template from a capture list according to its binding.
pub fn bind_command(template: &str, binding: &ActionBinding, captures: &CaptureList) -> String {
    match binding {
        ActionBinding::AllCaptures => replace_placeholders(template, captures.as_slice()),
        ActionBinding::Indexed(indices) => {
            let mut values = Vec::with_capacity(indices.len() + 1);
            values.push(captures.get(0).unwrap_or_default().to_string());
            values.extend(
                indices
                    .iter()
                    .map(|&index| captures.get(index).unwrap_or_default().to_string()),
            );
            replace_placeholders(template, &values)
        }
    }
}

/// Actions valid for every row of `selection`.
///
/// The first row picks the governing line rule (first rule whose pattern
/// matches it). Each of that rule's actions is offered only if its matching
/// pattern matches every selected row; an action that fails for one row is
/// skipped without affecting the others. Commands are bound from the first
/// row.
pub fn resolve_actions(selection: &[&Row], line_rules: &[LineRule]) -> Vec<ResolvedAction> {
    let Some(representative) = selection.first() else {
        return Vec::new();
    };

    let Some(line_rule) = line_rules
        .iter()
        .find(|rule| rule.pattern.is_match(&representative.source_text))
    else {
        tracing::debug!(
            "No governing line rule for {:?}",
            representative.source_text
        );
        return Vec::new();
    };

    let mut resolved = Vec::new();
    for action in &line_rule.actions {
        let pattern = action.matching_pattern(&line_rule.pattern);

        if let Some(row) = selection
            .iter()
            .find(|row| !pattern.is_match(&row.source_text))
        {
            tracing::debug!(
                "Action '{}' not offered: {:?} does not match {:?}",
                action.name,
                row.source_text,
                pattern.as_str()
            );
            continue;
        }

        let Some(captures) = pattern.captures(&representative.source_text) else {
            continue;
        };
        resolved.push(ResolvedAction::new(action, pattern, &captures));
    }

    tracing::debug!(
        "Resolved {} actions for {} selected rows",
        resolved.len(),
        selection.len()
    );
    resolved
}
