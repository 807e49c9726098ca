use crate::error::{ModeError, Result};
use crate::mode::SearchRule;
use crate::pattern::replace_placeholders;

/// Turns a search key into a command using the first matching search rule.
///
/// Rules are tried in authored order and the first match wins, even when a
/// later rule would capture more. `%1..%N` in the command template take the
/// key's capture groups.
pub fn resolve_command(key: &str, rules: &[SearchRule]) -> Result<String> {
    for (i, rule) in rules.iter().enumerate() {
        if let Some(captures) = rule.key_pattern.captures(key) {
            let command = replace_placeholders(&rule.command_template, captures.as_slice());
            tracing::debug!(
                "Search rule #{} {:?} matched key {:?} -> {}",
                i,
                rule.key_pattern.as_str(),
                key,
                command
            );
            return Ok(command);
        }
    }

    tracing::debug!("No search rule matched key {:?}", key);
    Err(ModeError::NoRuleMatched {
        key: key.to_string(),
    })
}
