use crate::error::{ModeError, Result};
use regex::Regex;

/// Compiled regular expression used by every rule in a mode.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

/// Capture texts of one match. Index 0 is the whole match, index k is group k.
///
/// Always holds `group_count() + 1` entries; a group that did not take part
/// in the match is the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureList(Vec<String>);

impl Pattern {
    pub fn new(expression: &str) -> Result<Self> {
        let regex = Regex::new(expression).map_err(|source| ModeError::InvalidPattern {
            expression: expression.to_string(),
            source,
        })?;
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn captures(&self, text: &str) -> Option<CaptureList> {
        let captures = self.regex.captures(text)?;
        let groups = captures
            .iter()
            .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
            .collect();
        Some(CaptureList(groups))
    }
}

impl CaptureList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Groups 1.. in source order.
    pub fn groups(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }
}

/// Substitute `%k` placeholders in `template` with `values[k]`.
///
/// Valid indices are `1..values.len()`. At each `%` the longest run of digits
/// naming a valid index wins, so `%12` is group 12 when it exists and group 1
/// followed by a literal `2` otherwise. Anything else stays literal, and
/// substituted text is never scanned again.
pub fn replace_placeholders(template: &str, values: &[String]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('%') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());

        match longest_valid_index(&after[..digits], values.len()) {
            Some((index, used)) => {
                result.push_str(&values[index]);
                rest = &after[used..];
            }
            None => {
                result.push('%');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

fn longest_valid_index(digits: &str, len: usize) -> Option<(usize, usize)> {
    if digits.starts_with('0') {
        return None;
    }
    (1..=digits.len()).rev().find_map(|used| {
        let index: usize = digits[..used].parse().ok()?;
        (index >= 1 && index < len).then_some((index, used))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = Pattern::new("[invalid").unwrap_err();
        assert!(matches!(err, ModeError::InvalidPattern { .. }));
        assert!(err.to_string().contains("[invalid"));
    }

    #[test]
    fn test_captures_include_whole_match() {
        let pattern = Pattern::new(r"(\w+)=(\d+)").unwrap();
        let captures = pattern.captures("set port=8080 now").unwrap();
        assert_eq!(captures.as_slice(), values(&["port=8080", "port", "8080"]));
        assert_eq!(captures.groups(), values(&["port", "8080"]));
        assert_eq!(pattern.group_count(), 2);
    }

    #[test]
    fn test_non_participating_group_is_empty() {
        let pattern = Pattern::new(r"(a)|(b)").unwrap();
        let captures = pattern.captures("b").unwrap();
        assert_eq!(captures.len(), 3);
        assert_eq!(captures.get(1), Some(""));
        assert_eq!(captures.get(2), Some("b"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let pattern = Pattern::new(r"^\d+$").unwrap();
        assert!(pattern.captures("abc").is_none());
        assert!(!pattern.is_match("abc"));
    }

    #[test]
    fn test_replace_single() {
        let result = replace_placeholders("findstr %1", &values(&["8080", "8080"]));
        assert_eq!(result, "findstr 8080");
    }

    #[test]
    fn test_replace_without_placeholders_is_identity() {
        let template = "echo 100% done";
        assert_eq!(replace_placeholders(template, &values(&["x", "y"])), template);
    }

    #[test]
    fn test_replace_prefers_longest_index() {
        let mut groups = vec!["all".to_string()];
        groups.extend((1..=12).map(|i| format!("g{}", i)));
        assert_eq!(replace_placeholders("%12 %1", &groups), "g12 g1");
    }

    #[test]
    fn test_replace_falls_back_to_shorter_index() {
        let groups = values(&["all", "one"]);
        assert_eq!(replace_placeholders("%12", &groups), "one2");
    }

    #[test]
    fn test_out_of_range_and_zero_stay_literal() {
        let groups = values(&["all", "one"]);
        assert_eq!(replace_placeholders("%0 %3 %", &groups), "%0 %3 %");
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let groups = values(&["all", "%2", "two"]);
        assert_eq!(replace_placeholders("%1-%2", &groups), "%2-two");
    }

    #[test]
    fn test_repeated_placeholder() {
        let groups = values(&["all", "x"]);
        assert_eq!(replace_placeholders("%1%1", &groups), "xx");
    }
}
