//! In-memory model of a loaded mode
//!
//! A mode is compiled from a [`ModeDocument`] in one step: every pattern and
//! argument index is validated up front, so matching never fails at runtime.
//! A mode is immutable once built and is replaced wholesale on reload.

pub mod document;
pub mod loader;

pub use document::{ActionDocument, ModeDocument, ResultLineDocument, SearchTypeDocument};
pub use loader::{load_mode_file, save_mode_file};

use crate::error::{ModeError, Result};
use crate::pattern::Pattern;

/// Key pattern used for the single-command legacy schema.
const LEGACY_KEY_EXP: &str = "^(.*)$";

#[derive(Debug, Clone)]
pub struct SearchRule {
    pub key_pattern: Pattern,
    pub command_template: String,
}

#[derive(Debug, Clone)]
pub struct LineRule {
    pub pattern: Pattern,
    pub ignore: bool,
    pub actions: Vec<ActionRule>,
}

#[derive(Debug, Clone)]
pub struct ActionRule {
    pub name: String,
    pub command_template: String,
    pub override_pattern: Option<Pattern>,
    /// `exp` as authored; an empty string compiles to no override.
    pub override_expression: Option<String>,
    pub binding: ActionBinding,
    pub refresh_after: bool,
}

/// How an action's `%N` placeholders are fed from the capture list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionBinding {
    /// `%(i+1)` takes capture group `indices[i]`.
    Indexed(Vec<usize>),
    /// `%k` takes capture group k.
    AllCaptures,
}

#[derive(Debug, Clone, Default)]
pub struct Mode {
    pub placeholder_hint: Option<String>,
    pub search_rules: Vec<SearchRule>,
    pub column_titles: Vec<String>,
    pub line_rules: Vec<LineRule>,
}

impl Mode {
    pub fn from_document(doc: &ModeDocument) -> Result<Self> {
        let mut search_rules = Vec::new();
        for search_type in &doc.search_types {
            search_rules.push(search_type.compile()?);
        }
        if let Some(legacy) = &doc.search_exp {
            tracing::debug!("Using legacy search_exp: {}", legacy);
            search_rules.push(SearchRule {
                key_pattern: Pattern::new(LEGACY_KEY_EXP)?,
                command_template: legacy.clone(),
            });
        }

        let mut line_rules = Vec::new();
        for line in &doc.result_lines {
            line_rules.push(line.compile()?);
        }

        tracing::info!(
            "Loaded mode with {} search rules, {} line rules, {} columns",
            search_rules.len(),
            line_rules.len(),
            doc.result_titles.len()
        );

        Ok(Self {
            placeholder_hint: doc.placeholder.clone(),
            search_rules,
            column_titles: doc.result_titles.clone(),
            line_rules,
        })
    }

    pub fn to_document(&self) -> ModeDocument {
        ModeDocument {
            placeholder: self.placeholder_hint.clone(),
            search_types: self
                .search_rules
                .iter()
                .map(|rule| SearchTypeDocument {
                    key_exp: rule.key_pattern.as_str().to_string(),
                    search_exp: rule.command_template.clone(),
                })
                .collect(),
            result_titles: self.column_titles.clone(),
            result_lines: self.line_rules.iter().map(LineRule::to_document).collect(),
            search_exp: None,
        }
    }
}

impl SearchTypeDocument {
    pub fn compile(&self) -> Result<SearchRule> {
        Ok(SearchRule {
            key_pattern: Pattern::new(&self.key_exp)?,
            command_template: self.search_exp.clone(),
        })
    }
}

impl ResultLineDocument {
    pub fn compile(&self) -> Result<LineRule> {
        let pattern = Pattern::new(&self.expression)?;
        let mut actions = Vec::new();
        for action in &self.actions {
            actions.push(action.compile(&pattern)?);
        }
        Ok(LineRule {
            pattern,
            ignore: self.ignore,
            actions,
        })
    }
}

impl ActionDocument {
    /// Compile against the pattern of the line rule that owns this action.
    pub fn compile(&self, line_pattern: &Pattern) -> Result<ActionRule> {
        let override_pattern = match self.exp.as_deref() {
            Some(exp) if !exp.is_empty() => Some(Pattern::new(exp)?),
            _ => None,
        };

        let groups = override_pattern
            .as_ref()
            .unwrap_or(line_pattern)
            .group_count();
        if let Some(&index) = self.args.iter().find(|&&index| index > groups) {
            return Err(ModeError::InvalidArgIndex {
                action: self.name.clone(),
                index,
                groups,
            });
        }

        let binding = if self.args.is_empty() {
            ActionBinding::AllCaptures
        } else {
            ActionBinding::Indexed(self.args.clone())
        };

        Ok(ActionRule {
            name: self.name.clone(),
            command_template: self.cmd.clone(),
            override_pattern,
            override_expression: self.exp.clone(),
            binding,
            refresh_after: self.refresh,
        })
    }
}

impl LineRule {
    fn to_document(&self) -> ResultLineDocument {
        ResultLineDocument {
            expression: self.pattern.as_str().to_string(),
            ignore: self.ignore,
            actions: self.actions.iter().map(ActionRule::to_document).collect(),
        }
    }
}

impl ActionRule {
    /// The pattern rows must match for this action: the override if present,
    /// otherwise the owning line rule's pattern.
    pub fn matching_pattern<'a>(&'a self, line_pattern: &'a Pattern) -> &'a Pattern {
        self.override_pattern.as_ref().unwrap_or(line_pattern)
    }

    fn to_document(&self) -> ActionDocument {
        ActionDocument {
            name: self.name.clone(),
            cmd: self.command_template.clone(),
            exp: self.override_expression.clone(),
            refresh: self.refresh_after,
            args: match &self.binding {
                ActionBinding::Indexed(indices) => indices.clone(),
                ActionBinding::AllCaptures => Vec::new(),
            },
        }
    }
}
