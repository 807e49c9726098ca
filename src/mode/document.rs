use crate::error::{ModeError, Result};
use serde::{Deserialize, Serialize};

// Serialized form of a mode, as authored in a mode file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub search_types: Vec<SearchTypeDocument>,
    #[serde(default)]
    pub result_titles: Vec<String>,
    #[serde(default)]
    pub result_lines: Vec<ResultLineDocument>,
    /// Earliest schema: one command for every key, `%1` being the whole key.
    #[serde(default, skip_serializing)]
    pub search_exp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTypeDocument {
    pub key_exp: String,
    pub search_exp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLineDocument {
    pub expression: String,
    #[serde(default)]
    pub ignore: bool,
    #[serde(default)]
    pub actions: Vec<ActionDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDocument {
    pub name: String,
    pub cmd: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<String>,
    #[serde(default)]
    pub refresh: bool,
    #[serde(default)]
    pub args: Vec<usize>,
}

impl ModeDocument {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ModeError::ConfigParse(e.to_string()))?;
        if !value.is_object() {
            return Err(ModeError::ConfigParse("Not a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| ModeError::ConfigParse(e.to_string()))
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| ModeError::ConfigParse(e.to_string()))?;
        if !value.is_mapping() {
            return Err(ModeError::ConfigParse("Not a YAML mapping".to_string()));
        }
        serde_yaml::from_value(value).map_err(|e| ModeError::ConfigParse(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ModeError::ConfigParse(e.to_string()))
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ModeError::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let doc = ModeDocument::from_json_str(
            r#"{
                "search_types": [{"key_exp": "^(\\d+)$", "search_exp": "netstat -ano | findstr %1"}],
                "result_lines": [{"expression": "x", "actions": [{"name": "n", "cmd": "c"}]}]
            }"#,
        )
        .unwrap();

        assert!(doc.placeholder.is_none());
        assert!(doc.result_titles.is_empty());
        let line = &doc.result_lines[0];
        assert!(!line.ignore);
        let action = &line.actions[0];
        assert!(!action.refresh);
        assert!(action.args.is_empty());
        assert!(action.exp.is_none());
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = ModeDocument::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ModeError::ConfigParse(ref msg) if msg.contains("object")));

        let err = ModeDocument::from_yaml_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ModeError::ConfigParse(_)));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = ModeDocument::from_json_str("{ \"search_types\": [").unwrap_err();
        assert!(matches!(err, ModeError::ConfigParse(_)));
    }

    #[test]
    fn test_negative_arg_index_is_a_parse_error() {
        let err = ModeDocument::from_json_str(
            r#"{"result_lines": [{"expression": "x", "actions": [{"name": "n", "cmd": "c", "args": [-1]}]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModeError::ConfigParse(_)));
    }

    #[test]
    fn test_yaml_document() {
        let doc = ModeDocument::from_yaml_str(
            r#"
placeholder: port number
search_types:
  - key_exp: '^(\d+)$'
    search_exp: 'lsof -i :%1'
result_titles: [Command, PID]
result_lines:
  - expression: '^(\S+)\s+(\d+)'
    actions:
      - name: Kill
        cmd: 'kill %1'
        args: [2]
        refresh: true
"#,
        )
        .unwrap();

        assert_eq!(doc.placeholder.as_deref(), Some("port number"));
        assert_eq!(doc.result_titles, vec!["Command", "PID"]);
        assert_eq!(doc.result_lines[0].actions[0].args, vec![2]);
        assert!(doc.result_lines[0].actions[0].refresh);
    }

    #[test]
    fn test_legacy_search_exp_is_not_written_back() {
        let doc = ModeDocument {
            search_exp: Some("netstat -ano | findstr %1".to_string()),
            ..Default::default()
        };
        let json = doc.to_json_string().unwrap();
        assert!(!json.contains("netstat"));
    }
}
