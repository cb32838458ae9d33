//! Shared metadata model for argtree command trees.
//!
//! This crate intentionally does **not** know how to parse anything.
//! The data types here describe a command tree and are used for:
//! - rendering help text (`argtree::help`)
//! - exporting a parser's shape as JSON for docs and tooling

use serde::{Deserialize, Serialize};

/// Whether an option consumes a value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ValueExpectation {
    /// A value must follow (`--name=value` or `--name value`).
    Required,
    /// A value may follow; presence alone is meaningful.
    Optional,
    /// Any value that follows is handed to the callback but never demanded.
    #[default]
    NotRequired,
}

impl ValueExpectation {
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::NotRequired)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSummary {
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub value: ValueExpectation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ArgumentSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CommandSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentSummary>,
    /// Subcommands in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandSummary>,
}

impl CommandSummary {
    /// Direct child by exact name.
    pub fn child(&self, name: &str) -> Option<&CommandSummary> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Walk a path of subcommand names starting at `self`.
    pub fn find(&self, path: &[&str]) -> Option<&CommandSummary> {
        path.iter().try_fold(self, |cmd, name| cmd.child(name))
    }

    /// Number of commands in this subtree, `self` included.
    pub fn len(&self) -> usize {
        1 + self.commands.iter().map(CommandSummary::len).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.commands.is_empty()
    }
}

/// JSON payload describing a whole parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TreeMetadataV1 {
    pub format_version: u32,
    pub prefix: char,
    pub separator: char,
    pub root: CommandSummary,
}

impl TreeMetadataV1 {
    pub fn new(prefix: char, separator: char, root: CommandSummary) -> Self {
        Self {
            format_version: 1,
            prefix,
            separator,
            root,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> CommandSummary {
        CommandSummary {
            name: "app".to_string(),
            description: "Demo".to_string(),
            options: vec![OptionSummary {
                aliases: vec!["v".to_string(), "verbose".to_string()],
                description: "Verbose output".to_string(),
                value: ValueExpectation::Optional,
                value_type: Some("bool".to_string()),
            }],
            arguments: Vec::new(),
            commands: vec![CommandSummary {
                name: "remote".to_string(),
                commands: vec![CommandSummary {
                    name: "add".to_string(),
                    arguments: vec![ArgumentSummary {
                        name: "url".to_string(),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn find_walks_nested_commands() {
        let root = tree();
        assert_eq!(root.find(&[]).map(|c| c.name.as_str()), Some("app"));
        assert_eq!(
            root.find(&["remote", "add"]).map(|c| c.arguments.len()),
            Some(1)
        );
        assert!(root.find(&["remote", "rm"]).is_none());
        assert_eq!(root.len(), 3);
    }

    #[test]
    fn json_uses_kebab_case_and_skips_empty_fields() {
        let meta = TreeMetadataV1::new('-', '=', tree());
        let json = meta.to_json_pretty().unwrap();
        assert!(json.contains("\"format-version\": 1"));
        assert!(json.contains("\"value-type\": \"bool\""));
        assert!(!json.contains("\"arguments\": []"));

        let back = TreeMetadataV1::from_json(&json).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn missing_value_defaults_to_not_required() {
        let opt: OptionSummary = serde_json::from_str(r#"{"aliases":["h"]}"#).unwrap();
        assert_eq!(opt.value, ValueExpectation::NotRequired);
        assert!(!opt.value.takes_value());
    }
}
