use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFIX: char = '-';
pub const DEFAULT_SEPARATOR: char = '=';
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Token grammar knobs, fixed for the lifetime of a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Marks an option token; one or two occurrences are accepted.
    pub prefix: char,
    /// Splits an option token into name and inline value.
    pub separator: char,
    /// Deepest subcommand nesting a commandline may walk.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX,
            separator: DEFAULT_SEPARATOR,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: ParserConfig = serde_json::from_str(r#"{"prefix":"/"}"#).unwrap();
        assert_eq!(config.prefix, '/');
        assert_eq!(config.separator, '=');
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn keys_are_kebab_case() {
        let json = serde_json::to_string(&ParserConfig::default()).unwrap();
        assert!(json.contains("\"max-depth\":32"));
    }
}
