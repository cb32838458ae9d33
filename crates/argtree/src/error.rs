use std::fmt;

use thiserror::Error;

/// Where a value that failed conversion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrigin {
    Option,
    Argument,
}

impl fmt::Display for ValueOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Option => f.write_str("Option"),
            Self::Argument => f.write_str("Argument"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Number of arguments can not be negative")]
    NegativeArgumentCount,

    #[error("Invalid number of arguments!")]
    InvalidArgumentCount { argc: usize, available: usize },

    #[error("Option '{option}' expects a value, none were given")]
    MissingValue { option: String },

    #[error("Unexpected option '{name}'")]
    UnexpectedOption { name: String },

    #[error("Command '{name}' not supported")]
    UnsupportedCommand { name: String },

    #[error("Not enough arguments")]
    NotEnoughArguments,

    #[error("Unexpected argument '{value}'")]
    UnexpectedArgument { value: String },

    #[error("{origin} '{name}' is not {type_name} value: '{value}'")]
    InvalidValue {
        origin: ValueOrigin,
        name: String,
        type_name: &'static str,
        value: String,
    },

    #[error("Unknown command '{name}'")]
    UnknownCommand { name: String },

    #[error("option alias '{alias}' is declared more than once in command '{command}'")]
    DuplicateAlias { command: String, alias: String },

    #[error("option without aliases in command '{command}'")]
    EmptyAliasSet { command: String },

    #[error("command nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },

    #[error("{0}")]
    Callback(String),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// An error raised by a user callback (validation beyond type parsing).
    pub fn custom(msg: impl fmt::Display) -> Self {
        Self::Callback(msg.to_string())
    }

    pub(crate) fn invalid_value(
        origin: ValueOrigin,
        name: &str,
        type_name: &'static str,
        value: &str,
    ) -> Self {
        Self::InvalidValue {
            origin,
            name: name.to_string(),
            type_name,
            value: value.to_string(),
        }
    }

    /// Whether the commandline itself was wrong (as opposed to a callback
    /// failing or the tree being misdeclared).
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::NegativeArgumentCount
                | Self::InvalidArgumentCount { .. }
                | Self::MissingValue { .. }
                | Self::UnexpectedOption { .. }
                | Self::UnsupportedCommand { .. }
                | Self::NotEnoughArguments
                | Self::UnexpectedArgument { .. }
                | Self::InvalidValue { .. }
                | Self::UnknownCommand { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_message_names_origin_and_value() {
        let err = Error::invalid_value(ValueOrigin::Argument, "ratio", "float32", "abc");
        assert_eq!(
            err.to_string(),
            "Argument 'ratio' is not float32 value: 'abc'"
        );
        assert!(err.is_usage());
    }

    #[test]
    fn callback_errors_are_not_usage_errors() {
        let err = Error::custom("port must be above 1024");
        assert_eq!(err.to_string(), "port must be above 1024");
        assert!(!err.is_usage());
        assert!(!Error::NestingTooDeep { limit: 4 }.is_usage());
    }
}
