use std::fmt;
use std::ptr;

use argtree_metadata::{TreeMetadataV1, ValueExpectation};

use crate::command::Command;
use crate::config::ParserConfig;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::option::{Argument, Opt};

/// Owns the root command and the token grammar.
pub struct Parser<'a> {
    config: ParserConfig,
    root: Command<'a>,
}

impl<'a> Parser<'a> {
    pub fn builder(description: impl Into<String>) -> ParserBuilder<'a> {
        ParserBuilder {
            config: ParserConfig::default(),
            root: Command::new(description),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn prefix(&self) -> char {
        self.config.prefix
    }

    pub fn separator(&self) -> char {
        self.config.separator
    }

    pub fn description(&self) -> &str {
        self.root.description()
    }

    /// The default action: options and commands available at the top level.
    pub fn root(&self) -> &Command<'a> {
        &self.root
    }

    /// Parse a full commandline. `argv[0]` is the program name.
    pub fn parse<'p>(&'p self, argv: &[&str]) -> Result<ParseResult<'p>> {
        let argc = isize::try_from(argv.len()).unwrap_or(isize::MAX);
        self.parse_argc(argc, argv)
    }

    /// Parse the first `argc` tokens of `argv`.
    ///
    /// The matched command's action is not run; call [`ParseResult::run`].
    pub fn parse_argc<'p>(&'p self, argc: isize, argv: &[&str]) -> Result<ParseResult<'p>> {
        let argc = usize::try_from(argc).map_err(|_| Error::NegativeArgumentCount)?;
        if argc > argv.len() {
            return Err(Error::InvalidArgumentCount {
                argc,
                available: argv.len(),
            });
        }

        let parser: &'p Parser<'p> = self;
        if argc == 0 {
            return if parser.root.arguments().is_empty() && parser.root.commands().is_empty() {
                Ok(ParseResult::new(&parser.root, Vec::new()))
            } else {
                Err(Error::NotEnoughArguments)
            };
        }

        let argv = &argv[..argc];
        let mut walk = Walk {
            parser,
            argv,
            path: Vec::new(),
        };
        walk.command(&parser.root, argv[0], 1)
    }

    /// Describe the whole tree, naming the root `program`.
    pub fn describe(&self, program: &str) -> TreeMetadataV1 {
        TreeMetadataV1::new(
            self.config.prefix,
            self.config.separator,
            self.root.summary(program),
        )
    }
}

impl fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("config", &self.config)
            .field("root", &self.root)
            .finish()
    }
}

pub struct ParserBuilder<'a> {
    config: ParserConfig,
    root: Command<'a>,
}

impl<'a> ParserBuilder<'a> {
    pub fn config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn prefix(mut self, prefix: char) -> Self {
        self.config.prefix = prefix;
        self
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.config.separator = separator;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Replace the default action wholesale.
    pub fn root(mut self, root: Command<'a>) -> Self {
        self.root = root;
        self
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn() -> Result<()> + 'a,
    {
        self.root = self.root.action(action);
        self
    }

    pub fn option(mut self, option: Opt<'a>) -> Self {
        self.root = self.root.option(option);
        self
    }

    pub fn argument(mut self, argument: Argument<'a>) -> Self {
        self.root = self.root.argument(argument);
        self
    }

    pub fn command(mut self, name: impl Into<String>, command: Command<'a>) -> Self {
        self.root = self.root.command(name, command);
        self
    }

    pub fn build(self) -> Result<Parser<'a>> {
        self.root.validate("")?;
        Ok(Parser {
            config: self.config,
            root: self.root,
        })
    }
}

/// The command a commandline resolved to, ready to run.
pub struct ParseResult<'p> {
    command: &'p Command<'p>,
    path: Vec<String>,
}

impl<'p> ParseResult<'p> {
    fn new(command: &'p Command<'p>, path: Vec<String>) -> Self {
        Self { command, path }
    }

    /// Invoke the matched command's action.
    pub fn run(&self) -> Result<()> {
        self.command.run()
    }

    pub fn command(&self) -> &'p Command<'p> {
        self.command
    }

    /// Subcommand names walked from the root; empty for the default action.
    pub fn path(&self) -> &[String] {
        &self.path
    }
}

impl PartialEq for ParseResult<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.command, other.command) && self.path == other.path
    }
}

impl fmt::Debug for ParseResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseResult")
            .field("path", &self.path)
            .field("description", &self.command.description())
            .finish()
    }
}

/// Split an option token into its name and inline value.
///
/// One or two prefix characters are stripped; the value is everything after
/// the first separator.
pub(crate) fn split_option(arg: &str, prefix: char, separator: char) -> (&str, Option<&str>) {
    let rest = arg.strip_prefix(prefix).unwrap_or(arg);
    let body = rest.strip_prefix(prefix).unwrap_or(rest);
    if body.is_empty() {
        return ("", None);
    }
    match body.split_once(separator) {
        Some((name, value)) => (name, Some(value)),
        None => (body, None),
    }
}

struct Walk<'p, 'v> {
    parser: &'p Parser<'p>,
    argv: &'v [&'v str],
    path: Vec<String>,
}

impl<'p, 'v> Walk<'p, 'v> {
    fn command(
        &mut self,
        cmd: &'p Command<'p>,
        name: &'v str,
        offset: usize,
    ) -> Result<ParseResult<'p>> {
        let depth = self.path.len();
        if depth > self.parser.config.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.parser.config.max_depth,
            });
        }
        tracing::debug!(command = name, offset, depth, "parsing command");

        let positional = self.options(cmd, name, offset)?;

        if !cmd.commands().is_empty() {
            let Some(&token) = self.argv.get(positional) else {
                return Err(Error::NotEnoughArguments);
            };
            let Some(child) = cmd.subcommand(token) else {
                return Err(Error::UnsupportedCommand {
                    name: token.to_string(),
                });
            };
            self.path.push(token.to_string());
            return self.command(child, token, positional + 1);
        }

        if !cmd.arguments().is_empty() {
            self.arguments(cmd, name, positional)?;
        } else if positional < self.argv.len() {
            tracing::trace!(
                command = name,
                ignored = self.argv.len() - positional,
                "trailing tokens left to the application"
            );
        }

        Ok(ParseResult::new(cmd, std::mem::take(&mut self.path)))
    }

    /// Consume option tokens starting at `offset`. Returns the index
    /// of the first positional token.
    fn options(
        &self,
        cmd: &'p Command<'p>,
        command_name: &'v str,
        offset: usize,
    ) -> Result<usize> {
        let prefix = self.parser.prefix();
        let separator = self.parser.separator();
        let argv = self.argv;

        let mut i = offset;
        while i < argv.len() {
            let arg = argv[i];
            if !arg.starts_with(prefix) {
                break;
            }

            let index = i;
            let (name, mut value) = split_option(arg, prefix, separator);
            if value.is_none() {
                if let Some(&next) = argv.get(i + 1) {
                    if !next.starts_with(prefix) {
                        value = Some(next);
                        i += 1;
                    }
                }
            }
            tracing::trace!(option = name, value, index, "matching option");

            let cntx = Context::new(argv, index, name, command_name, self.parser, cmd);
            let mut matched = 0usize;
            for option in cmd.options().iter().filter(|o| o.is_match(name)) {
                if value.is_none() && option.expectation() == ValueExpectation::Required {
                    return Err(Error::MissingValue {
                        option: name.to_string(),
                    });
                }
                matched += 1;
                option.invoke(value, &cntx)?;
            }

            if matched == 0 {
                return Err(Error::UnexpectedOption {
                    name: name.to_string(),
                });
            }
            i += 1;
        }

        Ok(i)
    }

    /// Bind the remaining tokens to the command's arguments, in order.
    fn arguments(
        &self,
        cmd: &'p Command<'p>,
        command_name: &'v str,
        first: usize,
    ) -> Result<()> {
        let declared = cmd.arguments();
        let tokens = &self.argv[first..];
        if tokens.len() < declared.len() {
            return Err(Error::NotEnoughArguments);
        }
        if let Some(extra) = tokens.get(declared.len()) {
            return Err(Error::UnexpectedArgument {
                value: extra.to_string(),
            });
        }

        for (i, (argument, token)) in declared.iter().zip(tokens).enumerate() {
            tracing::trace!(argument = argument.name(), value = token, "binding argument");
            let cntx = Context::new(
                self.argv,
                first + i,
                argument.name(),
                command_name,
                self.parser,
                cmd,
            );
            argument.invoke(token, &cntx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_option_handles_both_prefix_counts() {
        assert_eq!(split_option("-x", '-', '='), ("x", None));
        assert_eq!(split_option("--name=Alice", '-', '='), ("name", Some("Alice")));
        assert_eq!(split_option("-n=", '-', '='), ("n", Some("")));
        assert_eq!(split_option("--a=b=c", '-', '='), ("a", Some("b=c")));
        assert_eq!(split_option("---x", '-', '='), ("-x", None));
    }

    #[test]
    fn split_option_empty_names() {
        assert_eq!(split_option("-", '-', '='), ("", None));
        assert_eq!(split_option("--", '-', '='), ("", None));
        assert_eq!(split_option("--=v", '-', '='), ("", Some("v")));
    }

    #[test]
    fn split_option_custom_grammar() {
        assert_eq!(split_option("/out:file", '/', ':'), ("out", Some("file")));
        assert_eq!(split_option("//v", '/', ':'), ("v", None));
    }
}
