use std::collections::HashSet;
use std::fmt;

use argtree_metadata::CommandSummary;
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::option::{Argument, Opt};

pub type Action<'a> = Box<dyn Fn() -> Result<()> + 'a>;

/// A node of the command tree.
///
/// Options are matched before positionals; when subcommands are declared the
/// first positional must name one of them.
pub struct Command<'a> {
    description: String,
    action: Action<'a>,
    options: Vec<Opt<'a>>,
    arguments: Vec<Argument<'a>>,
    commands: IndexMap<String, Command<'a>>,
}

impl<'a> Command<'a> {
    /// A command whose action does nothing.
    pub fn new(description: impl Into<String>) -> Self {
        Self::with_action(description, || Ok(()))
    }

    pub fn with_action<F>(description: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> Result<()> + 'a,
    {
        Self {
            description: description.into(),
            action: Box::new(action),
            options: Vec::new(),
            arguments: Vec::new(),
            commands: IndexMap::new(),
        }
    }

    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn() -> Result<()> + 'a,
    {
        self.action = Box::new(action);
        self
    }

    pub fn option(mut self, option: Opt<'a>) -> Self {
        self.options.push(option);
        self
    }

    pub fn argument(mut self, argument: Argument<'a>) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Declare a subcommand. A later declaration with the same name replaces
    /// the earlier one.
    pub fn command(mut self, name: impl Into<String>, command: Command<'a>) -> Self {
        self.commands.insert(name.into(), command);
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[Opt<'a>] {
        &self.options
    }

    pub fn arguments(&self) -> &[Argument<'a>] {
        &self.arguments
    }

    pub fn commands(&self) -> &IndexMap<String, Command<'a>> {
        &self.commands
    }

    pub fn subcommand(&self, name: &str) -> Option<&Command<'a>> {
        self.commands.get(name)
    }

    /// Run this command's action.
    pub fn run(&self) -> Result<()> {
        (self.action)()
    }

    /// Check the subtree: every option needs at least one alias, and no alias
    /// may be shared by two options of the same command.
    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();
        for option in &self.options {
            if option.aliases().is_empty() {
                return Err(Error::EmptyAliasSet {
                    command: name.to_string(),
                });
            }
            for alias in option.aliases() {
                if !seen.insert(alias.as_str()) {
                    return Err(Error::DuplicateAlias {
                        command: name.to_string(),
                        alias: alias.clone(),
                    });
                }
            }
        }

        for (child_name, child) in &self.commands {
            child.validate(child_name)?;
        }
        Ok(())
    }

    pub fn summary(&self, name: &str) -> CommandSummary {
        CommandSummary {
            name: name.to_string(),
            description: self.description.clone(),
            options: self.options.iter().map(Opt::summary).collect(),
            arguments: self.arguments.iter().map(Argument::summary).collect(),
            commands: self
                .commands
                .iter()
                .map(|(child_name, child)| child.summary(child_name))
                .collect(),
        }
    }
}

impl fmt::Debug for Command<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("description", &self.description)
            .field(
                "options",
                &self.options.iter().map(Opt::aliases).collect::<Vec<_>>(),
            )
            .field(
                "arguments",
                &self.arguments.iter().map(Argument::name).collect::<Vec<_>>(),
            )
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
