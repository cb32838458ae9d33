//! Command-tree argument parsing.
//!
//! A [`Parser`] owns a tree of [`Command`]s. Each command carries its own
//! options ([`Opt`]), positional [`Argument`]s and subcommands. Parsing walks
//! `argv` against the tree: option tokens first, then either a subcommand
//! (recursing), positional arguments, or nothing at all.
//!
//! Values are written straight into caller-owned storage through typed
//! bindings, and the matched command is handed back as a [`ParseResult`] for
//! the caller to run.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::cell::{Cell, RefCell};
//! use argtree::{Command, Opt, Parser};
//!
//! let force = Cell::new(false);
//! let name = RefCell::new(String::new());
//!
//! let parser = Parser::builder("Ship things")
//!     .option(Opt::bind(["n", "name"], "Who is shipping", &name))
//!     .command(
//!         "deploy",
//!         Command::new("Deploy a build").option(Opt::bind(["f", "force"], "Skip checks", &force)),
//!     )
//!     .build()?;
//!
//! let matched = parser.parse(&["app", "--name=alice", "deploy", "--force"])?;
//! assert_eq!(matched.path(), ["deploy"]);
//! matched.run()?;
//! ```

mod binder;
mod command;
mod config;
mod context;
mod error;
pub mod help;
mod option;
mod parser;

pub use argtree_metadata::{
    ArgumentSummary, CommandSummary, OptionSummary, TreeMetadataV1, ValueExpectation,
};
pub use binder::{Bindable, Destination, float_prefix, parse_bool};
pub use command::{Action, Command};
pub use config::{DEFAULT_MAX_DEPTH, DEFAULT_PREFIX, DEFAULT_SEPARATOR, ParserConfig};
pub use context::Context;
pub use error::{Error, Result, ValueOrigin};
pub use help::HelpFormatter;
pub use option::{Argument, ArgumentCallback, Opt, OptionCallback};
pub use parser::{ParseResult, Parser, ParserBuilder};
