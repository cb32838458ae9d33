use crate::command::Command;
use crate::parser::Parser;

/// Read-only view of the parse position handed to every callback.
///
/// A `Context` lives only as long as the dispatch that created it.
#[derive(Clone, Copy)]
pub struct Context<'c> {
    argv: &'c [&'c str],
    offset: usize,
    name: &'c str,
    command_name: &'c str,
    parser: &'c Parser<'c>,
    command: &'c Command<'c>,
}

impl<'c> Context<'c> {
    pub(crate) fn new(
        argv: &'c [&'c str],
        offset: usize,
        name: &'c str,
        command_name: &'c str,
        parser: &'c Parser<'c>,
        command: &'c Command<'c>,
    ) -> Self {
        Self {
            argv,
            offset,
            name,
            command_name,
            parser,
            command,
        }
    }

    /// The full commandline, program name included.
    pub fn argv(&self) -> &'c [&'c str] {
        self.argv
    }

    /// Index into [`argv`](Self::argv) of the token being processed.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Name of the option, argument or command being processed.
    pub fn name(&self) -> &'c str {
        self.name
    }

    /// Name of the active command (`argv[0]` at the root).
    pub fn command_name(&self) -> &'c str {
        self.command_name
    }

    pub fn program(&self) -> &'c str {
        self.argv.first().copied().unwrap_or("")
    }

    pub fn parser(&self) -> &'c Parser<'c> {
        self.parser
    }

    pub fn command(&self) -> &'c Command<'c> {
        self.command
    }
}
