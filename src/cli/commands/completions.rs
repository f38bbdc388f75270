//! Shell completions generation.
//!
//! The `cwctl completions` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Write the script to stdout. Needs no config.
    pub fn run(&self) -> crate::error::Result<CommandResult> {
        let mut buf = Vec::new();
        self.write(&mut buf);
        print!("{}", String::from_utf8_lossy(&buf));
        Ok(CommandResult::success())
    }

    fn write(&self, out: &mut Vec<u8>) {
        let mut cmd = Cli::command();
        clap_complete::generate(self.args.shell, &mut cmd, "cwctl", out);
    }
}

impl Command for CompletionsCommand {
    fn execute(
        &self,
        _ctx: &CommandContext<'_>,
        ui: &mut dyn UserInterface,
    ) -> crate::error::Result<CommandResult> {
        let mut buf = Vec::new();
        self.write(&mut buf);
        ui.data(String::from_utf8_lossy(&buf).trim_end());
        Ok(CommandResult::success())
    }
}
