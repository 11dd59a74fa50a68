//! Shell completions generation.
//!
//! The `align-dash completions` command generates shell completion scripts.

use crate::cli::args::{Cli, CompletionsArgs};
use crate::ui::UserInterface;
use clap::CommandFactory;

use super::dispatcher::{Command, CommandResult};

/// Binary name used in completion scripts.
const BIN_NAME: &str = "align-dash";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Render the completion script for the requested shell.
    pub fn render(&self) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, BIN_NAME, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        ui.data(&self.render());
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    fn render(shell: Shell) -> String {
        CompletionsCommand::new(CompletionsArgs { shell }).render()
    }

    #[test]
    fn generates_bash_completions() {
        let output = render(Shell::Bash);
        assert!(output.contains("align-dash"));
        assert!(output.contains("complete"));
        assert!(output.contains("quick-link"));
    }

    #[test]
    fn generates_zsh_completions() {
        assert!(render(Shell::Zsh).contains("align-dash"));
    }

    #[test]
    fn generates_fish_completions() {
        assert!(render(Shell::Fish).contains("align-dash"));
    }
}
