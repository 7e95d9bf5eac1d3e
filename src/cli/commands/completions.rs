//! `passkeep completions` — print a shell completion script.
//!
//!   passkeep completions bash > ~/.local/share/bash-completion/completions/passkeep
//!   passkeep completions zsh > "${fpath[1]}/_passkeep"

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    render(shell, &mut io::stdout())
}

fn render(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin, out);
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bash_script_mentions_subcommands() {
        let mut buf = Vec::new();
        render(Shell::Bash, &mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("passkeep"));
        assert!(script.contains("master"));
    }

    #[test]
    fn every_shell_renders() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut buf = Vec::new();
            render(shell, &mut buf).unwrap();
            assert!(!buf.is_empty());
        }
    }
}
