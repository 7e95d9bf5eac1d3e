//! `passkeep get` — show a single record.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `get` command.
pub fn execute(cli: &Cli, identifier: &str, show: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let stored = vault.get_record(identifier)?;

    if show {
        // Bare value on stdout so it can be piped.
        println!("{}", stored.record.secret.as_str());
    } else {
        output::print_record(&stored);
    }

    Ok(())
}
