//! `passkeep logout` — forget the cached session key.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::Result;

/// Execute the `logout` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = open_vault(cli)?;
    vault.logout()?;
    output::success("Logged out.");
    Ok(())
}
