//! `passkeep login` — unlock the vault.
//!
//! The derived session key is cached in the data directory so later
//! commands run without a prompt.  Run `passkeep logout` when done.

use crate::cli::output;
use crate::cli::{open_vault, prompt_password, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `login` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = open_vault(cli)?;

    if vault.credentials().is_logged_in() {
        return Err(VaultError::AlreadyLoggedIn);
    }
    if !vault.credentials().is_registered() {
        return Err(VaultError::NotRegistered);
    }

    let password = prompt_password()?;
    vault.login(password.as_bytes())?;

    output::success("Logged in.");
    output::tip("Remember to run `passkeep logout` when you are finished.");
    Ok(())
}
