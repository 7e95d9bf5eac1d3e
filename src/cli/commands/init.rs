//! `passkeep init` — register the master password.

use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, Cli, PASSWORD_ENV};
use crate::errors::{Result, VaultError};

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = open_vault(cli)?;

    if vault.credentials().is_registered() {
        output::tip("Run `passkeep login` to unlock the existing vault.");
        return Err(VaultError::AlreadyRegistered);
    }

    output::info("Choose a master password. It protects every record, so make it strong.");
    let password = prompt_new_password(PASSWORD_ENV)?;
    vault.register(password.as_bytes())?;

    output::success("Master password registered.");
    output::tip("Run `passkeep login` to unlock the vault.");
    Ok(())
}
