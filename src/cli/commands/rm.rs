//! `passkeep rm` — remove a record.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `rm` command.
pub fn execute(cli: &Cli, identifier: &str, force: bool) -> Result<()> {
    let mut vault = open_vault(cli)?;

    // Resolve first so the prompt can show what is about to go.
    let stored = vault.get_record(identifier)?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove '{}' ({})?",
                stored.record.name,
                stored.address.short()
            ))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let address = vault.remove_record(&stored.address.to_hex())?;
    output::success(&format!(
        "Removed '{}' ({})",
        stored.record.name,
        address.short()
    ));

    Ok(())
}
