//! `passkeep master` — change the master password.
//!
//! Every record is re-encrypted under a key derived from the new
//! password.  New blobs are written before the old ones are deleted, so
//! an interrupted run never loses data.

use crate::cli::output;
use crate::cli::{open_vault, prompt_new_password, Cli, NEW_PASSWORD_ENV};
use crate::errors::Result;

/// Execute the `master` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut vault = open_vault(cli)?;
    // Check the login before asking for anything.
    vault.credentials().key()?;

    output::info("Choose your new master password.");
    let new_password = prompt_new_password(NEW_PASSWORD_ENV)?;

    let report = vault.rotate_master_password(new_password.as_bytes())?;

    output::success(&format!(
        "Master password changed ({} record(s) re-encrypted)",
        report.rewritten
    ));
    if report.skipped > 0 {
        output::warning(&format!(
            "{} record(s) could not be opened with the old password and were left as is",
            report.skipped
        ));
    }
    for address in &report.stale {
        output::warning(&format!(
            "Old copy {} could not be deleted; it is no longer readable",
            address.short()
        ));
    }

    Ok(())
}
