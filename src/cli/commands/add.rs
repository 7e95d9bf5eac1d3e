//! `passkeep add` — store a new record.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, prompt_secret, prompt_text, Cli};
use crate::errors::Result;

/// Execute the `add` command.
///
/// Missing username or password are prompted for interactively.
pub fn execute(cli: &Cli, name: &str, user: Option<&str>, secret: Option<&str>) -> Result<()> {
    let mut vault = open_vault(cli)?;
    // Check the login before asking for anything.
    vault.credentials().key()?;

    let user = match user {
        Some(u) => u.to_string(),
        None => prompt_text("Username", None)?,
    };
    let secret = match secret {
        Some(s) => Zeroizing::new(s.to_string()),
        None => prompt_secret(false)?,
    };

    let address = vault.add_record(name, &user, &secret)?;

    output::success(&format!("Added '{name}' ({})", address.short()));
    Ok(())
}
