//! `passkeep edit` — change a record's fields.
//!
//! Each prompt is pre-filled with the current value; an empty password
//! keeps the current one.  The record gets a new address.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{open_vault, prompt_secret, prompt_text, Cli};
use crate::errors::Result;
use crate::vault::RecordPatch;

/// Execute the `edit` command.
pub fn execute(cli: &Cli, identifier: &str) -> Result<()> {
    let mut vault = open_vault(cli)?;
    let stored = vault.get_record(identifier)?;

    output::info(&format!(
        "Editing '{}' ({}). Leave the password empty to keep it.",
        stored.record.name,
        stored.address.short()
    ));

    let name = prompt_text("Name", Some(&stored.record.name))?;
    let user = prompt_text("Username", Some(&stored.record.account_id))?;
    let secret = prompt_secret(true)?;

    let patch = build_patch(&stored.record.name, &stored.record.account_id, name, user, secret);
    if patch.is_empty() {
        output::info("Nothing changed.");
        return Ok(());
    }

    let address = vault.edit_record(&stored.address.to_hex(), patch)?;
    output::success(&format!("Edited record, new address {}", address.short()));
    Ok(())
}

/// Keep only the fields that actually changed.
fn build_patch(
    old_name: &str,
    old_user: &str,
    name: String,
    user: String,
    secret: Zeroizing<String>,
) -> RecordPatch {
    RecordPatch {
        name: (name != old_name).then_some(name),
        account_id: (user != old_user).then_some(user),
        secret: (!secret.is_empty()).then_some(secret),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_input_is_empty_patch() {
        let patch = build_patch(
            "email",
            "me",
            "email".into(),
            "me".into(),
            Zeroizing::new(String::new()),
        );
        assert!(patch.is_empty());
    }

    #[test]
    fn changed_fields_are_kept() {
        let patch = build_patch(
            "email",
            "me",
            "mail".into(),
            "me".into(),
            Zeroizing::new("new-pass".into()),
        );
        assert_eq!(patch.name.as_deref(), Some("mail"));
        assert!(patch.account_id.is_none());
        assert_eq!(patch.secret.as_deref().map(String::as_str), Some("new-pass"));
    }
}
