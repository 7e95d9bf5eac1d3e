//! CLI module — Clap argument parser, prompts, output helpers, and
//! command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::auth::MIN_PASSWORD_LEN;
use crate::config::{resolve_data_dir, Settings};
use crate::errors::{Result, VaultError};
use crate::manager::FsManager;
use crate::vault::Vault;

/// Environment variable read instead of prompting for the master password.
pub const PASSWORD_ENV: &str = "PASSKEEP_PASSWORD";

/// Environment variable read instead of prompting for a new master password
/// during `master`.
pub const NEW_PASSWORD_ENV: &str = "PASSKEEP_NEW_PASSWORD";

/// passkeep: a local encrypted password vault.
#[derive(Parser)]
#[command(name = "passkeep", about = "Local encrypted password vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (default: platform data dir, e.g. ~/.local/share/passkeep)
    #[arg(long, env = "PASSKEEP_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Register the master password
    Init,

    /// Unlock the vault for this and later commands
    Login,

    /// Lock the vault again
    Logout,

    /// Add a record
    Add {
        /// Record name (e.g. email)
        name: String,
        /// Username or account id (omit for interactive prompt)
        #[arg(short, long)]
        user: Option<String>,
        /// Password (omit for interactive prompt; visible in shell history)
        secret: Option<String>,
    },

    /// Show a record by address prefix or name
    Get {
        /// Address prefix or record name
        identifier: String,
        /// Print the password itself instead of the masked record
        #[arg(long)]
        show: bool,
    },

    /// List records, optionally filtered
    List {
        /// Regular expression matched against names (or fuzzy query with --fuzzy)
        pattern: Option<String>,
        /// Typo-tolerant matching instead of a regular expression
        #[arg(long)]
        fuzzy: bool,
        /// Field compared by --fuzzy: name, account or either
        #[arg(long, default_value = "either", requires = "fuzzy")]
        field: String,
    },

    /// Remove a record
    Rm {
        /// Address prefix or record name
        identifier: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Edit a record (empty input keeps the current value)
    Edit {
        /// Address prefix or record name
        identifier: String,
    },

    /// Change the master password and re-encrypt every record
    Master,

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Open the vault in the data directory selected by the CLI arguments.
pub fn open_vault(cli: &Cli) -> Result<Vault<FsManager>> {
    let data_dir = resolve_data_dir(cli.dir.as_deref())?;
    let manager = FsManager::open(&data_dir)?;
    let settings = Settings::load(&data_dir)?;
    Vault::open(manager, settings.argon2_params())
}

/// Get the master password, trying `PASSKEEP_PASSWORD` first and then an
/// interactive masked prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new master password with confirmation.
///
/// Reads `env_var` first for scripted use.  The interactive prompt loops
/// until the two entries match and the password is long enough.
pub fn prompt_new_password(env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            if pw.chars().count() < MIN_PASSWORD_LEN {
                return Err(VaultError::WeakPassword(MIN_PASSWORD_LEN));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose master password")
                .with_confirmation(
                    "Confirm master password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        if password.chars().count() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(password);
    }
}

/// Prompt for a record's password, with confirmation.
///
/// An empty entry is allowed only when `allow_empty` is set (edit keeps the
/// old value).
pub fn prompt_secret(allow_empty: bool) -> Result<Zeroizing<String>> {
    let secret = dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match, try again")
        .allow_empty_password(allow_empty)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Prompt for a line of text, pre-filled with `default` if given.
pub fn prompt_text(label: &str, default: Option<&str>) -> Result<String> {
    let mut input = dialoguer::Input::<String>::new()
        .with_prompt(label)
        .allow_empty(true);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    input
        .interact_text()
        .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))
}
