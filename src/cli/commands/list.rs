//! `passkeep list` — display records in a table.

use crate::cli::output;
use crate::cli::{open_vault, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::{Filter, FuzzyField};

/// Execute the `list` command.
pub fn execute(cli: &Cli, pattern: Option<&str>, fuzzy: bool, field: &str) -> Result<()> {
    let filter = build_filter(pattern, fuzzy, field)?;
    let vault = open_vault(cli)?;

    let records = match vault.list_records(&filter) {
        Err(VaultError::NoMatch) if matches!(filter, Filter::All) => {
            output::info("The vault is empty.");
            output::tip("Add a record with `passkeep add <name>`.");
            return Ok(());
        }
        other => other?,
    };

    output::info(&format!("{} record(s)", records.len()));
    output::print_records_table(&records);

    Ok(())
}

/// Turn the command-line options into a `Filter`.
fn build_filter(pattern: Option<&str>, fuzzy: bool, field: &str) -> Result<Filter> {
    match (pattern, fuzzy) {
        (None, _) => Ok(Filter::All),
        (Some(query), true) => Ok(Filter::fuzzy(query, parse_field(field)?)),
        (Some(pattern), false) => Filter::regex(pattern),
    }
}

fn parse_field(name: &str) -> Result<FuzzyField> {
    match name.to_lowercase().as_str() {
        "name" => Ok(FuzzyField::Name),
        "account" | "user" | "username" => Ok(FuzzyField::Account),
        "either" | "any" => Ok(FuzzyField::Either),
        other => Err(VaultError::CommandFailed(format!(
            "unknown field '{other}', expected one of: name, account, either"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_pattern_lists_everything() {
        assert!(matches!(
            build_filter(None, false, "either").unwrap(),
            Filter::All
        ));
    }

    #[test]
    fn pattern_is_regex_by_default() {
        assert!(matches!(
            build_filter(Some("^mail"), false, "either").unwrap(),
            Filter::Regex(_)
        ));
        assert!(matches!(
            build_filter(Some("("), false, "either").unwrap_err(),
            VaultError::InvalidPattern(_)
        ));
    }

    #[test]
    fn fuzzy_uses_field() {
        match build_filter(Some("Gmial"), true, "account").unwrap() {
            Filter::Fuzzy { query, field } => {
                assert_eq!(query, "gmial");
                assert_eq!(field, FuzzyField::Account);
            }
            other => panic!("unexpected filter {other:?}"),
        }
    }

    #[test]
    fn unknown_field_fails() {
        assert!(parse_field("strength").is_err());
        assert_eq!(parse_field("NAME").unwrap(), FuzzyField::Name);
    }
}
