//! Record types.
//!
//! A `Record` is the logical entry (name, username, password).  Its
//! storage address is not part of the plaintext: a record read back from
//! the store comes wrapped in a `StoredRecord` that carries the address
//! computed over the encrypted bytes.

use std::fmt;

use zeroize::Zeroizing;

use crate::crypto::Address;
use crate::errors::{Result, VaultError};

/// Character used to hide the secret when rendering.
pub const MASK_CHAR: char = '*';

/// A single username/password entry.
#[derive(Clone, PartialEq, Eq)]
pub struct Record {
    /// Display label, e.g. "email".  Not required to be unique.
    pub name: String,

    /// Username or account identifier.
    pub account_id: String,

    /// The protected value (zeroized on drop).
    pub secret: Zeroizing<String>,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        account_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            account_id: account_id.into(),
            secret: Zeroizing::new(secret.into()),
        }
    }

    /// Check that no field contains the newline field delimiter.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("name", self.name.as_str()),
            ("username", self.account_id.as_str()),
            ("password", self.secret.as_str()),
        ];
        for (label, value) in fields {
            if value.contains('\n') {
                return Err(VaultError::InvalidRecord(format!(
                    "{label} cannot contain a line break"
                )));
            }
        }
        Ok(())
    }

    /// The secret replaced by one mask character per character.
    pub fn masked_secret(&self) -> String {
        MASK_CHAR.to_string().repeat(self.secret.chars().count())
    }

    /// Multi-line, display-safe rendering.  Never shows the secret.
    pub fn render(&self) -> String {
        format!(
            "Name: {}\nUsername: {}\nPassword: {}",
            self.name,
            self.account_id,
            self.masked_secret()
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("name", &self.name)
            .field("account_id", &self.account_id)
            .field("secret", &self.masked_secret())
            .finish()
    }
}

/// A decoded record together with the address of the blob it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub address: Address,
    pub record: Record,
}

impl fmt::Display for StoredRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address: {}\n{}", self.address.short(), self.record)
    }
}

/// Replacement fields for an edit.  `None` keeps the old value.
#[derive(Default)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub account_id: Option<String>,
    pub secret: Option<Zeroizing<String>>,
}

impl RecordPatch {
    /// Build the edited record from `old`.
    pub fn apply(self, old: &Record) -> Record {
        Record {
            name: self.name.unwrap_or_else(|| old.name.clone()),
            account_id: self.account_id.unwrap_or_else(|| old.account_id.clone()),
            secret: self.secret.unwrap_or_else(|| old.secret.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.account_id.is_none() && self.secret.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_masks_secret() {
        let r = Record::new("email", "me@x.com", "hunter2");
        assert_eq!(
            r.render(),
            "Name: email\nUsername: me@x.com\nPassword: *******"
        );
        assert!(!r.to_string().contains("hunter2"));
    }

    #[test]
    fn mask_counts_characters_not_bytes() {
        let r = Record::new("n", "u", "pässwörd");
        assert_eq!(r.masked_secret(), "********");
    }

    #[test]
    fn debug_hides_secret() {
        let r = Record::new("email", "me@x.com", "hunter2");
        assert!(!format!("{r:?}").contains("hunter2"));
    }

    #[test]
    fn validate_rejects_line_breaks() {
        assert!(Record::new("a\nb", "u", "p").validate().is_err());
        assert!(Record::new("a", "u\n", "p").validate().is_err());
        assert!(Record::new("a", "u", "p\nq").validate().is_err());
        assert!(Record::new("a", "", "").validate().is_ok());
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let old = Record::new("email", "me@x.com", "hunter2");
        let patch = RecordPatch {
            secret: Some(Zeroizing::new("correct horse".into())),
            ..RecordPatch::default()
        };
        let new = patch.apply(&old);
        assert_eq!(new.name, "email");
        assert_eq!(new.account_id, "me@x.com");
        assert_eq!(new.secret.as_str(), "correct horse");
    }
}
