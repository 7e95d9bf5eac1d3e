use thiserror::Error;

/// All errors that can occur in passkeep.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Credential errors ---
    #[error("Wrong master password")]
    InvalidCredentials,

    #[error("Already logged in — run `passkeep logout` first")]
    AlreadyLoggedIn,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Login required — run `passkeep login` first")]
    LoginRequired,

    #[error("A master password is already registered")]
    AlreadyRegistered,

    #[error("No master password registered — run `passkeep init` first")]
    NotRegistered,

    #[error("Master password must be at least {0} characters")]
    WeakPassword(usize),

    // --- Record errors ---
    #[error("No record matched '{0}'")]
    NotFound(String),

    #[error("Address prefix '{prefix}' is ambiguous ({matches} records match)")]
    AmbiguousAddress { prefix: String, matches: usize },

    #[error("No matching records")]
    NoMatch,

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Record is malformed — expected name, username and password fields")]
    Decode,

    // --- Crypto errors ---
    #[error("Decryption failed — wrong key or corrupted data")]
    Authentication,

    #[error("Ciphertext is shorter than the nonce")]
    MalformedInput,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Random number generator failed: {0}")]
    RandomFailed(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

impl VaultError {
    /// Returns `true` for the failures produced by a blob the current key
    /// cannot open: wrong key, truncated ciphertext, or foreign plaintext.
    ///
    /// Enumerating lookups treat these as "not a match" and move on.
    pub fn is_foreign_blob(&self) -> bool {
        matches!(
            self,
            VaultError::Authentication | VaultError::MalformedInput | VaultError::Decode
        )
    }
}

/// Convenience type alias for passkeep results.
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_foreign() {
        assert!(VaultError::Authentication.is_foreign_blob());
        assert!(VaultError::MalformedInput.is_foreign_blob());
        assert!(VaultError::Decode.is_foreign_blob());
    }

    #[test]
    fn io_errors_are_not_foreign() {
        let err = VaultError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"));
        assert!(!err.is_foreign_blob());
        assert!(!VaultError::LoginRequired.is_foreign_blob());
    }

    #[test]
    fn messages_are_single_line() {
        let errors = [
            VaultError::InvalidCredentials,
            VaultError::NotFound("email".into()),
            VaultError::AmbiguousAddress {
                prefix: "ab".into(),
                matches: 2,
            },
            VaultError::WeakPassword(8),
        ];
        for err in errors {
            assert!(!err.to_string().contains('\n'));
        }
    }
}
