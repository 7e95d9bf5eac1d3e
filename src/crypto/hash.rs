//! SHA-256 digests and the content address derived from them.
//!
//! A record is stored under the hash of its *encrypted* bytes, so the
//! address says nothing about the plaintext.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};

use crate::errors::{Result, VaultError};

/// Length of a SHA-256 digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Compute the SHA-256 digest of `data`.
pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// Content address of a stored blob: `SHA-256(ciphertext)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; DIGEST_LEN]);

impl Address {
    /// Address of the given stored (encrypted) bytes.
    pub fn of(blob: &[u8]) -> Self {
        Self(digest(blob))
    }

    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex encoding, 64 characters.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Abbreviated form for display, like a short commit id.
    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }

    /// Returns `true` if the hex form starts with `prefix` (case-insensitive).
    ///
    /// An empty prefix matches nothing.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.to_hex().starts_with(&prefix.to_ascii_lowercase())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Address {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || VaultError::InvalidRecord(format!("'{s}' is not a record address"));

        if s.len() != DIGEST_LEN * 2 || !is_hex(s) {
            return Err(invalid());
        }

        let mut bytes = [0u8; DIGEST_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

/// Returns `true` if `s` is non-empty and made only of hex digits.
pub fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_vector() {
        let addr = Address::of(b"abc");
        assert_eq!(
            addr.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn hex_parses_back() {
        let addr = Address::of(b"some blob");
        let parsed: Address = addr.to_hex().parse().unwrap();
        assert_eq!(parsed, addr);

        let upper: Address = addr.to_hex().to_uppercase().parse().unwrap();
        assert_eq!(upper, addr);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!("abc".parse::<Address>().is_err());
        assert!("z".repeat(64).parse::<Address>().is_err());
    }

    #[test]
    fn prefix_matching() {
        let addr = Address::of(b"abc");
        assert!(addr.has_prefix("ba78"));
        assert!(addr.has_prefix("BA78"));
        assert!(!addr.has_prefix("ba79"));
        assert!(!addr.has_prefix(""));
        assert_eq!(addr.short(), "ba7816bf");
    }

    #[test]
    fn hex_detection() {
        assert!(is_hex("a1B2"));
        assert!(!is_hex("email"));
        assert!(!is_hex(""));
    }
}
