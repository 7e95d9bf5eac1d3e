//! Master password hashing (Argon2id, PHC string format).
//!
//! The stored hash carries its own salt and cost parameters, so
//! verification never depends on the current configuration.

use argon2::password_hash::{
    Error as PhcError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Argon2, Params};

use super::kdf::{random_bytes, Argon2Params};
use crate::errors::{Result, VaultError};

/// Length of the PHC salt in bytes.
const PHC_SALT_LEN: usize = 16;

/// Hash `password` into a PHC string such as `$argon2id$v=19$m=...`.
pub fn hash_password(password: &[u8], params: &Argon2Params) -> Result<String> {
    let salt_bytes = random_bytes(PHC_SALT_LEN)?;
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| VaultError::PasswordHash(format!("salt encoding failed: {e}")))?;

    let argon2 = params.hasher(None)?;
    let hash = argon2
        .hash_password(password, &salt)
        .map_err(|e| VaultError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Check a candidate password against a stored PHC string.
///
/// The comparison is constant-time.  A mismatch is `Ok(false)`; a stored
/// hash that cannot be parsed is an error.
pub fn verify_password(password: &[u8], stored: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| VaultError::PasswordHash(format!("stored hash is invalid: {e}")))?;

    match Argon2::default().verify_password(password, &parsed) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(e) => Err(VaultError::PasswordHash(e.to_string())),
    }
}

/// Recover the Argon2 cost parameters recorded in a stored PHC string.
pub fn params_of(stored: &str) -> Result<Argon2Params> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| VaultError::PasswordHash(format!("stored hash is invalid: {e}")))?;
    let params = Params::try_from(&parsed)
        .map_err(|e| VaultError::PasswordHash(format!("stored hash has no Argon2 params: {e}")))?;

    Ok(Argon2Params {
        memory_kib: params.m_cost(),
        iterations: params.t_cost(),
        parallelism: params.p_cost(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_right_password_only() {
        let stored = hash_password(b"Secret123", &Argon2Params::minimum()).unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(verify_password(b"Secret123", &stored).unwrap());
        assert!(!verify_password(b"secret123", &stored).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let params = Argon2Params::minimum();
        let a = hash_password(b"same", &params).unwrap();
        let b = hash_password(b"same", &params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn params_round_trip_through_hash() {
        let params = Argon2Params {
            memory_kib: 9_000,
            iterations: 2,
            parallelism: 1,
        };
        let stored = hash_password(b"pw", &params).unwrap();
        assert_eq!(params_of(&stored).unwrap(), params);
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password(b"pw", "not a phc string").is_err());
    }
}
