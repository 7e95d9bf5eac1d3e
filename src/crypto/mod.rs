//! Cryptographic primitives for passkeep.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - SHA-256 digests and content addresses (`hash`)
//! - Argon2id key derivation and the OS random source (`kdf`)
//! - Argon2id master password hashing (`password`)
//! - The zeroizing session key (`keys`)

pub mod encryption;
pub mod hash;
pub mod kdf;
pub mod keys;
pub mod password;

pub use encryption::{decrypt, encrypt};
pub use hash::{digest, Address};
pub use kdf::{derive_key, generate_salt, random_bytes, Argon2Params};
pub use keys::SessionKey;
pub use password::{hash_password, verify_password};
