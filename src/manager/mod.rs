//! Persistence collaborators.
//!
//! The core never touches the filesystem directly.  It talks to two
//! capability traits:
//! - `Manager` — a content-addressed blob store holding encrypted records
//! - `AuthManager` — the singleton credential blobs (salt, master hash,
//!   cached session key)
//!
//! Two implementations are provided: `FsManager` (a data directory on
//! disk) and `MemoryManager` (for tests and embedding).

pub mod fs;
pub mod memory;

pub use fs::FsManager;
pub use memory::MemoryManager;

use crate::crypto::{Address, SessionKey};
use crate::errors::Result;

/// A content-addressed blob store.
///
/// `enumerate` gives no ordering guarantee, not even between two calls.
pub trait Manager {
    /// Store `blob` under `SHA-256(blob)` and return that address.
    fn write(&mut self, blob: &[u8]) -> Result<Address>;

    /// Fetch the blob stored at `address`, or `NotFound`.
    fn fetch(&self, address: &Address) -> Result<Vec<u8>>;

    /// Every stored blob.
    fn enumerate(&self) -> Result<Vec<Vec<u8>>>;

    /// Delete every listed blob.  Fails with `NotFound` (deleting nothing)
    /// if any of them is absent.
    fn delete(&mut self, addresses: &[Address]) -> Result<()>;
}

/// Storage for the credential singletons kept outside the record collection.
pub trait AuthManager {
    fn salt(&self) -> Result<Option<Vec<u8>>>;
    fn set_salt(&mut self, salt: &[u8]) -> Result<()>;

    fn master_hash(&self) -> Result<Option<String>>;
    fn set_master_hash(&mut self, hash: &str) -> Result<()>;

    fn session_key(&self) -> Result<Option<SessionKey>>;
    fn set_session_key(&mut self, key: &SessionKey) -> Result<()>;
    fn clear_session_key(&mut self) -> Result<()>;
}
