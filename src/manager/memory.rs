//! In-memory `Manager` and `AuthManager`.

use std::collections::HashMap;

use zeroize::Zeroizing;

use super::{AuthManager, Manager};
use crate::crypto::{Address, SessionKey};
use crate::errors::{Result, VaultError};

/// Keeps every blob in a `HashMap`.  Nothing survives the process.
#[derive(Default)]
pub struct MemoryManager {
    records: HashMap<Address, Vec<u8>>,
    salt: Option<Vec<u8>>,
    master_hash: Option<String>,
    session_key: Option<Zeroizing<Vec<u8>>>,
}

impl MemoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored record blobs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Manager for MemoryManager {
    fn write(&mut self, blob: &[u8]) -> Result<Address> {
        let address = Address::of(blob);
        self.records.insert(address, blob.to_vec());
        Ok(address)
    }

    fn fetch(&self, address: &Address) -> Result<Vec<u8>> {
        self.records
            .get(address)
            .cloned()
            .ok_or_else(|| VaultError::NotFound(address.to_hex()))
    }

    fn enumerate(&self) -> Result<Vec<Vec<u8>>> {
        Ok(self.records.values().cloned().collect())
    }

    fn delete(&mut self, addresses: &[Address]) -> Result<()> {
        if let Some(missing) = addresses.iter().find(|a| !self.records.contains_key(a)) {
            return Err(VaultError::NotFound(missing.to_hex()));
        }
        for address in addresses {
            self.records.remove(address);
        }
        Ok(())
    }
}

impl AuthManager for MemoryManager {
    fn salt(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.salt.clone())
    }

    fn set_salt(&mut self, salt: &[u8]) -> Result<()> {
        self.salt = Some(salt.to_vec());
        Ok(())
    }

    fn master_hash(&self) -> Result<Option<String>> {
        Ok(self.master_hash.clone())
    }

    fn set_master_hash(&mut self, hash: &str) -> Result<()> {
        self.master_hash = Some(hash.to_string());
        Ok(())
    }

    fn session_key(&self) -> Result<Option<SessionKey>> {
        self.session_key
            .as_ref()
            .map(|bytes| SessionKey::from_slice(bytes))
            .transpose()
    }

    fn set_session_key(&mut self, key: &SessionKey) -> Result<()> {
        self.session_key = Some(Zeroizing::new(key.as_bytes().to_vec()));
        Ok(())
    }

    fn clear_session_key(&mut self) -> Result<()> {
        self.session_key = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_returns_content_address() {
        let mut m = MemoryManager::new();
        let address = m.write(b"blob").unwrap();
        assert_eq!(address, Address::of(b"blob"));
        assert_eq!(m.fetch(&address).unwrap(), b"blob");
    }

    #[test]
    fn delete_is_all_or_nothing() {
        let mut m = MemoryManager::new();
        let a = m.write(b"one").unwrap();
        let missing = Address::of(b"two");

        let err = m.delete(&[a, missing]).unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
        assert_eq!(m.len(), 1);

        m.delete(&[a]).unwrap();
        assert!(m.is_empty());
    }

    #[test]
    fn fetch_missing_is_not_found() {
        let m = MemoryManager::new();
        let err = m.fetch(&Address::of(b"x")).unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
    }

    #[test]
    fn session_key_can_be_cleared() {
        let mut m = MemoryManager::new();
        assert!(m.session_key().unwrap().is_none());

        m.set_session_key(&SessionKey::new([3u8; 32])).unwrap();
        assert_eq!(m.session_key().unwrap().unwrap().as_bytes(), &[3u8; 32]);

        m.clear_session_key().unwrap();
        assert!(m.session_key().unwrap().is_none());
    }
}
