//! Record store facade over a persistence `Manager`.
//!
//! `RecordStore` runs the codec against the blob store: writing new
//! records, looking them up by address prefix or by name, filtering, and
//! deleting.  Lookups that scan the whole store skip blobs the current
//! key cannot open (a shared store may hold foreign data), but never
//! swallow an I/O error.

use tracing::debug;

use super::codec::{self, encode};
use super::filter::Filter;
use super::record::{Record, StoredRecord};
use crate::crypto::hash::is_hex;
use crate::crypto::{Address, SessionKey};
use crate::errors::{Result, VaultError};
use crate::manager::Manager;

/// Record operations over an owned `Manager`.
pub struct RecordStore<M> {
    manager: M,
}

impl<M: Manager> RecordStore<M> {
    pub fn new(manager: M) -> Self {
        Self { manager }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut M {
        &mut self.manager
    }

    pub fn into_inner(self) -> M {
        self.manager
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Encrypt and store a new record.
    ///
    /// Nothing is ever overwritten: every write lands at a fresh address,
    /// so several records may share a name.
    pub fn add(&mut self, record: &Record, key: &SessionKey) -> Result<Address> {
        let blob = encode(record, key)?;
        let address = self.manager.write(&blob)?;
        debug!(address = %address.short(), "record added");
        Ok(address)
    }

    /// Delete the record stored at `address`, or fail with `NotFound`.
    pub fn remove(&mut self, address: &Address) -> Result<()> {
        self.manager.delete(std::slice::from_ref(address))?;
        debug!(address = %address.short(), "record removed");
        Ok(())
    }

    /// Replace the record at `address` with `new_record`.
    ///
    /// The new blob is written before the old one is deleted, so a failure
    /// part-way leaves at least one of the two in the store.  Returns the
    /// new address.
    pub fn edit(
        &mut self,
        address: &Address,
        new_record: &Record,
        key: &SessionKey,
    ) -> Result<Address> {
        // Fail early if the old record is gone.
        self.manager.fetch(address)?;

        let new_address = self.add(new_record, key)?;
        self.remove(address)?;
        Ok(new_address)
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Find the record whose hex address starts with `prefix`.
    ///
    /// A prefix shared by several stored blobs is rejected with
    /// `AmbiguousAddress` rather than resolved by enumeration order.
    pub fn get_by_address_prefix(&self, prefix: &str, key: &SessionKey) -> Result<StoredRecord> {
        if !is_hex(prefix) {
            return Err(VaultError::NotFound(prefix.to_string()));
        }

        let blobs = self.manager.enumerate()?;
        let matching: Vec<&Vec<u8>> = blobs
            .iter()
            .filter(|blob| Address::of(blob).has_prefix(prefix))
            .collect();

        match matching.as_slice() {
            [] => Err(VaultError::NotFound(prefix.to_string())),
            [blob] => codec::open(blob, key),
            many => Err(VaultError::AmbiguousAddress {
                prefix: prefix.to_string(),
                matches: many.len(),
            }),
        }
    }

    /// Find the first record whose name equals `name`, ignoring case.
    pub fn get_by_name(&self, name: &str, key: &SessionKey) -> Result<StoredRecord> {
        let wanted = name.to_lowercase();
        self.decoded(key)?
            .into_iter()
            .find(|stored| stored.record.name.to_lowercase() == wanted)
            .ok_or_else(|| VaultError::NotFound(name.to_string()))
    }

    /// Resolve an identifier: a record name first, then an address prefix.
    ///
    /// An exact name always wins, so a hex-looking name is never shadowed
    /// by an unrelated address.  A prefix that selects a blob the key
    /// cannot open counts as no match.
    pub fn get(&self, identifier: &str, key: &SessionKey) -> Result<StoredRecord> {
        match self.get_by_name(identifier, key) {
            Err(VaultError::NotFound(_)) if is_hex(identifier) => {}
            found => return found,
        }
        match self.get_by_address_prefix(identifier, key) {
            Err(e) if e.is_foreign_blob() => Err(VaultError::NotFound(identifier.to_string())),
            found => found,
        }
    }

    /// Every record matching `filter`, in enumeration order.
    ///
    /// Fails with `NoMatch` when nothing matches.
    pub fn filter(&self, filter: &Filter, key: &SessionKey) -> Result<Vec<StoredRecord>> {
        let matches: Vec<StoredRecord> = self
            .decoded(key)?
            .into_iter()
            .filter(|stored| filter.matches(&stored.record))
            .collect();

        if matches.is_empty() {
            return Err(VaultError::NoMatch);
        }
        Ok(matches)
    }

    /// Decode every blob the key can open, skipping foreign ones.
    fn decoded(&self, key: &SessionKey) -> Result<Vec<StoredRecord>> {
        let mut records = Vec::new();

        for blob in self.manager.enumerate()? {
            match codec::open(&blob, key) {
                Ok(stored) => records.push(stored),
                Err(e) if e.is_foreign_blob() => {
                    debug!(
                        address = %Address::of(&blob).short(),
                        error = %e,
                        "skipping foreign blob"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(records)
    }
}
