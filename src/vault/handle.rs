//! `Vault` — the operations exposed to the command layer.
//!
//! One handle owns the persistence backend and the credential state and
//! is passed explicitly to every command; nothing lives in globals.

use zeroize::Zeroizing;

use super::filter::Filter;
use super::record::{Record, RecordPatch, StoredRecord};
use super::rotate::{rotate, RotationReport};
use super::store::RecordStore;
use crate::auth::Credentials;
use crate::crypto::{Address, Argon2Params};
use crate::errors::Result;
use crate::manager::{AuthManager, Manager};

/// A vault opened over a backend that stores both records and credentials.
pub struct Vault<M: Manager + AuthManager> {
    store: RecordStore<M>,
    credentials: Credentials,
    params: Argon2Params,
}

impl<M: Manager + AuthManager> Vault<M> {
    /// Load the credential state from `manager`.
    ///
    /// `params` are the Argon2 costs used for newly registered master
    /// passwords; logins always use the costs recorded in the stored hash.
    /// They are checked only when a new master password is set.
    pub fn open(manager: M, params: Argon2Params) -> Result<Self> {
        let credentials = Credentials::load(&manager)?;
        Ok(Self {
            store: RecordStore::new(manager),
            credentials,
            params,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn manager(&self) -> &M {
        self.store.manager()
    }

    pub fn into_manager(self) -> M {
        self.store.into_inner()
    }

    // ------------------------------------------------------------------
    // Credentials
    // ------------------------------------------------------------------

    pub fn register(&mut self, master_password: &[u8]) -> Result<()> {
        self.params.validate()?;
        self.credentials
            .register(self.store.manager_mut(), master_password, &self.params)
    }

    pub fn login(&mut self, candidate: &[u8]) -> Result<()> {
        self.credentials.login(self.store.manager_mut(), candidate)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.credentials.logout(self.store.manager_mut())
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    pub fn add_record(&mut self, name: &str, account_id: &str, secret: &str) -> Result<Address> {
        let key = self.credentials.key()?;
        self.store.add(&Record::new(name, account_id, secret), key)
    }

    /// Look a record up by address prefix or, failing that, by name.
    pub fn get_record(&self, identifier: &str) -> Result<StoredRecord> {
        let key = self.credentials.key()?;
        self.store.get(identifier, key)
    }

    pub fn list_records(&self, filter: &Filter) -> Result<Vec<StoredRecord>> {
        let key = self.credentials.key()?;
        self.store.filter(filter, key)
    }

    /// Delete the record `identifier` resolves to.  Returns its address.
    pub fn remove_record(&mut self, identifier: &str) -> Result<Address> {
        let key = self.credentials.key()?;
        let address = self.store.get(identifier, key)?.address;
        self.store.remove(&address)?;
        Ok(address)
    }

    /// Replace the fields set in `patch`.  Returns the new address.
    pub fn edit_record(&mut self, identifier: &str, patch: RecordPatch) -> Result<Address> {
        let key = self.credentials.key()?;
        let old = self.store.get(identifier, key)?;
        let new = patch.apply(&old.record);
        self.store.edit(&old.address, &new, key)
    }

    /// Re-encrypt every record under a new master password.
    pub fn rotate_master_password(&mut self, new_password: &[u8]) -> Result<RotationReport> {
        self.credentials.key()?;
        self.params.validate()?;
        let new_password = Zeroizing::new(new_password.to_vec());
        rotate(
            &mut self.store,
            &mut self.credentials,
            &new_password,
            &self.params,
        )
    }
}
