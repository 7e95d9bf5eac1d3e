//! Credential state: is a master password registered, and is the
//! current session unlocked?
//!
//! The two axes are independent.  "Registered" means a master hash and
//! salt exist; "logged in" means a session key is held.  Registration
//! never logs in by itself.

use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::kdf::{derive_key, generate_salt, Argon2Params};
use crate::crypto::password::{hash_password, params_of, verify_password};
use crate::crypto::SessionKey;
use crate::errors::{Result, VaultError};
use crate::manager::AuthManager;

/// Minimum master password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// The in-memory credential bundle for one process.
#[derive(Debug, Default)]
pub struct Credentials {
    master_hash: Option<String>,
    salt: Option<Vec<u8>>,
    session_key: Option<SessionKey>,
}

/// Fresh salt, hash and key for a master password, not yet persisted.
pub(crate) struct NewMaster {
    pub salt: Vec<u8>,
    pub master_hash: String,
    pub key: SessionKey,
}

impl NewMaster {
    /// Generate everything needed to register `password`.
    pub(crate) fn generate(password: &[u8], params: &Argon2Params) -> Result<Self> {
        check_strength(password)?;
        let salt = generate_salt()?;
        let master_hash = hash_password(password, params)?;
        let key = derive_key(password, &salt, params)?;
        Ok(Self {
            salt,
            master_hash,
            key,
        })
    }

    /// Persist salt and hash.  The salt goes first: a hash without its
    /// salt would look registered but could never log in.
    pub(crate) fn commit(&self, auth: &mut dyn AuthManager) -> Result<()> {
        auth.set_salt(&self.salt)?;
        auth.set_master_hash(&self.master_hash)
    }
}

impl Credentials {
    /// Read the persisted credential singletons.
    pub fn load(auth: &dyn AuthManager) -> Result<Self> {
        Ok(Self {
            master_hash: auth.master_hash()?.filter(|h| !h.is_empty()),
            salt: auth.salt()?.filter(|s| !s.is_empty()),
            session_key: auth.session_key()?,
        })
    }

    /// `true` once a master password has been registered.
    pub fn is_registered(&self) -> bool {
        self.master_hash.is_some() && self.salt.is_some()
    }

    /// `true` while a session key is held.
    pub fn is_logged_in(&self) -> bool {
        self.session_key.is_some()
    }

    /// Register the master password.
    ///
    /// Sets salt and hash together.  Fails with `AlreadyRegistered` if a
    /// master password exists, and with `WeakPassword` if it is too short.
    pub fn register(
        &mut self,
        auth: &mut dyn AuthManager,
        password: &[u8],
        params: &Argon2Params,
    ) -> Result<()> {
        if self.is_registered() {
            return Err(VaultError::AlreadyRegistered);
        }

        let fresh = NewMaster::generate(password, params)?;
        fresh.commit(auth)?;

        self.salt = Some(fresh.salt.clone());
        self.master_hash = Some(fresh.master_hash.clone());
        debug!("master password registered");
        Ok(())
    }

    /// Unlock the session with a candidate master password.
    ///
    /// On a wrong password nothing changes and `InvalidCredentials` is
    /// returned.  The key is derived with the cost parameters recorded in
    /// the stored hash.
    pub fn login(&mut self, auth: &mut dyn AuthManager, candidate: &[u8]) -> Result<()> {
        if self.is_logged_in() {
            return Err(VaultError::AlreadyLoggedIn);
        }
        let (Some(master_hash), Some(salt)) = (&self.master_hash, &self.salt) else {
            return Err(VaultError::NotRegistered);
        };

        if !verify_password(candidate, master_hash)? {
            return Err(VaultError::InvalidCredentials);
        }

        let params = params_of(master_hash)?;
        let key = derive_key(candidate, salt, &params)?;
        auth.set_session_key(&key)?;
        self.session_key = Some(key);
        debug!("session unlocked");
        Ok(())
    }

    /// Drop the session key, here and in storage.
    pub fn logout(&mut self, auth: &mut dyn AuthManager) -> Result<()> {
        if !self.is_logged_in() {
            return Err(VaultError::NotLoggedIn);
        }
        auth.clear_session_key()?;
        self.session_key = None;
        debug!("session locked");
        Ok(())
    }

    /// The session key, or `LoginRequired`.
    pub fn key(&self) -> Result<&SessionKey> {
        self.session_key.as_ref().ok_or(VaultError::LoginRequired)
    }

    pub(crate) fn salt(&self) -> Option<&[u8]> {
        self.salt.as_deref()
    }

    pub(crate) fn master_hash(&self) -> Option<&str> {
        self.master_hash.as_deref()
    }

    /// Swap in a freshly registered master password (rotation only).
    pub(crate) fn replace(&mut self, fresh: NewMaster) {
        self.salt = Some(fresh.salt);
        self.master_hash = Some(fresh.master_hash);
        self.session_key = Some(fresh.key);
    }
}

/// Reject master passwords shorter than `MIN_PASSWORD_LEN` characters.
pub fn check_strength(password: &[u8]) -> Result<()> {
    let text = Zeroizing::new(String::from_utf8_lossy(password).into_owned());
    if text.chars().count() < MIN_PASSWORD_LEN {
        return Err(VaultError::WeakPassword(MIN_PASSWORD_LEN));
    }
    Ok(())
}
