//! Master password rotation.
//!
//! Every record is re-encrypted under a key derived from the new
//! password.  The order of operations keeps the vault readable if any
//! step fails:
//!
//! 1. decode every record with the old key (foreign blobs are left alone)
//! 2. generate the new salt, hash and key
//! 3. write all re-encrypted blobs; on failure remove them again
//! 4. commit the new salt and hash; on failure restore the old ones
//! 5. delete the old blobs; failures are reported, not fatal
//!
//! Until step 4 completes the old password still opens everything.  After
//! it, leftover old blobs are merely undecodable clutter.

use tracing::{info, warn};

use super::codec;
use super::store::RecordStore;
use crate::auth::{Credentials, NewMaster};
use crate::crypto::{Address, Argon2Params};
use crate::errors::Result;
use crate::manager::{AuthManager, Manager};

/// Outcome of a successful rotation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RotationReport {
    /// Records re-encrypted under the new key.
    pub rewritten: usize,
    /// Blobs the old key could not open; left untouched.
    pub skipped: usize,
    /// Old blobs that could not be deleted afterwards.
    pub stale: Vec<Address>,
}

/// Re-encrypt every record under `new_password`.  Requires a login.
pub fn rotate<M: Manager + AuthManager>(
    store: &mut RecordStore<M>,
    credentials: &mut Credentials,
    new_password: &[u8],
    params: &Argon2Params,
) -> Result<RotationReport> {
    let old_key = credentials.key()?;
    let mut report = RotationReport::default();

    let mut pending = Vec::new();
    for blob in store.manager().enumerate()? {
        match codec::open(&blob, old_key) {
            Ok(stored) => pending.push(stored),
            Err(e) if e.is_foreign_blob() => {
                warn!(
                    address = %Address::of(&blob).short(),
                    "record cannot be opened with the current key, leaving it as is"
                );
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let fresh = NewMaster::generate(new_password, params)?;

    let mut written = Vec::with_capacity(pending.len());
    let mut old_addresses = Vec::with_capacity(pending.len());
    // Each plaintext record is dropped, and zeroized, right after encoding.
    for stored in pending {
        match store.add(&stored.record, &fresh.key) {
            Ok(address) => {
                written.push(address);
                old_addresses.push(stored.address);
            }
            Err(e) => {
                discard(store, &written);
                return Err(e);
            }
        }
    }

    let old_salt = credentials.salt().map(<[u8]>::to_vec);
    let old_hash = credentials.master_hash().map(str::to_owned);

    if let Err(e) = commit(store.manager_mut(), &fresh) {
        if let (Some(salt), Some(hash)) = (&old_salt, &old_hash) {
            if let Err(restore_err) = restore(store.manager_mut(), salt, hash) {
                warn!(error = %restore_err, "could not restore the previous master password");
            }
        }
        discard(store, &written);
        return Err(e);
    }

    if let Err(e) = store.manager_mut().set_session_key(&fresh.key) {
        warn!(error = %e, "new session key was not cached, log in again with the new password");
    }

    report.rewritten = written.len();
    credentials.replace(fresh);

    for address in old_addresses {
        if let Err(e) = store.remove(&address) {
            warn!(address = %address, error = %e, "old record was not deleted");
            report.stale.push(address);
        }
    }

    info!(
        rewritten = report.rewritten,
        skipped = report.skipped,
        stale = report.stale.len(),
        "master password rotated"
    );
    Ok(report)
}

/// Persist the new salt and hash.  A cached session key would belong to
/// the old password, so it goes first.
fn commit(auth: &mut dyn AuthManager, fresh: &NewMaster) -> Result<()> {
    auth.clear_session_key()?;
    fresh.commit(auth)
}

fn restore(auth: &mut dyn AuthManager, salt: &[u8], hash: &str) -> Result<()> {
    auth.set_salt(salt)?;
    auth.set_master_hash(hash)
}

/// Best-effort removal of blobs written by an aborted rotation.
fn discard<M: Manager>(store: &mut RecordStore<M>, written: &[Address]) {
    if written.is_empty() {
        return;
    }
    if let Err(e) = store.manager_mut().delete(written) {
        warn!(
            count = written.len(),
            error = %e,
            "could not remove records written by the aborted rotation"
        );
    }
}
