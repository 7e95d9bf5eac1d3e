//! Filesystem-backed `Manager` and `AuthManager`.
//!
//! Layout of the data directory:
//!
//! ```text
//! <root>/
//! ├── config.toml        # optional settings
//! ├── salt               # key-derivation salt (raw bytes)
//! ├── checksum           # Argon2id PHC string of the master password
//! ├── session            # cached session key while logged in
//! └── records/
//!     └── <hex address>  # one encrypted record per file
//! ```
//!
//! Every file is written through a temp file + rename so readers never
//! see a half-written blob.  No locking is done: two processes working on
//! the same directory at once race at the filesystem level.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use super::{AuthManager, Manager};
use crate::crypto::{Address, SessionKey};
use crate::errors::{Result, VaultError};

const RECORDS_DIR: &str = "records";
const SALT_FILE: &str = "salt";
const CHECKSUM_FILE: &str = "checksum";
const SESSION_FILE: &str = "session";

/// A data directory on disk.
#[derive(Debug, Clone)]
pub struct FsManager {
    root: PathBuf,
}

impl FsManager {
    /// Open (creating if needed) the data directory at `root`.
    pub fn open(root: &Path) -> Result<Self> {
        create_private_dir(root)?;
        create_private_dir(&root.join(RECORDS_DIR))?;
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// The data directory this manager works in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn records_dir(&self) -> PathBuf {
        self.root.join(RECORDS_DIR)
    }

    fn record_path(&self, address: &Address) -> PathBuf {
        self.records_dir().join(address.to_hex())
    }

    fn read_optional(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.root.join(name)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Manager for FsManager {
    fn write(&mut self, blob: &[u8]) -> Result<Address> {
        let address = Address::of(blob);
        write_private(&self.record_path(&address), blob)?;
        debug!(address = %address.short(), "wrote record blob");
        Ok(address)
    }

    fn fetch(&self, address: &Address) -> Result<Vec<u8>> {
        match fs::read(self.record_path(address)) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(VaultError::NotFound(address.to_hex()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn enumerate(&self) -> Result<Vec<Vec<u8>>> {
        let mut blobs = Vec::new();

        for entry in fs::read_dir(self.records_dir())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Leftover temp files from an interrupted write.
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            blobs.push(fs::read(entry.path())?);
        }

        Ok(blobs)
    }

    fn delete(&mut self, addresses: &[Address]) -> Result<()> {
        if let Some(missing) = addresses.iter().find(|a| !self.record_path(a).is_file()) {
            return Err(VaultError::NotFound(missing.to_hex()));
        }

        for address in addresses {
            fs::remove_file(self.record_path(address))?;
            debug!(address = %address.short(), "deleted record blob");
        }
        Ok(())
    }
}

impl AuthManager for FsManager {
    fn salt(&self) -> Result<Option<Vec<u8>>> {
        self.read_optional(SALT_FILE)
    }

    fn set_salt(&mut self, salt: &[u8]) -> Result<()> {
        write_private(&self.root.join(SALT_FILE), salt)
    }

    fn master_hash(&self) -> Result<Option<String>> {
        match self.read_optional(CHECKSUM_FILE)? {
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|_| {
                VaultError::ConfigError("master password hash file is not valid UTF-8".into())
            }),
            None => Ok(None),
        }
    }

    fn set_master_hash(&mut self, hash: &str) -> Result<()> {
        write_private(&self.root.join(CHECKSUM_FILE), hash.as_bytes())
    }

    fn session_key(&self) -> Result<Option<SessionKey>> {
        match self.read_optional(SESSION_FILE)? {
            Some(bytes) => {
                let bytes = Zeroizing::new(bytes);
                SessionKey::from_slice(&bytes).map(Some)
            }
            None => Ok(None),
        }
    }

    fn set_session_key(&mut self, key: &SessionKey) -> Result<()> {
        write_private(&self.root.join(SESSION_FILE), key.as_bytes())
    }

    fn clear_session_key(&mut self) -> Result<()> {
        match fs::remove_file(self.root.join(SESSION_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Create a directory readable only by its owner (on Unix).
fn create_private_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }

    Ok(())
}

/// Write `data` to `path` atomically with owner-only permissions.
///
/// The temp file lives in the same directory so the rename stays on one
/// filesystem.
fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(&tmp_path)?;

    // `mode` only applies on creation; a leftover temp file keeps its old
    // bits, so tighten them before any data goes in.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(data)?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_creates_layout() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("data");
        let m = FsManager::open(&root).unwrap();
        assert!(m.root().join("records").is_dir());
    }

    #[test]
    fn records_live_under_their_address() {
        let tmp = TempDir::new().unwrap();
        let mut m = FsManager::open(tmp.path()).unwrap();

        let address = m.write(b"ciphertext").unwrap();
        let path = tmp.path().join("records").join(address.to_hex());
        assert_eq!(fs::read(path).unwrap(), b"ciphertext");
        assert_eq!(m.fetch(&address).unwrap(), b"ciphertext");
    }

    #[test]
    fn enumerate_skips_temp_files_and_dirs() {
        let tmp = TempDir::new().unwrap();
        let mut m = FsManager::open(tmp.path()).unwrap();
        m.write(b"one").unwrap();
        m.write(b"two").unwrap();
        fs::write(tmp.path().join("records").join(".half.tmp"), b"x").unwrap();
        fs::create_dir(tmp.path().join("records").join("nested")).unwrap();

        let mut blobs = m.enumerate().unwrap();
        blobs.sort();
        assert_eq!(blobs, vec![b"one".to_vec(), b"two".to_vec()]);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let mut m = FsManager::open(tmp.path()).unwrap();
        let a = m.write(b"keep").unwrap();

        let err = m.delete(&[a, Address::of(b"gone")]).unwrap_err();
        assert!(matches!(err, VaultError::NotFound(_)));
        assert!(m.fetch(&a).is_ok());
    }

    #[test]
    fn credentials_persist_across_handles() {
        let tmp = TempDir::new().unwrap();
        let mut m = FsManager::open(tmp.path()).unwrap();
        assert!(m.salt().unwrap().is_none());
        assert!(m.master_hash().unwrap().is_none());

        m.set_salt(&[9u8; 32]).unwrap();
        m.set_master_hash("$argon2id$fake").unwrap();
        m.set_session_key(&SessionKey::new([5u8; 32])).unwrap();

        let reopened = FsManager::open(tmp.path()).unwrap();
        assert_eq!(reopened.salt().unwrap().unwrap(), vec![9u8; 32]);
        assert_eq!(reopened.master_hash().unwrap().unwrap(), "$argon2id$fake");
        assert!(reopened.session_key().unwrap().is_some());
    }

    #[test]
    fn clearing_session_twice_is_fine() {
        let tmp = TempDir::new().unwrap();
        let mut m = FsManager::open(tmp.path()).unwrap();
        m.set_session_key(&SessionKey::new([5u8; 32])).unwrap();
        m.clear_session_key().unwrap();
        m.clear_session_key().unwrap();
        assert!(m.session_key().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let mut m = FsManager::open(tmp.path()).unwrap();
        m.set_salt(&[1u8; 32]).unwrap();

        let mode = fs::metadata(tmp.path().join("salt"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn leftover_temp_file_does_not_leak_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let mut m = FsManager::open(tmp.path()).unwrap();

        let leftover = tmp.path().join(".session.tmp");
        fs::write(&leftover, b"stale").unwrap();
        fs::set_permissions(&leftover, fs::Permissions::from_mode(0o644)).unwrap();

        m.set_session_key(&SessionKey::new([5u8; 32])).unwrap();

        let mode = fs::metadata(tmp.path().join("session"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
        assert!(!leftover.exists());
        assert_eq!(
            m.session_key().unwrap().unwrap().as_bytes(),
            &[5u8; 32]
        );
    }
}
