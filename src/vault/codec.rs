//! Record codec: three newline-delimited fields, AES-256-GCM encrypted.
//!
//! ```text
//! plaintext = name '\n' username '\n' password
//! blob      = encrypt(session key, plaintext)
//! address   = SHA-256(blob)
//! ```

use zeroize::Zeroizing;

use super::record::{Record, StoredRecord};
use crate::crypto::{decrypt, encrypt, Address, SessionKey};
use crate::errors::{Result, VaultError};

/// Separator between the plaintext fields.
pub const FIELD_DELIMITER: u8 = b'\n';

/// Serialize and encrypt `record`.  Returns the blob to store.
pub fn encode(record: &Record, key: &SessionKey) -> Result<Vec<u8>> {
    record.validate()?;

    let len = record.name.len() + record.account_id.len() + record.secret.len() + 2;
    let mut plaintext = Zeroizing::new(Vec::with_capacity(len));
    plaintext.extend_from_slice(record.name.as_bytes());
    plaintext.push(FIELD_DELIMITER);
    plaintext.extend_from_slice(record.account_id.as_bytes());
    plaintext.push(FIELD_DELIMITER);
    plaintext.extend_from_slice(record.secret.as_bytes());

    encrypt(key.as_bytes(), &plaintext)
}

/// Decrypt and parse a blob produced by `encode`.
///
/// Anything other than exactly three UTF-8 fields is a `Decode` error.
pub fn decode(blob: &[u8], key: &SessionKey) -> Result<Record> {
    let plaintext = Zeroizing::new(decrypt(key.as_bytes(), blob)?);

    let fields: Vec<&[u8]> = plaintext.split(|b| *b == FIELD_DELIMITER).collect();
    let [name, account_id, secret] = fields.as_slice() else {
        return Err(VaultError::Decode);
    };

    let text = |field: &[u8]| {
        std::str::from_utf8(field)
            .map(str::to_owned)
            .map_err(|_| VaultError::Decode)
    };

    Ok(Record {
        name: text(name)?,
        account_id: text(account_id)?,
        secret: Zeroizing::new(text(secret)?),
    })
}

/// Decode a stored blob and attach its content address.
///
/// The address is hashed from the raw blob before decryption.
pub fn open(blob: &[u8], key: &SessionKey) -> Result<StoredRecord> {
    let address = Address::of(blob);
    let record = decode(blob, key)?;
    Ok(StoredRecord { address, record })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> SessionKey {
        SessionKey::new([byte; 32])
    }

    #[test]
    fn round_trip() {
        let r = Record::new("email", "me@x.com", "hunter2");
        let blob = encode(&r, &key(1)).unwrap();
        assert_eq!(decode(&blob, &key(1)).unwrap(), r);
    }

    #[test]
    fn empty_fields_round_trip() {
        let r = Record::new("", "", "");
        let blob = encode(&r, &key(1)).unwrap();
        assert_eq!(decode(&blob, &key(1)).unwrap(), r);
    }

    #[test]
    fn ciphertext_does_not_contain_plaintext() {
        let r = Record::new("email", "me@x.com", "hunter2");
        let blob = encode(&r, &key(1)).unwrap();
        assert!(!blob.windows(7).any(|w| w == b"hunter2"));
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let blob = encode(&Record::new("a", "b", "c"), &key(1)).unwrap();
        let err = decode(&blob, &key(2)).unwrap_err();
        assert!(matches!(err, VaultError::Authentication));
    }

    #[test]
    fn wrong_field_count_is_decode_error() {
        let two_fields = encrypt(key(1).as_bytes(), b"name\nuser").unwrap();
        assert!(matches!(
            decode(&two_fields, &key(1)).unwrap_err(),
            VaultError::Decode
        ));

        let four_fields = encrypt(key(1).as_bytes(), b"a\nb\nc\nd").unwrap();
        assert!(matches!(
            decode(&four_fields, &key(1)).unwrap_err(),
            VaultError::Decode
        ));
    }

    #[test]
    fn invalid_utf8_is_decode_error() {
        let blob = encrypt(key(1).as_bytes(), b"a\nb\n\xff\xfe").unwrap();
        assert!(matches!(
            decode(&blob, &key(1)).unwrap_err(),
            VaultError::Decode
        ));
    }

    #[test]
    fn delimiter_in_field_is_rejected_on_encode() {
        let err = encode(&Record::new("a\nb", "u", "p"), &key(1)).unwrap_err();
        assert!(matches!(err, VaultError::InvalidRecord(_)));
    }

    #[test]
    fn open_addresses_the_ciphertext() {
        let r = Record::new("email", "me@x.com", "hunter2");
        let blob = encode(&r, &key(1)).unwrap();
        let stored = open(&blob, &key(1)).unwrap();
        assert_eq!(stored.address, Address::of(&blob));
        assert_eq!(stored.record, r);
    }

    #[test]
    fn same_record_encodes_differently_each_time() {
        let r = Record::new("email", "me@x.com", "hunter2");
        let a = encode(&r, &key(1)).unwrap();
        let b = encode(&r, &key(1)).unwrap();
        assert_ne!(a, b);
        assert_ne!(Address::of(&a), Address::of(&b));
        assert_eq!(decode(&a, &key(1)).unwrap(), decode(&b, &key(1)).unwrap());
    }
}
