//! Public key encoding checks

use crate::constants::*;
use crate::error::{MultisigError, Result};
use crate::types::PublicKeyBytes;

/// CheckPublicKeyIsValid: ℬ* → {valid, invalid}
///
/// A key is accepted iff it is non-empty, exactly 65 bytes and starts
/// with 0x04. Every violated condition is reported in one message,
/// followed by the hex of the offending buffer.
pub fn check_public_key_is_valid(public_key: &[u8]) -> Result<()> {
    let mut problems = Vec::new();

    if public_key.is_empty() {
        problems.push("public key cannot be empty".to_string());
    } else {
        if public_key.len() != PUBLIC_KEY_LEN {
            problems.push(format!(
                "public key should be {} bytes long, provided key is {} bytes long",
                PUBLIC_KEY_LEN,
                public_key.len()
            ));
        }
        if public_key[0] != UNCOMPRESSED_KEY_PREFIX {
            problems.push(format!(
                "public key first byte should be 0x{:02x}, provided key first byte is 0x{:02x}",
                UNCOMPRESSED_KEY_PREFIX, public_key[0]
            ));
        }
    }

    if problems.is_empty() {
        return Ok(());
    }

    Err(MultisigError::InvalidPublicKey(format!(
        "{}; key: {}",
        problems.join("; "),
        hex::encode(public_key)
    )))
}

/// Decode a hex public key and check it
pub fn parse_public_key_hex(hex_key: &str) -> Result<PublicKeyBytes> {
    let bytes = hex::decode(hex_key.trim())?;
    check_public_key_is_valid(&bytes)?;
    let mut key = [0u8; PUBLIC_KEY_LEN];
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// Split a comma separated key list.
///
/// Whitespace is trimmed and single or double quotes around each key
/// are stripped, so `key1, 'key2',"key3"` yields three entries.
pub fn parse_public_key_list(list: &str) -> Result<Vec<PublicKeyBytes>> {
    let trimmed = list.trim();
    if trimmed.is_empty() {
        return Err(MultisigError::MissingInput(
            "public key list is empty".to_string(),
        ));
    }
    trimmed
        .split(',')
        .map(|entry| entry.trim().trim_matches(|c: char| c == '"' || c == '\''))
        .map(parse_public_key_hex)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_key() -> Vec<u8> {
        let mut key = vec![0x04];
        key.extend_from_slice(&[0xab; 64]);
        key
    }

    #[test]
    fn test_valid_key() {
        assert!(check_public_key_is_valid(&valid_key()).is_ok());
    }

    #[test]
    fn test_empty_key() {
        let err = check_public_key_is_valid(&[]).unwrap_err();
        match err {
            MultisigError::InvalidPublicKey(msg) => assert!(msg.contains("empty")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_compressed_key_reports_both_problems() {
        let mut key = vec![0x02];
        key.extend_from_slice(&[0x11; 32]);
        let err = check_public_key_is_valid(&key).unwrap_err();
        match err {
            MultisigError::InvalidPublicKey(msg) => {
                assert!(msg.contains("65 bytes"));
                assert!(msg.contains("33 bytes"));
                assert!(msg.contains("0x02"));
                assert!(msg.contains(&hex::encode(&key)));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_wrong_prefix_only() {
        let mut key = valid_key();
        key[0] = 0x06;
        let err = check_public_key_is_valid(&key).unwrap_err();
        match err {
            MultisigError::InvalidPublicKey(msg) => {
                assert!(msg.contains("0x06"));
                assert!(!msg.contains("bytes long"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_parse_public_key_hex_bad_hex() {
        assert!(matches!(
            parse_public_key_hex("04zz"),
            Err(MultisigError::EncodingFailure(_))
        ));
    }

    #[test]
    fn test_parse_public_key_list_strips_quotes() {
        let k = hex::encode(valid_key());
        let list = format!(" {}, '{}',\"{}\" ", k, k, k);
        let keys = parse_public_key_list(&list).unwrap();
        assert_eq!(keys.len(), 3);
        assert!(keys.iter().all(|key| key[0] == 0x04));
    }

    #[test]
    fn test_parse_public_key_list_empty() {
        assert!(matches!(
            parse_public_key_list("   "),
            Err(MultisigError::MissingInput(_))
        ));
    }
}
