//! Base58check address encoding

use crate::constants::*;
use crate::error::{MultisigError, Result};
use crate::hash::{hash160, sha256d};

/// Base58check(version ‖ payload ‖ checksum), where checksum is the first
/// four bytes of SHA256d(version ‖ payload)
pub fn base58check_encode(version: u8, payload: &[u8]) -> String {
    let mut address_bytes = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    address_bytes.push(version);
    address_bytes.extend_from_slice(payload);
    let checksum = sha256d(&address_bytes);
    address_bytes.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(address_bytes).into_string()
}

/// Inverse of [`base58check_encode`]; returns the version byte and payload
pub fn base58check_decode(address: &str) -> Result<(u8, Vec<u8>)> {
    let bytes = bs58::decode(address.trim())
        .into_vec()
        .map_err(|e| MultisigError::EncodingFailure(format!("invalid base58: {}", e)))?;
    if bytes.len() < 1 + CHECKSUM_LEN {
        return Err(MultisigError::EncodingFailure(format!(
            "address {} is too short",
            address
        )));
    }
    let (body, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);
    if sha256d(body)[..CHECKSUM_LEN] != *checksum {
        return Err(MultisigError::EncodingFailure(format!(
            "address {} has a bad checksum",
            address
        )));
    }
    Ok((body[0], body[1..].to_vec()))
}

/// P2SH address: version 0x05, payload Hash160(redeemScript)
pub fn p2sh_address(redeem_script: &[u8]) -> Result<String> {
    Ok(base58check_encode(P2SH_VERSION_BYTE, &hash160(redeem_script)?))
}

/// P2PKH address: version 0x00, payload Hash160(publicKey)
pub fn p2pkh_address(public_key: &[u8]) -> Result<String> {
    Ok(base58check_encode(P2PKH_VERSION_BYTE, &hash160(public_key)?))
}

/// Hash160 payload of an address carrying the expected version byte
pub fn address_hash(address: &str, expected_version: u8) -> Result<[u8; HASH160_LEN]> {
    let (version, payload) = base58check_decode(address)?;
    if version != expected_version {
        return Err(MultisigError::EncodingFailure(format!(
            "address {} has version 0x{:02x}, expected 0x{:02x}",
            address, version, expected_version
        )));
    }
    if payload.len() != HASH160_LEN {
        return Err(MultisigError::EncodingFailure(format!(
            "address {} carries a {}-byte payload",
            address,
            payload.len()
        )));
    }
    let mut hash = [0u8; HASH160_LEN];
    hash.copy_from_slice(&payload);
    Ok(hash)
}
