//! Script and transaction digests

use crate::error::{MultisigError, Result};
use crate::types::{Hash, Hash160};
use bitcoin_hashes::{sha256d, Hash as BitcoinHash};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Hash160: ℬ* → ℬ²⁰
///
/// Same operation as OP_HASH160: RIPEMD160(SHA256(data)).
/// Empty input is rejected rather than hashed.
pub fn hash160(data: &[u8]) -> Result<Hash160> {
    if data.is_empty() {
        return Err(MultisigError::MissingInput(
            "empty bytes cannot be hashed".to_string(),
        ));
    }
    let sha256_hash = Sha256::digest(data);
    let ripemd160_hash = Ripemd160::digest(sha256_hash);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripemd160_hash);
    Ok(out)
}

/// Single SHA256
pub fn sha256(data: &[u8]) -> Hash {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(data));
    out
}

/// SHA256(SHA256(data)), the transaction signing digest
pub fn sha256d(data: &[u8]) -> Hash {
    sha256d::Hash::hash(data).into_inner()
}
