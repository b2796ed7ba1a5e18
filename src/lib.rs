//! # P2SH-Multisig
//!
//! Construction of Bitcoin P2SH multisig spending artifacts: M-of-N redeem
//! scripts, their P2SH and P2PKH locking scripts, legacy raw transactions in
//! wire format, and self-verified ECDSA signatures over their double-SHA256
//! digest.
//!
//! ## Pipeline
//!
//! Address creation:
//! - `pubkey` checks each key's encoding
//! - `script` assembles the redeem script
//! - `hash` computes Hash160 of the script
//! - `address` base58check-encodes it with version 0x05
//!
//! Spending:
//! - `transaction` serializes the unsigned form with a placeholder scriptSig
//! - `signature` signs and self-verifies
//! - `script` assembles the final scriptSig
//! - `transaction` serializes the result
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every operation is deterministic and side-effect-free
//!    apart from logging
//! 2. **Exact Version Pinning**: consensus-critical dependencies are pinned
//! 3. **No Silent Truncation**: out-of-range lengths are errors
//!
//! ## Usage
//!
//! ```rust
//! use p2sh_multisig::P2shMultisig;
//!
//! let multisig = P2shMultisig::new();
//! let keys: Vec<_> = [[0x11u8; 32], [0x22; 32], [0x33; 32]]
//!     .iter()
//!     .map(|k| multisig.derive_public_key(k).unwrap())
//!     .collect();
//! let created = multisig.create_address(2, 3, &keys).unwrap();
//! assert!(created.address.starts_with('3'));
//! ```

pub mod types;
pub mod constants;
pub mod opcodes;
pub mod pubkey;
pub mod hash;
pub mod script;
pub mod transaction;
pub mod signature;
pub mod address;
pub mod multisig;
pub mod error;

// Re-export commonly used types
pub use types::*;
pub use constants::*;
pub use opcodes::Opcode;
pub use error::{MultisigError, Result};

/// Entry point bundling the script, transaction and signature operations
///
/// # Examples
///
/// ```
/// use p2sh_multisig::P2shMultisig;
///
/// let multisig = P2shMultisig::new();
/// let mut key = vec![0x04];
/// key.extend_from_slice(&[0xab; 64]);
///
/// let redeem = multisig.redeem_script(1, 1, &[key]).unwrap();
/// assert_eq!(redeem.script.len(), 69);
/// assert!(redeem.is_standard());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct P2shMultisig;

impl P2shMultisig {
    pub fn new() -> Self {
        Self
    }

    /// Check a public key's uncompressed encoding
    pub fn check_public_key(&self, public_key: &[u8]) -> Result<()> {
        pubkey::check_public_key_is_valid(public_key)
    }

    /// Hash160 of arbitrary non-empty data
    ///
    /// # Examples
    ///
    /// ```
    /// use p2sh_multisig::P2shMultisig;
    ///
    /// let multisig = P2shMultisig::new();
    /// assert_eq!(multisig.hash160(b"abc").unwrap().len(), 20);
    /// assert!(multisig.hash160(b"").is_err());
    /// ```
    pub fn hash160(&self, data: &[u8]) -> Result<Hash160> {
        hash::hash160(data)
    }

    /// Build an M-of-N redeem script
    pub fn redeem_script<K: AsRef<[u8]>>(
        &self,
        m: usize,
        n: usize,
        public_keys: &[K],
    ) -> Result<RedeemScript> {
        script::build_multisig_redeem_script(m, n, public_keys)
    }

    /// Build a P2SH or P2PKH locking script around a 20-byte hash
    ///
    /// # Examples
    ///
    /// ```
    /// use p2sh_multisig::{P2shMultisig, ScriptPubKeyKind};
    ///
    /// let multisig = P2shMultisig::new();
    /// let spk = multisig.script_pubkey(ScriptPubKeyKind::P2SH, &[0u8; 20]).unwrap();
    /// assert_eq!(spk.len(), 23);
    /// ```
    pub fn script_pubkey(&self, kind: ScriptPubKeyKind, hash: &[u8]) -> Result<ByteString> {
        script::build_script_pubkey(kind, hash)
    }

    /// Redeem script plus its P2SH address
    pub fn create_address<K: AsRef<[u8]>>(
        &self,
        m: usize,
        n: usize,
        public_keys: &[K],
    ) -> Result<MultisigAddress> {
        multisig::create_multisig_address(m, n, public_keys)
    }

    /// Single-input, single-output legacy transaction
    pub fn raw_transaction(
        &self,
        input_tx_hash_hex: &str,
        satoshis: u64,
        script_sig: ByteString,
        script_pubkey: ByteString,
    ) -> Result<Transaction> {
        transaction::new_raw_transaction(input_tx_hash_hex, satoshis, script_sig, script_pubkey)
    }

    /// Wire encoding of a single-input, single-output transaction
    pub fn serialize(&self, tx: &Transaction) -> Result<ByteString> {
        transaction::serialize_transaction(tx)
    }

    /// Uncompressed public key for a private scalar
    pub fn derive_public_key(&self, private_key: &[u8]) -> Result<PublicKeyBytes> {
        signature::derive_public_key(private_key)
    }

    /// Self-verified DER signature over SHA256d(raw_transaction)
    ///
    /// # Examples
    ///
    /// ```
    /// use p2sh_multisig::P2shMultisig;
    ///
    /// let multisig = P2shMultisig::new();
    /// let key = [0x11u8; 32];
    /// let sig = multisig.sign(b"raw tx", &key).unwrap();
    /// let public_key = multisig.derive_public_key(&key).unwrap();
    /// assert!(multisig.verify(b"raw tx", &sig, &public_key).is_ok());
    /// ```
    pub fn sign(&self, raw_transaction: &[u8], private_key: &[u8]) -> Result<ByteString> {
        signature::sign(raw_transaction, private_key)
    }

    /// Verify a DER signature over SHA256d(raw_transaction)
    pub fn verify(
        &self,
        raw_transaction: &[u8],
        signature_der: &[u8],
        public_key: &[u8],
    ) -> Result<()> {
        signature::verify(raw_transaction, signature_der, public_key)
    }

    /// Signed transaction moving funds from a P2PKH key to a P2SH script hash
    pub fn fund(
        &self,
        private_key: &[u8],
        input_tx_hash_hex: &str,
        satoshis: u64,
        script_hash: &[u8],
    ) -> Result<Transaction> {
        multisig::build_funding_transaction(private_key, input_tx_hash_hex, satoshis, script_hash)
    }

    /// Signed transaction spending a P2SH multisig output to a P2PKH hash
    pub fn spend(
        &self,
        private_keys: &[PrivateKeyBytes],
        redeem_script: &[u8],
        input_tx_hash_hex: &str,
        satoshis: u64,
        destination_public_key_hash: &[u8],
    ) -> Result<Transaction> {
        multisig::build_spending_transaction(
            private_keys,
            redeem_script,
            input_tx_hash_hex,
            satoshis,
            destination_public_key_hash,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREV_HASH: &str = "2a60c33fd18722a74e3555154803a0077e95f510a0def717c54f2cf592b9cf70";

    #[test]
    fn test_facade_address_matches_modules() {
        let multisig = P2shMultisig::new();
        let keys: Vec<_> = [[0x11u8; 32], [0x22; 32]]
            .iter()
            .map(|k| multisig.derive_public_key(k).unwrap())
            .collect();
        let created = multisig.create_address(1, 2, &keys).unwrap();
        assert_eq!(
            created.address,
            address::p2sh_address(&created.redeem_script.script).unwrap()
        );
    }

    #[test]
    fn test_facade_fund_then_spend() {
        let multisig = P2shMultisig::new();
        let private_keys = [[0x11u8; 32], [0x22; 32]];
        let keys: Vec<_> = private_keys
            .iter()
            .map(|k| multisig.derive_public_key(k).unwrap())
            .collect();
        let created = multisig.create_address(2, 2, &keys).unwrap();

        let funding = multisig
            .fund(&[0x44; 32], PREV_HASH, 100_000, &created.script_hash)
            .unwrap();
        let funding_txid = transaction::transaction_id(&funding).unwrap();

        let spend = multisig
            .spend(
                &private_keys,
                created.redeem_script.as_bytes(),
                &funding_txid,
                90_000,
                &[0x77; 20],
            )
            .unwrap();
        let raw = multisig.serialize(&spend).unwrap();
        assert_eq!(raw.len(), transaction::serialized_size(&spend));
        assert_eq!(spend.outputs[0].value, 90_000);
    }
}
