//! Value types flowing through the address and spending pipelines

use serde::{Deserialize, Serialize};

/// Hash type: 256-bit hash, stored in wire (little-endian) order
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Hash160 digest: RIPEMD160(SHA256(x))
pub type Hash160 = [u8; 20];

/// Uncompressed secp256k1 public key
pub type PublicKeyBytes = [u8; 65];

/// Private scalar
pub type PrivateKeyBytes = [u8; 32];

/// Reference to an output of a previous transaction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub prevout: OutPoint,
    pub script_sig: ByteString,
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Amount in satoshis
    pub value: u64,
    pub script_pubkey: ByteString,
}

/// Legacy transaction.
///
/// Inputs and outputs are ordered sequences, but the serializer only
/// accepts exactly one of each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u32,
}

/// Kind of locking script produced by the script builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptPubKeyKind {
    P2SH,
    P2PKH,
}

/// Relay-policy advisory raised when a redeem script is valid but
/// exceeds the standardness size bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardnessAdvisory {
    pub m: usize,
    pub n: usize,
    /// `m*73 + n*66`
    pub weight: usize,
}

impl std::fmt::Display for StandardnessAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-of-{} multisig is valid but non-standard: m*73+n*66 = {} exceeds 496, \
             spends may never be relayed or mined",
            self.m, self.n, self.weight
        )
    }
}

/// Multisig redeem script together with any standardness advisory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemScript {
    pub script: ByteString,
    pub advisory: Option<StandardnessAdvisory>,
}

impl RedeemScript {
    pub fn is_standard(&self) -> bool {
        self.advisory.is_none()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.script
    }
}

/// Result of decoding an M-of-N redeem script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigPolicy {
    pub m: usize,
    pub n: usize,
    pub public_keys: Vec<PublicKeyBytes>,
}

/// P2SH address together with the redeem script it commits to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigAddress {
    pub address: String,
    pub redeem_script: RedeemScript,
    pub script_hash: Hash160,
}
