//! Protocol constants for legacy P2SH multisig construction

/// Length of an uncompressed secp256k1 public key
pub const PUBLIC_KEY_LEN: usize = 65;

/// Prefix byte of an uncompressed public key
pub const UNCOMPRESSED_KEY_PREFIX: u8 = 0x04;

/// Length of a secp256k1 private scalar
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length of a Hash160 digest
pub const HASH160_LEN: usize = 20;

/// Length of a transaction hash
pub const TX_HASH_LEN: usize = 32;

/// Maximum N accepted for a standard P2SH multisig redeem script
pub const MAX_MULTISIG_KEYS: usize = 7;

/// Worst-case bytes a signature adds to a P2SH multisig scriptSig
pub const STANDARDNESS_SIG_WEIGHT: usize = 73;

/// Bytes a pushed public key adds to a P2SH multisig scriptSig
pub const STANDARDNESS_KEY_WEIGHT: usize = 66;

/// Relay-policy ceiling on `m*73 + n*66`
pub const STANDARDNESS_LIMIT: usize = 496;

/// Transaction version emitted by the serializer
pub const TX_VERSION: u32 = 1;

/// Lock time emitted by the serializer
pub const TX_LOCK_TIME: u32 = 0;

/// Sequence number for final transaction
pub const SEQUENCE_FINAL: u32 = 0xffffffff;

/// Largest value a compact-size integer encodes in a single byte
pub const COMPACT_SIZE_SINGLE_BYTE_MAX: u64 = 252;

/// Marker for a two-byte compact-size integer
pub const COMPACT_SIZE_U16_MARKER: u8 = 0xfd;

/// Largest value this crate encodes as a compact-size integer
pub const COMPACT_SIZE_MAX: u64 = 0xffff;

/// scriptPubKeys must be shorter than this; their length is a single byte
pub const MAX_SCRIPT_PUBKEY_LEN: usize = 253;

/// Signature hash type appended to signatures and signing preimages
pub const SIGHASH_ALL: u32 = 1;

/// Base58check version byte for P2SH addresses
pub const P2SH_VERSION_BYTE: u8 = 0x05;

/// Base58check version byte for P2PKH addresses
pub const P2PKH_VERSION_BYTE: u8 = 0x00;

/// Length of the base58check checksum
pub const CHECKSUM_LEN: usize = 4;
