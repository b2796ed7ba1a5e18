//! Legacy raw transaction serialization

use crate::constants::*;
use crate::error::{MultisigError, Result};
use crate::types::*;

/// Encode a number as a compact-size integer.
///
/// Values below 253 take one byte; values up to 0xffff take the 0xfd
/// marker followed by two little-endian bytes. Larger values are not
/// needed by single-input transactions and are rejected.
pub fn encode_compact_size(value: u64) -> Result<ByteString> {
    if value <= COMPACT_SIZE_SINGLE_BYTE_MAX {
        Ok(vec![value as u8])
    } else if value <= COMPACT_SIZE_MAX {
        let mut result = vec![COMPACT_SIZE_U16_MARKER];
        result.extend_from_slice(&(value as u16).to_le_bytes());
        Ok(result)
    } else {
        Err(MultisigError::EncodingFailure(format!(
            "compact-size value {} exceeds {}",
            value, COMPACT_SIZE_MAX
        )))
    }
}

/// Turn a transaction hash in display (big-endian) hex into wire order
pub fn reverse_hash_hex(tx_hash_hex: &str) -> Result<Hash> {
    let trimmed = tx_hash_hex.trim();
    if trimmed.is_empty() {
        return Err(MultisigError::MissingInput(
            "previous transaction hash can't be empty".to_string(),
        ));
    }
    let bytes = hex::decode(trimmed)?;
    if bytes.len() != TX_HASH_LEN {
        return Err(MultisigError::EncodingFailure(format!(
            "transaction hash must be {} bytes, got {}",
            TX_HASH_LEN,
            bytes.len()
        )));
    }
    let mut hash = [0u8; 32];
    for (i, byte) in bytes.iter().rev().enumerate() {
        hash[i] = *byte;
    }
    Ok(hash)
}

/// NewRawTransaction: ℍ × ℕ × 𝕊 × 𝕊 → 𝒯𝒳
///
/// One input spending output 0 of `input_tx_hash_hex`, one output paying
/// `satoshis` to `script_pubkey`. Version 1, sequence final, lock time 0.
pub fn new_raw_transaction(
    input_tx_hash_hex: &str,
    satoshis: u64,
    script_sig: ByteString,
    script_pubkey: ByteString,
) -> Result<Transaction> {
    let hash = reverse_hash_hex(input_tx_hash_hex)?;
    Ok(Transaction {
        version: TX_VERSION,
        inputs: vec![TransactionInput {
            prevout: OutPoint { hash, index: 0 },
            script_sig,
            sequence: SEQUENCE_FINAL,
        }],
        outputs: vec![TransactionOutput {
            value: satoshis,
            script_pubkey,
        }],
        lock_time: TX_LOCK_TIME,
    })
}

/// Copy of `tx` with its single input's scriptSig replaced
pub fn with_script_sig(tx: &Transaction, script_sig: ByteString) -> Result<Transaction> {
    check_single_input_output(tx)?;
    let mut out = tx.clone();
    out.inputs[0].script_sig = script_sig;
    Ok(out)
}

fn check_single_input_output(tx: &Transaction) -> Result<()> {
    if tx.inputs.len() != 1 || tx.outputs.len() != 1 {
        return Err(MultisigError::InvalidParameter(format!(
            "only single-input single-output transactions are supported, got {} inputs and {} outputs",
            tx.inputs.len(),
            tx.outputs.len()
        )));
    }
    Ok(())
}

/// Serialize: 𝒯𝒳 → ℬ*
///
/// version(4) ‖ 0x01 ‖ prev_hash(32) ‖ index(4) ‖ cs(len) ‖ scriptSig ‖
/// sequence(4) ‖ 0x01 ‖ value(8) ‖ len(1) ‖ scriptPubKey ‖ lock_time(4)
///
/// All integers little-endian. The scriptPubKey length is a single byte,
/// so scriptPubKeys of 253 bytes or more are rejected.
pub fn serialize_transaction(tx: &Transaction) -> Result<ByteString> {
    check_single_input_output(tx)?;
    let input = &tx.inputs[0];
    let output = &tx.outputs[0];

    if output.script_pubkey.len() >= MAX_SCRIPT_PUBKEY_LEN {
        return Err(MultisigError::EncodingFailure(format!(
            "scriptPubKey of {} bytes does not fit a single-byte length",
            output.script_pubkey.len()
        )));
    }
    let script_sig_len = encode_compact_size(input.script_sig.len() as u64)?;

    let mut data = Vec::with_capacity(serialized_size(tx));

    // Version
    data.extend_from_slice(&tx.version.to_le_bytes());

    // Input
    data.extend_from_slice(&encode_compact_size(tx.inputs.len() as u64)?);
    data.extend_from_slice(&input.prevout.hash);
    data.extend_from_slice(&input.prevout.index.to_le_bytes());
    data.extend_from_slice(&script_sig_len);
    data.extend_from_slice(&input.script_sig);
    data.extend_from_slice(&input.sequence.to_le_bytes());

    // Output
    data.extend_from_slice(&encode_compact_size(tx.outputs.len() as u64)?);
    data.extend_from_slice(&output.value.to_le_bytes());
    data.push(output.script_pubkey.len() as u8);
    data.extend_from_slice(&output.script_pubkey);

    // Lock time
    data.extend_from_slice(&tx.lock_time.to_le_bytes());

    log::debug!("serialized transaction, {} bytes", data.len());
    Ok(data)
}

/// Byte length `serialize_transaction` produces for a single-input,
/// single-output transaction
pub fn serialized_size(tx: &Transaction) -> usize {
    let script_sig_len = tx.inputs.first().map_or(0, |i| i.script_sig.len());
    let script_pubkey_len = tx.outputs.first().map_or(0, |o| o.script_pubkey.len());
    let varint_len = if script_sig_len as u64 <= COMPACT_SIZE_SINGLE_BYTE_MAX { 1 } else { 3 };
    4 + 1 + 32 + 4 + varint_len + script_sig_len + 4 + 1 + 8 + 1 + script_pubkey_len + 4
}

/// Bytes that get signed: the serialized transaction, with the scriptSig
/// slot already holding the placeholder, followed by SIGHASH_ALL as a
/// 4-byte little-endian integer
pub fn signing_preimage(tx: &Transaction) -> Result<ByteString> {
    let mut data = serialize_transaction(tx)?;
    data.extend_from_slice(&SIGHASH_ALL.to_le_bytes());
    Ok(data)
}

/// Transaction id in display order: reversed SHA256d of the serialization
pub fn transaction_id(tx: &Transaction) -> Result<String> {
    let mut hash = crate::hash::sha256d(&serialize_transaction(tx)?);
    hash.reverse();
    Ok(hex::encode(hash))
}
