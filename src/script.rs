//! Script assembly for P2SH multisig redeem scripts, locking scripts and
//! unlocking scripts

use crate::constants::*;
use crate::error::{MultisigError, Result};
use crate::opcodes::{Opcode, MAX_DIRECT_PUSH};
use crate::pubkey::check_public_key_is_valid;
use crate::types::*;

/// Standardness: m × 73 + n × 66 ≤ 496
///
/// Returns an advisory when the bound is exceeded. This is relay policy,
/// not consensus, so callers still get their script.
pub fn check_standardness(m: usize, n: usize) -> Option<StandardnessAdvisory> {
    let weight = m * STANDARDNESS_SIG_WEIGHT + n * STANDARDNESS_KEY_WEIGHT;
    if weight > STANDARDNESS_LIMIT {
        Some(StandardnessAdvisory { m, n, weight })
    } else {
        None
    }
}

/// BuildMultisigRedeemScript: ℕ × ℕ × PK* → 𝕊
///
/// For 1 ≤ m ≤ n ≤ 7 and exactly n valid uncompressed keys:
/// `OP_m ‖ (0x41 ‖ pk)* ‖ OP_n ‖ OP_CHECKMULTISIG`
pub fn build_multisig_redeem_script<K: AsRef<[u8]>>(
    m: usize,
    n: usize,
    public_keys: &[K],
) -> Result<RedeemScript> {
    if n < 1 || n > MAX_MULTISIG_KEYS {
        return Err(MultisigError::InvalidParameter(format!(
            "N must be between 1 and {} (inclusive) for a standard P2SH multisig script, got {}",
            MAX_MULTISIG_KEYS, n
        )));
    }
    if m < 1 || m > n {
        return Err(MultisigError::InvalidParameter(format!(
            "M must be between 1 and N ({}) inclusive, got {}",
            n, m
        )));
    }
    if public_keys.len() != n {
        return Err(MultisigError::InvalidParameter(format!(
            "need exactly {} public keys for {}-of-{} multisig, {} provided",
            n,
            m,
            n,
            public_keys.len()
        )));
    }

    let (op_m, op_n) = match (Opcode::small_int(m), Opcode::small_int(n)) {
        (Some(op_m), Some(op_n)) => (op_m, op_n),
        _ => {
            return Err(MultisigError::InvalidParameter(format!(
                "no small-integer opcode for {}-of-{}",
                m, n
            )))
        }
    };

    let mut script = Vec::with_capacity(1 + n * (1 + PUBLIC_KEY_LEN) + 2);
    script.push(op_m.to_u8());
    for key in public_keys {
        let key = key.as_ref();
        check_public_key_is_valid(key)?;
        script.push(key.len() as u8);
        script.extend_from_slice(key);
    }
    script.push(op_n.to_u8());
    script.push(Opcode::OP_CHECKMULTISIG.to_u8());

    let advisory = check_standardness(m, n);
    if let Some(advisory) = &advisory {
        log::warn!("{}", advisory);
    }
    log::debug!("built {}-of-{} redeem script, {} bytes", m, n, script.len());

    Ok(RedeemScript { script, advisory })
}

/// P2SH scriptPubKey: `OP_HASH160 ‖ len ‖ hash ‖ OP_EQUAL`
pub fn build_p2sh_script_pubkey(script_hash: &[u8]) -> Result<ByteString> {
    check_hash_push(script_hash, "redeem script hash")?;
    let mut script = Vec::with_capacity(script_hash.len() + 3);
    script.push(Opcode::OP_HASH160.to_u8());
    script.push(script_hash.len() as u8);
    script.extend_from_slice(script_hash);
    script.push(Opcode::OP_EQUAL.to_u8());
    Ok(script)
}

/// P2PKH scriptPubKey: `OP_DUP ‖ OP_HASH160 ‖ len ‖ hash ‖ OP_EQUALVERIFY ‖ OP_CHECKSIG`
pub fn build_p2pkh_script_pubkey(public_key_hash: &[u8]) -> Result<ByteString> {
    check_hash_push(public_key_hash, "public key hash")?;
    let mut script = Vec::with_capacity(public_key_hash.len() + 5);
    script.push(Opcode::OP_DUP.to_u8());
    script.push(Opcode::OP_HASH160.to_u8());
    script.push(public_key_hash.len() as u8);
    script.extend_from_slice(public_key_hash);
    script.push(Opcode::OP_EQUALVERIFY.to_u8());
    script.push(Opcode::OP_CHECKSIG.to_u8());
    Ok(script)
}

/// Dispatch on the locking-script kind
pub fn build_script_pubkey(kind: ScriptPubKeyKind, hash: &[u8]) -> Result<ByteString> {
    match kind {
        ScriptPubKeyKind::P2SH => build_p2sh_script_pubkey(hash),
        ScriptPubKeyKind::P2PKH => build_p2pkh_script_pubkey(hash),
    }
}

fn check_hash_push(hash: &[u8], what: &str) -> Result<()> {
    if hash.is_empty() {
        return Err(MultisigError::MissingInput(format!("{} can't be empty", what)));
    }
    // The length is written as a bare push opcode
    if hash.len() > MAX_DIRECT_PUSH {
        return Err(MultisigError::EncodingFailure(format!(
            "{} is {} bytes, a direct push holds at most {}",
            what,
            hash.len(),
            MAX_DIRECT_PUSH
        )));
    }
    Ok(())
}

/// Minimal data push: bare length up to 75 bytes, then OP_PUSHDATA1 and
/// OP_PUSHDATA2. Empty data pushes OP_0.
pub fn push_data(data: &[u8]) -> Result<ByteString> {
    let len = data.len();
    let mut out = Vec::with_capacity(len + 3);
    if len == 0 {
        out.push(Opcode::OP_0.to_u8());
    } else if len <= MAX_DIRECT_PUSH {
        out.push(len as u8);
    } else if len <= 0xff {
        out.push(Opcode::OP_PUSHDATA1.to_u8());
        out.push(len as u8);
    } else if len <= 0xffff {
        out.push(Opcode::OP_PUSHDATA2.to_u8());
        out.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        return Err(MultisigError::EncodingFailure(format!(
            "push of {} bytes exceeds OP_PUSHDATA2",
            len
        )));
    }
    out.extend_from_slice(data);
    Ok(out)
}

fn signature_with_hash_type(signature: &[u8]) -> Result<ByteString> {
    if signature.is_empty() {
        return Err(MultisigError::MissingInput("signature can't be empty".to_string()));
    }
    let mut sig = signature.to_vec();
    sig.push(SIGHASH_ALL as u8);
    Ok(sig)
}

/// P2PKH scriptSig: `push(sig ‖ SIGHASH_ALL) ‖ push(pubkey)`
pub fn build_p2pkh_script_sig(signature: &[u8], public_key: &[u8]) -> Result<ByteString> {
    check_public_key_is_valid(public_key)?;
    let mut script = push_data(&signature_with_hash_type(signature)?)?;
    script.extend(push_data(public_key)?);
    Ok(script)
}

/// P2SH multisig scriptSig: `OP_0 ‖ push(sig_i ‖ SIGHASH_ALL)* ‖ push(redeemScript)`
///
/// Signatures must be in the same order as their keys appear in the
/// redeem script.
pub fn build_p2sh_multisig_script_sig(
    signatures: &[ByteString],
    redeem_script: &[u8],
) -> Result<ByteString> {
    if signatures.is_empty() {
        return Err(MultisigError::MissingInput("no signatures supplied".to_string()));
    }
    if redeem_script.is_empty() {
        return Err(MultisigError::MissingInput("redeem script can't be empty".to_string()));
    }
    let mut script = vec![Opcode::OP_0.to_u8()];
    for signature in signatures {
        script.extend(push_data(&signature_with_hash_type(signature)?)?);
    }
    script.extend(push_data(redeem_script)?);
    Ok(script)
}

/// Decode `OP_m ‖ (0x41 ‖ pk)* ‖ OP_n ‖ OP_CHECKMULTISIG`
pub fn parse_multisig_redeem_script(script: &[u8]) -> Result<MultisigPolicy> {
    let malformed =
        |why: &str| MultisigError::EncodingFailure(format!("malformed redeem script: {}", why));

    if script.len() < 3 {
        return Err(malformed("too short"));
    }
    let m = Opcode::try_from(script[0])
        .ok()
        .and_then(Opcode::small_int_value)
        .ok_or_else(|| malformed("first byte is not OP_1..OP_16"))?;
    let n = Opcode::try_from(script[script.len() - 2])
        .ok()
        .and_then(Opcode::small_int_value)
        .ok_or_else(|| malformed("second to last byte is not OP_1..OP_16"))?;
    if script[script.len() - 1] != Opcode::OP_CHECKMULTISIG.to_u8() {
        return Err(malformed("missing OP_CHECKMULTISIG"));
    }

    let body = &script[1..script.len() - 2];
    if body.len() != n * (1 + PUBLIC_KEY_LEN) {
        return Err(malformed("key section length does not match N"));
    }

    let mut public_keys = Vec::with_capacity(n);
    for chunk in body.chunks(1 + PUBLIC_KEY_LEN) {
        if chunk[0] as usize != PUBLIC_KEY_LEN {
            return Err(malformed("key push is not 65 bytes"));
        }
        check_public_key_is_valid(&chunk[1..])?;
        let mut key = [0u8; PUBLIC_KEY_LEN];
        key.copy_from_slice(&chunk[1..]);
        public_keys.push(key);
    }

    if m > n {
        return Err(malformed("M exceeds N"));
    }

    Ok(MultisigPolicy { m, n, public_keys })
}
