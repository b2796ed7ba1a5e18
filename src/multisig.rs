//! End-to-end pipelines: address creation, funding a P2SH address and
//! spending from it

use crate::address::p2sh_address;
use crate::error::{MultisigError, Result};
use crate::hash::hash160;
use crate::script::*;
use crate::signature::{derive_public_key, sign};
use crate::transaction::{
    new_raw_transaction, serialize_transaction, signing_preimage, with_script_sig,
};
use crate::types::*;

/// PublicKeyValidator → BuildMultisigRedeemScript → Hash160 → base58check
pub fn create_multisig_address<K: AsRef<[u8]>>(
    m: usize,
    n: usize,
    public_keys: &[K],
) -> Result<MultisigAddress> {
    let redeem_script = build_multisig_redeem_script(m, n, public_keys)?;
    let script_hash = hash160(redeem_script.as_bytes())?;
    let address = p2sh_address(redeem_script.as_bytes())?;
    log::debug!("derived P2SH address {} for {}-of-{}", address, m, n);
    Ok(MultisigAddress {
        address,
        redeem_script,
        script_hash,
    })
}

/// Signed P2PKH → P2SH transaction.
///
/// The unsigned form carries the sender's P2PKH scriptPubKey in the
/// scriptSig slot; the final scriptSig is `push(sig ‖ 01) ‖ push(pubkey)`.
pub fn build_funding_transaction(
    private_key: &[u8],
    input_tx_hash_hex: &str,
    satoshis: u64,
    script_hash: &[u8],
) -> Result<Transaction> {
    let public_key = derive_public_key(private_key)?;
    let placeholder = build_p2pkh_script_pubkey(&hash160(&public_key)?)?;
    let script_pubkey = build_p2sh_script_pubkey(script_hash)?;

    let unsigned = new_raw_transaction(input_tx_hash_hex, satoshis, placeholder, script_pubkey)?;
    let signature = sign(&signing_preimage(&unsigned)?, private_key)?;
    let script_sig = build_p2pkh_script_sig(&signature, &public_key)?;

    let signed = with_script_sig(&unsigned, script_sig)?;
    // Catch length-field overflow before handing the transaction back
    serialize_transaction(&signed)?;
    Ok(signed)
}

/// Signed P2SH multisig → P2PKH transaction.
///
/// Exactly M private keys are required, each matching a distinct key of
/// the redeem script. Signatures are placed in redeem-script key order.
pub fn build_spending_transaction(
    private_keys: &[PrivateKeyBytes],
    redeem_script: &[u8],
    input_tx_hash_hex: &str,
    satoshis: u64,
    destination_public_key_hash: &[u8],
) -> Result<Transaction> {
    let policy = parse_multisig_redeem_script(redeem_script)?;
    if private_keys.len() != policy.m {
        return Err(MultisigError::InvalidParameter(format!(
            "{}-of-{} redeem script needs exactly {} private keys, {} provided",
            policy.m,
            policy.n,
            policy.m,
            private_keys.len()
        )));
    }

    let mut signers = Vec::with_capacity(private_keys.len());
    for private_key in private_keys {
        let public_key = derive_public_key(private_key)?;
        let position = policy
            .public_keys
            .iter()
            .position(|k| *k == public_key)
            .ok_or_else(|| {
                MultisigError::InvalidParameter(format!(
                    "public key {} is not part of the redeem script",
                    hex::encode(public_key)
                ))
            })?;
        if signers.iter().any(|(p, _)| *p == position) {
            return Err(MultisigError::InvalidParameter(format!(
                "private key for redeem script key {} supplied twice",
                position
            )));
        }
        signers.push((position, private_key));
    }
    signers.sort_by_key(|(position, _)| *position);

    let script_pubkey = build_p2pkh_script_pubkey(destination_public_key_hash)?;
    let unsigned = new_raw_transaction(
        input_tx_hash_hex,
        satoshis,
        redeem_script.to_vec(),
        script_pubkey,
    )?;
    let preimage = signing_preimage(&unsigned)?;

    let signatures = signers
        .iter()
        .map(|(_, private_key)| sign(&preimage, &private_key[..]))
        .collect::<Result<Vec<_>>>()?;
    let script_sig = build_p2sh_multisig_script_sig(&signatures, redeem_script)?;

    let signed = with_script_sig(&unsigned, script_sig)?;
    serialize_transaction(&signed)?;
    log::debug!(
        "signed {}-of-{} spend with {} signatures",
        policy.m,
        policy.n,
        signatures.len()
    );
    Ok(signed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::verify;

    const PREV_HASH: &str = "2a60c33fd18722a74e3555154803a0077e95f510a0def717c54f2cf592b9cf70";

    fn keys() -> Vec<PrivateKeyBytes> {
        vec![[0x11; 32], [0x22; 32], [0x33; 32]]
    }

    fn public_keys() -> Vec<PublicKeyBytes> {
        keys().iter().map(|k| derive_public_key(k).unwrap()).collect()
    }

    #[test]
    fn test_create_multisig_address() {
        let created = create_multisig_address(2, 3, &public_keys()).unwrap();
        assert!(created.address.starts_with('3'));
        assert_eq!(created.redeem_script.as_bytes(), &created.redeem_script.script[..]);
        assert_eq!(created.script_hash, hash160(created.redeem_script.as_bytes()).unwrap());
    }

    #[test]
    fn test_funding_transaction_signature_verifies() {
        let created = create_multisig_address(2, 3, &public_keys()).unwrap();
        let funder = [0x44; 32];
        let tx =
            build_funding_transaction(&funder, PREV_HASH, 50_000, &created.script_hash).unwrap();
        assert_eq!(tx.outputs[0].script_pubkey.len(), 23);

        let script_sig = &tx.inputs[0].script_sig;
        let sig_len = script_sig[0] as usize;
        let der = &script_sig[1..sig_len];
        assert_eq!(script_sig[sig_len], 0x01);
        let pubkey = &script_sig[sig_len + 2..];
        assert_eq!(pubkey.len(), 65);

        let placeholder = build_p2pkh_script_pubkey(&hash160(pubkey).unwrap()).unwrap();
        let unsigned = with_script_sig(&tx, placeholder).unwrap();
        assert!(verify(&signing_preimage(&unsigned).unwrap(), der, pubkey).is_ok());
    }

    #[test]
    fn test_spending_transaction_orders_signatures() {
        let created = create_multisig_address(2, 3, &public_keys()).unwrap();
        let redeem = created.redeem_script.script.clone();
        let forward = build_spending_transaction(
            &[[0x11; 32], [0x33; 32]],
            &redeem,
            PREV_HASH,
            40_000,
            &[0x55; 20],
        )
        .unwrap();
        let reversed = build_spending_transaction(
            &[[0x33; 32], [0x11; 32]],
            &redeem,
            PREV_HASH,
            40_000,
            &[0x55; 20],
        )
        .unwrap();
        assert_eq!(forward, reversed);
        assert_eq!(forward.inputs[0].script_sig[0], 0x00);
        assert!(forward.inputs[0].script_sig.ends_with(&redeem));
    }

    #[test]
    fn test_spending_transaction_wrong_key_count() {
        let created = create_multisig_address(2, 3, &public_keys()).unwrap();
        let result = build_spending_transaction(
            &[[0x11; 32]],
            &created.redeem_script.script,
            PREV_HASH,
            1,
            &[0x55; 20],
        );
        assert!(matches!(result, Err(MultisigError::InvalidParameter(_))));
    }

    #[test]
    fn test_spending_transaction_foreign_and_duplicate_keys() {
        let created = create_multisig_address(2, 3, &public_keys()).unwrap();
        let redeem = &created.redeem_script.script;
        assert!(matches!(
            build_spending_transaction(
                &[[0x11; 32], [0x66; 32]],
                redeem,
                PREV_HASH,
                1,
                &[0x55; 20]
            ),
            Err(MultisigError::InvalidParameter(_))
        ));
        assert!(matches!(
            build_spending_transaction(
                &[[0x11; 32], [0x11; 32]],
                redeem,
                PREV_HASH,
                1,
                &[0x55; 20]
            ),
            Err(MultisigError::InvalidParameter(_))
        ));
    }
}
