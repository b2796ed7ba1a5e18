//! Tests for error paths and edge cases

use p2sh_multisig::*;

fn fake_key(fill: u8) -> Vec<u8> {
    let mut key = vec![0x04];
    key.extend_from_slice(&[fill; 64]);
    key
}

#[test]
fn test_n_outside_range() {
    let multisig = P2shMultisig::new();
    for n in [0usize, 8, 16] {
        let keys: Vec<_> = (0..n).map(|i| fake_key(i as u8)).collect();
        assert!(matches!(
            multisig.redeem_script(1, n, &keys),
            Err(MultisigError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_m_outside_range() {
    let multisig = P2shMultisig::new();
    let keys: Vec<_> = (0..5).map(fake_key).collect();
    for m in [0usize, 6, 100] {
        assert!(matches!(
            multisig.redeem_script(m, 5, &keys),
            Err(MultisigError::InvalidParameter(_))
        ));
    }
}

#[test]
fn test_first_bad_key_short_circuits() {
    let multisig = P2shMultisig::new();
    let keys = vec![fake_key(1), vec![0x02; 33], vec![]];
    match multisig.redeem_script(2, 3, &keys) {
        Err(MultisigError::InvalidPublicKey(msg)) => assert!(msg.contains(&"02".repeat(33))),
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_seven_of_seven_is_advisory_only() {
    let multisig = P2shMultisig::new();
    let keys: Vec<_> = (0..7).map(fake_key).collect();
    let redeem = multisig.redeem_script(7, 7, &keys).unwrap();
    assert!(!redeem.is_standard());
    assert_eq!(redeem.script.len(), 1 + 7 * 66 + 2);
    let advisory = redeem.advisory.unwrap();
    assert_eq!((advisory.m, advisory.n, advisory.weight), (7, 7, 973));
    assert!(advisory.to_string().contains("non-standard"));
}

#[test]
fn test_empty_hashes_are_missing_input() {
    let multisig = P2shMultisig::new();
    assert!(matches!(multisig.hash160(&[]), Err(MultisigError::MissingInput(_))));
    assert!(matches!(
        multisig.script_pubkey(ScriptPubKeyKind::P2SH, &[]),
        Err(MultisigError::MissingInput(_))
    ));
    assert!(matches!(
        multisig.script_pubkey(ScriptPubKeyKind::P2PKH, &[]),
        Err(MultisigError::MissingInput(_))
    ));
}

#[test]
fn test_private_key_range() {
    let multisig = P2shMultisig::new();
    // secp256k1 curve order n
    let order =
        hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap();
    assert!(matches!(
        multisig.derive_public_key(&order),
        Err(MultisigError::KeyDerivationFailure(_))
    ));
    let mut below_order = order.clone();
    below_order[31] = 0x40;
    assert!(multisig.derive_public_key(&below_order).is_ok());
    assert!(matches!(
        multisig.sign(b"tx", &[0u8; 32]),
        Err(MultisigError::KeyDerivationFailure(_))
    ));
    assert!(matches!(
        multisig.sign(b"", &[0u8; 32]),
        Err(MultisigError::KeyDerivationFailure(_))
    ));
}

#[test]
fn test_malformed_signature_is_encoding_failure() {
    let multisig = P2shMultisig::new();
    let public_key = multisig.derive_public_key(&[0x11; 32]).unwrap();
    assert!(matches!(
        multisig.verify(b"tx", &[0x30, 0x01], &public_key),
        Err(MultisigError::EncodingFailure(_))
    ));
}

#[test]
fn test_spend_with_bad_redeem_script() {
    let multisig = P2shMultisig::new();
    let result = multisig.spend(
        &[[0x11; 32]],
        &[0x51, 0x51, 0xae],
        "2a60c33fd18722a74e3555154803a0077e95f510a0def717c54f2cf592b9cf70",
        1,
        &[0; 20],
    );
    assert!(matches!(result, Err(MultisigError::EncodingFailure(_))));
}
