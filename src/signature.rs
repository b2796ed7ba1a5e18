//! ECDSA key derivation, signing and verification over secp256k1

use crate::constants::*;
use crate::error::{MultisigError, Result};
use crate::hash::sha256d;
use crate::types::*;
use rand::rngs::OsRng;
use secp256k1::{ecdsa::Signature, All, Message, PublicKey, Secp256k1, SecretKey};
use std::sync::OnceLock;

static CURVE_CONTEXT: OnceLock<Secp256k1<All>> = OnceLock::new();

/// Handle on the process-wide secp256k1 context.
///
/// The context is built on first acquisition and reused afterwards. It is
/// immutable once built, so handles can be acquired from any thread.
#[derive(Clone, Copy)]
pub struct CurveContext {
    secp: &'static Secp256k1<All>,
}

impl CurveContext {
    pub fn acquire() -> Self {
        CurveContext {
            secp: CURVE_CONTEXT.get_or_init(Secp256k1::new),
        }
    }

    pub fn secp(&self) -> &'static Secp256k1<All> {
        self.secp
    }
}

fn secret_key(private_key: &[u8]) -> Result<SecretKey> {
    if private_key.len() != PRIVATE_KEY_LEN {
        return Err(MultisigError::KeyDerivationFailure(format!(
            "private key must be {} bytes, got {}",
            PRIVATE_KEY_LEN,
            private_key.len()
        )));
    }
    // Rejects zero and scalars at or above the curve order
    SecretKey::from_slice(private_key).map_err(|_| {
        MultisigError::KeyDerivationFailure(
            "private key is not a valid secp256k1 scalar".to_string(),
        )
    })
}

/// Uncompressed public key for `private_key`
pub fn derive_public_key(private_key: &[u8]) -> Result<PublicKeyBytes> {
    let secp = CurveContext::acquire().secp();
    let sk = secret_key(private_key)?;
    Ok(PublicKey::from_secret_key(secp, &sk).serialize_uncompressed())
}

/// Sign: ℬ* × SK → DER signature
///
/// 1. Derive the public key from the scalar
/// 2. digest = SHA256(SHA256(raw_transaction))
/// 3. ECDSA-sign the digest with an RFC 6979 nonce
/// 4. Verify the signature against the derived key before returning it
pub fn sign(raw_transaction: &[u8], private_key: &[u8]) -> Result<ByteString> {
    let secp = CurveContext::acquire().secp();
    let sk = secret_key(private_key)?;
    let public_key = PublicKey::from_secret_key(secp, &sk);

    let digest = sha256d(raw_transaction);
    let message = Message::from_digest_slice(&digest)
        .map_err(|e| MultisigError::SigningFailure(e.to_string()))?;
    let signature = secp.sign_ecdsa(&message, &sk);

    secp.verify_ecdsa(&message, &signature, &public_key).map_err(|e| {
        MultisigError::VerificationFailure(format!("fresh signature rejected: {}", e))
    })?;

    Ok(signature.serialize_der().to_vec())
}

/// Check a DER signature over SHA256d(raw_transaction) against a public key
pub fn verify(raw_transaction: &[u8], signature_der: &[u8], public_key: &[u8]) -> Result<()> {
    let secp = CurveContext::acquire().secp();
    let public_key = PublicKey::from_slice(public_key).map_err(|e| {
        MultisigError::InvalidPublicKey(format!("{}: {}", e, hex::encode(public_key)))
    })?;
    let signature = Signature::from_der(signature_der)
        .map_err(|e| MultisigError::EncodingFailure(format!("malformed DER signature: {}", e)))?;
    let message = Message::from_digest_slice(&sha256d(raw_transaction))
        .map_err(|e| MultisigError::VerificationFailure(e.to_string()))?;
    secp.verify_ecdsa(&message, &signature, &public_key)
        .map_err(|e| MultisigError::VerificationFailure(e.to_string()))
}

/// Fresh private key from the operating system's CSPRNG
pub fn generate_private_key() -> PrivateKeyBytes {
    SecretKey::new(&mut OsRng).secret_bytes()
}

/// Decode a hex private key and check it is a usable scalar
pub fn parse_private_key_hex(hex_key: &str) -> Result<PrivateKeyBytes> {
    let bytes = hex::decode(hex_key.trim())?;
    let sk = secret_key(&bytes)?;
    Ok(sk.secret_bytes())
}
