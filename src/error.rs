//! Error types for multisig script and transaction construction

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultisigError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Encoding failed: {0}")]
    EncodingFailure(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailure(String),

    #[error("Signing failed: {0}")]
    SigningFailure(String),

    #[error("Signature verification failed: {0}")]
    VerificationFailure(String),
}

pub type Result<T> = std::result::Result<T, MultisigError>;

impl From<hex::FromHexError> for MultisigError {
    fn from(e: hex::FromHexError) -> Self {
        MultisigError::EncodingFailure(format!("malformed hex: {}", e))
    }
}
