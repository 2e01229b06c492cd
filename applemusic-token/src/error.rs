//! Error types for MusicKit token generation.

use thiserror::Error;

/// Reasons a private key is rejected before signing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyFormatError {
    /// No PEM block could be found in the supplied bytes.
    #[error("key must be a PEM encoded PKCS8 private key")]
    MissingPem,

    /// The PEM payload is not a PKCS8 `PrivateKeyInfo` structure.
    #[error("invalid PKCS8 structure: {0}")]
    InvalidPkcs8(String),

    /// The PKCS8 algorithm is not `id-ecPublicKey`.
    #[error("key is not an elliptic-curve private key (algorithm {0})")]
    NotEcKey(String),

    /// An EC key on a curve other than P-256.
    #[error("unsupported elliptic curve {0}, expected P-256")]
    UnsupportedCurve(String),

    /// The key bytes inside a well-formed envelope are not a valid P-256 scalar.
    #[error("malformed EC private key: {0}")]
    Malformed(String),
}

/// Errors that can occur while generating a developer token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The private key could not be parsed.
    #[error(transparent)]
    KeyFormat(#[from] KeyFormatError),

    /// The JWT could not be encoded or signed.
    #[error("signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// TTL is zero or exceeds [`MAX_TTL_SECS`](crate::MAX_TTL_SECS).
    #[error("TTL must be between 1 and {max} seconds, got {ttl}")]
    TtlOutOfRange { ttl: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, TokenError>;
