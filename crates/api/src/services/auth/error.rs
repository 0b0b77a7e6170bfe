//! Token verification error types.

use thiserror::Error;

/// Errors that can occur while verifying a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer` header on the request.
    #[error("missing bearer token")]
    MissingToken,

    /// Token is not three base64url segments of JSON.
    #[error("malformed token")]
    Malformed,

    /// Token header names an algorithm other than HS256.
    #[error("unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signature does not match the configured secret.
    #[error("invalid token signature")]
    BadSignature,

    /// Token `exp` is in the past.
    #[error("token expired")]
    Expired,

    /// Neither `id` nor `sub` holds a valid user ID.
    #[error("token subject is not a user id")]
    InvalidSubject,
}
