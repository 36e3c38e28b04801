use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Cannot issue a token without a subject")]
    MissingSubject,

    #[error("Token expiry does not fit a timestamp")]
    ExpiryOverflow,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
