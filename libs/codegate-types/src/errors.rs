use jsonwebtoken::errors::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TokenType;

/// Stable error codes returned in codegate error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    MissingToken,
    InvalidToken,
    InvalidTokenType,
    TokenExpired,
    QuotaExceeded,
    WrongCode,
    CodeNotFound,
    IdentityNotFound,
    InvalidInput,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidTokenType => "INVALID_TOKEN_TYPE",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::QuotaExceeded => "QUOTA_EXCEEDED",
            Self::WrongCode => "WRONG_CODE",
            Self::CodeNotFound => "CODE_NOT_FOUND",
            Self::IdentityNotFound => "IDENTITY_NOT_FOUND",
            Self::InvalidInput => "INVALID_INPUT",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of the signing and verification primitives.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token required")]
    Missing,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Invalid token")]
    InvalidSignature,

    #[error("Invalid token type: expected {expected}, got {actual}")]
    WrongType {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("Token has expired")]
    Expired,

    #[error("Invalid key material: {0}")]
    KeyMaterial(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_)
            | ErrorKind::MissingRequiredClaim(_) => TokenError::Malformed(err.to_string()),
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::InvalidSignature,
        }
    }
}
