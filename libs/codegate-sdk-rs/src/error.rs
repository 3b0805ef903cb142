use codegate_types::TokenError;
use thiserror::Error;

/// SDK-specific errors.
#[derive(Debug, Error)]
pub enum SdkError {
    /// No access token could be found in the request
    #[error("Token required")]
    MissingToken,

    /// The auth service rejected the token; the message is informational only
    #[error("Token rejected: {0}")]
    Rejected(String),

    /// The service accepted the token but its claim map could not be decoded
    #[error("Invalid claims: {0}")]
    InvalidClaims(#[from] TokenError),

    /// Endpoint string is not a valid URI
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Connection to the auth service failed
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The call itself failed (service down, deadline exceeded, ...)
    #[error("RPC error: {0}")]
    Status(#[from] tonic::Status),
}
