//! Shared types and crypto primitives for codegate authentication.
//!
//! This crate provides:
//! - Token claim sets (`AccessClaims`, `RefreshClaims`) and the `token_type` discriminator
//! - RS256 signing and verification (`TokenSigner`, `TokenVerifier`)
//! - Access token extraction from `Authorization` header values
//! - The `CheckToken` RPC contract shared by the server and the SDK

mod claims;
mod crypto;
mod errors;
mod header;
pub mod rpc;

#[cfg(any(test, feature = "test-keys"))]
pub mod test_keys;

pub use claims::{AccessClaims, RefreshClaims, Role, TokenClaims, TokenType};
pub use crypto::{TokenSigner, TokenVerifier};
pub use errors::{ErrorCode, TokenError};
pub use header::bearer_token;
