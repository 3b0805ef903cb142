//! Rust SDK for codegate authentication.
//!
//! Services behind codegate use this crate to validate access tokens without
//! holding any key material: the token is sent to the auth service's
//! `CheckToken` RPC, which runs the full validation pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use codegate_sdk::CodegateClient;
//!
//! let client = CodegateClient::connect("http://127.0.0.1:50051").await?;
//!
//! let check = client.check_token("eyJ...").await?;
//! if check.valid {
//!     let claims = check.access_claims()?;
//!     println!("User ID: {}", claims.sub);
//! }
//! ```

mod client;
mod error;
mod extract;

pub use client::{CodegateClient, TokenCheck};
pub use error::SdkError;
pub use extract::{Headers, extract_token};

// Re-export shared types for convenience
pub use codegate_types::{AccessClaims, Role};
