//! Fixed RSA key pairs for tests. Never use these outside of tests.

use crate::{TokenSigner, TokenVerifier};

pub const SIGNING_PRIVATE_PEM: &str = include_str!("../test-fixtures/signing-private.pem");
pub const SIGNING_PUBLIC_PEM: &str = include_str!("../test-fixtures/signing-public.pem");

/// A second key pair, for tokens the service must not accept.
pub const FOREIGN_PRIVATE_PEM: &str = include_str!("../test-fixtures/foreign-private.pem");
pub const FOREIGN_PUBLIC_PEM: &str = include_str!("../test-fixtures/foreign-public.pem");

pub fn signer() -> TokenSigner {
    TokenSigner::from_rsa_pem(SIGNING_PRIVATE_PEM.as_bytes()).expect("signing fixture is valid")
}

pub fn verifier() -> TokenVerifier {
    TokenVerifier::from_rsa_pem(SIGNING_PUBLIC_PEM.as_bytes()).expect("public fixture is valid")
}

pub fn foreign_signer() -> TokenSigner {
    TokenSigner::from_rsa_pem(FOREIGN_PRIVATE_PEM.as_bytes()).expect("foreign fixture is valid")
}
