use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{TokenClaims, TokenError};

const ALGORITHM: Algorithm = Algorithm::RS256;

/// Signs claim sets with the service's RSA private key (RS256).
pub struct TokenSigner {
    key: EncodingKey,
}

impl TokenSigner {
    /// Build a signer from a PEM encoded RSA private key (PKCS#1 or PKCS#8).
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, TokenError> {
        let key = EncodingKey::from_rsa_pem(pem)
            .map_err(|e| TokenError::KeyMaterial(format!("private key: {e}")))?;
        Ok(Self { key })
    }

    pub fn sign(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        encode(&Header::new(ALGORITHM), claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

/// Verifies tokens against the matching RSA public key.
///
/// Only the signature and the claim shape are checked here. Expiry and the
/// token type are policy decisions left to the caller, so that each can be
/// reported as its own outcome.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Build a verifier from a PEM encoded RSA public key (PKCS#1 or SPKI).
    pub fn from_rsa_pem(pem: &[u8]) -> Result<Self, TokenError> {
        let key = DecodingKey::from_rsa_pem(pem)
            .map_err(|e| TokenError::KeyMaterial(format!("public key: {e}")))?;

        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self { key, validation })
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        // Decode to a loose value first so that a bad signature is never
        // reported as a claim-shape problem.
        let data = decode::<serde_json::Value>(token, &self.key, &self.validation)?;
        serde_json::from_value(data.claims).map_err(|e| TokenError::Malformed(e.to_string()))
    }
}
