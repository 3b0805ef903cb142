//! `auth.AuthService/CheckToken` wire contract.
//!
//! Messages mirror `proto/auth_service.proto`. The claim map carries every
//! value as a string; [`claims_from_wire`] turns it back into typed claims.

use std::collections::HashMap;

use crate::{AccessClaims, Role, TokenError, TokenType};

#[derive(Clone, PartialEq, prost::Message)]
pub struct TokenRequest {
    #[prost(string, tag = "1")]
    pub token: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TokenResponse {
    #[prost(bool, tag = "1")]
    pub valid: bool,
    #[prost(map = "string, string", tag = "2")]
    pub claims: HashMap<String, String>,
    #[prost(string, tag = "3")]
    pub error: String,
}

impl TokenResponse {
    pub fn accepted(claims: &AccessClaims) -> Self {
        Self {
            valid: true,
            claims: claims_to_wire(claims),
            error: String::new(),
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            claims: HashMap::new(),
            error: error.into(),
        }
    }
}

include!(concat!(env!("OUT_DIR"), "/auth.AuthService.rs"));

/// Flatten access claims into the string map sent over the wire.
///
/// A guest's absent email is left out of the map.
pub fn claims_to_wire(claims: &AccessClaims) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(6);
    map.insert("sub".to_string(), claims.sub.to_string());
    map.insert("role".to_string(), claims.role.to_string());
    map.insert("iat".to_string(), claims.iat.to_string());
    map.insert("exp".to_string(), claims.exp.to_string());
    map.insert("token_type".to_string(), TokenType::Access.to_string());
    if let Some(email) = &claims.email {
        map.insert("email".to_string(), email.clone());
    }
    map
}

pub fn claims_from_wire(map: &HashMap<String, String>) -> Result<AccessClaims, TokenError> {
    let field = |key: &str| {
        map.get(key)
            .map(String::as_str)
            .ok_or_else(|| TokenError::Malformed(format!("missing claim `{key}`")))
    };
    let number = |key: &str| -> Result<i64, TokenError> {
        field(key)?
            .parse()
            .map_err(|_| TokenError::Malformed(format!("claim `{key}` is not numeric")))
    };

    let token_type = field("token_type")?;
    if token_type != TokenType::Access.as_str() {
        return Err(TokenError::Malformed(format!(
            "unexpected token_type `{token_type}`"
        )));
    }

    Ok(AccessClaims {
        sub: number("sub")?,
        email: map.get("email").cloned(),
        role: field("role")?.parse::<Role>()?,
        iat: number("iat")?,
        exp: number("exp")?,
    })
}
