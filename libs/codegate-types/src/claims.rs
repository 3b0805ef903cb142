use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TokenError;

/// Role carried by an identity and embedded in its access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "guest" => Ok(Role::Guest),
            other => Err(TokenError::Malformed(format!("unknown role `{other}`"))),
        }
    }
}

/// Value of the `token_type` discriminator claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims of a short-lived access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Identity id, encoded as a decimal string on the wire.
    #[serde(with = "subject")]
    pub sub: i64,

    /// Email of the identity; `None` for guests.
    pub email: Option<String>,

    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Claims of a refresh token.
///
/// Carries no role or email: whoever redeems it must reload the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    #[serde(with = "subject")]
    pub sub: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Every claim set this service signs, discriminated by `token_type`.
///
/// Decoding fails for claim sets that lack a field required by their declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "token_type", rename_all = "lowercase")]
pub enum TokenClaims {
    Access(AccessClaims),
    Refresh(RefreshClaims),
}

impl TokenClaims {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenClaims::Access(_) => TokenType::Access,
            TokenClaims::Refresh(_) => TokenType::Refresh,
        }
    }

    pub fn subject(&self) -> i64 {
        match self {
            TokenClaims::Access(c) => c.sub,
            TokenClaims::Refresh(c) => c.sub,
        }
    }

    pub fn expires_at(&self) -> i64 {
        match self {
            TokenClaims::Access(c) => c.exp,
            TokenClaims::Refresh(c) => c.exp,
        }
    }

    /// A token is expired once the current time has moved past `exp`.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now > self.expires_at()
    }

    pub fn into_access(self) -> Result<AccessClaims, TokenError> {
        match self {
            TokenClaims::Access(c) => Ok(c),
            other => Err(TokenError::WrongType {
                expected: TokenType::Access,
                actual: other.token_type(),
            }),
        }
    }

    pub fn into_refresh(self) -> Result<RefreshClaims, TokenError> {
        match self {
            TokenClaims::Refresh(c) => Ok(c),
            other => Err(TokenError::WrongType {
                expected: TokenType::Refresh,
                actual: other.token_type(),
            }),
        }
    }
}

impl From<AccessClaims> for TokenClaims {
    fn from(claims: AccessClaims) -> Self {
        TokenClaims::Access(claims)
    }
}

impl From<RefreshClaims> for TokenClaims {
    fn from(claims: RefreshClaims) -> Self {
        TokenClaims::Refresh(claims)
    }
}

mod subject {
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(id: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| de::Error::custom(format!("subject `{raw}` is not a numeric id")))
    }
}
