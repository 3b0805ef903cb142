use codegate_types::{AccessClaims, RefreshClaims, TokenClaims, TokenSigner};
use time::{Duration, OffsetDateTime};

use crate::app_error::AppResult;
use crate::domain::entities::identity::Identity;

/// Mints signed access and refresh tokens. Holds no state besides the
/// signing key and the configured lifetimes.
pub struct TokenFactory {
    signer: TokenSigner,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenFactory {
    pub fn new(signer: TokenSigner, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            signer,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    pub fn create_access_token(&self, identity: &Identity) -> AppResult<String> {
        let claims = self.access_claims(identity, unix_now());
        Ok(self.signer.sign(&TokenClaims::Access(claims))?)
    }

    /// Refresh tokens carry the subject only; role and email are reloaded on use.
    pub fn create_refresh_token(&self, identity_id: i64) -> AppResult<String> {
        let claims = self.refresh_claims(identity_id, unix_now());
        Ok(self.signer.sign(&TokenClaims::Refresh(claims))?)
    }

    fn access_claims(&self, identity: &Identity, now: i64) -> AccessClaims {
        AccessClaims {
            sub: identity.id,
            email: identity.email.clone(),
            role: identity.role,
            iat: now,
            exp: now + self.access_ttl.whole_seconds(),
        }
    }

    fn refresh_claims(&self, identity_id: i64, now: i64) -> RefreshClaims {
        RefreshClaims {
            sub: identity_id,
            exp: now + self.refresh_ttl.whole_seconds(),
        }
    }
}

pub(crate) fn unix_now() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp()
}
