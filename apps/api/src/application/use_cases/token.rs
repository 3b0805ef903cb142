use std::sync::Arc;
use std::time::Duration;

use codegate_types::{AccessClaims, RefreshClaims, Role, TokenClaims, TokenType, TokenVerifier};
use tracing::{debug, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        jwt::unix_now,
        use_cases::{bounded, user::IdentityRepo},
    },
};

/// Runs presented tokens through signature, type, expiry and guest-quota checks.
///
/// Shared by the HTTP guard and the RPC endpoint so both apply identical rules.
pub struct TokenValidator {
    verifier: TokenVerifier,
    identities: Arc<dyn IdentityRepo>,
    guest_request_limit: i64,
    store_timeout: Duration,
}

impl TokenValidator {
    pub fn new(
        verifier: TokenVerifier,
        identities: Arc<dyn IdentityRepo>,
        guest_request_limit: i64,
        store_timeout: Duration,
    ) -> Self {
        Self {
            verifier,
            identities,
            guest_request_limit,
            store_timeout,
        }
    }

    fn decode(&self, token: &str, expected: TokenType) -> AppResult<TokenClaims> {
        let claims = self.verifier.verify(token)?;

        if claims.token_type() != expected {
            debug!(expected = %expected, actual = %claims.token_type(), "Token type mismatch");
            return Err(AppError::WrongTokenType);
        }
        if claims.is_expired_at(unix_now()) {
            return Err(AppError::Expired);
        }
        Ok(claims)
    }

    /// Refresh tokens skip the guest quota check.
    pub fn validate_refresh(&self, token: &str) -> AppResult<RefreshClaims> {
        Ok(self.decode(token, TokenType::Refresh)?.into_refresh()?)
    }

    /// Full access-token pipeline. Read-only: the guest counter is not touched.
    #[instrument(skip_all)]
    pub async fn validate_access(&self, token: &str) -> AppResult<AccessClaims> {
        let claims = self.decode(token, TokenType::Access)?.into_access()?;

        if claims.role == Role::Guest {
            let used = bounded(
                self.store_timeout,
                "identity.get_requests_count",
                self.identities.get_requests_count(claims.sub),
            )
            .await?;

            if used >= self.guest_request_limit {
                debug!(identity_id = claims.sub, used, "Guest quota exhausted");
                return Err(AppError::QuotaExceeded);
            }
        }

        Ok(claims)
    }

    /// Validate an access token and, for guests, count the request against the quota.
    #[instrument(skip_all)]
    pub async fn authorize_access(&self, token: &str) -> AppResult<AccessClaims> {
        let claims = self.validate_access(token).await?;

        // Read and increment are separate calls: concurrent requests at the
        // limit can each pass before any increment lands.
        if claims.role == Role::Guest {
            bounded(
                self.store_timeout,
                "identity.increment_requests_count",
                self.identities.increment_requests_count(claims.sub),
            )
            .await?;
        }

        Ok(claims)
    }
}
