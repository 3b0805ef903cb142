use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use codegate_types::Role;
use rand::Rng;
use tracing::{info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        jwt::TokenFactory,
        use_cases::{bounded, token::TokenValidator},
        validators::{constant_time_compare, is_valid_code, is_valid_email},
    },
    domain::entities::identity::Identity,
};

#[async_trait]
pub trait IdentityRepo: Send + Sync {
    /// Create an identity. For an email that already has one, the existing
    /// identity is returned instead.
    async fn create_identity(&self, email: Option<&str>, role: Role) -> AppResult<Identity>;
    async fn get_identity(&self, id: i64) -> AppResult<Option<Identity>>;
    async fn get_requests_count(&self, id: i64) -> AppResult<i64>;
    /// Atomic increment at the store level.
    async fn increment_requests_count(&self, id: i64) -> AppResult<()>;
}

/// Short-lived one-time codes keyed by email.
#[async_trait]
pub trait CodeStore: Send + Sync {
    async fn set(&self, email: &str, code: &str, ttl_secs: u64) -> AppResult<()>;
    async fn get(&self, email: &str) -> AppResult<Option<String>>;
    async fn delete(&self, email: &str) -> AppResult<()>;
}

/// Out-of-band delivery of a code to its owner.
#[async_trait]
pub trait CodeSender: Send + Sync {
    async fn send(&self, destination: &str, code: &str) -> AppResult<()>;
}

/// Hands a code over for background delivery. Returns once the job is
/// queued; delivery failures never reach the caller.
pub trait CodeDispatch: Send + Sync {
    fn dispatch(&self, destination: String, code: String) -> AppResult<()>;
}

#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

pub struct AuthUseCases {
    identities: Arc<dyn IdentityRepo>,
    codes: Arc<dyn CodeStore>,
    dispatch: Arc<dyn CodeDispatch>,
    tokens: Arc<TokenFactory>,
    validator: Arc<TokenValidator>,
    code_ttl_secs: u64,
    store_timeout: Duration,
}

impl AuthUseCases {
    pub fn new(
        identities: Arc<dyn IdentityRepo>,
        codes: Arc<dyn CodeStore>,
        dispatch: Arc<dyn CodeDispatch>,
        tokens: Arc<TokenFactory>,
        validator: Arc<TokenValidator>,
        code_ttl_secs: u64,
        store_timeout: Duration,
    ) -> Self {
        Self {
            identities,
            codes,
            dispatch,
            tokens,
            validator,
            code_ttl_secs,
            store_timeout,
        }
    }

    /// Issue a fresh code for `email`, replacing any earlier one, and queue it for delivery.
    #[instrument(skip(self))]
    pub async fn request_code(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email)?;
        let code = generate_code();

        bounded(
            self.store_timeout,
            "code_store.set",
            self.codes.set(&email, &code, self.code_ttl_secs),
        )
        .await?;

        self.dispatch.dispatch(email, code)?;
        info!("Verification code issued");
        Ok(())
    }

    /// Redeem a code and mint a token pair for the email's identity.
    ///
    /// A wrong code leaves the stored one in place; a matching one is consumed.
    #[instrument(skip(self, code))]
    pub async fn verify_code(&self, email: &str, code: &str) -> AppResult<TokenPair> {
        let email = normalize_email(email)?;
        if !is_valid_code(code) {
            return Err(AppError::InvalidInput("Code must be 6 digits".into()));
        }

        let stored = bounded(self.store_timeout, "code_store.get", self.codes.get(&email))
            .await?
            .ok_or(AppError::CodeNotFound)?;

        if !constant_time_compare(&stored, code) {
            return Err(AppError::WrongCode);
        }

        // Not atomic with the read above: two concurrent submissions of the
        // same code may both be accepted.
        bounded(
            self.store_timeout,
            "code_store.delete",
            self.codes.delete(&email),
        )
        .await?;

        let identity = bounded(
            self.store_timeout,
            "identity.create",
            self.identities.create_identity(Some(&email), Role::User),
        )
        .await?;

        info!(identity_id = identity.id, "Code verified");

        Ok(TokenPair {
            access_token: self.tokens.create_access_token(&identity)?,
            refresh_token: self.tokens.create_refresh_token(identity.id)?,
        })
    }

    /// Create a guest identity and return its access token. Guests get no refresh token.
    #[instrument(skip(self))]
    pub async fn guest_login(&self) -> AppResult<String> {
        let identity = bounded(
            self.store_timeout,
            "identity.create",
            self.identities.create_identity(None, Role::Guest),
        )
        .await?;

        info!(identity_id = identity.id, "Guest identity created");
        self.tokens.create_access_token(&identity)
    }

    /// Exchange a refresh token for a new access token built from the
    /// identity's current stored state.
    #[instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<String> {
        let claims = self.validator.validate_refresh(refresh_token)?;

        let identity = bounded(
            self.store_timeout,
            "identity.get",
            self.identities.get_identity(claims.sub),
        )
        .await?
        .ok_or(AppError::IdentityNotFound)?;

        self.tokens.create_access_token(&identity)
    }
}

fn normalize_email(email: &str) -> AppResult<String> {
    if !is_valid_email(email) {
        return Err(AppError::InvalidInput("Invalid email".into()));
    }
    Ok(email.trim().to_string())
}

fn generate_code() -> String {
    rand::rngs::OsRng.gen_range(100_000..=999_999).to_string()
}
