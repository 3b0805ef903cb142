//! Builders wiring the auth use cases and a minimal `AppState` to in-memory mocks.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use codegate_types::test_keys;
use time::Duration;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        jwt::TokenFactory,
        use_cases::{
            token::TokenValidator,
            user::{AuthUseCases, CodeDispatch, CodeStore, IdentityRepo},
        },
    },
    infra::config::AppConfig,
    test_utils::{CapturingCodeSender, InMemoryCodeStore, InMemoryIdentityRepo},
};

const GUEST_REQUEST_LIMIT: i64 = 20;
const CODE_TTL_SECS: u64 = 300;

// ============================================================================
// TestUseCasesBuilder
// ============================================================================

pub struct TestUseCasesBuilder {
    identities: Arc<dyn IdentityRepo>,
    codes: Arc<dyn CodeStore>,
    dispatch: Arc<dyn CodeDispatch>,
    tokens: Arc<TokenFactory>,
    store_timeout: std::time::Duration,
}

impl TestUseCasesBuilder {
    pub fn new() -> Self {
        Self {
            identities: Arc::new(InMemoryIdentityRepo::new()),
            codes: Arc::new(InMemoryCodeStore::new()),
            dispatch: Arc::new(CapturingCodeSender::new()),
            tokens: Arc::new(TokenFactory::new(
                test_keys::signer(),
                Duration::minutes(5),
                Duration::days(10),
            )),
            store_timeout: std::time::Duration::from_secs(1),
        }
    }

    pub fn with_identities(mut self, identities: Arc<dyn IdentityRepo>) -> Self {
        self.identities = identities;
        self
    }

    pub fn with_code_store(mut self, codes: Arc<dyn CodeStore>) -> Self {
        self.codes = codes;
        self
    }

    pub fn with_dispatch(mut self, dispatch: Arc<dyn CodeDispatch>) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn with_store_timeout(mut self, store_timeout: std::time::Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// The factory the built use cases will sign with.
    pub fn tokens(&self) -> &TokenFactory {
        &self.tokens
    }

    pub fn build(self) -> AuthUseCases {
        self.build_parts().0
    }

    fn build_parts(self) -> (AuthUseCases, Arc<TokenValidator>) {
        let validator = Arc::new(TokenValidator::new(
            test_keys::verifier(),
            self.identities.clone(),
            GUEST_REQUEST_LIMIT,
            self.store_timeout,
        ));
        let use_cases = AuthUseCases::new(
            self.identities,
            self.codes,
            self.dispatch,
            self.tokens,
            validator.clone(),
            CODE_TTL_SECS,
            self.store_timeout,
        );
        (use_cases, validator)
    }
}

impl Default for TestUseCasesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TestAppStateBuilder
// ============================================================================

/// Builds an `AppState` for router tests. The `build_with_*` variants hand
/// back the mocks so tests can seed and inspect them.
pub struct TestAppStateBuilder {
    identities: Arc<InMemoryIdentityRepo>,
    codes: Arc<InMemoryCodeStore>,
    outbox: Arc<CapturingCodeSender>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            identities: Arc::new(InMemoryIdentityRepo::new()),
            codes: Arc::new(InMemoryCodeStore::new()),
            outbox: Arc::new(CapturingCodeSender::new()),
        }
    }

    pub fn build_with_mocks(self) -> (AppState, Arc<InMemoryCodeStore>, Arc<CapturingCodeSender>) {
        let codes = self.codes.clone();
        let outbox = self.outbox.clone();
        (self.build(), codes, outbox)
    }

    pub fn build_with_identities(self) -> (AppState, Arc<InMemoryIdentityRepo>) {
        let identities = self.identities.clone();
        (self.build(), identities)
    }

    pub fn build(self) -> AppState {
        let (auth_use_cases, token_validator) = TestUseCasesBuilder::new()
            .with_identities(self.identities)
            .with_code_store(self.codes)
            .with_dispatch(self.outbox)
            .build_parts();

        let config = Arc::new(AppConfig {
            jwt_private_key_path: PathBuf::from("unused"),
            jwt_public_key_path: PathBuf::from("unused"),
            access_token_ttl: Duration::minutes(5),
            refresh_token_ttl: Duration::days(10),
            verification_code_ttl_secs: CODE_TTL_SECS,
            guest_request_limit: GUEST_REQUEST_LIMIT,
            store_timeout: std::time::Duration::from_secs(1),
            database_url: String::new(),
            redis_url: String::new(),
            bind_addr: "127.0.0.1:8000".parse::<SocketAddr>().unwrap(),
            rpc_bind_addr: "127.0.0.1:50051".parse::<SocketAddr>().unwrap(),
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            cookie_secure: false,
            resend_api_key: None,
            email_from: "codegate@test".to_string(),
            delivery_max_attempts: 1,
        });

        AppState {
            config,
            auth_use_cases: Arc::new(auth_use_cases),
            token_validator,
        }
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
