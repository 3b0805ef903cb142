use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use time::Duration;

use crate::infra::error::InfraError;

#[derive(Clone)]
pub struct AppConfig {
    /// PEM RSA private key used to sign tokens.
    pub jwt_private_key_path: PathBuf,
    /// PEM RSA public key used by every verifier, including the RPC endpoint.
    pub jwt_public_key_path: PathBuf,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub verification_code_ttl_secs: u64,
    /// Validated guest requests allowed before the quota rejects further ones.
    pub guest_request_limit: i64,
    /// Upper bound for every identity-store and code-store call.
    pub store_timeout: std::time::Duration,
    pub database_url: String,
    pub redis_url: String,
    pub bind_addr: SocketAddr,
    pub rpc_bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    /// Whether the refresh cookie is marked `Secure`. Disable only for local http.
    pub cookie_secure: bool,
    /// Without a key, codes are not emailed (log-only development mode).
    pub resend_api_key: Option<SecretString>,
    pub email_from: String,
    pub delivery_max_attempts: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let jwt_private_key_path: PathBuf =
            get_env_default("JWT_PRIVATE_KEY_PATH", PathBuf::from("certs/jwt-private.pem"));
        let jwt_public_key_path: PathBuf =
            get_env_default("JWT_PUBLIC_KEY_PATH", PathBuf::from("certs/jwt-public.pem"));

        let access_token_ttl_minutes: i64 = get_env_default("ACCESS_TOKEN_TTL_MINUTES", 5);
        let refresh_token_ttl_days: i64 = get_env_default("REFRESH_TOKEN_TTL_DAYS", 10);
        let verification_code_ttl_secs: u64 = get_env_default("VERIFICATION_CODE_TTL_SECS", 300);
        let guest_request_limit: i64 = get_env_default("GUEST_REQUEST_LIMIT", 20);
        let store_timeout_ms: u64 = get_env_default("STORE_TIMEOUT_MS", 2_000);

        let database_url: String = get_env("DATABASE_URL");
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());

        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8000)));
        let rpc_bind_addr: SocketAddr =
            get_env_default("RPC_BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 50051)));

        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .map_err(|_| InfraError::ConfigInvalid {
                    var: "CORS_ORIGIN",
                    reason: "must be a valid header value",
                })?;

        let cookie_secure: bool = get_env_default("COOKIE_SECURE", true);

        let resend_api_key = std::env::var("RESEND_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.into()));
        let email_from: String =
            get_env_default("EMAIL_FROM", "codegate@localhost".to_string());
        let delivery_max_attempts: u32 = get_env_default("DELIVERY_MAX_ATTEMPTS", 3);

        Ok(Self {
            jwt_private_key_path,
            jwt_public_key_path,
            // Lifetimes below one unit would mint already-expired tokens.
            access_token_ttl: Duration::minutes(access_token_ttl_minutes.max(1)),
            refresh_token_ttl: Duration::days(refresh_token_ttl_days.max(1)),
            verification_code_ttl_secs: verification_code_ttl_secs.max(1),
            guest_request_limit,
            store_timeout: std::time::Duration::from_millis(store_timeout_ms.max(1)),
            database_url,
            redis_url,
            bind_addr,
            rpc_bind_addr,
            cors_origin,
            cookie_secure,
            resend_api_key,
            email_from,
            delivery_max_attempts: delivery_max_attempts.max(1),
        })
    }
}
