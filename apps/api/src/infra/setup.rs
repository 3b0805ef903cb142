use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use codegate_types::{TokenSigner, TokenVerifier};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        email::{log::LogCodeSender, resend::ResendCodeSender},
        http::app_state::AppState,
    },
    application::jwt::TokenFactory,
    infra::{
        code_store::RedisCodeStore,
        config::AppConfig,
        delivery_worker::{CodeDispatcher, DeliveryWorker, QUEUE_CAPACITY},
        error::InfraError,
        postgres_persistence,
    },
    use_cases::{
        token::TokenValidator,
        user::{AuthUseCases, CodeSender, IdentityRepo},
    },
};

/// Read both PEM files. Either one missing or unparsable aborts startup.
pub fn load_signing_keys(config: &AppConfig) -> Result<(TokenSigner, TokenVerifier), InfraError> {
    let private_pem = read_key(&config.jwt_private_key_path)?;
    let public_pem = read_key(&config.jwt_public_key_path)?;

    let signer = TokenSigner::from_rsa_pem(&private_pem).map_err(InfraError::KeyMaterial)?;
    let verifier = TokenVerifier::from_rsa_pem(&public_pem).map_err(InfraError::KeyMaterial)?;
    Ok((signer, verifier))
}

fn read_key(path: &Path) -> Result<Vec<u8>, InfraError> {
    std::fs::read(path).map_err(|source| InfraError::KeyFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the application state together with the delivery worker that drains
/// its code queue. The caller is responsible for spawning the worker.
pub async fn init_app_state(config: AppConfig) -> Result<(AppState, DeliveryWorker), InfraError> {
    let (signer, verifier) = load_signing_keys(&config)?;

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);
    let identity_repo_arc = postgres_arc.clone() as Arc<dyn IdentityRepo>;

    let code_store = Arc::new(RedisCodeStore::new(&config.redis_url).await?);

    let sender: Arc<dyn CodeSender> = match &config.resend_api_key {
        Some(api_key) => Arc::new(
            ResendCodeSender::new(api_key.clone(), config.email_from.clone())
                .map_err(InfraError::HttpClient)?,
        ),
        None => {
            warn!("RESEND_API_KEY is not set, verification codes will only be logged");
            Arc::new(LogCodeSender)
        }
    };

    let (dispatcher, rx) = CodeDispatcher::channel(QUEUE_CAPACITY);
    let worker = DeliveryWorker::new(rx, sender, config.delivery_max_attempts);

    let tokens = Arc::new(TokenFactory::new(
        signer,
        config.access_token_ttl,
        config.refresh_token_ttl,
    ));
    let token_validator = Arc::new(TokenValidator::new(
        verifier,
        identity_repo_arc.clone(),
        config.guest_request_limit,
        config.store_timeout,
    ));

    let auth_use_cases = AuthUseCases::new(
        identity_repo_arc,
        code_store,
        Arc::new(dispatcher),
        tokens,
        token_validator.clone(),
        config.verification_code_ttl_secs,
        config.store_timeout,
    );

    info!(
        guest_request_limit = config.guest_request_limit,
        "Application state initialized"
    );

    Ok((
        AppState {
            config: Arc::new(config),
            auth_use_cases: Arc::new(auth_use_cases),
            token_validator,
        },
        worker,
    ))
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "codegate_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don't show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs); skipped when app.log cannot be created
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
