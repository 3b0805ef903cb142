use std::sync::Arc;

use codegate_types::bearer_token;
use codegate_types::rpc::auth_service_server::AuthService;
use codegate_types::rpc::{TokenRequest, TokenResponse};
use tonic::{Request, Response, Status};
use tracing::{debug, error, instrument};

use crate::{app_error::AppError, use_cases::token::TokenValidator};

/// `CheckToken` over RPC. Every rejection, including store failures, comes
/// back as `valid = false` with a readable message rather than a status code.
pub struct TokenCheckService {
    validator: Arc<TokenValidator>,
}

impl TokenCheckService {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }
}

#[tonic::async_trait]
impl AuthService for TokenCheckService {
    #[instrument(skip_all)]
    async fn check_token(
        &self,
        request: Request<TokenRequest>,
    ) -> Result<Response<TokenResponse>, Status> {
        let raw = request.into_inner().token;
        let token = bearer_token(&raw).unwrap_or_default();

        let response = match self.validator.authorize_access(token).await {
            Ok(claims) => {
                debug!(identity_id = claims.sub, role = %claims.role, "Token accepted");
                TokenResponse::accepted(&claims)
            }
            Err(AppError::DependencyUnavailable(reason)) => {
                error!(%reason, "Token check failed on a dependency");
                TokenResponse::rejected("Internal error, try again later")
            }
            Err(err) => {
                debug!(error = %err, "Token rejected");
                TokenResponse::rejected(err.to_string())
            }
        };

        Ok(Response::new(response))
    }
}
