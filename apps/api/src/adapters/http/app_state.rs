use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{token::TokenValidator, user::AuthUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_use_cases: Arc<AuthUseCases>,
    pub token_validator: Arc<TokenValidator>,
}
