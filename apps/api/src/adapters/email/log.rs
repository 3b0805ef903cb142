use async_trait::async_trait;
use tracing::info;

use crate::{app_error::AppResult, use_cases::user::CodeSender};

/// Development fallback used when no email API key is configured.
/// Only the destination is logged, never the code.
#[derive(Clone, Default)]
pub struct LogCodeSender;

#[async_trait]
impl CodeSender for LogCodeSender {
    async fn send(&self, destination: &str, _code: &str) -> AppResult<()> {
        info!(destination, "Email delivery disabled; code not sent");
        Ok(())
    }
}
