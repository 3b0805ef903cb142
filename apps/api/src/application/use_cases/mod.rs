pub mod token;
pub mod user;

use std::future::Future;
use std::time::Duration;

use crate::app_error::{AppError, AppResult};

/// Bound a store call so a stalled backend surfaces as a dependency error
/// instead of hanging the caller.
pub(crate) async fn bounded<T>(
    limit: Duration,
    operation: &'static str,
    fut: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    tokio::time::timeout(limit, fut).await.unwrap_or_else(|_| {
        tracing::error!(operation, timeout_ms = limit.as_millis() as u64, "Store call timed out");
        Err(AppError::DependencyUnavailable(format!("{operation} timed out")))
    })
}
