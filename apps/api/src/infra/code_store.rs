use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};

use crate::{
    app_error::{AppError, AppResult},
    infra::error::InfraError,
    use_cases::user::CodeStore,
};

/// One-time codes in Redis, one key per email with a native TTL.
#[derive(Clone)]
pub struct RedisCodeStore {
    manager: ConnectionManager,
}

impl RedisCodeStore {
    pub async fn new(redis_url: &str) -> Result<Self, InfraError> {
        let client = redis::Client::open(redis_url).map_err(InfraError::RedisConnection)?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(InfraError::RedisConnection)?;

        Ok(Self { manager })
    }

    fn key(email: &str) -> String {
        format!("login_code:{email}")
    }
}

fn store_error(operation: &'static str, err: redis::RedisError) -> AppError {
    tracing::error!(operation, error = %err, "Code store error");
    AppError::DependencyUnavailable(format!("Code store {operation} failed"))
}

#[async_trait]
impl CodeStore for RedisCodeStore {
    async fn set(&self, email: &str, code: &str, ttl_secs: u64) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let _: () = conn
            .set_ex(Self::key(email), code, ttl_secs)
            .await
            .map_err(|e| store_error("set", e))?;
        Ok(())
    }

    async fn get(&self, email: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        conn.get(Self::key(email))
            .await
            .map_err(|e| store_error("get", e))
    }

    async fn delete(&self, email: &str) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let _: () = conn
            .del(Self::key(email))
            .await
            .map_err(|e| store_error("delete", e))?;
        Ok(())
    }
}
