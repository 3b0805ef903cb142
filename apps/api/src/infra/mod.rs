use crate::{adapters::persistence::PostgresPersistence, infra::db::init_db};

pub mod app;
pub mod code_store;
pub mod config;
pub mod db;
pub mod delivery_worker;
pub mod error;
pub mod http_client;
pub mod rpc;
pub mod setup;

pub async fn postgres_persistence(
    database_url: &str,
) -> Result<PostgresPersistence, error::InfraError> {
    let pool = init_db(database_url).await?;
    let persistence = PostgresPersistence::new(pool);
    Ok(persistence)
}
