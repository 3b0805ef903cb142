use dotenvy::dotenv;
use tracing::{error, info};

use codegate_api::infra::{
    app::create_app,
    config::AppConfig,
    error::InfraError,
    rpc::{bind_rpc, serve_rpc},
    setup::{init_app_state, init_tracing},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr;
    let rpc_bind_addr = config.rpc_bind_addr;

    let (app_state, delivery_worker) = init_app_state(config).await?;

    // Both listeners are bound before anything is served.
    let rpc_listener = bind_rpc(rpc_bind_addr).await?;
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(InfraError::TcpBind)?;

    // Spawn code delivery worker (after tracing is initialized)
    tokio::spawn(delivery_worker.run());

    let rpc = serve_rpc(rpc_listener, app_state.token_validator.clone());
    let app = create_app(app_state);

    info!("Backend listening at {}", &listener.local_addr()?);

    // Either server stopping ends the process.
    tokio::select! {
        result = axum::serve(listener, app) => {
            result.map_err(InfraError::Server)?;
        }
        result = rpc => {
            if let Err(e) = &result {
                error!(error = %e, "RPC server stopped");
            }
            result?;
            anyhow::bail!("RPC server stopped");
        }
    }

    Ok(())
}
