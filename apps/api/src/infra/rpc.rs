use std::net::SocketAddr;
use std::sync::Arc;

use codegate_types::rpc::auth_service_server::AuthServiceServer;
use tokio::net::TcpListener;
use tonic::transport::{Server, server::TcpIncoming};
use tracing::info;

use crate::{
    adapters::rpc::token_check::TokenCheckService, infra::error::InfraError,
    use_cases::token::TokenValidator,
};

/// Bind the RPC port up front so a taken address fails startup.
pub async fn bind_rpc(addr: SocketAddr) -> Result<TcpListener, InfraError> {
    TcpListener::bind(addr).await.map_err(InfraError::TcpBind)
}

/// Serve `auth.AuthService` on an already bound listener. Plaintext only; put a
/// TLS-terminating proxy in front of it outside a trusted network.
pub async fn serve_rpc(
    listener: TcpListener,
    validator: Arc<TokenValidator>,
) -> Result<(), InfraError> {
    let local_addr = listener.local_addr().map_err(InfraError::TcpBind)?;
    let incoming = TcpIncoming::from_listener(listener, true, None)
        .map_err(|e| InfraError::RpcListener(e.to_string()))?;

    info!("RPC server listening at {}", local_addr);

    Server::builder()
        .add_service(AuthServiceServer::new(TokenCheckService::new(validator)))
        .serve_with_incoming(incoming)
        .await
        .map_err(InfraError::Rpc)
}
