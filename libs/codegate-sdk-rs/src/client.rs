//! CheckToken client implementation.

use std::collections::HashMap;

use codegate_types::AccessClaims;
use codegate_types::rpc::auth_service_client::AuthServiceClient;
use codegate_types::rpc::{TokenRequest, TokenResponse, claims_from_wire};
use tonic::transport::{Channel, Endpoint};

use crate::error::SdkError;
use crate::extract::{Headers, extract_token};

/// Outcome of a `CheckToken` call, as sent by the auth service.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCheck {
    pub valid: bool,
    /// Claim values, all encoded as strings
    pub claims: HashMap<String, String>,
    /// Human readable rejection reason; not a stable identifier
    pub error: String,
}

impl TokenCheck {
    /// Decode the claim map into typed access claims.
    ///
    /// Fails with `Rejected` when the service did not accept the token.
    pub fn access_claims(&self) -> Result<AccessClaims, SdkError> {
        if !self.valid {
            return Err(SdkError::Rejected(self.error.clone()));
        }
        Ok(claims_from_wire(&self.claims)?)
    }
}

impl From<TokenResponse> for TokenCheck {
    fn from(response: TokenResponse) -> Self {
        Self {
            valid: response.valid,
            claims: response.claims,
            error: response.error,
        }
    }
}

/// Client for the codegate token validation endpoint.
///
/// Cloning is cheap; clones share the underlying connection.
#[derive(Debug, Clone)]
pub struct CodegateClient {
    inner: AuthServiceClient<Channel>,
}

impl CodegateClient {
    /// Connect to the auth service, e.g. `http://auth:50051`.
    pub async fn connect(endpoint: impl Into<String>) -> Result<Self, SdkError> {
        let channel = parse_endpoint(endpoint.into())?.connect().await?;
        Ok(Self {
            inner: AuthServiceClient::new(channel),
        })
    }

    /// Build a client that connects on first use.
    pub fn connect_lazy(endpoint: impl Into<String>) -> Result<Self, SdkError> {
        let channel = parse_endpoint(endpoint.into())?.connect_lazy();
        Ok(Self {
            inner: AuthServiceClient::new(channel),
        })
    }

    /// Ask the auth service whether `token` is a usable access token.
    ///
    /// A rejected token is not an error here: inspect `TokenCheck::valid`.
    /// For guests, each accepted check counts against their request quota.
    pub async fn check_token(&self, token: &str) -> Result<TokenCheck, SdkError> {
        let mut client = self.inner.clone();
        let response = client
            .check_token(TokenRequest {
                token: token.to_string(),
            })
            .await?
            .into_inner();

        if !response.valid {
            tracing::debug!(error = %response.error, "Token rejected by auth service");
        }

        Ok(response.into())
    }

    /// Authenticate a request by extracting and checking its access token.
    pub async fn authenticate<H: Headers>(&self, headers: &H) -> Result<AccessClaims, SdkError> {
        let token = extract_token(headers).ok_or(SdkError::MissingToken)?;
        self.check_token(token).await?.access_claims()
    }
}

fn parse_endpoint(endpoint: String) -> Result<Endpoint, SdkError> {
    Endpoint::from_shared(endpoint).map_err(|e| SdkError::InvalidEndpoint(e.to_string()))
}
