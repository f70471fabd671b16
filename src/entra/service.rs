use std::sync::Arc;

use async_trait::async_trait;
use oauth2::{AccessToken, TokenResponse};
use tracing::debug;

use crate::config::Config;
use crate::entra::endpoints::EntraEndpoints;
use crate::error::RelayError;

/// Source of bearer tokens for outbound Dataverse calls.
///
/// The relay re-authenticates on every call. A caching implementation can
/// replace [`EntraTokenService`] behind this trait without touching any
/// handler.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn acquire(&self) -> Result<AccessToken, RelayError>;
}

/// Always-fresh token provider backed by the Entra client-credentials grant.
pub struct EntraTokenService {
    config: Arc<Config>,
    client: reqwest::Client,
}

impl EntraTokenService {
    pub fn new(config: Arc<Config>, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl TokenSource for EntraTokenService {
    async fn acquire(&self) -> Result<AccessToken, RelayError> {
        let token_result =
            EntraEndpoints::request_client_credentials_token(&self.config, &self.client).await?;

        let token = token_result.access_token();
        if token.secret().is_empty() {
            return Err(RelayError::Authentication(
                "identity provider returned an empty access token".to_string(),
            ));
        }

        // `AccessToken` redacts its Debug output; the secret itself stays out
        // of every log line.
        debug!(tenant = %self.config.tenant_id, "access token acquired");
        Ok(token.clone())
    }
}
