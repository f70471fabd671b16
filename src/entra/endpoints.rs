use crate::config::Config;
use crate::error::RelayError;

use oauth2::{
    AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, Scope, TokenUrl,
    basic::{BasicClient, BasicTokenResponse},
};

/// Stateless Entra ID token endpoint operations.
pub(super) struct EntraEndpoints;

impl EntraEndpoints {
    /// Exchange the configured client credentials for a Dataverse-scoped
    /// token. One form-encoded POST, no caching, no retry.
    pub(super) async fn request_client_credentials_token(
        cfg: &Config,
        http_client: &reqwest::Client,
    ) -> Result<BasicTokenResponse, RelayError> {
        let client = build_oauth2_client(cfg)?;
        let token_result = client
            .exchange_client_credentials()
            .add_scope(Scope::new(cfg.default_scope()))
            .request_async(http_client)
            .await?;
        Ok(token_result)
    }
}

/// Build the Entra OAuth2 client from process configuration.
///
/// `AuthType::RequestBody` keeps the client id and secret in the form body,
/// which is what the Microsoft identity platform token endpoint expects here.
fn build_oauth2_client(cfg: &Config) -> Result<EntraOauth2Client, RelayError> {
    let client = BasicClient::new(ClientId::new(cfg.client_id.clone()))
        .set_client_secret(ClientSecret::new(cfg.client_secret.clone()))
        .set_auth_type(AuthType::RequestBody)
        .set_token_uri(TokenUrl::from_url(cfg.token_url()?));
    Ok(client)
}

pub(super) type EntraOauth2Client =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
