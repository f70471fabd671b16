use std::fmt;

use figment::{Figment, providers::Env};
use serde::Deserialize;
use url::Url;

/// Process configuration, read once at startup and injected everywhere else.
///
/// Handlers and the token provider receive this by `Arc`; nothing reads the
/// environment after `from_env` returns.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub dataverse_url: Url,
    #[serde(default = "default_authority")]
    pub authority: Url,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_loglevel")]
    pub loglevel: String,
}

impl Config {
    /// Extract configuration from the process environment
    /// (`TENANT_ID`, `CLIENT_ID`, `CLIENT_SECRET`, `DATAVERSE_URL`,
    /// optionally `AUTHORITY`, `PORT`, `LOGLEVEL`).
    ///
    /// Missing required variables fail here instead of producing doomed
    /// upstream requests later.
    pub fn from_env() -> Result<Self, figment::Error> {
        Figment::new().merge(Env::prefixed("")).extract()
    }

    /// Token endpoint for this tenant under the configured authority.
    pub fn token_url(&self) -> Result<Url, url::ParseError> {
        self.authority
            .join(&format!("{}/oauth2/v2.0/token", self.tenant_id))
    }

    /// Client-credentials scope covering the whole Dataverse environment.
    pub fn default_scope(&self) -> String {
        format!(
            "{}/.default",
            self.dataverse_url.as_str().trim_end_matches('/')
        )
    }
}

// The client secret must never reach a log line.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("dataverse_url", &self.dataverse_url.as_str())
            .field("authority", &self.authority.as_str())
            .field("port", &self.port)
            .field("loglevel", &self.loglevel)
            .finish()
    }
}

fn default_authority() -> Url {
    Url::parse("https://login.microsoftonline.com/").expect("default authority URL is valid")
}

fn default_port() -> u16 {
    3001
}

fn default_loglevel() -> String {
    "info".to_string()
}
