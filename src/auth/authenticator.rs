//! Authenticator implementation

use super::types::AuthConfig;
use base64::Engine as _;
use reqwest::RequestBuilder;

/// Applies the configured credentials to outgoing requests
#[derive(Clone, Default)]
pub struct Authenticator {
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,

            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),

            AuthConfig::Bearer { token } => req.bearer_auth(token),

            AuthConfig::ApiKey { id, key } => {
                req.header("Authorization", format!("ApiKey {}", encode_api_key(id, key)))
            }

            AuthConfig::EncodedApiKey { value } => {
                req.header("Authorization", format!("ApiKey {value}"))
            }

            AuthConfig::CustomHeaders { headers } => {
                let mut req = req;
                for (key, value) in headers {
                    req = req.header(key.as_str(), value.as_str());
                }
                req
            }
        }
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("kind", &self.config.kind())
            .finish()
    }
}

/// Encode an API key id and secret the way the `ApiKey` scheme expects
pub fn encode_api_key(id: &str, key: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(format!("{id}:{key}"))
}
