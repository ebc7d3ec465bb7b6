//! Auth configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Authentication configuration, as written in a search definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// API key given as its id and secret
    ApiKey {
        /// API key id
        id: String,
        /// API key secret
        key: String,
    },

    /// API key already base64 encoded, as shown by the service on creation
    EncodedApiKey {
        /// Encoded `id:key`
        value: String,
    },

    /// Custom headers
    CustomHeaders {
        /// Headers to add to each request
        headers: HashMap<String, String>,
    },
}

impl AuthConfig {
    /// Short name of the auth type, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::ApiKey { .. } => "api_key",
            AuthConfig::EncodedApiKey { .. } => "encoded_api_key",
            AuthConfig::CustomHeaders { .. } => "custom_headers",
        }
    }
}
