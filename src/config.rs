//! Search definition files
//!
//! A search definition names the cluster to talk to, how to authenticate,
//! how the HTTP client behaves, which pagination strategy to use and the
//! base query to page through. Definitions are written in YAML (JSON is
//! accepted too, being a subset).
//!
//! ```yaml
//! endpoint: http://localhost:9200
//! index: products
//! auth:
//!   type: basic
//!   username: elastic
//!   password: changeme
//! pagination:
//!   strategy: search_after
//!   size: 500
//! query:
//!   body:
//!     query:
//!       match_all: {}
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::pagination::{CursorFactory, FromCursor, ScrollCursor, SearchAfterCursor};
use crate::transport::{EsTransport, SearchTransport};
use crate::types::{BackoffType, JsonValue, OptionStringExt, Strategy};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Top-Level Definition
// ============================================================================

/// Complete search definition loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDefinition {
    /// Base URL of the cluster, e.g. `http://localhost:9200`
    pub endpoint: String,

    /// Index (or comma separated indices) searched when the query names none
    #[serde(default)]
    pub index: Option<String>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Pagination strategy and page size
    #[serde(default)]
    pub pagination: PaginationDefinition,

    /// Base query, in client request form (`body`, `index`, query params)
    #[serde(default = "default_query")]
    pub query: JsonValue,
}

fn default_query() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff type
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Client side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            rate_limit: None,
            headers: HashMap::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60000
}

// ============================================================================
// Pagination Config
// ============================================================================

/// Which cursor to build and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationDefinition {
    /// Pagination strategy
    #[serde(default)]
    pub strategy: Strategy,

    /// Hits per page
    #[serde(default = "default_page_size")]
    pub size: u32,

    /// Scroll context keep-alive, only used by the scroll strategy
    #[serde(default = "default_scroll")]
    pub scroll: String,

    /// Sort clause, only used by the search-after strategy
    #[serde(default)]
    pub sort: Option<JsonValue>,
}

impl Default for PaginationDefinition {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            size: default_page_size(),
            scroll: default_scroll(),
            sort: None,
        }
    }
}

fn default_page_size() -> u32 {
    100
}

fn default_scroll() -> String {
    "5m".to_string()
}

impl PaginationDefinition {
    /// Build the cursor for this strategy on top of `transport`
    pub fn build_cursor(
        &self,
        transport: Arc<dyn SearchTransport>,
    ) -> Result<Box<dyn CursorFactory>> {
        let cursor: Box<dyn CursorFactory> = match self.strategy {
            Strategy::From => Box::new(FromCursor::new(transport, self.size)?),
            Strategy::Scroll => Box::new(ScrollCursor::new(
                transport,
                self.size,
                self.scroll.as_str(),
            )?),
            Strategy::SearchAfter => {
                let cursor = SearchAfterCursor::new(transport, self.size)?;
                match &self.sort {
                    Some(sort) => Box::new(cursor.with_sort(sort.clone())),
                    None => Box::new(cursor),
                }
            }
        };
        Ok(cursor)
    }
}

// ============================================================================
// Loading and Validation
// ============================================================================

/// Load a search definition from a YAML file
pub fn load_definition(path: impl AsRef<Path>) -> Result<SearchDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })?;
    load_definition_from_str(&content)
}

/// Load a search definition from a YAML string
pub fn load_definition_from_str(yaml: &str) -> Result<SearchDefinition> {
    let def: SearchDefinition = serde_yaml::from_str(yaml)?;
    def.validate()?;
    Ok(def)
}

impl SearchDefinition {
    /// Check the definition for values that would fail later
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::missing_field("endpoint"));
        }

        let url = url::Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.pagination.size == 0 {
            return Err(Error::InvalidPageSize { size: 0 });
        }

        if self.pagination.strategy == Strategy::Scroll && self.pagination.scroll.trim().is_empty()
        {
            return Err(Error::invalid_value(
                "pagination.scroll",
                "keep-alive must not be empty",
            ));
        }

        if let Some(sort) = &self.pagination.sort {
            if !(sort.is_array() || sort.is_object() || sort.is_string()) {
                return Err(Error::invalid_value(
                    "pagination.sort",
                    "must be a list, an object or a field name",
                ));
            }
        }

        if !(self.query.is_object() || self.query.is_null()) {
            return Err(Error::invalid_query("query must be a mapping"));
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than zero",
            ));
        }

        Ok(())
    }

    /// HTTP client settings for this definition
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.endpoint.as_str())
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.backoff,
                Duration::from_millis(self.http.initial_backoff_ms),
                Duration::from_millis(self.http.max_backoff_ms),
            );

        if let Some(rate_limit) = &self.http.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        builder.build()
    }

    /// Build the REST transport described by this definition
    pub fn build_transport(&self) -> Result<EsTransport> {
        let client = HttpClient::with_auth(self.http_client_config(), self.auth.clone())?;
        let transport = EsTransport::new(client);
        Ok(match self.index.clone().none_if_empty() {
            Some(index) => transport.with_index(index),
            None => transport,
        })
    }

    /// Build transport and cursor in one go
    pub fn build_cursor(&self) -> Result<Box<dyn CursorFactory>> {
        let transport: Arc<dyn SearchTransport> = Arc::new(self.build_transport()?);
        self.pagination.build_cursor(transport)
    }
}
