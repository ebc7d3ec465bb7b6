//! Elasticsearch / OpenSearch REST transport

use super::types::SearchTransport;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::OptionStringExt;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

const INDEX_FIELD: &str = "index";
const BODY_FIELD: &str = "body";

const SEARCH_PATH: &str = "_search";
const SCROLL_PATH: &str = "/_search/scroll";

/// [`SearchTransport`] over the Elasticsearch REST API.
///
/// `search` posts to `/{index}/_search`, `scroll` posts to
/// `/_search/scroll` and `clear_scroll` sends a DELETE to the same path.
/// Retries, backoff, rate limiting and authentication come from the
/// wrapped [`HttpClient`]. Scroll continuations are never retried.
pub struct EsTransport {
    client: HttpClient,
    default_index: Option<String>,
}

impl EsTransport {
    /// Create a transport on top of a configured HTTP client.
    ///
    /// The client's base URL should point at the cluster, e.g.
    /// `http://localhost:9200`.
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            default_index: None,
        }
    }

    /// Index searched when a request does not name one
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.default_index = Some(index.into()).none_if_empty();
        self
    }

    /// Default index, if any
    pub fn default_index(&self) -> Option<&str> {
        self.default_index.as_deref()
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Path of the search endpoint for `index`
    fn search_path(&self, index: Option<String>) -> String {
        match index.or_else(|| self.default_index.clone()) {
            Some(index) => format!("/{}/{SEARCH_PATH}", index.trim_matches('/')),
            None => format!("/{SEARCH_PATH}"),
        }
    }

    async fn send(&self, method: Method, path: &str, config: RequestConfig) -> Result<Value> {
        debug!("{} {} ({} query params)", method, path, config.query.len());
        self.client.request_json(method, path, config).await
    }
}

#[async_trait]
impl SearchTransport for EsTransport {
    async fn search(&self, request: Value) -> Result<Value> {
        let (index, config) = split_request(request)?;
        let path = self.search_path(index);
        self.send(Method::POST, &path, config).await
    }

    /// Sent exactly once. The server advances the context even when the
    /// reply is lost, so a resend would skip a page.
    async fn scroll(&self, request: Value) -> Result<Value> {
        let (_, config) = split_request(request)?;
        self.send(Method::POST, SCROLL_PATH, config.retries(0)).await
    }

    async fn clear_scroll(&self, request: Value) -> Result<Value> {
        let (_, config) = split_request(request)?;
        self.send(Method::DELETE, SCROLL_PATH, config).await
    }
}

impl std::fmt::Debug for EsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsTransport")
            .field("client", &self.client)
            .field("default_index", &self.default_index)
            .finish()
    }
}

/// Split a client-style request value into target index and HTTP request.
///
/// `index` names the target, `body` becomes the JSON body and all other
/// fields are sent as query parameters.
pub(crate) fn split_request(request: Value) -> Result<(Option<String>, RequestConfig)> {
    let fields = match request {
        Value::Object(fields) => fields,
        Value::Null => serde_json::Map::new(),
        _ => return Err(Error::invalid_query("request must be a JSON object")),
    };

    let mut index = None;
    let mut config = RequestConfig::new();
    for (key, value) in fields {
        match key.as_str() {
            INDEX_FIELD => index = param_value(&value).none_if_empty(),
            BODY_FIELD => config = config.json(value),
            _ => {
                if let Some(param) = param_value(&value) {
                    config = config.query(key, param);
                }
            }
        }
    }

    Ok((index, config))
}

/// Render a request field as a query parameter value
fn param_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(param_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
