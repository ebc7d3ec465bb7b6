// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # es-pagination
//!
//! Pagination cursors for Elasticsearch / OpenSearch style search services.
//!
//! Hand a cursor a base query and it returns a lazy stream over every hit
//! the query matches, fetching one page at a time.
//!
//! ## Strategies
//!
//! - **Offset** ([`FromCursor`]): `size`/`from` paging, cheap but limited in depth
//! - **Scroll** ([`ScrollCursor`]): server-side snapshot, released when done
//! - **Search-after** ([`SearchAfterCursor`]): continuation on the last hit's sort key
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use es_pagination::{CursorFactory, EsTransport, HttpClient, HttpClientConfig, SearchAfterCursor};
//! use futures::TryStreamExt;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> es_pagination::Result<()> {
//!     let config = HttpClientConfig::builder()
//!         .base_url("http://localhost:9200")
//!         .build();
//!     let transport = EsTransport::new(HttpClient::new(config)?).with_index("products");
//!
//!     let cursor = SearchAfterCursor::new(Arc::new(transport), 500)?;
//!     let mut hits = cursor.hits(serde_json::json!({
//!         "body": { "query": { "match_all": {} } }
//!     }));
//!     while let Some(hit) = hits.try_next().await? {
//!         println!("{}", hit["_id"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                CursorFactory::hits(query)                   │
//! │                   → HitStream (lazy)                        │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴──────────┬────────────────────┐
//! │  Pagination   │       Accessor         │     Transport      │
//! ├───────────────┼────────────────────────┼────────────────────┤
//! │ From          │ hits.hits              │ search             │
//! │ Scroll        │ _id / sort             │ scroll             │
//! │ Search-after  │ _scroll_id             │ clear_scroll       │
//! └───────────────┴────────────────────────┴────────────────────┘
//!                               │
//! ┌─────────────────────────────┴───────────────────────────────┐
//! │        HTTP: auth, retry, backoff, rate limit               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document the error variants, then drop this allow

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Search transport abstraction and REST implementation
pub mod transport;

/// Pagination strategies
pub mod pagination;

/// Search definition files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::AuthConfig;
pub use config::{load_definition, load_definition_from_str, SearchDefinition};
pub use http::{HttpClient, HttpClientConfig};
pub use pagination::{
    accessor, default_sort, CursorFactory, FromCursor, HitStream, ScrollCursor,
    SearchAfterCursor,
};
pub use transport::{EsTransport, SearchTransport};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
