//! Search transport module
//!
//! The cursors never talk HTTP themselves. They hand fully built request
//! values to a [`SearchTransport`] and read hits out of whatever it returns.
//!
//! # Request convention
//!
//! Requests follow the parameter layout of the official Elasticsearch
//! clients:
//!
//! - `index` picks the target index (string or array of strings)
//! - `body` is sent as the JSON request body
//! - every other top-level field becomes a URL query parameter
//!
//! [`EsTransport`] maps that layout onto the REST API.

mod elasticsearch;
mod types;

pub use elasticsearch::EsTransport;
pub use types::SearchTransport;
