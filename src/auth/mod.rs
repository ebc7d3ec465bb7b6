//! Authentication module
//!
//! Supports: Basic, Bearer, API key (id/key pair or pre-encoded), custom
//! headers.
//!
//! Credentials are static for the lifetime of a client, so applying them
//! is a plain header edit on each outgoing request.

mod authenticator;
mod types;

pub use authenticator::{encode_api_key, Authenticator};
pub use types::AuthConfig;
