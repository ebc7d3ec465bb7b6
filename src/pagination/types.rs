//! Pagination types and traits
//!
//! Defines the cursor contract shared by all strategies and the plumbing
//! that turns a page-at-a-time state machine into a flat stream of hits.

use crate::error::{Error, Result};
use crate::types::JsonObject;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;

/// Lazy, forward-only stream of hits produced by a cursor run.
///
/// A transport failure or a broken continuation is yielded once as an
/// `Err`, after which the stream ends.
pub type HitStream = Pin<Box<dyn Stream<Item = Result<Value>> + Send>>;

/// Outcome of fetching one page: the page's hits plus the state for the
/// next fetch, or `None` once a page came back empty.
pub(crate) type PageStep<S> = Option<(Vec<Value>, S)>;

/// Core trait for pagination strategies.
///
/// Every call to [`hits`](CursorFactory::hits) starts a fresh run; nothing
/// about a run is stored on the cursor itself, so one cursor can serve any
/// number of sequential or concurrent runs.
pub trait CursorFactory: Send + Sync {
    /// Stream every hit of `query`, page by page
    fn hits(&self, query: Value) -> HitStream;
}

impl<T: CursorFactory + ?Sized> CursorFactory for Box<T> {
    fn hits(&self, query: Value) -> HitStream {
        (**self).hits(query)
    }
}

impl<T: CursorFactory + ?Sized> CursorFactory for std::sync::Arc<T> {
    fn hits(&self, query: Value) -> HitStream {
        (**self).hits(query)
    }
}

/// Sort clause used when the caller does not supply one
pub fn default_sort() -> Value {
    json!([{ "_id": "asc" }])
}

/// Reject page sizes the service cannot honour
pub(crate) fn validate_page_size(size: u32) -> Result<u32> {
    if size == 0 {
        return Err(Error::InvalidPageSize { size });
    }
    Ok(size)
}

/// Accept an object query; `null` stands for the empty query
pub(crate) fn query_object(query: Value) -> Result<JsonObject> {
    match query {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonObject::new()),
        other => Err(Error::invalid_query(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A stream that yields `error` and ends
pub(crate) fn failed(error: Error) -> HitStream {
    Box::pin(stream::iter([Err::<Value, Error>(error)]))
}

/// Drive `next_page` from `init` until it reports the end, flattening each
/// page into individual hits.
pub(crate) fn hit_stream<S, F, Fut>(init: S, next_page: F) -> HitStream
where
    S: Send + 'static,
    F: FnMut(S) -> Fut + Send + 'static,
    Fut: Future<Output = Result<PageStep<S>>> + Send + 'static,
{
    stream::try_unfold(init, next_page)
        .map_ok(|hits| stream::iter(hits.into_iter().map(Ok::<Value, Error>)))
        .try_flatten()
        .boxed()
}
