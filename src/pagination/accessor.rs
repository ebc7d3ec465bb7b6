//! Hit accessors
//!
//! Small, pure functions that know where a search response keeps its hits
//! and where a hit keeps its identifier and sort key. Cursors go through
//! these instead of indexing into responses inline, so the response shape
//! is described in exactly one place.

use serde_json::{json, Map, Value};

/// Response field holding the hits envelope
pub const HITS_FIELD: &str = "hits";
/// Hit field holding the document identifier
pub const ID_FIELD: &str = "_id";
/// Hit field holding the sort values
pub const SORT_FIELD: &str = "sort";
/// Response field holding the scroll continuation token
pub const SCROLL_ID_FIELD: &str = "_scroll_id";
/// Request field holding the request body
pub const BODY_FIELD: &str = "body";

/// Borrow the hits of a response (`hits.hits`).
///
/// Anything that does not look like a hit list yields an empty slice.
pub fn extract_hits(response: &Value) -> &[Value] {
    response
        .get(HITS_FIELD)
        .and_then(|hits| hits.get(HITS_FIELD))
        .and_then(Value::as_array)
        .map_or(&[][..], Vec::as_slice)
}

/// Take the hits out of a response without cloning them
pub fn into_hits(response: Value) -> Vec<Value> {
    let Value::Object(mut root) = response else {
        return Vec::new();
    };
    let Some(Value::Object(mut envelope)) = root.remove(HITS_FIELD) else {
        return Vec::new();
    };
    match envelope.remove(HITS_FIELD) {
        Some(Value::Array(hits)) => hits,
        _ => Vec::new(),
    }
}

/// Identifier of a hit
pub fn extract_id(hit: &Value) -> Option<&Value> {
    hit.get(ID_FIELD)
}

/// Sort values of a hit, present only when the request was sorted
pub fn extract_sort_key(hit: &Value) -> Option<&[Value]> {
    hit.get(SORT_FIELD)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Scroll continuation token of a response
pub fn extract_scroll_id(response: &Value) -> Option<&str> {
    response
        .get(SCROLL_ID_FIELD)
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
}

/// Identifiers of a run of hits, skipping hits without one
pub fn hit_ids(hits: &[Value]) -> Vec<Value> {
    hits.iter().filter_map(extract_id).cloned().collect()
}

/// Return a copy of `query` whose `body.sort` is `sort`.
///
/// Only the sort clause is replaced; filters, aggregations and every other
/// field of the body and of the top level are carried over. A missing or
/// non-object query or body is treated as empty.
pub fn merge_sort_clause(query: &Value, sort: &Value) -> Value {
    let mut merged = match query {
        Value::Object(map) => map.clone(),
        _ => Map::new(),
    };

    let mut body = match merged.remove(BODY_FIELD) {
        Some(Value::Object(body)) => body,
        _ => Map::new(),
    };
    body.insert(SORT_FIELD.to_string(), sort.clone());
    merged.insert(BODY_FIELD.to_string(), Value::Object(body));

    Value::Object(merged)
}

/// Build a minimal hit, for fixtures and mocks
pub fn build_hit(id: impl Into<Value>, sort: Option<Vec<Value>>) -> Value {
    let mut hit = Map::new();
    hit.insert(ID_FIELD.to_string(), id.into());
    if let Some(sort) = sort {
        hit.insert(SORT_FIELD.to_string(), Value::Array(sort));
    }
    Value::Object(hit)
}

/// Build a minimal search response around `hits`, for fixtures and mocks
pub fn build_response(hits: Vec<Value>, scroll_id: Option<&str>) -> Value {
    let mut response = json!({ "hits": { "hits": hits } });
    if let (Some(id), Value::Object(map)) = (scroll_id, &mut response) {
        map.insert(SCROLL_ID_FIELD.to_string(), Value::String(id.to_string()));
    }
    response
}
