//! Pagination strategy implementations
//!
//! Each cursor keeps only its configuration. The per-run state lives in a
//! private `*Run` value that moves through the stream, one page at a time.

use super::accessor::{self, BODY_FIELD};
use super::types::{
    default_sort, failed, hit_stream, query_object, validate_page_size, CursorFactory,
    HitStream, PageStep,
};
use crate::error::{Error, Result};
use crate::transport::SearchTransport;
use crate::types::JsonObject;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

const SIZE_PARAM: &str = "size";
const FROM_PARAM: &str = "from";
const SCROLL_PARAM: &str = "scroll";
const SCROLL_ID_PARAM: &str = "scroll_id";
const SEARCH_AFTER_PARAM: &str = "search_after";

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset pagination with `size` and `from`.
///
/// Simple and stateless on the service side, but deep pages get expensive
/// and the service usually caps `from + size`.
///
/// Pagination stops only on an empty page. A short page is not taken as
/// the end, because some services return partial pages before the last.
#[derive(Clone)]
pub struct FromCursor {
    transport: Arc<dyn SearchTransport>,
    size: u32,
}

impl FromCursor {
    /// Create a new offset cursor fetching `size` hits per page
    pub fn new(transport: Arc<dyn SearchTransport>, size: u32) -> Result<Self> {
        Ok(Self {
            transport,
            size: validate_page_size(size)?,
        })
    }

    /// Hits requested per page
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl std::fmt::Debug for FromCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromCursor")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl CursorFactory for FromCursor {
    fn hits(&self, query: Value) -> HitStream {
        let query = match query_object(query) {
            Ok(query) => query,
            Err(e) => return failed(e),
        };

        let run = FromRun {
            transport: Arc::clone(&self.transport),
            query,
            size: self.size,
            offset: 0,
            page: 0,
        };
        hit_stream(run, FromRun::next_page)
    }
}

struct FromRun {
    transport: Arc<dyn SearchTransport>,
    query: JsonObject,
    size: u32,
    offset: u64,
    page: u64,
}

impl FromRun {
    fn request(&self) -> Value {
        let mut request = self.query.clone();
        request.insert(SIZE_PARAM.to_string(), json!(self.size));
        if self.offset == 0 {
            request.remove(FROM_PARAM);
        } else {
            request.insert(FROM_PARAM.to_string(), json!(self.offset));
        }
        Value::Object(request)
    }

    async fn next_page(mut self) -> Result<PageStep<Self>> {
        self.page += 1;
        debug!(
            "Fetching page {} (from={}, size={})",
            self.page, self.offset, self.size
        );

        let response = self.transport.search(self.request()).await?;
        let hits = accessor::into_hits(response);
        if hits.is_empty() {
            debug!("Page {} is empty, pagination complete", self.page);
            return Ok(None);
        }

        debug!("Page {}: {} hits", self.page, hits.len());
        self.offset += u64::from(self.size);
        Ok(Some((hits, self)))
    }
}

// ============================================================================
// Scroll Pagination
// ============================================================================

/// Scroll pagination over a server-side search context.
///
/// The first page goes through the primary search operation with a
/// `scroll` keep-alive; every following page is fetched from the scroll
/// operation with only the keep-alive and the latest scroll id. Once a
/// page comes back empty the context is cleared, exactly once. A failed
/// clear is logged and otherwise ignored.
///
/// Dropping the stream before it ends leaves the context open until its
/// keep-alive expires on the service.
#[derive(Clone)]
pub struct ScrollCursor {
    transport: Arc<dyn SearchTransport>,
    size: u32,
    scroll: String,
}

impl ScrollCursor {
    /// Create a new scroll cursor.
    ///
    /// `scroll` is the context keep-alive in the service's duration syntax,
    /// e.g. `"5m"`.
    pub fn new(
        transport: Arc<dyn SearchTransport>,
        size: u32,
        scroll: impl Into<String>,
    ) -> Result<Self> {
        let scroll = scroll.into();
        if scroll.trim().is_empty() {
            return Err(Error::invalid_value(SCROLL_PARAM, "keep-alive must not be empty"));
        }
        Ok(Self {
            transport,
            size: validate_page_size(size)?,
            scroll,
        })
    }

    /// Hits requested per page
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Scroll context keep-alive
    pub fn scroll(&self) -> &str {
        &self.scroll
    }
}

impl std::fmt::Debug for ScrollCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollCursor")
            .field("size", &self.size)
            .field("scroll", &self.scroll)
            .finish_non_exhaustive()
    }
}

impl CursorFactory for ScrollCursor {
    fn hits(&self, query: Value) -> HitStream {
        let query = match query_object(query) {
            Ok(query) => query,
            Err(e) => return failed(e),
        };

        let run = ScrollRun {
            transport: Arc::clone(&self.transport),
            query,
            size: self.size,
            scroll: self.scroll.clone(),
            phase: ScrollPhase::Initial,
            page: 0,
        };
        hit_stream(run, ScrollRun::next_page)
    }
}

enum ScrollPhase {
    /// Nothing fetched yet, the next request opens the context
    Initial,
    /// Context open, continue with this scroll id
    Continue(String),
    /// Hits arrived without any scroll id to continue from
    Stalled,
}

struct ScrollRun {
    transport: Arc<dyn SearchTransport>,
    query: JsonObject,
    size: u32,
    scroll: String,
    phase: ScrollPhase,
    page: u64,
}

impl ScrollRun {
    fn initial_request(&self) -> Value {
        let mut request = self.query.clone();
        request.insert(SIZE_PARAM.to_string(), json!(self.size));
        request.insert(SCROLL_PARAM.to_string(), json!(self.scroll));
        Value::Object(request)
    }

    fn continue_request(&self, scroll_id: &str) -> Value {
        json!({
            SCROLL_PARAM: self.scroll,
            BODY_FIELD: { SCROLL_ID_PARAM: scroll_id },
        })
    }

    async fn next_page(mut self) -> Result<PageStep<Self>> {
        self.page += 1;

        let (response, previous_id) = match &self.phase {
            ScrollPhase::Initial => {
                debug!(
                    "Opening scroll context (size={}, scroll={})",
                    self.size, self.scroll
                );
                (self.transport.search(self.initial_request()).await?, None)
            }
            ScrollPhase::Continue(scroll_id) => {
                debug!("Fetching scroll page {}", self.page);
                let response = self
                    .transport
                    .scroll(self.continue_request(scroll_id))
                    .await?;
                (response, Some(scroll_id.clone()))
            }
            ScrollPhase::Stalled => return Err(Error::MissingScrollId),
        };

        // A fresh id always wins; a response without one keeps the last.
        let scroll_id = accessor::extract_scroll_id(&response)
            .map(str::to_string)
            .or(previous_id);

        let hits = accessor::into_hits(response);
        if hits.is_empty() {
            debug!("Scroll page {} is empty, pagination complete", self.page);
            self.release(scroll_id.as_deref()).await;
            return Ok(None);
        }

        debug!("Scroll page {}: {} hits", self.page, hits.len());
        self.phase = scroll_id.map_or(ScrollPhase::Stalled, ScrollPhase::Continue);
        Ok(Some((hits, self)))
    }

    async fn release(&self, scroll_id: Option<&str>) {
        let Some(scroll_id) = scroll_id else {
            debug!("No scroll context was opened, nothing to clear");
            return;
        };

        let request = json!({ BODY_FIELD: { SCROLL_ID_PARAM: scroll_id } });
        match self.transport.clear_scroll(request).await {
            Ok(_) => debug!("Cleared scroll context"),
            Err(e) => warn!("Failed to clear scroll context: {e}"),
        }
    }
}

// ============================================================================
// Search-After Pagination
// ============================================================================

/// Sort-key continuation with `search_after`.
///
/// Needs a total order, so every request carries a sort clause, by default
/// `[{"_id": "asc"}]`. The sort values of the last hit of each page become
/// the `search_after` marker of the next request. No context is held on the
/// service.
///
/// A last hit without sort values makes continuation impossible; the run
/// then fails with [`Error::MissingSortKey`] instead of stopping quietly.
#[derive(Clone)]
pub struct SearchAfterCursor {
    transport: Arc<dyn SearchTransport>,
    size: u32,
    sort: Value,
}

impl SearchAfterCursor {
    /// Create a new search-after cursor sorted by `_id` ascending
    pub fn new(transport: Arc<dyn SearchTransport>, size: u32) -> Result<Self> {
        Ok(Self {
            transport,
            size: validate_page_size(size)?,
            sort: default_sort(),
        })
    }

    /// Replace the sort clause.
    ///
    /// The clause should end in a unique field so that the order is total.
    #[must_use]
    pub fn with_sort(mut self, sort: Value) -> Self {
        self.sort = sort;
        self
    }

    /// Hits requested per page
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Sort clause injected into every request
    pub fn sort(&self) -> &Value {
        &self.sort
    }
}

impl std::fmt::Debug for SearchAfterCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAfterCursor")
            .field("size", &self.size)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}

impl CursorFactory for SearchAfterCursor {
    fn hits(&self, query: Value) -> HitStream {
        let query = match query_object(query) {
            Ok(query) => Value::Object(query),
            Err(e) => return failed(e),
        };

        let mut template = match accessor::merge_sort_clause(&query, &self.sort) {
            Value::Object(template) => template,
            _ => JsonObject::new(),
        };
        if let Some(Value::Object(body)) = template.get_mut(BODY_FIELD) {
            body.remove(SEARCH_AFTER_PARAM);
        }
        template.insert(SIZE_PARAM.to_string(), json!(self.size));

        let run = SearchAfterRun {
            transport: Arc::clone(&self.transport),
            template,
            position: Position::Start,
            page: 0,
        };
        hit_stream(run, SearchAfterRun::next_page)
    }
}

enum Position {
    Start,
    After(Vec<Value>),
    /// The last hit of this page carried no sort key
    Unsortable { page: u64 },
}

struct SearchAfterRun {
    transport: Arc<dyn SearchTransport>,
    /// Base query with size and sort applied
    template: JsonObject,
    position: Position,
    page: u64,
}

impl SearchAfterRun {
    fn request(&self, after: Option<&[Value]>) -> Value {
        let mut request = self.template.clone();
        if let (Some(after), Some(Value::Object(body))) = (after, request.get_mut(BODY_FIELD)) {
            body.insert(SEARCH_AFTER_PARAM.to_string(), Value::Array(after.to_vec()));
        }
        Value::Object(request)
    }

    async fn next_page(mut self) -> Result<PageStep<Self>> {
        let request = match &self.position {
            Position::Start => self.request(None),
            Position::After(after) => self.request(Some(after.as_slice())),
            Position::Unsortable { page } => return Err(Error::MissingSortKey { page: *page }),
        };

        self.page += 1;
        debug!("Fetching search_after page {}", self.page);

        let response = self.transport.search(request).await?;
        let hits = accessor::into_hits(response);
        let Some(last) = hits.last() else {
            debug!("Page {} is empty, pagination complete", self.page);
            return Ok(None);
        };

        self.position = match accessor::extract_sort_key(last) {
            Some(sort_key) => Position::After(sort_key.to_vec()),
            None => {
                warn!(
                    "Last hit of page {} has no sort values, search_after cannot continue",
                    self.page
                );
                Position::Unsortable { page: self.page }
            }
        };

        debug!("Page {}: {} hits", self.page, hits.len());
        Ok(Some((hits, self)))
    }
}
