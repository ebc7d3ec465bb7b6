//! Pagination module
//!
//! Supports: offset (`size`/`from`), scroll, search-after
//!
//! # Overview
//!
//! Every strategy implements [`CursorFactory`]: hand it a base query and it
//! returns a lazy [`HitStream`] over every hit of that query. Pages are
//! fetched one at a time, only when the consumer has drained the previous
//! one, and the stream ends on the first empty page.
//!
//! Response and hit layout (`hits.hits`, `_id`, `sort`, `_scroll_id`) is
//! read exclusively through the functions in [`accessor`].

pub mod accessor;
mod strategies;
mod types;

pub use strategies::{FromCursor, ScrollCursor, SearchAfterCursor};
pub use types::{default_sort, CursorFactory, HitStream};
