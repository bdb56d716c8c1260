//! Pagination helper
//!
//! Walks an offset-paginated result set to completion: each call requests
//! a fixed page starting at the current offset, the named array field of
//! each page is appended to an accumulator, and the offset advances by the
//! page size. The loop ends when a page comes back smaller than the page
//! size. The service's own total-count field is never trusted; some
//! installations omit or misreport it.
//!
//! The page window (`startAt`, `maxResults`) rides in the request body for
//! POST endpoints and in the query string for GET endpoints, matching the
//! tracker's per-endpoint conventions.

use crate::envelope::Envelope;
use crate::error::Result;
use crate::http::{ApiRequest, Gateway};
use crate::types::{JsonObject, JsonValue, Method};
use serde_json::json;
use tracing::debug;


/// Page size used when walking a full result set
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Offset/limit state for one pagination loop.
///
/// Lives only for the duration of the loop and is discarded with it.
#[derive(Debug, Clone, Copy)]
pub struct PageCursor {
    /// Offset of the next page
    pub start_at: usize,
    /// Fixed page size
    pub page_size: usize,
}

impl PageCursor {
    /// Create a cursor at offset zero
    pub fn new(page_size: usize) -> Self {
        Self {
            start_at: 0,
            page_size,
        }
    }

    /// Advance the offset by one page
    pub fn advance(&mut self) {
        self.start_at += self.page_size;
    }
}

/// Fetch every page of `path`, accumulating the `result_field` array.
pub async fn fetch_all(
    gateway: &Gateway,
    result_field: &str,
    path: &str,
    method: Method,
    body: JsonObject,
) -> Result<Vec<JsonValue>> {
    fetch_all_with_page_size(gateway, result_field, path, method, body, DEFAULT_PAGE_SIZE).await
}

/// `fetch_all` with an explicit page size.
pub async fn fetch_all_with_page_size(
    gateway: &Gateway,
    result_field: &str,
    path: &str,
    method: Method,
    body: JsonObject,
    page_size: usize,
) -> Result<Vec<JsonValue>> {
    let envelope = Envelope::Wrapped(result_field);
    let mut cursor = PageCursor::new(page_size);
    let mut all = Vec::new();

    loop {
        let request = paged_request(path, method, &body, cursor);
        let page = gateway.send(&request).await?;
        let records = envelope.unwrap_records(&page)?;
        let count = records.len();
        all.extend(records);

        debug!(
            start_at = cursor.start_at,
            fetched = count,
            total = all.len(),
            "fetched page"
        );

        if count < cursor.page_size {
            break;
        }
        cursor.advance();
    }

    Ok(all)
}

/// Build the request for one page window.
fn paged_request(path: &str, method: Method, body: &JsonObject, cursor: PageCursor) -> ApiRequest {
    match method {
        Method::GET | Method::DELETE => ApiRequest::new(method, path)
            .query("startAt", cursor.start_at.to_string())
            .query("maxResults", cursor.page_size.to_string()),
        Method::POST | Method::PUT => {
            let mut body = body.clone();
            body.insert("startAt".to_string(), json!(cursor.start_at));
            body.insert("maxResults".to_string(), json!(cursor.page_size));
            ApiRequest::new(method, path).json(JsonValue::Object(body))
        }
    }
}
