//! Collection envelope and offset pagination
//!
//! Sentinel list endpoints wrap their items as
//! `{ "collection": [...], "page": { "total", "limit", "offset" } }`.
//! [`fetch_all`] walks the envelope from offset 0 until the page metadata
//! says the collection is exhausted.

use std::future::Future;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Page metadata attached to a collection response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Items across all pages
    pub total: u64,
    /// Page size
    pub limit: u64,
    /// Index of the first item in this page
    pub offset: u64,
}

impl PageInfo {
    /// Offset of the following page, or `None` when this page is the last.
    pub fn next_offset(&self) -> Option<u64> {
        let next = self.offset.saturating_add(self.limit);
        (next < self.total).then_some(next)
    }

    /// Upper bound on the number of pages needed for `total` items.
    pub fn page_bound(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        self.total.div_ceil(self.limit).max(1)
    }
}

/// One page of a collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionPage<T> {
    #[serde(default = "Vec::new")]
    pub collection: Vec<T>,

    /// Missing on endpoints that return everything in one response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

#[cfg(test)]
impl<T> CollectionPage<T> {
    pub fn new(collection: Vec<T>, page: Option<PageInfo>) -> Self {
        Self { collection, page }
    }
}

/// Fetch every page of a collection and concatenate the items in page order.
///
/// `fetch_page` is called with the offset to request, starting at 0. Paging
/// stops once `offset + limit >= total` on the page just received, or when a
/// page has no metadata. A next offset that does not move past the offset
/// just requested, or more requests than `ceil(total / limit)` from the first
/// page, aborts with [`ApiError::PaginationStalled`].
pub async fn fetch_all<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<CollectionPage<T>>>,
{
    let mut items = Vec::new();
    let mut offset = 0u64;
    let mut requests = 0u64;
    let mut bound: Option<u64> = None;

    loop {
        requests += 1;
        debug!("Fetching page at offset {}", offset);
        let page = fetch_page(offset).await?;
        debug!("Page at offset {} returned {} items", offset, page.collection.len());
        items.extend(page.collection);

        let Some(info) = page.page else {
            break;
        };
        let bound = *bound.get_or_insert_with(|| info.page_bound());

        match info.next_offset() {
            None => break,
            Some(next) if next <= offset || requests >= bound => {
                return Err(ApiError::PaginationStalled { offset }.into());
            }
            Some(next) => offset = next,
        }
    }

    debug!("Fetched {} items in {} requests", items.len(), requests);
    Ok(items)
}
