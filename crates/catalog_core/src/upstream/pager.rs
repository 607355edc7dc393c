//! Pagination driver for list-style upstream calls.

use std::future::Future;
use std::ops::ControlFlow;

/// Opaque continuation token returned by a paginated call.
pub type PageToken = String;

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `None` on the last page.
    pub next_token: Option<PageToken>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }
}

/// Fetch pages until the listing is exhausted or `on_page` breaks.
///
/// Each call to `fetch` receives the token of the page to request (`None`
/// for the first). Returns the number of pages consumed. The first error
/// aborts the walk; pages already handed to `on_page` are not rolled back,
/// so callers must discard partial accumulation on `Err`.
pub async fn drain_pages<T, E, F, Fut, C>(mut fetch: F, mut on_page: C) -> Result<usize, E>
where
    F: FnMut(Option<PageToken>) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
    C: FnMut(Vec<T>) -> ControlFlow<()>,
{
    let mut token = None;
    let mut pages = 0usize;
    loop {
        let page = fetch(token.take()).await?;
        pages += 1;
        if on_page(page.items).is_break() {
            return Ok(pages);
        }
        match page.next_token {
            Some(next) => token = Some(next),
            None => return Ok(pages),
        }
    }
}
