//! Lazily paged collections

use super::types::PageInfo;
use crate::error::{Error, Operation, OperationExt, Result};
use crate::http::{check_status, HttpClient, RawResponse, RequestConfig};
use crate::types::{JsonValue, Method};
use futures::stream::{self, Stream};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A collection fetched one page at a time
///
/// Holds every item materialized so far. Later pages are requested only when
/// an access reaches past the buffer, one GET per page, in order.
pub struct PagedList<'a> {
    client: &'a HttpClient,
    items: Vec<JsonValue>,
    info: PageInfo,
    next_url: Option<String>,
    visited: HashSet<String>,
    cursor: usize,
    pages: usize,
}

impl<'a> PagedList<'a> {
    /// Fetch the first page of `path`
    pub async fn first(client: &'a HttpClient, path: &str, config: RequestConfig) -> Result<Self> {
        let mut visited = HashSet::new();
        visited.insert(client.build_url(path));

        let raw = client
            .send(Method::GET, path, config)
            .await
            .during(Operation::List)?;

        let mut list = Self {
            client,
            items: Vec::new(),
            info: PageInfo::default(),
            next_url: None,
            visited,
            cursor: 0,
            pages: 0,
        };
        list.absorb(raw)?;
        Ok(list)
    }

    /// Total item count when the server reports it, else the number of
    /// items materialized so far
    pub fn len(&self) -> usize {
        self.info
            .total
            .and_then(|t| usize::try_from(t).ok())
            .unwrap_or(self.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metadata of the last page fetched
    pub fn info(&self) -> &PageInfo {
        &self.info
    }

    /// Items fetched so far
    pub fn items(&self) -> &[JsonValue] {
        &self.items
    }

    pub fn into_items(self) -> Vec<JsonValue> {
        self.items
    }

    /// URL of the page that would be fetched next
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_url.is_some()
    }

    /// Number of pages fetched
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// Fetch the next page into the buffer
    ///
    /// Returns `false` once there is nothing left to fetch. A failed fetch
    /// leaves the collection unchanged, so the page can be retried.
    pub async fn fetch_next_page(&mut self) -> Result<bool> {
        let Some(url) = self.next_url.clone() else {
            return Ok(false);
        };

        debug!("Fetching page {} from {}", self.pages + 1, url);

        let raw = self
            .client
            .send(Method::GET, &url, RequestConfig::new())
            .await
            .during(Operation::List)?;
        self.absorb(raw)?;
        self.visited.insert(url);
        Ok(true)
    }

    /// Item at `index`, fetching pages until it is materialized
    pub async fn get(&mut self, index: usize) -> Result<Option<&JsonValue>> {
        while index >= self.items.len() {
            if !self.fetch_next_page().await? {
                break;
            }
        }
        Ok(self.items.get(index))
    }

    /// Next item in sequence
    pub async fn next(&mut self) -> Result<Option<JsonValue>> {
        let item = self.get(self.cursor).await?.cloned();
        if item.is_some() {
            self.cursor += 1;
        }
        Ok(item)
    }

    /// Stream every item, fetching pages as the stream is polled
    pub fn into_stream(self) -> impl Stream<Item = Result<JsonValue>> + 'a {
        stream::try_unfold(self, |mut list| async move {
            Ok::<_, Error>(list.next().await?.map(|item| (item, list)))
        })
    }

    /// Fetch every remaining page and return all items in order
    pub async fn fetch_all(mut self) -> Result<Vec<JsonValue>> {
        while self.fetch_next_page().await? {}
        Ok(self.items)
    }

    /// Like [`PagedList::fetch_all`], but a failing page ends the listing
    /// with whatever was fetched before it
    pub async fn fetch_all_safe(mut self) -> Vec<JsonValue> {
        loop {
            match self.fetch_next_page().await {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(
                        "Stopping after {} page(s), {} item(s): {}",
                        self.pages,
                        self.items.len(),
                        e
                    );
                    break;
                }
            }
        }
        self.items
    }

    fn absorb(&mut self, raw: RawResponse) -> Result<()> {
        check_status(&raw).during(Operation::List)?;

        let items = decode_items(&raw)?;
        let info = PageInfo::from_headers(&raw.headers);

        self.visited.insert(raw.url.to_string());
        self.next_url = info.next_url(&raw.url).and_then(|next| {
            if self.visited.contains(&next) {
                warn!("Page {} was already fetched, ending pagination", next);
                None
            } else {
                Some(next)
            }
        });

        debug!(
            "Page {:?} of {:?}: {} item(s)",
            info.current_page,
            info.total_pages,
            items.len()
        );

        self.items.extend(items);
        self.info = info;
        self.pages += 1;
        Ok(())
    }
}

impl std::fmt::Debug for PagedList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedList")
            .field("items", &self.items.len())
            .field("info", &self.info)
            .field("next_url", &self.next_url)
            .finish_non_exhaustive()
    }
}

fn decode_items(raw: &RawResponse) -> Result<Vec<JsonValue>> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    match raw.json()? {
        JsonValue::Array(items) => Ok(items),
        other => Err(Error::parsing(format!(
            "expected a JSON array from {}, got {}",
            raw.url,
            type_name(&other)
        ))),
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
