//! Paged collections of resources

use crate::error::Result;
use crate::pagination::{PageInfo, PagedList};
use crate::resource::{Resource, ResourceKind};
use futures::future;
use futures::stream::{Stream, TryStreamExt};

/// A [`PagedList`] whose items decode to one resource kind
#[derive(Debug)]
pub struct PagedResources<'a> {
    kind: ResourceKind,
    list: PagedList<'a>,
}

impl<'a> PagedResources<'a> {
    pub(crate) fn new(kind: ResourceKind, list: PagedList<'a>) -> Self {
        Self { kind, list }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Total reported by the server, else the number fetched so far
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn info(&self) -> &PageInfo {
        self.list.info()
    }

    pub fn has_next_page(&self) -> bool {
        self.list.has_next_page()
    }

    /// Resource at `index`, fetching pages as needed
    pub async fn get(&mut self, index: usize) -> Result<Option<Resource>> {
        let kind = self.kind;
        self.list
            .get(index)
            .await?
            .cloned()
            .map(|v| Resource::from_api(kind, v))
            .transpose()
    }

    /// Next resource in sequence
    pub async fn next(&mut self) -> Result<Option<Resource>> {
        let kind = self.kind;
        self.list
            .next()
            .await?
            .map(|v| Resource::from_api(kind, v))
            .transpose()
    }

    /// Resources fetched so far, without requesting more pages
    pub fn into_fetched(self) -> Result<Vec<Resource>> {
        let kind = self.kind;
        decode(kind, self.list.into_items())
    }

    /// Every resource across all pages
    pub async fn fetch_all(self) -> Result<Vec<Resource>> {
        let kind = self.kind;
        decode(kind, self.list.fetch_all().await?)
    }

    /// Every resource up to the first failing page
    pub async fn fetch_all_safe(self) -> Result<Vec<Resource>> {
        let kind = self.kind;
        decode(kind, self.list.fetch_all_safe().await)
    }

    /// Stream every resource, fetching pages as the stream is polled
    pub fn into_stream(self) -> impl Stream<Item = Result<Resource>> + 'a {
        let kind = self.kind;
        self.list
            .into_stream()
            .and_then(move |v| future::ready(Resource::from_api(kind, v)))
    }
}

fn decode(kind: ResourceKind, items: Vec<serde_json::Value>) -> Result<Vec<Resource>> {
    items
        .into_iter()
        .map(|v| Resource::from_api(kind, v))
        .collect()
}
