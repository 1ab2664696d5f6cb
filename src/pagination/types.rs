//! Paging metadata

use super::links::parse_link_header;
use reqwest::header::{HeaderMap, LINK};
use std::collections::BTreeMap;
use url::Url;

pub const PAGE_HEADER: &str = "X-Page";
pub const NEXT_PAGE_HEADER: &str = "X-Next-Page";
pub const PREV_PAGE_HEADER: &str = "X-Prev-Page";
pub const PER_PAGE_HEADER: &str = "X-Per-Page";
pub const TOTAL_PAGES_HEADER: &str = "X-Total-Pages";
pub const TOTAL_HEADER: &str = "X-Total";

/// Paging metadata of the most recently fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: Option<u64>,
    pub next_page: Option<u64>,
    pub prev_page: Option<u64>,
    pub per_page: Option<u64>,
    pub total_pages: Option<u64>,
    /// Total number of items across all pages
    pub total: Option<u64>,
    /// `Link` relations, e.g. `next`, `prev`, `first`, `last`
    pub links: BTreeMap<String, String>,
}

impl PageInfo {
    /// Read the paging headers; absent, empty or non-numeric values are `None`
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let links = headers
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .map(parse_link_header)
            .unwrap_or_default();

        Self {
            current_page: numeric(headers, PAGE_HEADER),
            next_page: numeric(headers, NEXT_PAGE_HEADER),
            prev_page: numeric(headers, PREV_PAGE_HEADER),
            per_page: numeric(headers, PER_PAGE_HEADER),
            total_pages: numeric(headers, TOTAL_PAGES_HEADER),
            total: numeric(headers, TOTAL_HEADER),
            links,
        }
    }

    /// URL of the following page, if any
    ///
    /// The `next` link wins. Without one, the next page is addressed by
    /// rewriting `page` (and `per_page`) on the URL that produced this page,
    /// but only when the advertised next page is ahead of the current one.
    pub fn next_url(&self, response_url: &Url) -> Option<String> {
        if let Some(next) = self.links.get("next") {
            return Some(next.clone());
        }

        match (self.current_page, self.next_page) {
            (Some(current), Some(next)) if next > current => {
                Some(with_page(response_url, next, self.per_page).to_string())
            }
            _ => None,
        }
    }
}

fn numeric(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

fn with_page(url: &Url, page: u64, per_page: Option<u64>) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "page" && !(per_page.is_some() && k == "per_page"))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut next = url.clone();
    {
        let mut pairs = next.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        if let Some(per_page) = per_page {
            pairs.append_pair("per_page", &per_page.to_string());
        }
        pairs.append_pair("page", &page.to_string());
    }
    next
}
