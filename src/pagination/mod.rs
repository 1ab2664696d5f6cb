//! Pagination module
//!
//! Collections are paged with `X-Page`/`X-Next-Page`/`X-Per-Page`/`X-Total`
//! style headers and RFC 5988 `Link` headers.
//!
//! # Overview
//!
//! A [`PagedList`] holds the first page and fetches later ones on demand.
//! The next page comes from the `next` link when present, otherwise from the
//! `X-Next-Page` number. A URL that was already fetched ends the listing, so
//! a server that keeps pointing at the same page cannot loop the client.

mod links;
mod list;
mod types;

pub use links::parse_link_header;
pub use list::PagedList;
pub use types::PageInfo;
