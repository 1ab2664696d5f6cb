//! RFC 5988 `Link` header parsing

use std::collections::BTreeMap;

/// Parse a `Link` header into a map of relation → URL
///
/// Header format: `<url>; rel="next", <url>; rel="prev"`. A relation list
/// such as `rel="next last"` registers the URL under each name. The first
/// URL seen for a relation wins.
pub fn parse_link_header(header: &str) -> BTreeMap<String, String> {
    let mut links = BTreeMap::new();

    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rels = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rels = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rels) {
            for rel in r.split_whitespace() {
                links
                    .entry(rel.to_ascii_lowercase())
                    .or_insert_with(|| u.to_string());
            }
        }
    }

    links
}
