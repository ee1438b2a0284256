//! Feed autodiscovery for HTML pages.
//!
//! Blogs advertise their feeds with `<link rel="alternate">` tags in the page
//! head. The first tag whose `type` is an RSS, Atom or RDF media type wins.

use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::debug;

use super::parser::is_feed_root;

/// Media types accepted as syndication feeds.
const FEED_MEDIA_TYPES: [&str; 3] =
    ["application/rss+xml", "application/atom+xml", "application/rdf+xml"];

fn link_tag_regex() -> Option<&'static Regex> {
    static LINK_TAG: OnceLock<Option<Regex>> = OnceLock::new();
    LINK_TAG.get_or_init(|| Regex::new(r"(?is)<link\b[^>]*>").ok()).as_ref()
}

/// Comments and script bodies, whose `<link>` tags are not live.
fn inert_markup_regex() -> Option<&'static Regex> {
    static INERT: OnceLock<Option<Regex>> = OnceLock::new();
    INERT.get_or_init(|| Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>").ok()).as_ref()
}

fn attribute_regex() -> Option<&'static Regex> {
    static ATTRIBUTE: OnceLock<Option<Regex>> = OnceLock::new();
    ATTRIBUTE
        .get_or_init(|| {
            Regex::new(r#"(?is)([a-z][a-z0-9_:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).ok()
        })
        .as_ref()
}

/// Lowercased attribute name and raw value pairs of one tag.
fn attributes(tag: &str) -> Vec<(String, String)> {
    let Some(attribute_regex) = attribute_regex() else {
        return Vec::new();
    };
    attribute_regex
        .captures_iter(tag)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4))?;
            Some((name, value.as_str().to_string()))
        })
        .collect()
}

fn attribute<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
}

/// Find the feed URL advertised by an HTML page.
///
/// Tags inside comments and `<script>` blocks are ignored. Relative `href`
/// values are resolved against `page_url`. Returns `None` when
/// the page advertises no feed.
#[must_use]
pub fn find_feed_link(html: &str, page_url: &str) -> Option<String> {
    let html = match inert_markup_regex() {
        Some(inert) => inert.replace_all(html, ""),
        None => Cow::Borrowed(html),
    };

    for tag in link_tag_regex()?.find_iter(&html) {
        let attrs = attributes(tag.as_str());

        let is_alternate = attribute(&attrs, "rel")
            .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("alternate")));
        let is_feed = attribute(&attrs, "type").is_some_and(|media_type| {
            FEED_MEDIA_TYPES.iter().any(|known| media_type.trim().eq_ignore_ascii_case(known))
        });

        if !(is_alternate && is_feed) {
            continue;
        }

        if let Some(href) = attribute(&attrs, "href") {
            let href = href.trim().replace("&amp;", "&");
            let resolved = resolve_href(page_url, &href);
            debug!("Discovered feed {} on {}", resolved, page_url);
            return Some(resolved);
        }
    }

    None
}

fn resolve_href(page_url: &str, href: &str) -> String {
    match reqwest::Url::parse(page_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Whether a fetched body is itself an RSS, RDF or Atom document.
///
/// The XML declaration, processing instructions, comments and a DOCTYPE may
/// precede the root element; only the root's local name is checked.
#[must_use]
pub fn looks_like_feed(body: &str) -> bool {
    let mut reader = Reader::from_str(body);
    loop {
        match reader.read_event() {
            Ok(Event::Start(root) | Event::Empty(root)) => return is_feed_root(root.local_name().as_ref()),
            Ok(Event::Eof) | Err(_) => return false,
            Ok(_) => {}
        }
    }
}
