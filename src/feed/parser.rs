//! RSS and Atom parsing.
//!
//! Only the fields the freshness engine needs are extracted: per-entry
//! `updated`, `published` and `pubDate` timestamps, plus title and link for
//! display. Entries keep document order; the first entry is the most recent.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use quick_xml::Reader;
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity};
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

use super::{FeedEntry, ParsedFeed};
use crate::core::{MonitorError, MonitorResult};

/// Field of an entry whose text is being collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryField {
    Title,
    Link,
    Updated,
    Published,
    PubDate,
}

impl EntryField {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Self::Title),
            b"link" => Some(Self::Link),
            b"updated" => Some(Self::Updated),
            b"published" => Some(Self::Published),
            b"pubDate" => Some(Self::PubDate),
            _ => None,
        }
    }
}

fn is_entry_element(name: &[u8]) -> bool {
    name == b"item" || name == b"entry"
}

/// Whether `name` is the local name of an RSS, RDF or Atom root element.
pub(crate) fn is_feed_root(name: &[u8]) -> bool {
    matches!(name, b"rss" | b"feed" | b"RDF")
}

/// Parse an RSS 0.9x/2.0, RSS 1.0 or Atom document.
///
/// `url` is only used in error messages.
pub fn parse_feed(xml: &str, url: &str) -> MonitorResult<ParsedFeed> {
    let parse_error = |reason: String| MonitorError::FeedParse {
        url: url.to_string(),
        reason,
    };

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut seen_root = false;
    let mut depth = 0usize;
    let mut feed = ParsedFeed::default();

    // (depth of the entry element, entry under construction)
    let mut entry: Option<(usize, FeedEntry)> = None;
    // (field, text collected so far) for a direct child of the current entry
    let mut field: Option<(EntryField, String)> = None;
    let mut in_feed_title = false;
    let mut feed_title = String::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| parse_error(format!("{e} at byte {}", reader.buffer_position())))?;

        match event {
            Event::Start(start) => {
                depth += 1;
                let local = start.local_name();
                let name = local.as_ref();

                if !seen_root {
                    if !is_feed_root(name) {
                        return Err(parse_error(format!(
                            "unexpected root element <{}>",
                            String::from_utf8_lossy(start.name().as_ref())
                        )));
                    }
                    seen_root = true;
                    continue;
                }

                let entry_depth = entry.as_ref().map(|(d, _)| *d);
                match entry_depth {
                    None if is_entry_element(name) => entry = Some((depth, FeedEntry::default())),
                    None if name == b"title" && feed.title.is_none() => in_feed_title = true,
                    Some(entry_depth) if depth == entry_depth + 1 => {
                        field = EntryField::from_local_name(name).map(|f| (f, String::new()));
                        if field.as_ref().is_some_and(|(f, _)| *f == EntryField::Link) {
                            // Atom links carry the URL in an attribute
                            if let (Some(href), Some((_, current))) = (href_attribute(&start), entry.as_mut()) {
                                current.link.get_or_insert(href);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(empty) => {
                if !seen_root {
                    return Err(parse_error("document has no feed content".to_string()));
                }
                if let Some((entry_depth, current)) = entry.as_mut() {
                    if depth == *entry_depth && empty.local_name().as_ref() == b"link" {
                        if let Some(href) = href_attribute(&empty) {
                            current.link.get_or_insert(href);
                        }
                    }
                }
            }
            // Text outside the collected fields is never decoded
            Event::Text(text) if field.is_some() || in_feed_title => {
                let text = match text.unescape_with(resolve_entity) {
                    Ok(decoded) => decoded.into_owned(),
                    Err(e) => {
                        warn!("Keeping undecoded text in feed {}: {}", url, e);
                        String::from_utf8_lossy(&text).into_owned()
                    }
                };
                if let Some((_, buffer)) = &mut field {
                    buffer.push_str(&text);
                } else if in_feed_title {
                    feed_title.push_str(&text);
                }
            }
            Event::CData(cdata) => {
                let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                if let Some((_, buffer)) = &mut field {
                    buffer.push_str(&text);
                } else if in_feed_title {
                    feed_title.push_str(&text);
                }
            }
            Event::End(_) => {
                match entry.as_ref().map(|(d, _)| *d) {
                    Some(entry_depth) if depth == entry_depth + 1 => {
                        if let (Some((which, value)), Some((_, current))) = (field.take(), entry.as_mut()) {
                            apply_field(current, which, value.trim());
                        }
                    }
                    Some(entry_depth) if depth == entry_depth => {
                        if let Some((_, finished)) = entry.take() {
                            feed.entries.push(finished);
                        }
                    }
                    Some(_) => {}
                    None => {
                        if in_feed_title {
                            in_feed_title = false;
                            let title = feed_title.trim();
                            if !title.is_empty() {
                                feed.title = Some(title.to_string());
                            }
                        }
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(parse_error("document has no feed content".to_string()));
    }

    Ok(feed)
}

/// XML entities plus the HTML named entities blog engines leak into feeds.
fn resolve_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
}

fn href_attribute(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"href")
        .and_then(|attr| attr.unescape_value().ok().map(|value| value.into_owned()))
}

fn apply_field(entry: &mut FeedEntry, field: EntryField, value: &str) {
    if value.is_empty() {
        return;
    }
    match field {
        EntryField::Title => entry.title = Some(value.to_string()),
        EntryField::Link => {
            entry.link.get_or_insert_with(|| value.to_string());
        }
        EntryField::Updated => entry.updated = parse_timestamp(value),
        EntryField::Published => entry.published = parse_timestamp(value),
        EntryField::PubDate => entry.pub_date = parse_timestamp(value),
    }
}

/// Parse a feed timestamp.
///
/// Accepts RFC 3339 (Atom), RFC 2822 (RSS) and bare ISO dates. Unparseable
/// values are logged and treated as absent.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc());
    }
    if let Some(midnight) =
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(midnight.and_utc());
    }

    warn!("Ignoring unparseable feed date '{}'", value);
    None
}
