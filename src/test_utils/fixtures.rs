//! Test fixtures for feeds, pages and rosters
//!
//! Builders for the documents a rendering pass consumes: RSS and Atom feeds,
//! HTML pages advertising a feed, and roster YAML.

use chrono::{DateTime, Duration, Utc};

/// RSS 2.0 document with one `<item>` per `pubDate`, in the given order.
pub fn rss_feed(pub_dates: &[&str]) -> String {
    let items: String = pub_dates
        .iter()
        .enumerate()
        .map(|(i, date)| {
            format!(
                "    <item>\n      <title>Post {i}</title>\n      <link>https://blog.example.com/{i}</link>\n      <pubDate>{date}</pubDate>\n    </item>\n"
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">\n  <channel>\n    <title>Test Blog</title>\n{items}  </channel>\n</rss>\n"
    )
}

/// Atom document with one `<entry>` per `updated` timestamp, in the given order.
pub fn atom_feed(updated: &[&str]) -> String {
    let entries: String = updated
        .iter()
        .enumerate()
        .map(|(i, date)| {
            format!(
                "  <entry>\n    <title>Commit {i}</title>\n    <link href=\"https://example.com/commit/{i}\"/>\n    <updated>{date}</updated>\n  </entry>\n"
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<feed xmlns=\"http://www.w3.org/2005/Atom\">\n  <title>Recent Commits</title>\n{entries}</feed>\n"
    )
}

/// Atom document whose single entry was updated `days` days before `now`.
pub fn atom_feed_aged(now: DateTime<Utc>, days: i64) -> String {
    let updated = (now - Duration::days(days)).to_rfc3339();
    atom_feed(&[&updated])
}

/// HTML page advertising an RSS feed at `href`.
pub fn html_page_linking(href: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n  <title>Blog</title>\n  <link rel=\"alternate\" type=\"application/rss+xml\" title=\"RSS\" href=\"{href}\">\n</head>\n<body><h1>Blog</h1></body>\n</html>\n"
    )
}

/// Sample roster mixing every blog and repository shape.
pub fn sample_roster() -> &'static str {
    r#"
- Project Name: Observatory
  Website: https://observatory.example.org
  Contributors: Ada Lovelace, Grace Hopper
  Blog: https://blog.observatory.example.org/
  Source Code: https://github.com/example/observatory
  Wiki: https://github.com/example/observatory/wiki
  Repo:
    Type: github
    URL: https://github.com/example/observatory/commits/main.atom

- Project Name: Lighthouse
  Contributors: Alan Turing
  Blog:
    Web: https://lighthouse.example.org/news
    Feed: https://lighthouse.example.org/news.xml
  Source Code: git://lighthouse.example.org/lighthouse.git
  Repo:
    Type: git
    URL: git://lighthouse.example.org/lighthouse.git

- Project Name: Dormant
  Contributors: Grace Hopper
"#
}
