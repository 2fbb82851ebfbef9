//! sitemaps.org XML rendering.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::config::ChangeFrequency;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` record.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<ChangeFrequency>,
    pub priority: Option<f64>,
}

impl UrlEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

/// Whether `c` may appear in an XML 1.0 document.
pub fn is_xml_char(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => true,
        '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' => true,
        '\u{10000}'..='\u{10FFFF}' => true,
        _ => false,
    }
}

/// Whether every character of `raw` may appear in an XML 1.0 document.
pub fn is_xml_safe(raw: &str) -> bool {
    raw.chars().all(is_xml_char)
}

/// Escapes the five XML special characters and drops characters XML 1.0
/// cannot represent. Borrows when nothing needs changing.
pub fn escape_xml(raw: &str) -> Cow<'_, str> {
    if raw
        .chars()
        .all(|c| is_xml_char(c) && !matches!(c, '&' | '<' | '>' | '"' | '\''))
    {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 16);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if !is_xml_char(c) => {}
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Renders a `<url>` block. Optional children are left out entirely when unset.
pub fn render_url_entry(entry: &UrlEntry) -> String {
    let mut out = String::from("  <url>\n");
    out.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
    if let Some(lastmod) = &entry.lastmod {
        out.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(lastmod)));
    }
    if let Some(changefreq) = entry.changefreq {
        out.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
    }
    if let Some(priority) = entry.priority {
        out.push_str(&format!("    <priority>{priority}</priority>\n"));
    }
    out.push_str("  </url>\n");
    out
}

/// Renders a complete sitemap document.
pub fn render_urlset(entries: &[UrlEntry]) -> String {
    let mut out = format!("{XML_DECLARATION}\n<urlset xmlns=\"{SITEMAP_NAMESPACE}\">\n");
    for entry in entries {
        out.push_str(&render_url_entry(entry));
    }
    out.push_str("</urlset>");
    out
}

/// `lastmod` date (YYYY-MM-DD) from a raw `updatedAt` value, falling back to
/// `today` when it is missing or unparsable.
pub fn lastmod_date(updated_at: Option<&str>, today: NaiveDate) -> String {
    updated_at
        .and_then(parse_date)
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}
