//! Daily readings client for the USCCB website
//!
//! Fetches the readings page for a calendar date, extracts the reading
//! blocks with CSS selection, and persists results through the per-date
//! cache so each day is scraped at most once.

use chrono::NaiveDate;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, warn};

use super::{render, Reading};
use crate::cache::ReadingCache;

/// Canonical readings page for a human reader
///
/// Callers link here as a fallback when a fetch fails or a day has no
/// extractable readings.
pub const DAILY_READING_URL: &str = "https://bible.usccb.org/daily-bible-reading";

/// Base URL for per-date readings pages
const BASE_URL: &str = "https://bible.usccb.org/bible/readings";

/// Errors that can occur when fetching daily readings
#[derive(Debug, Error)]
pub enum ReadingsError {
    /// HTTP transport failed (unreachable host, DNS failure, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not decodable text
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The document or a selector could not be parsed
    #[error("Parsing error: {0}")]
    Parse(String),
}

/// Client for fetching daily readings from the USCCB website
///
/// Holds an HTTP client, an optional cache, and the base URL (overridable
/// for tests). One instance per process, passed by reference to callers;
/// nothing here is a global.
#[derive(Debug, Clone)]
pub struct ReadingsClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Cache for persisting fetched days
    cache: Option<ReadingCache>,
    /// Base URL for readings pages (allows override for testing)
    base_url: String,
}

impl ReadingsClient {
    /// Creates a new ReadingsClient with the default cache location
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            cache: ReadingCache::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Creates a new ReadingsClient with a custom cache
    pub fn with_cache(cache: ReadingCache) -> Self {
        Self {
            http_client: Client::new(),
            cache: Some(cache),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Creates a new ReadingsClient with no cache attached
    ///
    /// Every call hits the network; useful for callers that manage their
    /// own persistence.
    pub fn uncached() -> Self {
        Self {
            http_client: Client::new(),
            cache: None,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Overrides the base URL for readings pages (for testing against a
    /// local server)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Builds the page URL for a date
    ///
    /// The date is formatted as 2-digit month, day, and year, e.g.
    /// "012725" for Jan 27, 2025.
    fn reading_url(&self, date: NaiveDate) -> String {
        format!("{}/{}.cfm", self.base_url, date.format("%m%d%y"))
    }

    /// Returns the readings for a date, from cache when available
    ///
    /// # Behavior
    /// - Checks the cache first and returns a hit as-is
    /// - On a miss, fetches and parses the remote page
    /// - A successful fetch (including an empty day) is written back to the
    ///   cache; a write failure is logged, not surfaced
    /// - A failed fetch leaves the cache untouched
    ///
    /// Concurrent calls for the same uncached date are not coalesced; both
    /// fetch and the last cache write wins, which is benign since both hold
    /// the same day's readings.
    pub async fn daily_readings(&self, date: NaiveDate) -> Result<Vec<Reading>, ReadingsError> {
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.load(date) {
                debug!(%date, count = cached.len(), "serving readings from cache");
                return Ok(cached);
            }
        }

        let readings = self.fetch(date).await?;

        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.save(date, &readings) {
                warn!(%date, error = %e, "failed to cache readings");
            }
        }

        Ok(readings)
    }

    /// Fetches and parses the readings page for a date, bypassing the cache
    ///
    /// # Returns
    /// * `Ok(readings)` - the day's readings, possibly empty if the page has
    ///   no matching blocks (the remote structure legitimately omits content
    ///   on some days)
    /// * `Err(ReadingsError)` - transport, decode, or parse failure; no
    ///   retries are attempted
    pub async fn fetch(&self, date: NaiveDate) -> Result<Vec<Reading>, ReadingsError> {
        let url = self.reading_url(date);
        debug!(%url, "fetching daily readings");

        let response = self.http_client.get(&url).send().await?;
        let body = response.bytes().await?;
        let html = String::from_utf8(body.to_vec())
            .map_err(|e| ReadingsError::Decode(e.to_string()))?;

        parse_readings(&html)
    }
}

impl Default for ReadingsClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts reading blocks from a readings page document
///
/// Every `div.innerblock` on the page is a content card; per card the
/// category title comes from `h3.name`, the citation from `div.address`,
/// and the body from the inner HTML of `div.content-body`. Cards whose
/// title names no liturgical category are dropped.
fn parse_readings(html: &str) -> Result<Vec<Reading>, ReadingsError> {
    let block_sel = selector("div.innerblock")?;
    let title_sel = selector("h3.name")?;
    let passage_sel = selector("div.address")?;
    let body_sel = selector("div.content-body")?;

    let document = Html::parse_document(html);
    let mut readings = Vec::new();

    for block in document.select(&block_sel) {
        let title = collapsed_text(block.select(&title_sel));
        if !is_relevant(&title) {
            continue;
        }

        let passage = collapsed_text(block.select(&passage_sel));
        let body_html: String = block.select(&body_sel).map(|el| el.inner_html()).collect();

        readings.push(Reading {
            title,
            passage,
            content: render::plain_text(&body_html),
            content_format: render::structured_text(&body_html),
        });
    }

    Ok(readings)
}

fn selector(css: &str) -> Result<Selector, ReadingsError> {
    Selector::parse(css).map_err(|e| ReadingsError::Parse(e.to_string()))
}

/// A block is a reading only if its heading names a liturgical category;
/// sibling blocks (footers, promos) share the same structural class.
/// Matching is a case-sensitive substring check.
fn is_relevant(title: &str) -> bool {
    title.contains("Reading") || title.contains("Psalm") || title.contains("Gospel")
}

/// Joins element text with HTML whitespace normalization
fn collapsed_text<'a>(elements: impl Iterator<Item = ElementRef<'a>>) -> String {
    elements
        .flat_map(|el| el.text())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// A representative readings page: two readings, a psalm, a gospel,
    /// and an unrelated card sharing the same structural class.
    const SAMPLE_PAGE: &str = r#"
        <html><body>
        <div class="innerblock">
            <h3 class="name">Reading 1</h3>
            <div class="address">Is 55:1-11</div>
            <div class="content-body"><p>Thus says the LORD:<br />All you who are thirsty,<br />come to the water!</p></div>
        </div>
        <div class="innerblock">
            <h3 class="name">Responsorial Psalm</h3>
            <div class="address">Is 12:2-6</div>
            <div class="content-body"><p><strong>R. You will draw water joyfully.</strong><br />God indeed is my savior.</p></div>
        </div>
        <div class="innerblock">
            <h3 class="name">Advertisement</h3>
            <div class="address"></div>
            <div class="content-body"><p>Buy our study bible.</p></div>
        </div>
        <div class="innerblock">
            <h3 class="name">Gospel</h3>
            <div class="address">Mk 1:7-11</div>
            <div class="content-body"><p>This is what John the Baptist proclaimed.</p></div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_extracts_reading_blocks_in_order() {
        let readings = parse_readings(SAMPLE_PAGE).unwrap();

        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].title, "Reading 1");
        assert_eq!(readings[0].passage, "Is 55:1-11");
        assert_eq!(readings[1].title, "Responsorial Psalm");
        assert_eq!(readings[2].title, "Gospel");
    }

    #[test]
    fn test_parse_excludes_blocks_without_liturgical_title() {
        let readings = parse_readings(SAMPLE_PAGE).unwrap();

        assert!(
            readings.iter().all(|r| r.title != "Advertisement"),
            "Non-reading card should be filtered out"
        );
    }

    #[test]
    fn test_parse_produces_both_renderings() {
        let readings = parse_readings(SAMPLE_PAGE).unwrap();

        assert_eq!(
            readings[0].content,
            "Thus says the LORD:\nAll you who are thirsty,\ncome to the water!"
        );
        assert_eq!(
            readings[1].content_format,
            "\nR. You will draw water joyfully.\n\nGod indeed is my savior."
        );
    }

    #[test]
    fn test_parse_with_no_matching_blocks_yields_empty() {
        let readings =
            parse_readings("<html><body><p>Nothing scheduled today.</p></body></html>").unwrap();

        assert!(readings.is_empty(), "No blocks should parse to an empty day");
    }

    #[test]
    fn test_is_relevant_matches_liturgical_categories() {
        assert!(is_relevant("Reading 1"));
        assert!(is_relevant("Reading 2"));
        assert!(is_relevant("Responsorial Psalm"));
        assert!(is_relevant("Gospel"));
        assert!(is_relevant("Alleluia Before the Gospel"));
    }

    #[test]
    fn test_is_relevant_is_case_sensitive_substring_match() {
        assert!(!is_relevant("Advertisement"));
        assert!(!is_relevant("gospel reflection"));
        assert!(!is_relevant("Footer"));
    }

    #[test]
    fn test_reading_url_uses_two_digit_date_pattern() {
        let client = ReadingsClient::uncached();

        assert_eq!(
            client.reading_url(date(2025, 1, 27)),
            "https://bible.usccb.org/bible/readings/012725.cfm"
        );
        assert_eq!(
            client.reading_url(date(2024, 12, 3)),
            "https://bible.usccb.org/bible/readings/120324.cfm"
        );
    }

    #[test]
    fn test_base_url_override() {
        let client = ReadingsClient::uncached().base_url("http://localhost:8080/readings");

        assert_eq!(
            client.reading_url(date(2025, 1, 27)),
            "http://localhost:8080/readings/012725.cfm"
        );
    }

    #[test]
    fn test_collapsed_text_normalizes_whitespace() {
        let html = Html::parse_fragment("<h3 class=\"name\">Reading  1\n        </h3>");
        let sel = selector("h3.name").unwrap();

        assert_eq!(collapsed_text(html.select(&sel)), "Reading 1");
    }
}
