//! Core data model for daily Mass readings
//!
//! This module contains the `Reading` type shared by the fetcher and the
//! cache, the USCCB client, and the markup-to-text renderings.

pub mod readings;
pub mod render;

pub use readings::{ReadingsClient, ReadingsError, DAILY_READING_URL};

use serde::{Deserialize, Serialize};

/// One liturgical reading unit for a day
///
/// The fields mirror what the USCCB page exposes per reading block: a
/// category heading ("Reading 1", "Responsorial Psalm", "Gospel", ...), a
/// scripture citation, and the body text in two renderings. `content` keeps
/// only the author's explicit line breaks; `content_format` additionally
/// preserves the source's visual line structure (verse boundaries, response
/// markers on their own lines). Both are normalizations of the same source
/// fragment and never differ in informational content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// Category label, free-form text from the source heading
    pub title: String,
    /// Scripture citation (e.g., "Is 55:1-11")
    pub passage: String,
    /// Plain-text rendering of the reading body
    pub content: String,
    /// Line-structure-preserving rendering of the reading body
    pub content_format: String,
}

impl Reading {
    /// Identity used for list rendering within a single day's set
    ///
    /// Not globally unique across dates; a day never repeats a
    /// title/passage pair.
    pub fn id(&self) -> String {
        format!("{}{}", self.title, self.passage)
    }
}
