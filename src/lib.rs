//! Lectio
//!
//! A library for fetching, parsing, and caching the daily Mass readings
//! published on the USCCB website. UI layers call [`ReadingsClient`] with a
//! calendar date and get back the day's readings, served from a per-date
//! disk cache when available.

pub mod cache;
pub mod data;

pub use cache::ReadingCache;
pub use data::{Reading, ReadingsClient, ReadingsError, DAILY_READING_URL};
