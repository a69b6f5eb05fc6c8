//! Cache module for storing fetched readings to disk
//!
//! This module provides a cache that persists each day's readings as a JSON
//! file keyed by date. Entries never expire: a given date's readings are
//! immutable historical facts. A corrupt or unreadable entry degrades to a
//! normal cache miss so the caller falls back to a re-fetch.

mod manager;

pub use manager::ReadingCache;
