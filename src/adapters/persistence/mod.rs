//! Client-side persistence. A JSON key-value file holding the last discovered leads.

pub mod cache_json;

pub use cache_json::{CacheJson, DISCOVERED_LEADS_KEY};
