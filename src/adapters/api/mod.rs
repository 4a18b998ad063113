//! Lead backend adapters. Implement LeadApiPort.
//!
//! Provides the reqwest REST client and an in-memory backend for offline use and tests.

pub mod http_client;
pub mod mock_adapter;

pub use http_client::HttpLeadApi;
pub use mock_adapter::MockLeadApi;
