//! Infrastructure adapters. Implement outbound ports.
//!
//! REST backend, client cache, clipboard, export, terminal UI. Map errors to DomainError.

pub mod api;
pub mod clipboard;
pub mod export;
pub mod persistence;
pub mod ui;
