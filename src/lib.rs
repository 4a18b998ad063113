//! leadsense: terminal dashboard for AI-driven lead discovery, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
