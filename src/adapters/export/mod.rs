//! Export adapters. Saved leads to CSV.

pub mod csv_export;

pub use csv_export::{saved_leads_to_csv, write_saved_leads_csv};
