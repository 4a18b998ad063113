//! Application use cases. One page model per dashboard view; each drives the ports and
//! keeps its own state plus a page-level error message.

pub mod copy_indicator;
pub mod lead_detail;
pub mod lead_discovery;
pub mod page;
pub mod profile_editor;
pub mod saved_lead_editor;
pub mod saved_leads_table;
pub mod sector_selector;

pub use copy_indicator::CopyIndicator;
pub use lead_detail::{LeadDetail, LeadSource};
pub use lead_discovery::LeadDiscovery;
pub use page::PageError;
pub use profile_editor::{ProfileEditor, ProfileField, SaveOutcome};
pub use saved_lead_editor::SavedLeadEditor;
pub use saved_leads_table::SavedLeadsTable;
pub use sector_selector::SectorSelector;
