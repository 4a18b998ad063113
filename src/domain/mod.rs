//! Core domain layer. No external I/O dependencies.
//!
//! Backend records, the saved-lead key and lead statistics.

pub mod entities;
pub mod errors;
pub mod lead_key;
pub mod stats;

pub use entities::{
    CompanyProfile, DiscoveredLead, LeadPriority, LeadStatus, LeadUpdate, ProposalKind,
    ProposalText, Proposals, SaveLeadRequest, SavedCheck, SavedLead, Sector, ToneVariant,
};
pub use errors::DomainError;
pub use lead_key::{LeadKey, SavedIndex};
pub use stats::LeadStats;
