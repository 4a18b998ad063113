//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    CompanyProfile, DiscoveredLead, DomainError, LeadUpdate, Proposals, SavedCheck, SavedLead,
    Sector,
};

/// Lead backend REST API. Sector identification, profiles, discovery, saved leads, proposals.
#[async_trait::async_trait]
pub trait LeadApiPort: Send + Sync {
    /// Run sector identification for the given profile.
    async fn identify_sectors(&self, profile: &CompanyProfile) -> Result<Vec<Sector>, DomainError>;

    /// List every sector the backend knows about.
    async fn list_sectors(&self) -> Result<Vec<Sector>, DomainError>;

    async fn list_profiles(&self) -> Result<Vec<CompanyProfile>, DomainError>;

    async fn create_profile(&self, profile: &CompanyProfile) -> Result<CompanyProfile, DomainError>;

    async fn update_profile(
        &self,
        id: i64,
        profile: &CompanyProfile,
    ) -> Result<CompanyProfile, DomainError>;

    /// Discover leads for the given sector names. Slow: runs the whole AI pipeline.
    async fn discover_leads(
        &self,
        sectors: &[String],
        profile: &CompanyProfile,
    ) -> Result<Vec<DiscoveredLead>, DomainError>;

    /// Generate email + LinkedIn proposals (tone variants) for one lead.
    async fn generate_proposals(
        &self,
        lead: &DiscoveredLead,
        profile: &CompanyProfile,
    ) -> Result<Proposals, DomainError>;

    async fn list_saved_leads(&self) -> Result<Vec<SavedLead>, DomainError>;

    /// Whether the backend already holds a lead with this name (and website).
    async fn check_saved(
        &self,
        company_name: &str,
        website_url: Option<&str>,
    ) -> Result<SavedCheck, DomainError>;

    /// Persist a discovered lead. 409 when the backend already has it.
    async fn save_lead(
        &self,
        lead: &DiscoveredLead,
        discovered_sectors: &[String],
    ) -> Result<SavedLead, DomainError>;

    async fn update_lead(&self, id: i64, update: &LeadUpdate) -> Result<SavedLead, DomainError>;

    async fn delete_lead(&self, id: i64) -> Result<(), DomainError>;
}

/// Persisted client-side cache of the last discovered-leads list.
#[async_trait::async_trait]
pub trait LeadCachePort: Send + Sync {
    /// Last stored list. Empty when nothing was cached.
    async fn load_discovered(&self) -> Result<Vec<DiscoveredLead>, DomainError>;

    /// Replace the cached list.
    async fn store_discovered(&self, leads: &[DiscoveredLead]) -> Result<(), DomainError>;
}

/// System clipboard.
#[async_trait::async_trait]
pub trait ClipboardPort: Send + Sync {
    async fn copy(&self, text: &str) -> Result<(), DomainError>;
}
