//! Lead discovery and the discovered-leads table.
//!
//! Keeps the cached list, the in-memory list and the saved-lead index in step:
//! - discovery replaces both the list and the persisted cache
//! - the saved index is rebuilt from the server and extended on each successful save

use crate::domain::{CompanyProfile, DiscoveredLead, LeadKey, SavedIndex, SavedLead};
use crate::ports::{LeadApiPort, LeadCachePort};
use crate::usecases::page::PageError;
use std::sync::Arc;
use tracing::{debug, info};

pub struct LeadDiscovery {
    api: Arc<dyn LeadApiPort>,
    cache: Arc<dyn LeadCachePort>,
    leads: Vec<DiscoveredLead>,
    saved: SavedIndex,
    error: PageError,
}

impl LeadDiscovery {
    pub fn new(api: Arc<dyn LeadApiPort>, cache: Arc<dyn LeadCachePort>) -> Self {
        Self {
            api,
            cache,
            leads: Vec::new(),
            saved: SavedIndex::default(),
            error: PageError::default(),
        }
    }

    pub fn rows(&self) -> &[DiscoveredLead] {
        &self.leads
    }

    pub fn lead(&self, index: usize) -> Option<&DiscoveredLead> {
        self.leads.get(index)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    pub fn is_saved(&self, index: usize) -> bool {
        self.leads
            .get(index)
            .is_some_and(|lead| self.saved.contains(lead))
    }

    /// Reload the list from the client cache. Returns the number of rows.
    pub async fn restore(&mut self) -> usize {
        let result = self.cache.load_discovered().await;
        if let Some(leads) = self.error.capture(result) {
            self.leads = leads;
        }
        self.leads.len()
    }

    /// Rebuild the saved index from the server's saved leads.
    ///
    /// Runs alongside other actions, so success leaves an earlier page error in place.
    pub async fn refresh_saved_index(&mut self) -> bool {
        match self.api.list_saved_leads().await {
            Ok(saved) => {
                self.saved = SavedIndex::from_saved(&saved);
                debug!(saved = self.saved.count(), "saved index rebuilt");
                true
            }
            Err(e) => {
                self.error.capture::<()>(Err(e));
                false
            }
        }
    }

    /// Run discovery for the selected sectors. The result replaces the list and the cache.
    ///
    /// Returns `true` once the backend answered; a failed cache write is only reported
    /// through `error()` and the rows stay available.
    pub async fn discover(&mut self, profile: &CompanyProfile, sector_names: &[String]) -> bool {
        if sector_names.is_empty() {
            self.error.set("Select at least one sector before discovering leads");
            return false;
        }
        let result = self.api.discover_leads(sector_names, profile).await;
        let Some(leads) = self.error.capture(result) else {
            return false;
        };
        info!(count = leads.len(), sectors = sector_names.len(), "leads discovered");
        self.leads = leads;
        let stored = self.cache.store_discovered(&self.leads).await;
        self.error.capture(stored);
        true
    }

    /// Replace row `index` with an edited copy of the same lead (e.g. with proposals).
    /// Ignored when the row now holds a different lead.
    pub fn update_row(&mut self, index: usize, lead: DiscoveredLead) {
        if let Some(row) = self.leads.get_mut(index) {
            if LeadKey::of(row) == LeadKey::of(&lead) {
                *row = lead;
            }
        }
    }

    /// Save one row with the currently selected sector names.
    ///
    /// A 409 from the server means it already has the lead: the row is marked saved and
    /// the server's message is still surfaced.
    pub async fn save_row(&mut self, index: usize, sector_names: &[String]) -> Option<SavedLead> {
        let Some(lead) = self.leads.get(index) else {
            self.error.set("Lead not found");
            return None;
        };
        let result = self.api.save_lead(lead, sector_names).await;
        if let Err(e) = &result {
            if e.is_conflict() {
                self.saved.insert(lead);
            }
        }
        let saved = self.error.capture(result)?;
        info!(id = saved.id, company = %saved.lead.company_name, "lead saved");
        self.saved.insert(lead);
        Some(saved)
    }
}
