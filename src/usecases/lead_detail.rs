//! Lead detail for a discovered lead: saved state, proposal generation and copy-to-clipboard.

use crate::domain::{CompanyProfile, DiscoveredLead, LeadKey, ProposalKind, ToneVariant};
use crate::ports::{ClipboardPort, LeadApiPort, LeadCachePort};
use crate::usecases::copy_indicator::CopyIndicator;
use crate::usecases::page::PageError;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the detail view gets its lead from.
#[derive(Debug, Clone)]
pub enum LeadSource {
    /// Passed along by the table; `index` is its position in the cached list, if known.
    Navigation {
        lead: DiscoveredLead,
        index: Option<usize>,
    },
    /// Only a position in the cached list is known (e.g. after a restart).
    CacheIndex(usize),
}

pub struct LeadDetail {
    api: Arc<dyn LeadApiPort>,
    cache: Arc<dyn LeadCachePort>,
    clipboard: Arc<dyn ClipboardPort>,
    lead: Option<DiscoveredLead>,
    cache_index: Option<usize>,
    saved_id: Option<i64>,
    tone: ToneVariant,
    copied: CopyIndicator<ProposalKind>,
    error: PageError,
}

impl LeadDetail {
    /// Creates the page.
    ///
    /// # Arguments
    /// * `api` - Backend for proposals, the saved check and saving.
    /// * `cache` - Discovered-leads cache; fallback source and write-back target.
    /// * `clipboard` - Target of the copy actions.
    pub fn new(
        api: Arc<dyn LeadApiPort>,
        cache: Arc<dyn LeadCachePort>,
        clipboard: Arc<dyn ClipboardPort>,
    ) -> Self {
        Self {
            api,
            cache,
            clipboard,
            lead: None,
            cache_index: None,
            saved_id: None,
            tone: ToneVariant::Formal,
            copied: CopyIndicator::new(),
            error: PageError::default(),
        }
    }

    pub fn lead(&self) -> Option<&DiscoveredLead> {
        self.lead.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    /// Backend id when the open lead is already saved.
    pub fn saved_id(&self) -> Option<i64> {
        self.saved_id
    }

    pub fn tone(&self) -> ToneVariant {
        self.tone
    }

    pub fn set_tone(&mut self, tone: ToneVariant) {
        self.tone = tone;
    }

    /// Resolve the lead, then ask the backend whether it is already saved.
    ///
    /// Navigation state wins; the client cache is the fallback. Copy markers from the
    /// previously open lead are dropped.
    pub async fn open(&mut self, source: LeadSource) -> bool {
        self.lead = None;
        self.cache_index = None;
        self.saved_id = None;
        self.copied.clear();
        match source {
            LeadSource::Navigation { lead, index } => {
                self.lead = Some(lead);
                self.cache_index = index;
                self.error.clear();
            }
            LeadSource::CacheIndex(index) => {
                let result = self.cache.load_discovered().await;
                let Some(mut leads) = self.error.capture(result) else {
                    return false;
                };
                if index >= leads.len() {
                    self.error.set("Lead not found");
                    return false;
                }
                debug!(index, "lead recovered from cache");
                self.lead = Some(leads.swap_remove(index));
                self.cache_index = Some(index);
            }
        }
        self.check_saved().await;
        true
    }

    /// Saved state is informational; a failed check leaves the lead unmarked.
    async fn check_saved(&mut self) {
        let Some(lead) = self.lead.as_ref() else {
            return;
        };
        match self
            .api
            .check_saved(&lead.company_name, lead.website_url.as_deref())
            .await
        {
            Ok(check) => self.saved_id = check.lead_id.filter(|_| check.is_saved),
            Err(e) => warn!(error = %e, "saved check failed"),
        }
    }

    /// Save the open lead with the given sector names.
    ///
    /// A 409 means the backend already has it: the message is surfaced and the saved id
    /// is looked up again. Returns the saved id, if known.
    pub async fn save(&mut self, sector_names: &[String]) -> Option<i64> {
        let Some(lead) = self.lead.as_ref() else {
            self.error.set("Lead not found");
            return None;
        };
        if self.saved_id.is_some() {
            return self.saved_id;
        }
        match self.api.save_lead(lead, sector_names).await {
            Ok(saved) => {
                info!(id = saved.id, company = %saved.lead.company_name, "lead saved");
                self.error.clear();
                self.saved_id = Some(saved.id);
            }
            Err(e) if e.is_conflict() => {
                self.error.set(e.to_string());
                self.check_saved().await;
            }
            Err(e) => {
                self.error.capture::<()>(Err(e));
            }
        }
        self.saved_id
    }

    /// Generate email + LinkedIn proposals and keep them on the lead (and its cache entry).
    pub async fn generate(&mut self, profile: &CompanyProfile) -> bool {
        let Some(lead) = self.lead.as_mut() else {
            self.error.set("Lead not found");
            return false;
        };
        let result = self.api.generate_proposals(lead, profile).await;
        let Some(proposals) = self.error.capture(result) else {
            return false;
        };
        lead.apply_proposals(proposals);
        info!(company = %lead.company_name, "proposals generated");

        let Some(index) = self.cache_index else {
            return true;
        };
        let updated = lead.clone();
        let result = self.cache.load_discovered().await;
        let Some(mut cached) = self.error.capture(result) else {
            return false;
        };
        // Only overwrite the entry if the cached list still holds this lead at that position.
        match cached.get_mut(index) {
            Some(entry) if LeadKey::of(entry) == LeadKey::of(&updated) => {
                *entry = updated;
                let stored = self.cache.store_discovered(&cached).await;
                self.error.capture(stored).is_some()
            }
            _ => true,
        }
    }

    /// Text of the given proposal for the active tone.
    pub fn proposal_text(&self, kind: ProposalKind) -> Option<&str> {
        self.lead.as_ref()?.proposal(kind)?.text_for(self.tone)
    }

    /// Copy the active proposal text and mark it copied for two seconds.
    pub async fn copy(&mut self, kind: ProposalKind) -> bool {
        let Some(text) = self.proposal_text(kind).map(str::to_string) else {
            self.error.set(format!("No {} to copy yet", kind));
            return false;
        };
        let result = self.clipboard.copy(&text).await;
        if self.error.capture(result).is_none() {
            return false;
        }
        self.copied.mark(kind);
        true
    }

    /// "Copied!" for two seconds after a copy, "Copy" otherwise.
    pub fn copy_label(&self, kind: ProposalKind) -> &'static str {
        self.copied.label(kind)
    }
}
