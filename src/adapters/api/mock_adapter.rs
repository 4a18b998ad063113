//! In-memory lead backend for offline use and tests.
//!
//! Mirrors the REST contract (ids, 404/409 responses, timestamps) without network or AI calls.
//! Simulates network latency with a configurable delay.

use crate::domain::{
    CompanyProfile, DiscoveredLead, DomainError, LeadKey, LeadUpdate, ProposalText, Proposals,
    SavedCheck, SavedLead, Sector, ToneVariant,
};
use crate::ports::LeadApiPort;
use chrono::Utc;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Default)]
struct MockState {
    profiles: Vec<CompanyProfile>,
    sectors: Vec<Sector>,
    saved: Vec<SavedLead>,
    next_id: i64,
    calls: Vec<&'static str>,
}

impl MockState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn sector_named(&mut self, name: &str, reason: &str) -> Sector {
        if let Some(s) = self.sectors.iter().find(|s| s.name == name) {
            return s.clone();
        }
        let sector = Sector {
            id: self.next_id(),
            name: name.to_string(),
            relevance_reason: Some(reason.to_string()),
            description: None,
        };
        self.sectors.push(sector.clone());
        sector
    }
}

/// Mock lead backend.
pub struct MockLeadApi {
    state: Mutex<MockState>,
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockLeadApi {
    /// Create a new mock backend with default delay (100ms).
    pub fn new() -> Self {
        Self::with_delay(100)
    }

    /// Create a mock backend with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            delay_ms,
        }
    }

    /// Names of the operations called so far, in order.
    pub async fn calls(&self) -> Vec<&'static str> {
        self.state.lock().await.calls.clone()
    }

    /// Pre-populate a persisted lead (as if saved earlier).
    pub async fn seed_saved(&self, lead: DiscoveredLead) -> SavedLead {
        let mut state = self.state.lock().await;
        let saved = new_saved(state.next_id(), lead, Vec::new());
        state.saved.push(saved.clone());
        saved
    }

    async fn enter(&self, op: &'static str) -> tokio::sync::MutexGuard<'_, MockState> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        let mut state = self.state.lock().await;
        state.calls.push(op);
        state
    }
}

impl Default for MockLeadApi {
    fn default() -> Self {
        Self::new()
    }
}

fn now_stamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn new_saved(id: i64, lead: DiscoveredLead, sectors: Vec<String>) -> SavedLead {
    let stamp = now_stamp();
    SavedLead {
        id,
        lead,
        status: Default::default(),
        priority: Default::default(),
        notes: None,
        discovered_sectors: sectors,
        discovered_by_profile_id: None,
        discovered_at: stamp.clone(),
        created_at: stamp.clone(),
        updated_at: stamp,
    }
}

fn not_found(what: &str) -> DomainError {
    DomainError::Api {
        status: 404,
        message: format!("{} not found", what),
    }
}

fn variants(texts: [String; 3]) -> ProposalText {
    let map: BTreeMap<ToneVariant, String> = ToneVariant::ALL.into_iter().zip(texts).collect();
    ProposalText::Variants(map)
}

#[async_trait::async_trait]
impl LeadApiPort for MockLeadApi {
    async fn identify_sectors(&self, profile: &CompanyProfile) -> Result<Vec<Sector>, DomainError> {
        let mut state = self.enter("identify_sectors").await;
        info!(company = %profile.company_name, "[MOCK] Simulating sector identification");
        let mut names: Vec<String> = profile
            .core_services
            .iter()
            .map(|s| format!("{} buyers", s.trim()))
            .collect();
        if names.is_empty() {
            names = vec![
                "Logistics".to_string(),
                "Retail".to_string(),
                "Healthcare".to_string(),
            ];
        }
        let reason = format!("[MOCK] Fits the services of {}", profile.company_name);
        Ok(names
            .iter()
            .map(|n| state.sector_named(n, &reason))
            .collect())
    }

    async fn list_sectors(&self) -> Result<Vec<Sector>, DomainError> {
        let state = self.enter("list_sectors").await;
        Ok(state.sectors.clone())
    }

    async fn list_profiles(&self) -> Result<Vec<CompanyProfile>, DomainError> {
        let state = self.enter("list_profiles").await;
        Ok(state.profiles.clone())
    }

    async fn create_profile(&self, profile: &CompanyProfile) -> Result<CompanyProfile, DomainError> {
        let mut state = self.enter("create_profile").await;
        let stamp = now_stamp();
        let created = CompanyProfile {
            id: Some(state.next_id()),
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
            ..profile.clone()
        };
        state.profiles.push(created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: i64,
        profile: &CompanyProfile,
    ) -> Result<CompanyProfile, DomainError> {
        let mut state = self.enter("update_profile").await;
        let existing = state
            .profiles
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| not_found("Company profile"))?;
        *existing = CompanyProfile {
            id: Some(id),
            created_at: existing.created_at.clone(),
            updated_at: Some(now_stamp()),
            ..profile.clone()
        };
        Ok(existing.clone())
    }

    async fn discover_leads(
        &self,
        sectors: &[String],
        profile: &CompanyProfile,
    ) -> Result<Vec<DiscoveredLead>, DomainError> {
        let _state = self.enter("discover_leads").await;
        info!(sectors = sectors.len(), "[MOCK] Simulating lead discovery");
        Ok(sectors
            .iter()
            .enumerate()
            .map(|(i, sector)| {
                let name = format!("{} Example Co {}", sector, i + 1);
                let slug: String = name
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase();
                DiscoveredLead {
                    company_name: name.clone(),
                    website_url: Some(format!("https://{}.example", slug)),
                    address: Some(String::new()),
                    contact_email: Some(String::new()),
                    phone_number: Some(String::new()),
                    description: Some(format!("[MOCK] A company in {}", sector)),
                    automation_proposal: Some(format!(
                        "[MOCK] {} could automate manual work at {}",
                        profile.company_name, name
                    )),
                    sector: Some(sector.clone()),
                    location: Some(profile.location.clone()),
                    confidence_score: Some(0.5),
                    ..Default::default()
                }
            })
            .collect())
    }

    async fn generate_proposals(
        &self,
        lead: &DiscoveredLead,
        profile: &CompanyProfile,
    ) -> Result<Proposals, DomainError> {
        let _state = self.enter("generate_proposals").await;
        info!(lead = %lead.company_name, "[MOCK] Simulating proposal generation");
        let (to, from) = (&lead.company_name, &profile.company_name);
        Ok(Proposals {
            automation_email: variants([
                format!("**Subject:** Automation for {to}\n\nDear {to} team,\n\n{from} would like to propose ..."),
                format!("**Subject:** Quick idea for {to}\n\nHello {to} team,\n\nWe at {from} ..."),
                format!("**Subject:** Hey {to}!\n\nHi folks, {from} here ..."),
            ]),
            linkedin_message: variants([
                format!("Dear {to} team, {from} would welcome a conversation."),
                format!("Hello {to}, {from} here. Open to a chat?"),
                format!("Hey {to}! {from} here, let's connect."),
            ]),
        })
    }

    async fn list_saved_leads(&self) -> Result<Vec<SavedLead>, DomainError> {
        let state = self.enter("list_saved_leads").await;
        Ok(state.saved.iter().rev().cloned().collect())
    }

    async fn check_saved(
        &self,
        company_name: &str,
        website_url: Option<&str>,
    ) -> Result<SavedCheck, DomainError> {
        let state = self.enter("check_saved").await;
        let hit = state.saved.iter().find(|s| {
            s.lead.company_name.eq_ignore_ascii_case(company_name)
                && website_url.is_none_or(|u| s.lead.website_url.as_deref() == Some(u))
        });
        Ok(SavedCheck {
            is_saved: hit.is_some(),
            lead_id: hit.map(|s| s.id),
        })
    }

    async fn save_lead(
        &self,
        lead: &DiscoveredLead,
        discovered_sectors: &[String],
    ) -> Result<SavedLead, DomainError> {
        let mut state = self.enter("save_lead").await;
        let key = LeadKey::of(lead);
        if state.saved.iter().any(|s| LeadKey::of(&s.lead) == key) {
            return Err(DomainError::Api {
                status: 409,
                message: "Lead already saved".to_string(),
            });
        }
        let mut saved = new_saved(state.next_id(), lead.clone(), discovered_sectors.to_vec());
        saved.discovered_by_profile_id = state.profiles.first().and_then(|p| p.id);
        state.saved.push(saved.clone());
        Ok(saved)
    }

    async fn update_lead(&self, id: i64, update: &LeadUpdate) -> Result<SavedLead, DomainError> {
        let mut state = self.enter("update_lead").await;
        let lead = state
            .saved
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("Lead"))?;
        lead.status = update.status;
        lead.priority = update.priority;
        lead.notes = Some(update.notes.clone());
        lead.updated_at = now_stamp();
        Ok(lead.clone())
    }

    async fn delete_lead(&self, id: i64) -> Result<(), DomainError> {
        let mut state = self.enter("delete_lead").await;
        let before = state.saved.len();
        state.saved.retain(|s| s.id != id);
        if state.saved.len() == before {
            return Err(not_found("Lead"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str) -> DiscoveredLead {
        DiscoveredLead {
            company_name: name.to_string(),
            website_url: Some(format!("https://{}.de", name.to_lowercase())),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_mock_save_rejects_duplicates() {
        let api = MockLeadApi::with_delay(0);
        api.save_lead(&lead("Acme"), &[]).await.unwrap();
        let err = api.save_lead(&lead("ACME"), &[]).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(api.list_saved_leads().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_proposals_have_all_tones() {
        let api = MockLeadApi::with_delay(0);
        let proposals = api
            .generate_proposals(&lead("Acme"), &CompanyProfile::default())
            .await
            .unwrap();
        for tone in ToneVariant::ALL {
            assert!(proposals.automation_email.text_for(tone).is_some());
            assert!(proposals.linkedin_message.text_for(tone).is_some());
        }
    }

    #[tokio::test]
    async fn test_mock_delete_missing_is_404() {
        let api = MockLeadApi::with_delay(0);
        let err = api.delete_lead(99).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Lead not found");
    }
}
