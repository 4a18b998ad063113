//! Saved-lead detail / editor. Status, priority and notes with an explicit save/cancel cycle,
//! plus proposal regeneration with tone tabs.

use crate::domain::{
    CompanyProfile, DomainError, LeadPriority, LeadStatus, LeadUpdate, ProposalKind, SavedLead,
    ToneVariant,
};
use crate::ports::{ClipboardPort, LeadApiPort};
use crate::usecases::copy_indicator::CopyIndicator;
use crate::usecases::page::PageError;
use std::sync::Arc;
use tracing::info;

pub struct SavedLeadEditor {
    api: Arc<dyn LeadApiPort>,
    clipboard: Arc<dyn ClipboardPort>,
    lead: Option<SavedLead>,
    draft: Option<LeadUpdate>,
    tone: ToneVariant,
    copied: CopyIndicator<ProposalKind>,
    error: PageError,
}

impl SavedLeadEditor {
    /// Creates the page.
    ///
    /// # Arguments
    /// * `api` - Backend for loading, updating and regenerating.
    /// * `clipboard` - Target of the copy actions.
    pub fn new(api: Arc<dyn LeadApiPort>, clipboard: Arc<dyn ClipboardPort>) -> Self {
        Self {
            api,
            clipboard,
            lead: None,
            draft: None,
            tone: ToneVariant::Formal,
            copied: CopyIndicator::new(),
            error: PageError::default(),
        }
    }

    pub fn lead(&self) -> Option<&SavedLead> {
        self.lead.as_ref()
    }

    pub fn draft(&self) -> Option<&LeadUpdate> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    /// Fetch all saved leads and keep the one with `id`. Drops any draft and copy markers.
    pub async fn open(&mut self, id: i64) -> bool {
        self.lead = None;
        self.draft = None;
        self.copied.clear();
        let result = self.api.list_saved_leads().await.and_then(|leads| {
            leads
                .into_iter()
                .find(|l| l.id == id)
                .ok_or_else(|| DomainError::NotFound("Lead not found".to_string()))
        });
        match self.error.capture(result) {
            Some(lead) => {
                self.lead = Some(lead);
                true
            }
            None => false,
        }
    }

    /// Start editing from the lead's current values.
    pub fn begin_edit(&mut self) {
        if let Some(lead) = &self.lead {
            self.draft = Some(LeadUpdate::from_lead(lead));
        }
    }

    /// Draft setters; no-ops outside editing.
    pub fn set_status(&mut self, status: LeadStatus) {
        if let Some(d) = self.draft.as_mut() {
            d.status = status;
        }
    }

    pub fn set_priority(&mut self, priority: LeadPriority) {
        if let Some(d) = self.draft.as_mut() {
            d.priority = priority;
        }
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        if let Some(d) = self.draft.as_mut() {
            d.notes = notes.into();
        }
    }

    /// Drop the draft; the lead is untouched.
    pub fn cancel(&mut self) {
        self.draft = None;
    }

    /// Send the draft. On success the server's copy replaces the lead and editing ends.
    /// On failure the draft is kept so the user can retry or cancel.
    pub async fn save(&mut self) -> bool {
        let (Some(lead), Some(draft)) = (self.lead.as_ref(), self.draft.as_ref()) else {
            return false;
        };
        let result = self.api.update_lead(lead.id, draft).await;
        let Some(mut updated) = self.error.capture(result) else {
            return false;
        };
        info!(id = updated.id, status = %updated.status, priority = %updated.priority, "lead updated");
        // The update response does not carry regenerated proposals; keep ours.
        if let Some(current) = self.lead.take() {
            updated.lead.automation_email =
                current.lead.automation_email.or(updated.lead.automation_email);
            updated.lead.linkedin_message =
                current.lead.linkedin_message.or(updated.lead.linkedin_message);
        }
        self.lead = Some(updated);
        self.draft = None;
        true
    }

    /// Regenerate proposals for this lead. Results stay in the view; the backend has no
    /// field to persist them on.
    pub async fn regenerate(&mut self, profile: &CompanyProfile) -> bool {
        let Some(saved) = self.lead.as_mut() else {
            self.error.set("Lead not found");
            return false;
        };
        let result = self.api.generate_proposals(&saved.lead, profile).await;
        let Some(proposals) = self.error.capture(result) else {
            return false;
        };
        saved.lead.apply_proposals(proposals);
        info!(id = saved.id, "proposals regenerated");
        true
    }

    pub fn tone(&self) -> ToneVariant {
        self.tone
    }

    /// Select the tone tab.
    pub fn set_tone(&mut self, tone: ToneVariant) {
        self.tone = tone;
    }

    /// Text of the given proposal on the active tone tab.
    pub fn active_text(&self, kind: ProposalKind) -> Option<&str> {
        self.lead.as_ref()?.lead.proposal(kind)?.text_for(self.tone)
    }

    /// Copy the active tab's text and mark it copied for two seconds.
    pub async fn copy(&mut self, kind: ProposalKind) -> bool {
        let Some(text) = self.active_text(kind).map(str::to_string) else {
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

    pub fn copy_label(&self, kind: ProposalKind) -> &'static str {
        self.copied.label(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::MockLeadApi;
    use crate::adapters::clipboard::MemoryClipboard;
    use crate::domain::{DiscoveredLead, ProposalText};

    async fn setup() -> (SavedLeadEditor, Arc<MockLeadApi>, i64) {
        let api = Arc::new(MockLeadApi::with_delay(0));
        let saved = api
            .seed_saved(DiscoveredLead {
                company_name: "Acme".into(),
                automation_email: Some(ProposalText::Single("Plain email".into())),
                ..Default::default()
            })
            .await;
        let editor = SavedLeadEditor::new(api.clone(), Arc::new(MemoryClipboard::new()));
        (editor, api, saved.id)
    }

    #[tokio::test]
    async fn test_open_unknown_id() {
        let (mut editor, _api, _id) = setup().await;
        assert!(!editor.open(12345).await);
        assert_eq!(editor.error(), Some("Lead not found"));
    }

    #[tokio::test]
    async fn test_edit_save_cycle() {
        let (mut editor, api, id) = setup().await;
        assert!(editor.open(id).await);
        editor.begin_edit();
        editor.set_status(LeadStatus::Contacted);
        editor.set_priority(LeadPriority::High);
        editor.set_notes("Met at fair");
        assert!(editor.save().await);
        assert!(!editor.is_editing());

        let lead = editor.lead().unwrap();
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.priority, LeadPriority::High);
        assert_eq!(lead.notes.as_deref(), Some("Met at fair"));

        let server = api.list_saved_leads().await.unwrap();
        assert_eq!(server[0].status, LeadStatus::Contacted);
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let (mut editor, api, id) = setup().await;
        editor.open(id).await;
        editor.begin_edit();
        editor.set_status(LeadStatus::Rejected);
        editor.cancel();
        assert!(!editor.save().await);
        assert_eq!(editor.lead().unwrap().status, LeadStatus::New);
        assert!(!api.calls().await.contains(&"update_lead"));
    }

    #[tokio::test]
    async fn test_single_string_shown_on_every_tab_until_regenerated() {
        let (mut editor, _api, id) = setup().await;
        editor.open(id).await;
        for tone in ToneVariant::ALL {
            editor.set_tone(tone);
            assert_eq!(editor.active_text(ProposalKind::Email), Some("Plain email"));
        }
        assert_eq!(editor.active_text(ProposalKind::LinkedIn), None);

        assert!(editor.regenerate(&CompanyProfile::default()).await);
        editor.set_tone(ToneVariant::Formal);
        let formal = editor.active_text(ProposalKind::Email).unwrap().to_string();
        editor.set_tone(ToneVariant::Informal);
        let informal = editor.active_text(ProposalKind::Email).unwrap().to_string();
        assert_ne!(formal, informal);
        assert!(informal.contains("Hey Acme!"));
    }

    #[tokio::test]
    async fn test_opening_another_lead_clears_copy_marker() {
        let (mut editor, api, id) = setup().await;
        let other = api
            .seed_saved(DiscoveredLead {
                company_name: "Beta".into(),
                automation_email: Some(ProposalText::Single("Other email".into())),
                ..Default::default()
            })
            .await;
        editor.open(id).await;
        assert!(editor.copy(ProposalKind::Email).await);
        assert_eq!(editor.copy_label(ProposalKind::Email), "Copied!");

        assert!(editor.open(other.id).await);
        assert_eq!(editor.copy_label(ProposalKind::Email), "Copy");
    }

    #[tokio::test]
    async fn test_regenerated_proposals_survive_save() {
        let (mut editor, _api, id) = setup().await;
        editor.open(id).await;
        editor.regenerate(&CompanyProfile::default()).await;
        editor.begin_edit();
        editor.set_notes("x");
        assert!(editor.save().await);
        assert!(editor.lead().unwrap().lead.linkedin_message.is_some());
        assert!(editor.copy(ProposalKind::LinkedIn).await);
        assert_eq!(editor.copy_label(ProposalKind::LinkedIn), "Copied!");
    }
}
