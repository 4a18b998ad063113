//! Profile editor. Edit-in-place of the company profile; save creates or updates.

use crate::domain::CompanyProfile;
use crate::ports::LeadApiPort;
use crate::usecases::page::PageError;
use std::sync::Arc;
use tracing::info;

/// Editable profile fields. Values arrive as raw text from the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    CompanyName,
    Location,
    Description,
    TeamSize,
    CoreServices,
    Languages,
    SpecialOffer,
}

impl ProfileField {
    pub const ALL: [ProfileField; 7] = [
        ProfileField::CompanyName,
        ProfileField::Location,
        ProfileField::Description,
        ProfileField::TeamSize,
        ProfileField::CoreServices,
        ProfileField::Languages,
        ProfileField::SpecialOffer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileField::CompanyName => "Company name",
            ProfileField::Location => "Location",
            ProfileField::Description => "Description",
            ProfileField::TeamSize => "Team size",
            ProfileField::CoreServices => "Core services (comma separated)",
            ProfileField::Languages => "Languages (comma separated)",
            ProfileField::SpecialOffer => "Special offer (optional)",
        }
    }
}

/// Which request a save issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Numeric coercion for the team size field. Anything unparsable becomes 0.
pub fn coerce_team_size(raw: &str) -> u32 {
    let raw = raw.trim();
    raw.parse::<u32>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u32))
        .unwrap_or(0)
}

/// Split comma-separated input into trimmed, non-empty items.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct ProfileEditor {
    api: Arc<dyn LeadApiPort>,
    profile: CompanyProfile,
    error: PageError,
}

impl ProfileEditor {
    pub fn new(api: Arc<dyn LeadApiPort>) -> Self {
        Self {
            api,
            profile: CompanyProfile::default(),
            error: PageError::default(),
        }
    }

    pub fn profile(&self) -> &CompanyProfile {
        &self.profile
    }

    pub fn id(&self) -> Option<i64> {
        self.profile.id
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    /// Current value of a field, formatted for the form.
    pub fn field_value(&self, field: ProfileField) -> String {
        let p = &self.profile;
        match field {
            ProfileField::CompanyName => p.company_name.clone(),
            ProfileField::Location => p.location.clone(),
            ProfileField::Description => p.description.clone(),
            ProfileField::TeamSize => p.team_size.to_string(),
            ProfileField::CoreServices => p.core_services.join(", "),
            ProfileField::Languages => p.languages.join(", "),
            ProfileField::SpecialOffer => p.special_offer.clone(),
        }
    }

    pub fn set_field(&mut self, field: ProfileField, raw: &str) {
        let p = &mut self.profile;
        match field {
            ProfileField::CompanyName => p.company_name = raw.to_string(),
            ProfileField::Location => p.location = raw.to_string(),
            ProfileField::Description => p.description = raw.to_string(),
            ProfileField::TeamSize => p.team_size = coerce_team_size(raw),
            ProfileField::CoreServices => p.core_services = split_list(raw),
            ProfileField::Languages => p.languages = split_list(raw),
            ProfileField::SpecialOffer => p.special_offer = raw.to_string(),
        }
    }

    /// Load the first persisted profile, if the backend has one. Returns whether one was found.
    pub async fn load(&mut self) -> bool {
        let result = self.api.list_profiles().await;
        match self.error.capture(result) {
            Some(profiles) => match profiles.into_iter().next() {
                Some(profile) => {
                    info!(id = ?profile.id, "loaded company profile");
                    self.profile = profile;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// PUT when an id is known, POST otherwise. The server's copy (with id) replaces ours.
    pub async fn save(&mut self) -> Option<SaveOutcome> {
        let (outcome, result) = match self.profile.id {
            Some(id) => (
                SaveOutcome::Updated,
                self.api.update_profile(id, &self.profile).await,
            ),
            None => (
                SaveOutcome::Created,
                self.api.create_profile(&self.profile).await,
            ),
        };
        let saved = self.error.capture(result)?;
        info!(id = ?saved.id, ?outcome, "company profile saved");
        self.profile = saved;
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::MockLeadApi;

    #[test]
    fn test_coerce_team_size() {
        assert_eq!(coerce_team_size("12"), 12);
        assert_eq!(coerce_team_size(" 7 "), 7);
        assert_eq!(coerce_team_size("3.9"), 3);
        assert_eq!(coerce_team_size("a dozen"), 0);
        assert_eq!(coerce_team_size("-4"), 0);
        assert_eq!(coerce_team_size(""), 0);
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("RPA, AI agents ,,"), vec!["RPA", "AI agents"]);
        assert!(split_list("  ").is_empty());
    }

    #[tokio::test]
    async fn test_save_creates_then_updates() {
        let api = Arc::new(MockLeadApi::with_delay(0));
        let mut editor = ProfileEditor::new(api.clone());
        editor.set_field(ProfileField::CompanyName, "Studio");
        editor.set_field(ProfileField::TeamSize, "five");

        assert_eq!(editor.save().await, Some(SaveOutcome::Created));
        let id = editor.id().expect("id assigned after create");
        assert_eq!(editor.profile().team_size, 0);

        editor.set_field(ProfileField::Location, "Hamburg");
        assert_eq!(editor.save().await, Some(SaveOutcome::Updated));
        assert_eq!(editor.id(), Some(id));
        assert_eq!(editor.profile().location, "Hamburg");

        assert_eq!(api.calls().await, vec!["create_profile", "update_profile"]);
    }

    #[tokio::test]
    async fn test_load_picks_first_profile() {
        let api = Arc::new(MockLeadApi::with_delay(0));
        let mut first = ProfileEditor::new(api.clone());
        first.set_field(ProfileField::CompanyName, "Studio");
        first.save().await.unwrap();

        let mut editor = ProfileEditor::new(api);
        assert!(editor.load().await);
        assert_eq!(editor.profile().company_name, "Studio");
        assert_eq!(editor.field_value(ProfileField::CompanyName), "Studio");
    }

    #[tokio::test]
    async fn test_update_failure_is_surfaced() {
        let api = Arc::new(MockLeadApi::with_delay(0));
        let mut editor = ProfileEditor::new(api);
        editor.profile.id = Some(77);
        assert_eq!(editor.save().await, None);
        assert_eq!(editor.error(), Some("Company profile not found"));
        assert_eq!(editor.id(), Some(77));
    }
}
