//! Domain entities. Plain records exchanged verbatim with the lead backend.
//!
//! No HTTP/IO types here. Field names match the backend's JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The user's own company. `id` is `None` until the backend has persisted it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub company_name: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub team_size: u32,
    #[serde(default)]
    pub core_services: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub special_offer: String,
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<String>,
}

/// A market category suggested by the backend as a lead-generation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub relevance_reason: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Tone of a generated outreach message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneVariant {
    Formal,
    SemiFormal,
    Informal,
}

impl ToneVariant {
    pub const ALL: [ToneVariant; 3] = [
        ToneVariant::Formal,
        ToneVariant::SemiFormal,
        ToneVariant::Informal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ToneVariant::Formal => "Formal",
            ToneVariant::SemiFormal => "Semi-formal",
            ToneVariant::Informal => "Informal",
        }
    }
}

impl fmt::Display for ToneVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// AI-generated outreach text: either one string or one string per tone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProposalText {
    Single(String),
    Variants(BTreeMap<ToneVariant, String>),
}

impl ProposalText {
    /// Text for the given tone. A single-string proposal answers every tone.
    pub fn text_for(&self, tone: ToneVariant) -> Option<&str> {
        match self {
            ProposalText::Single(s) => Some(s.as_str()),
            ProposalText::Variants(map) => map.get(&tone).map(String::as_str),
        }
    }

    pub fn has_variants(&self) -> bool {
        matches!(self, ProposalText::Variants(_))
    }
}

/// Which of the two outreach messages a proposal action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalKind {
    Email,
    LinkedIn,
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalKind::Email => f.write_str("Email"),
            ProposalKind::LinkedIn => f.write_str("LinkedIn message"),
        }
    }
}

/// Response of the proposal generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposals {
    pub automation_email: ProposalText,
    pub linkedin_message: ProposalText,
}

/// A lead returned by discovery. No stable id; cached by array position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredLead {
    pub company_name: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub automation_proposal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation_email: Option<ProposalText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_message: Option<ProposalText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl DiscoveredLead {
    pub fn proposal(&self, kind: ProposalKind) -> Option<&ProposalText> {
        match kind {
            ProposalKind::Email => self.automation_email.as_ref(),
            ProposalKind::LinkedIn => self.linkedin_message.as_ref(),
        }
    }

    pub fn apply_proposals(&mut self, proposals: Proposals) {
        self.automation_email = Some(proposals.automation_email);
        self.linkedin_message = Some(proposals.linkedin_message);
    }
}

/// Pipeline status of a saved lead. The backend stores free text here, so decoding is
/// lenient: case-insensitive, and anything unknown reads as `New`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Rejected,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Rejected => "rejected",
        }
    }
}

impl<'de> Deserialize<'de> for LeadStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(lenient(&LeadStatus::ALL, &raw, LeadStatus::as_str))
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a saved lead. Decoded like `LeadStatus`; unknown values read as `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl LeadPriority {
    pub const ALL: [LeadPriority; 3] = [LeadPriority::Low, LeadPriority::Medium, LeadPriority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadPriority::Low => "low",
            LeadPriority::Medium => "medium",
            LeadPriority::High => "high",
        }
    }
}

impl<'de> Deserialize<'de> for LeadPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(lenient(&LeadPriority::ALL, &raw, LeadPriority::as_str))
    }
}

/// Case-insensitive match against `as_str`; the default when nothing matches.
fn lenient<T: Copy + Default>(all: &[T], raw: &str, as_str: fn(T) -> &'static str) -> T {
    let raw = raw.trim();
    all.iter()
        .copied()
        .find(|v| as_str(*v).eq_ignore_ascii_case(raw))
        .unwrap_or_default()
}

impl fmt::Display for LeadPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lead persisted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLead {
    pub id: i64,
    #[serde(flatten)]
    pub lead: DiscoveredLead,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub priority: LeadPriority,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "sector_list")]
    pub discovered_sectors: Vec<String>,
    #[serde(default)]
    pub discovered_by_profile_id: Option<i64>,
    pub discovered_at: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Accepts `["a","b"]`, a JSON-encoded string `"[\"a\",\"b\"]"`, or null.
fn sector_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Encoded(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Raw::List(v)) => Ok(v),
        Some(Raw::Encoded(s)) if s.trim().is_empty() => Ok(Vec::new()),
        Some(Raw::Encoded(s)) => serde_json::from_str(&s).map_err(serde::de::Error::custom),
    }
}

/// Body of `POST /leads/save`.
#[derive(Debug, Clone, Serialize)]
pub struct SaveLeadRequest<'a> {
    pub lead: &'a DiscoveredLead,
    pub discovered_sectors: &'a [String],
}

/// Body of `PUT /leads/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadUpdate {
    pub status: LeadStatus,
    pub priority: LeadPriority,
    #[serde(default)]
    pub notes: String,
}

impl LeadUpdate {
    pub fn from_lead(lead: &SavedLead) -> Self {
        Self {
            status: lead.status,
            priority: lead.priority,
            notes: lead.notes.clone().unwrap_or_default(),
        }
    }
}

/// Response of `GET /leads/check-saved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SavedCheck {
    pub is_saved: bool,
    pub lead_id: Option<i64>,
}
