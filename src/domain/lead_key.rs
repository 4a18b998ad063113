//! Saved-lead membership. Best-effort de-duplication by company name + website.
//!
//! The backend does not enforce uniqueness; this index only drives the "saved" marker.

use super::entities::{DiscoveredLead, SavedLead};
use std::collections::HashSet;

/// Key derived from `company_name` + `website_url`. Trimmed and case-folded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeadKey(String);

impl LeadKey {
    pub fn new(company_name: &str, website_url: Option<&str>) -> Self {
        let name = company_name.trim().to_lowercase();
        let url = website_url
            .map(|u| u.trim().trim_end_matches('/').to_lowercase())
            .unwrap_or_default();
        Self(format!("{}\u{1f}{}", name, url))
    }

    pub fn of(lead: &DiscoveredLead) -> Self {
        Self::new(&lead.company_name, lead.website_url.as_deref())
    }
}

/// Set of keys for leads the server has confirmed as saved.
#[derive(Debug, Clone, Default)]
pub struct SavedIndex {
    keys: HashSet<LeadKey>,
}

impl SavedIndex {
    pub fn from_saved(leads: &[SavedLead]) -> Self {
        Self {
            keys: leads.iter().map(|l| LeadKey::of(&l.lead)).collect(),
        }
    }

    pub fn insert(&mut self, lead: &DiscoveredLead) {
        self.keys.insert(LeadKey::of(lead));
    }

    pub fn contains(&self, lead: &DiscoveredLead) -> bool {
        self.keys.contains(&LeadKey::of(lead))
    }

    /// Number of distinct saved keys.
    pub fn count(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(name: &str, url: Option<&str>) -> DiscoveredLead {
        DiscoveredLead {
            company_name: name.to_string(),
            website_url: url.map(str::to_string),
            ..Default::default()
        }
    }

    fn saved(id: i64, name: &str, url: Option<&str>) -> SavedLead {
        SavedLead {
            id,
            lead: lead(name, url),
            status: Default::default(),
            priority: Default::default(),
            notes: None,
            discovered_sectors: vec![],
            discovered_by_profile_id: None,
            discovered_at: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_key_is_stable_under_whitespace_and_case() {
        assert_eq!(
            LeadKey::new("  Acme GmbH ", Some("https://Acme.de/")),
            LeadKey::new("acme gmbh", Some("https://acme.de"))
        );
    }

    #[test]
    fn test_key_distinguishes_name_and_url() {
        assert_ne!(
            LeadKey::new("Acme", Some("https://a.de")),
            LeadKey::new("Acme", Some("https://b.de"))
        );
        assert_ne!(LeadKey::new("Acme", None), LeadKey::new("Acme", Some("x")));
        // Separator prevents "ab"+"c" colliding with "a"+"bc".
        assert_ne!(LeadKey::new("ab", Some("c")), LeadKey::new("a", Some("bc")));
    }

    #[test]
    fn test_index_membership_is_order_independent() {
        let a = saved(1, "Acme", Some("https://acme.de"));
        let b = saved(2, "Beta", None);
        let c = saved(3, "Gamma", Some("https://gamma.io"));

        let forward = SavedIndex::from_saved(&[a.clone(), b.clone(), c.clone()]);
        let reverse = SavedIndex::from_saved(&[c, b, a]);

        for candidate in [
            lead("acme", Some("https://acme.de")),
            lead("Beta", None),
            lead("Gamma", Some("https://gamma.io/")),
            lead("Delta", None),
        ] {
            assert_eq!(forward.contains(&candidate), reverse.contains(&candidate));
        }
        assert_eq!(forward.count(), 3);
        assert!(!forward.contains(&lead("Delta", None)));
    }

    #[test]
    fn test_insert_matches_normalized_key() {
        let mut index = SavedIndex::default();
        assert_eq!(index.count(), 0);
        index.insert(&lead("Acme", Some("https://acme.de")));
        assert!(index.contains(&lead("  ACME ", Some("https://Acme.de/"))));
        assert!(!index.contains(&lead("Acme", None)));
        assert_eq!(index.count(), 1);
    }
}
