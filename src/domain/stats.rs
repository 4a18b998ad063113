//! Lead statistics computed from the saved-leads list.

use super::entities::{LeadPriority, LeadStatus, SavedLead};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::collections::BTreeMap;

/// Window for the "recent leads" counter.
pub const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadStats {
    pub total: usize,
    pub by_status: BTreeMap<LeadStatus, usize>,
    pub by_priority: BTreeMap<LeadPriority, usize>,
    pub recent: usize,
}

impl LeadStats {
    pub fn compute(leads: &[SavedLead], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
        let mut stats = LeadStats {
            total: leads.len(),
            ..Default::default()
        };
        for lead in leads {
            *stats.by_status.entry(lead.status).or_default() += 1;
            *stats.by_priority.entry(lead.priority).or_default() += 1;
            if parse_timestamp(&lead.discovered_at).is_some_and(|t| t >= cutoff) {
                stats.recent += 1;
            }
        }
        stats
    }

    pub fn status_count(&self, status: LeadStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    pub fn priority_count(&self, priority: LeadPriority) -> usize {
        self.by_priority.get(&priority).copied().unwrap_or(0)
    }
}

/// Backend timestamps are SQLite `CURRENT_TIMESTAMP` (UTC, no zone) or RFC 3339.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
