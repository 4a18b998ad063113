//! Saved-leads table: list, delete, statistics and CSV export.

use crate::adapters::export::write_saved_leads_csv;
use crate::domain::{LeadStats, SavedLead};
use crate::ports::LeadApiPort;
use crate::usecases::page::PageError;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub struct SavedLeadsTable {
    api: Arc<dyn LeadApiPort>,
    leads: Vec<SavedLead>,
    error: PageError,
}

impl SavedLeadsTable {
    pub fn new(api: Arc<dyn LeadApiPort>) -> Self {
        Self {
            api,
            leads: Vec::new(),
            error: PageError::default(),
        }
    }

    /// Rows in server order (newest first).
    pub fn rows(&self) -> &[SavedLead] {
        &self.leads
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    pub async fn load(&mut self) -> bool {
        let result = self.api.list_saved_leads().await;
        match self.error.capture(result) {
            Some(leads) => {
                self.leads = leads;
                true
            }
            None => false,
        }
    }

    /// Delete on the server, then drop the row. Callers confirm with the user first.
    pub async fn delete(&mut self, id: i64) -> bool {
        let result = self.api.delete_lead(id).await;
        if self.error.capture(result).is_none() {
            return false;
        }
        self.leads.retain(|l| l.id != id);
        info!(id, "lead deleted");
        true
    }

    pub fn stats(&self) -> LeadStats {
        LeadStats::compute(&self.leads, Utc::now())
    }

    pub async fn export_csv(&mut self, path: &Path) -> bool {
        let result = write_saved_leads_csv(path, &self.leads).await;
        self.error.capture(result).is_some()
    }
}

/// Badge text for a status.
pub fn status_badge(lead: &SavedLead) -> String {
    format!("[{}]", lead.status.as_str().to_uppercase())
}

/// Badge text for a priority.
pub fn priority_badge(lead: &SavedLead) -> String {
    let marks = match lead.priority {
        crate::domain::LeadPriority::Low => "!",
        crate::domain::LeadPriority::Medium => "!!",
        crate::domain::LeadPriority::High => "!!!",
    };
    format!("{} {}", marks, lead.priority)
}
