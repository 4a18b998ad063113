//! Sector selector. Backend-supplied sectors plus a client-side set of selected ids.

use crate::domain::{CompanyProfile, Sector};
use crate::ports::LeadApiPort;
use crate::usecases::page::PageError;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

pub struct SectorSelector {
    api: Arc<dyn LeadApiPort>,
    sectors: Vec<Sector>,
    selected: BTreeSet<i64>,
    error: PageError,
}

impl SectorSelector {
    pub fn new(api: Arc<dyn LeadApiPort>) -> Self {
        Self {
            api,
            sectors: Vec::new(),
            selected: BTreeSet::new(),
            error: PageError::default(),
        }
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn error(&self) -> Option<&str> {
        self.error.message()
    }

    /// List sectors already known to the backend.
    pub async fn load(&mut self) -> bool {
        let result = self.api.list_sectors().await;
        match self.error.capture(result) {
            Some(sectors) => {
                self.replace(sectors);
                true
            }
            None => false,
        }
    }

    /// Re-run sector identification against the current profile.
    pub async fn refresh(&mut self, profile: &CompanyProfile) -> bool {
        let result = self.api.identify_sectors(profile).await;
        match self.error.capture(result) {
            Some(sectors) => {
                info!(count = sectors.len(), "sectors identified");
                self.replace(sectors);
                true
            }
            None => false,
        }
    }

    /// Swap in a new list; selected ids that no longer exist are dropped.
    fn replace(&mut self, sectors: Vec<Sector>) {
        let ids: BTreeSet<i64> = sectors.iter().map(|s| s.id).collect();
        self.selected.retain(|id| ids.contains(id));
        self.sectors = sectors;
    }

    /// Flip one sector in or out of the selection.
    pub fn toggle(&mut self, id: i64) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Replace the selection (e.g. from a multi-select prompt). Unknown ids are ignored.
    pub fn set_selected(&mut self, ids: impl IntoIterator<Item = i64>) {
        let known: BTreeSet<i64> = self.sectors.iter().map(|s| s.id).collect();
        self.selected = ids.into_iter().filter(|id| known.contains(id)).collect();
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Names of the selected sectors, in display order.
    pub fn selected_names(&self) -> Vec<String> {
        self.sectors
            .iter()
            .filter(|s| self.selected.contains(&s.id))
            .map(|s| s.name.clone())
            .collect()
    }
}
