//! Transient "copied" marker for copy-to-clipboard actions.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;

/// How long a copy action stays marked as "copied".
pub const COPIED_RESET: Duration = Duration::from_secs(2);

/// Tracks which targets were copied recently. Each mark expires after `COPIED_RESET`.
#[derive(Debug)]
pub struct CopyIndicator<K> {
    marked: HashMap<K, Instant>,
    reset_after: Duration,
}

impl<K: Eq + Hash + Copy> CopyIndicator<K> {
    pub fn new() -> Self {
        Self {
            marked: HashMap::new(),
            reset_after: COPIED_RESET,
        }
    }

    /// Forget every mark, e.g. when the view switches to another lead.
    pub fn clear(&mut self) {
        self.marked.clear();
    }

    pub fn mark(&mut self, key: K) {
        self.marked.insert(key, Instant::now());
    }

    pub fn is_copied(&self, key: K) -> bool {
        self.marked
            .get(&key)
            .is_some_and(|at| at.elapsed() < self.reset_after)
    }

    /// Label shown next to the copy action.
    pub fn label(&self, key: K) -> &'static str {
        if self.is_copied(key) { "Copied!" } else { "Copy" }
    }
}

impl<K: Eq + Hash + Copy> Default for CopyIndicator<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProposalKind;

    #[tokio::test(start_paused = true)]
    async fn test_indicator_resets_after_two_seconds() {
        let mut indicator = CopyIndicator::new();
        assert!(!indicator.is_copied(ProposalKind::Email));

        indicator.mark(ProposalKind::Email);
        assert!(indicator.is_copied(ProposalKind::Email));
        assert_eq!(indicator.label(ProposalKind::Email), "Copied!");
        assert!(!indicator.is_copied(ProposalKind::LinkedIn));

        tokio::time::advance(Duration::from_millis(1999)).await;
        assert!(indicator.is_copied(ProposalKind::Email));

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!indicator.is_copied(ProposalKind::Email));
        assert_eq!(indicator.label(ProposalKind::Email), "Copy");
    }

    #[tokio::test(start_paused = true)]
    async fn test_remark_restarts_timer() {
        let mut indicator = CopyIndicator::new();
        indicator.mark(ProposalKind::LinkedIn);
        tokio::time::advance(Duration::from_millis(1500)).await;
        indicator.mark(ProposalKind::LinkedIn);
        tokio::time::advance(Duration::from_millis(1500)).await;
        assert!(indicator.is_copied(ProposalKind::LinkedIn));
    }
}
