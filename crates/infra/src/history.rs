//! Verification history: the latest result per report, kept for the life of
//! the process.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use waterwatch_ai::VerificationResult;
use waterwatch_core::ReportId;

/// Keyed store of verification outcomes (last write wins, no versioning).
pub trait VerificationHistory: Send + Sync {
    fn record(&self, result: VerificationResult);
    fn get(&self, report_id: &ReportId) -> Option<VerificationResult>;
    fn all(&self) -> Vec<VerificationResult>;
    fn len(&self) -> usize;
    fn clear(&self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> VerificationHistory for Arc<S>
where
    S: VerificationHistory + ?Sized,
{
    fn record(&self, result: VerificationResult) {
        (**self).record(result)
    }

    fn get(&self, report_id: &ReportId) -> Option<VerificationResult> {
        (**self).get(report_id)
    }

    fn all(&self) -> Vec<VerificationResult> {
        (**self).all()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory history. Lost on restart; never evicts.
#[derive(Debug, Default)]
pub struct InMemoryVerificationHistory {
    inner: RwLock<HashMap<ReportId, VerificationResult>>,
}

impl InMemoryVerificationHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VerificationHistory for InMemoryVerificationHistory {
    fn record(&self, result: VerificationResult) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(result.report_id, result);
        }
    }

    fn get(&self, report_id: &ReportId) -> Option<VerificationResult> {
        let map = self.inner.read().ok()?;
        map.get(report_id).cloned()
    }

    fn all(&self) -> Vec<VerificationResult> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    fn clear(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let history = InMemoryVerificationHistory::new();
        let id = ReportId::new();

        history.record(VerificationResult::rejected(id, Some("first".into()), None));
        history.record(VerificationResult::rejected(id, Some("second".into()), None));

        assert_eq!(history.len(), 1);
        assert_eq!(history.get(&id).unwrap().reason.as_deref(), Some("second"));
    }

    #[test]
    fn clear_empties_the_store() {
        let history = InMemoryVerificationHistory::new();
        history.record(VerificationResult::rejected(ReportId::new(), None, None));
        assert!(!history.is_empty());
        history.clear();
        assert!(history.is_empty());
        assert!(history.all().is_empty());
    }
}
