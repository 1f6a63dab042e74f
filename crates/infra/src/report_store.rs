//! Report storage boundary.
//!
//! Durable storage is an external collaborator; the in-memory implementation
//! backs dev runs and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use waterwatch_core::{DomainError, DomainResult, Entity, Report, ReportId, ReportStatus};

pub trait ReportStore: Send + Sync {
    fn insert(&self, report: Report);
    fn get(&self, id: &ReportId) -> Option<Report>;
    /// Reports for the given ids; unknown ids are skipped.
    fn get_many(&self, ids: &[ReportId]) -> Vec<Report>;
    /// All reports, newest first.
    fn list(&self) -> Vec<Report>;
    fn update_verification(&self, id: &ReportId, status: ReportStatus, confidence: f64) -> DomainResult<()>;
}

impl<S> ReportStore for Arc<S>
where
    S: ReportStore + ?Sized,
{
    fn insert(&self, report: Report) {
        (**self).insert(report)
    }

    fn get(&self, id: &ReportId) -> Option<Report> {
        (**self).get(id)
    }

    fn get_many(&self, ids: &[ReportId]) -> Vec<Report> {
        (**self).get_many(ids)
    }

    fn list(&self) -> Vec<Report> {
        (**self).list()
    }

    fn update_verification(&self, id: &ReportId, status: ReportStatus, confidence: f64) -> DomainResult<()> {
        (**self).update_verification(id, status, confidence)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    inner: RwLock<HashMap<ReportId, Report>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for InMemoryReportStore {
    fn insert(&self, report: Report) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(*report.id(), report);
        }
    }

    fn get(&self, id: &ReportId) -> Option<Report> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn get_many(&self, ids: &[ReportId]) -> Vec<Report> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        ids.iter().filter_map(|id| map.get(id).cloned()).collect()
    }

    fn list(&self) -> Vec<Report> {
        let mut reports: Vec<Report> = match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => return vec![],
        };
        // UUIDv7 ids break ties between equal timestamps.
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        reports
    }

    fn update_verification(&self, id: &ReportId, status: ReportStatus, confidence: f64) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::validation("report store lock poisoned"))?;
        let report = map.get_mut(id).ok_or_else(DomainError::not_found)?;
        report.record_verification(status, confidence);
        Ok(())
    }
}
