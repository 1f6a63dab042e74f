//! The citizen report record and its verification lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::geo::Coordinates;
use crate::id::ReportId;
use crate::pollution::PollutionType;

/// Verification status of a report.
///
/// `Pending` is set at creation. A completed verification moves the report to
/// `Verified` or `Rejected`; re-verification may move it between the two.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    Verified,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::Verified => "Verified",
            ReportStatus::Rejected => "Rejected",
        }
    }
}

impl core::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-submitted pollution observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub photo_url: String,
    pub lat: f64,
    pub lng: f64,
    pub manual_location: Option<String>,
    pub pollution_type: PollutionType,
    pub status: ReportStatus,
    pub ai_confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// A freshly submitted report awaiting verification.
    pub fn submit(
        id: ReportId,
        photo_url: impl Into<String>,
        coordinates: Coordinates,
        manual_location: Option<String>,
        pollution_type: PollutionType,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            photo_url: photo_url.into(),
            lat: coordinates.lat,
            lng: coordinates.lng,
            manual_location,
            pollution_type,
            status: ReportStatus::Pending,
            ai_confidence: None,
            created_at,
        }
    }

    /// Apply the outcome of a verification run (last write wins).
    pub fn record_verification(&mut self, status: ReportStatus, confidence: f64) {
        self.status = status;
        self.ai_confidence = Some(confidence);
    }
}

impl Entity for Report {
    type Id = ReportId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
