//! `waterwatch-core`: domain building blocks for citizen pollution reports.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod geo;
pub mod id;
pub mod pollution;
pub mod report;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use geo::Coordinates;
pub use id::ReportId;
pub use pollution::PollutionType;
pub use report::{Report, ReportStatus};
