//! Infrastructure layer: external gateways, in-process stores and the
//! verification orchestrator that ties them to the scoring core.

pub mod config;
pub mod gateway;
pub mod history;
pub mod report_store;
pub mod verification;

pub use config::{AnalyzerKind, ConfigError, GatewayConfig};
pub use history::{InMemoryVerificationHistory, VerificationHistory};
pub use report_store::{InMemoryReportStore, ReportStore};
pub use verification::{SimulationDelay, VerificationError, VerificationOrchestrator, VerificationRequest};
