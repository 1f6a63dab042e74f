//! Pollution categories reported by citizens.

use serde::{Deserialize, Serialize};

/// Category of a reported pollution incident.
///
/// The recognised set is closed; anything else is kept verbatim as
/// [`PollutionType::Unrecognized`] so it round-trips to storage unchanged and
/// scores with the neutral default confidence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PollutionType {
    Oil,
    Plastic,
    Sewage,
    Turbidity,
    Unrecognized(String),
}

impl PollutionType {
    pub fn as_str(&self) -> &str {
        match self {
            PollutionType::Oil => "oil",
            PollutionType::Plastic => "plastic",
            PollutionType::Sewage => "sewage",
            PollutionType::Turbidity => "turbidity",
            PollutionType::Unrecognized(raw) => raw.as_str(),
        }
    }
}

impl From<&str> for PollutionType {
    fn from(value: &str) -> Self {
        match value {
            "oil" => PollutionType::Oil,
            "plastic" => PollutionType::Plastic,
            "sewage" => PollutionType::Sewage,
            "turbidity" => PollutionType::Turbidity,
            other => PollutionType::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for PollutionType {
    fn from(value: String) -> Self {
        match PollutionType::from(value.as_str()) {
            PollutionType::Unrecognized(_) => PollutionType::Unrecognized(value),
            known => known,
        }
    }
}

impl From<PollutionType> for String {
    fn from(value: PollutionType) -> Self {
        match value {
            PollutionType::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for PollutionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
