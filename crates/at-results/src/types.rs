//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub case_id: String,
    pub timestamp: String,
    /// Case kind tag, e.g. `Conduction` or `Nozzle`
    pub case_kind: String,
    pub solver_version: String,
    /// Output files written next to the manifest, relative to the run directory
    #[serde(default)]
    pub files: Vec<String>,
    /// Scalar headline numbers (iterations, max temperature, ...)
    #[serde(default)]
    pub summary: Vec<SummaryValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryValue {
    pub name: String,
    pub value: f64,
}

impl SummaryValue {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// RFC 3339 UTC timestamp for manifests.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339()
}
