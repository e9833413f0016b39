//! Canonical records produced by the three workflow steps.
//!
//! These structs define the JSON shape handed to the next step and to the
//! renderer. Every list and map defaults to empty so consumers never have to
//! special-case a missing key.

mod gap;
mod measure;
mod plan;
mod sensor;

use serde::{Deserialize, Serialize};

use crate::workflow::StepKind;

pub use gap::{Axis, GapAnalysisRecord, GapDimension, GapLevel, PriorityGap};
pub use plan::{
    ConstellationEntry, FusionDesign, GapClosure, IntegrationPlanRecord, RiskMitigation,
    RoadmapPhase, SupplementaryAsset,
};
pub use sensor::{CapabilitySummary, Platform, SensorEntry, SensorSuiteRecord};

/// Use case definition fed into the first step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UseCase {
    pub name: String,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub issues: String,
}

impl UseCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
    }
}

/// Normalized output of any step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalRecord {
    SensorSuite(SensorSuiteRecord),
    GapAnalysis(GapAnalysisRecord),
    IntegrationPlan(IntegrationPlanRecord),
}

impl CanonicalRecord {
    pub fn step(&self) -> StepKind {
        match self {
            CanonicalRecord::SensorSuite(_) => StepKind::SensorSuite,
            CanonicalRecord::GapAnalysis(_) => StepKind::GapAnalysis,
            CanonicalRecord::IntegrationPlan(_) => StepKind::IntegrationPlan,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Records hold only strings, numbers and string-keyed maps.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests;
