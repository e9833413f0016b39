use std::fmt;

use serde::{Deserialize, Serialize};

/// The three steps of the advisory workflow, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    SensorSuite,
    GapAnalysis,
    IntegrationPlan,
}

impl StepKind {
    pub const ALL: [StepKind; 3] = [
        StepKind::SensorSuite,
        StepKind::GapAnalysis,
        StepKind::IntegrationPlan,
    ];

    pub fn title(self) -> &'static str {
        match self {
            StepKind::SensorSuite => "Satellite sensor suite",
            StepKind::GapAnalysis => "Gap analysis",
            StepKind::IntegrationPlan => "Integrated observation plan",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::SensorSuite => "sensor_suite",
            StepKind::GapAnalysis => "gap_analysis",
            StepKind::IntegrationPlan => "integration_plan",
        };
        write!(f, "{label}")
    }
}
