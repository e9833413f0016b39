//! Step orchestration: build a request from the session, call the model,
//! run the reply through the pipeline, store the canonical record.

pub mod orchestrator;
pub mod outcome;
pub mod prompt;
pub mod session;
pub mod steps;
pub mod types;

pub use orchestrator::{Workflow, WorkflowBuilder};
pub use outcome::StepResult;
pub use prompt::DEFAULT_GOAL;
pub use session::{WorkflowEvent, WorkflowSession};
pub use steps::{GapAnalysisStep, IntegrationPlanStep, SensorSuiteStep, WorkflowStep};
pub use types::StepKind;
