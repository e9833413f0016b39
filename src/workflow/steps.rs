use serde_json::{Value, json};

use crate::config::ModelSettings;
use crate::error::WorkflowError;

use super::prompt::{
    DEFAULT_GOAL, GAP_ANALYSIS_SYSTEM_PROMPT, INTEGRATION_PLAN_SYSTEM_PROMPT,
    SENSOR_SUITE_SYSTEM_PROMPT,
};
use super::session::WorkflowSession;
use super::types::StepKind;

/// One request/response step of the workflow.
///
/// A step only knows how to phrase its request; calling the model and
/// post-processing the reply is the orchestrator's job.
pub trait WorkflowStep: Send + Sync {
    fn kind(&self) -> StepKind;

    fn system_prompt(&self) -> &str;

    fn max_tokens(&self, settings: &ModelSettings) -> u32;

    /// JSON user message built from the session's inputs and prior records.
    fn build_payload(&self, session: &WorkflowSession) -> Result<Value, WorkflowError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SensorSuiteStep;

impl WorkflowStep for SensorSuiteStep {
    fn kind(&self) -> StepKind {
        StepKind::SensorSuite
    }

    fn system_prompt(&self) -> &str {
        SENSOR_SUITE_SYSTEM_PROMPT
    }

    fn max_tokens(&self, settings: &ModelSettings) -> u32 {
        settings.sensor_suite_max_tokens
    }

    fn build_payload(&self, session: &WorkflowSession) -> Result<Value, WorkflowError> {
        let use_case = &session.use_case;
        if use_case.is_empty() {
            return Err(WorkflowError::missing_prerequisite(
                "a use case is required before generating a sensor suite",
            ));
        }

        Ok(json!({
            "usecase": use_case.name,
            "context": {
                "background": use_case.background,
                "question": use_case.question,
                "issues": use_case.issues,
            }
        }))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GapAnalysisStep;

impl WorkflowStep for GapAnalysisStep {
    fn kind(&self) -> StepKind {
        StepKind::GapAnalysis
    }

    fn system_prompt(&self) -> &str {
        GAP_ANALYSIS_SYSTEM_PROMPT
    }

    fn max_tokens(&self, settings: &ModelSettings) -> u32 {
        settings.gap_analysis_max_tokens
    }

    fn build_payload(&self, session: &WorkflowSession) -> Result<Value, WorkflowError> {
        let suite = session.sensor_suite().ok_or_else(|| {
            WorkflowError::missing_prerequisite("run the sensor suite step before the gap analysis")
        })?;
        let goal = session.goal.as_deref().unwrap_or(DEFAULT_GOAL);

        Ok(json!({
            "sensor_suite_output": suite,
            "goal": goal,
        }))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IntegrationPlanStep;

impl WorkflowStep for IntegrationPlanStep {
    fn kind(&self) -> StepKind {
        StepKind::IntegrationPlan
    }

    fn system_prompt(&self) -> &str {
        INTEGRATION_PLAN_SYSTEM_PROMPT
    }

    fn max_tokens(&self, settings: &ModelSettings) -> u32 {
        settings.integration_plan_max_tokens
    }

    fn build_payload(&self, session: &WorkflowSession) -> Result<Value, WorkflowError> {
        let suite = session.sensor_suite().ok_or_else(|| {
            WorkflowError::missing_prerequisite(
                "run the sensor suite step before the integration plan",
            )
        })?;
        let gaps = session.gap_analysis().ok_or_else(|| {
            WorkflowError::missing_prerequisite(
                "run the gap analysis step before the integration plan",
            )
        })?;

        Ok(json!({
            "sensor_suite_output": suite,
            "gap_analysis_output": gaps,
        }))
    }
}
