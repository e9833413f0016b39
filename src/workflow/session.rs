use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::client::{DynLlmClient, LlmClientFactory};
use crate::config::Config;
use crate::pipeline::SchemaWarning;
use crate::records::{
    CanonicalRecord, GapAnalysisRecord, IntegrationPlanRecord, SensorSuiteRecord, UseCase,
};

use super::types::StepKind;

/// Per-run state: inputs, the latest record of each step, and an audit log.
///
/// Every step reads and writes through `&mut WorkflowSession`, so there is
/// exactly one authoritative record per step at any time.
#[derive(Clone)]
pub struct WorkflowSession {
    pub config: Config,
    pub use_case: UseCase,
    pub goal: Option<String>,
    sensor_suite: Option<SensorSuiteRecord>,
    gap_analysis: Option<GapAnalysisRecord>,
    integration_plan: Option<IntegrationPlanRecord>,
    events: Vec<WorkflowEvent>,
    llm_client: Option<Arc<DynLlmClient>>,
}

impl fmt::Debug for WorkflowSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowSession")
            .field("use_case", &self.use_case)
            .field("goal", &self.goal)
            .field("sensor_suite", &self.sensor_suite)
            .field("gap_analysis", &self.gap_analysis)
            .field("integration_plan", &self.integration_plan)
            .field("events", &self.events)
            .finish()
    }
}

impl WorkflowSession {
    pub fn new(config: Config, use_case: UseCase) -> Self {
        Self {
            config,
            use_case,
            goal: None,
            sensor_suite: None,
            gap_analysis: None,
            integration_plan: None,
            events: Vec::new(),
            llm_client: None,
        }
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        let goal = goal.into();
        self.goal = (!goal.trim().is_empty()).then_some(goal);
        self
    }

    /// Installs a ready-made client; the factory is then never consulted.
    pub fn with_client(mut self, client: Arc<DynLlmClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    pub fn llm_client<F>(&mut self, factory: &F) -> Result<Arc<DynLlmClient>>
    where
        F: LlmClientFactory + ?Sized,
    {
        if let Some(client) = &self.llm_client {
            return Ok(client.clone());
        }

        let client = factory.build(&self.config.llm)?;
        self.llm_client = Some(client.clone());
        Ok(client)
    }

    pub fn sensor_suite(&self) -> Option<&SensorSuiteRecord> {
        self.sensor_suite.as_ref()
    }

    pub fn gap_analysis(&self) -> Option<&GapAnalysisRecord> {
        self.gap_analysis.as_ref()
    }

    pub fn integration_plan(&self) -> Option<&IntegrationPlanRecord> {
        self.integration_plan.as_ref()
    }

    pub fn record(&self, step: StepKind) -> Option<CanonicalRecord> {
        match step {
            StepKind::SensorSuite => self.sensor_suite.clone().map(CanonicalRecord::SensorSuite),
            StepKind::GapAnalysis => self.gap_analysis.clone().map(CanonicalRecord::GapAnalysis),
            StepKind::IntegrationPlan => self
                .integration_plan
                .clone()
                .map(CanonicalRecord::IntegrationPlan),
        }
    }

    /// Replaces the record for its step and drops records derived from the old one.
    pub fn store(&mut self, record: CanonicalRecord) {
        let step = record.step();
        match record {
            CanonicalRecord::SensorSuite(suite) => {
                self.sensor_suite = Some(suite);
                self.gap_analysis = None;
                self.integration_plan = None;
            }
            CanonicalRecord::GapAnalysis(gaps) => {
                self.gap_analysis = Some(gaps);
                self.integration_plan = None;
            }
            CanonicalRecord::IntegrationPlan(plan) => {
                self.integration_plan = Some(plan);
            }
        }
        info!(step = %step, "stored canonical record");
        self.record_event(WorkflowEvent::RecordStored(step));
    }

    pub fn events(&self) -> &[WorkflowEvent] {
        &self.events
    }

    pub fn record_event(&mut self, event: WorkflowEvent) {
        self.events.push(event);
    }

    pub fn record_step_start(&mut self, step: StepKind) {
        self.record_event(WorkflowEvent::StepStarted(step));
    }

    pub fn record_step_end(&mut self, step: StepKind) {
        self.record_event(WorkflowEvent::StepCompleted(step));
    }

    pub fn record_step_failure(&mut self, step: StepKind, error: impl Into<String>) {
        self.record_event(WorkflowEvent::StepFailed {
            step,
            error: error.into(),
        });
    }
}

/// Audit events appended while steps run.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    StepStarted(StepKind),
    StepCompleted(StepKind),
    StepFailed { step: StepKind, error: String },
    SchemaWarning(SchemaWarning),
    FactsCorrected { step: StepKind, count: usize },
    RecordStored(StepKind),
}
