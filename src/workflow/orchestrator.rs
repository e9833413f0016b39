use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::client::{CompletionOptions, CompletionRequest, HttpClientFactory, LlmClientFactory};
use crate::error::{ErrorSignal, WorkflowError};
use crate::pipeline::{self, Processed};
use crate::records::CanonicalRecord;

use super::outcome::StepResult;
use super::session::{WorkflowEvent, WorkflowSession};
use super::steps::{GapAnalysisStep, IntegrationPlanStep, SensorSuiteStep, WorkflowStep};
use super::types::StepKind;

pub struct Workflow {
    steps: Vec<Box<dyn WorkflowStep>>,
    factory: Arc<dyn LlmClientFactory>,
}

impl Workflow {
    pub fn new(steps: Vec<Box<dyn WorkflowStep>>, factory: Arc<dyn LlmClientFactory>) -> Self {
        Self { steps, factory }
    }

    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Runs one step against the session. Failures come back as
    /// [`StepResult::Error`] and leave the stored records untouched.
    pub async fn run_step(&self, kind: StepKind, session: &mut WorkflowSession) -> StepResult {
        session.record_step_start(kind);

        let outcome = match self.steps.iter().find(|step| step.kind() == kind) {
            Some(step) => self.execute(step.as_ref(), session).await,
            None => Err(WorkflowError::configuration(format!(
                "no {kind} step is registered with this workflow"
            ))),
        };

        match outcome {
            Ok(record) => {
                session.store(record.clone());
                session.record_step_end(kind);
                StepResult::Ok(record)
            }
            Err(err) => {
                error!(step = %kind, kind = ?err.kind(), "step failed: {err}");
                session.record_step_failure(kind, err.to_string());
                StepResult::Error(ErrorSignal::from(&err))
            }
        }
    }

    /// Runs every registered step in order, stopping at the first failure.
    pub async fn run_all(&self, session: &mut WorkflowSession) -> Vec<StepResult> {
        let mut results = Vec::with_capacity(self.steps.len());
        for kind in self.steps.iter().map(|step| step.kind()).collect::<Vec<_>>() {
            let result = self.run_step(kind, session).await;
            let failed = !result.is_ok();
            results.push(result);
            if failed {
                break;
            }
        }
        results
    }

    async fn execute(
        &self,
        step: &dyn WorkflowStep,
        session: &mut WorkflowSession,
    ) -> Result<CanonicalRecord, WorkflowError> {
        let kind = step.kind();
        let payload = step.build_payload(session)?;

        let client = session
            .llm_client(self.factory.as_ref())
            .map_err(|err| WorkflowError::configuration(format!("{err:#}")))?;

        let models = &session.config.models;
        let request = CompletionRequest {
            system_prompt: step.system_prompt().to_string(),
            user_payload: payload.to_string(),
            model: models.model.clone(),
            options: CompletionOptions {
                temperature: models.temperature,
                max_tokens: step.max_tokens(models),
            },
        };

        info!(step = %kind, model = %request.model, "requesting completion");
        let raw = client
            .complete(&request)
            .await
            .map_err(|err| WorkflowError::transport(format!("{err:#}")))?;
        debug!(step = %kind, response_chars = raw.chars().count(), "completion received");

        let Processed {
            record,
            warnings,
            corrections,
        } = pipeline::process(&raw, kind)?;

        for warning in warnings {
            warn!(step = %kind, field = %warning.field, "{}", warning.message);
            session.record_event(WorkflowEvent::SchemaWarning(warning));
        }

        if !corrections.is_empty() {
            info!(step = %kind, count = corrections.len(), "replaced implausible sensor facts");
            session.record_event(WorkflowEvent::FactsCorrected {
                step: kind,
                count: corrections.len(),
            });
        }

        Ok(record)
    }
}

pub struct WorkflowBuilder {
    steps: Vec<Box<dyn WorkflowStep>>,
    factory: Option<Arc<dyn LlmClientFactory>>,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            factory: None,
        }
    }

    pub fn add_step<S>(mut self, step: S) -> Self
    where
        S: WorkflowStep + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    pub fn with_default_steps(self) -> Self {
        self.add_step(SensorSuiteStep)
            .add_step(GapAnalysisStep)
            .add_step(IntegrationPlanStep)
    }

    pub fn with_client_factory<F>(mut self, factory: F) -> Self
    where
        F: LlmClientFactory + 'static,
    {
        let factory: Arc<dyn LlmClientFactory> = Arc::new(factory);
        self.factory = Some(factory);
        self
    }

    pub fn build(self) -> Workflow {
        let factory = self
            .factory
            .unwrap_or_else(|| Arc::new(HttpClientFactory) as Arc<dyn LlmClientFactory>);
        Workflow::new(self.steps, factory)
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Workflow {
    fn default() -> Self {
        WorkflowBuilder::new().with_default_steps().build()
    }
}
