use serde::Serialize;

use crate::error::{ErrorSignal, WorkflowError};
use crate::records::CanonicalRecord;

/// Tagged result surfaced to callers: `{"ok": record}` or `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepResult {
    Ok(CanonicalRecord),
    Error(ErrorSignal),
}

impl StepResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, StepResult::Ok(_))
    }

    pub fn record(&self) -> Option<&CanonicalRecord> {
        match self {
            StepResult::Ok(record) => Some(record),
            StepResult::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorSignal> {
        match self {
            StepResult::Ok(_) => None,
            StepResult::Error(signal) => Some(signal),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl From<Result<CanonicalRecord, WorkflowError>> for StepResult {
    fn from(result: Result<CanonicalRecord, WorkflowError>) -> Self {
        match result {
            Ok(record) => StepResult::Ok(record),
            Err(error) => StepResult::Error(ErrorSignal::from(&error)),
        }
    }
}
