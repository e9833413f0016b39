//! Projection of parsed completions onto the canonical record of each step.
//!
//! Models have produced several shapes for the same step over time. Each step
//! module reads every known spelling of a field, copies what it finds, and
//! fills anything absent with an empty container. Whenever a required field
//! had to be defaulted or a value dropped, a [`SchemaWarning`] is recorded; the
//! record is still returned.

mod coerce;
mod gap_analysis;
mod integration_plan;
mod sensor_suite;

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::records::CanonicalRecord;
use crate::workflow::StepKind;

pub use gap_analysis::normalize_gap_analysis;
pub use integration_plan::normalize_integration_plan;
pub use sensor_suite::normalize_sensor_suite;

/// Non-fatal notice that the model output did not match the canonical schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaWarning {
    pub step: StepKind,
    pub field: String,
    pub message: String,
}

impl fmt::Display for SchemaWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.step, self.field, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub record: T,
    pub warnings: Vec<SchemaWarning>,
}

impl<T> Normalized<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Normalized<U> {
        Normalized {
            record: f(self.record),
            warnings: self.warnings,
        }
    }
}

pub fn normalize(parsed: &Map<String, Value>, step: StepKind) -> Normalized<CanonicalRecord> {
    match step {
        StepKind::SensorSuite => normalize_sensor_suite(parsed).map(CanonicalRecord::SensorSuite),
        StepKind::GapAnalysis => normalize_gap_analysis(parsed).map(CanonicalRecord::GapAnalysis),
        StepKind::IntegrationPlan => {
            normalize_integration_plan(parsed).map(CanonicalRecord::IntegrationPlan)
        }
    }
}

pub(super) struct WarningSink {
    step: StepKind,
    warnings: Vec<SchemaWarning>,
}

impl WarningSink {
    fn new(step: StepKind) -> Self {
        Self {
            step,
            warnings: Vec::new(),
        }
    }

    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(SchemaWarning {
            step: self.step,
            field: field.into(),
            message: message.into(),
        });
    }

    /// Warns when none of the spellings of a required top-level field is present.
    fn require(&mut self, object: &Map<String, Value>, keys: &[&str]) {
        if coerce::first(object, keys).is_none() {
            self.push(keys[0], "missing from model output, defaulted to empty");
        }
    }

    fn numeric(&mut self, field: String, value: Option<&Value>) -> Option<f64> {
        let numeric = coerce::positive_number(value);
        if numeric == coerce::Numeric::Unusable {
            self.push(
                field,
                format!(
                    "expected a positive number, got {}",
                    value.map(Value::to_string).unwrap_or_default()
                ),
            );
        }
        numeric.value()
    }

    fn finish<T>(self, record: T) -> Normalized<T> {
        Normalized {
            record,
            warnings: self.warnings,
        }
    }
}
