//! Turns raw completion text into a canonical record.
//!
//! sanitize → parse → normalize → (sensor suite only) fact corrections.

pub mod facts;
pub mod normalize;
pub mod parsing;
pub mod sanitize;

use crate::error::ParseError;
use crate::records::CanonicalRecord;
use crate::workflow::StepKind;

pub use facts::{FactCorrectionReport, apply_fact_corrections, correct_sensor_suite};
pub use normalize::{Normalized, SchemaWarning, normalize};
pub use parsing::parse;
pub use sanitize::sanitize;

/// Canonical record plus everything the pipeline noticed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Processed {
    pub record: CanonicalRecord,
    pub warnings: Vec<SchemaWarning>,
    pub corrections: FactCorrectionReport,
}

pub fn process(raw: &str, step: StepKind) -> Result<Processed, ParseError> {
    let parsed = parse(raw)?;
    let Normalized { record, warnings } = normalize(&parsed, step);

    let (record, corrections) = match record {
        CanonicalRecord::SensorSuite(suite) => {
            let (suite, report) = correct_sensor_suite(suite);
            (CanonicalRecord::SensorSuite(suite), report)
        }
        other => (other, FactCorrectionReport::default()),
    };

    Ok(Processed {
        record,
        warnings,
        corrections,
    })
}
