use serde_json::{Map, Value};

use crate::records::{Axis, GapAnalysisRecord, GapDimension, GapLevel, PriorityGap};
use crate::workflow::StepKind;

use super::coerce::{boolean, first, items, text, text_map};
use super::{Normalized, WarningSink};

const DIMENSION_KEYS: &[&str] = &["dimensions", "gaps"];
const PRIORITY_KEYS: &[&str] = &["priority_gaps_top3", "priority_gaps"];

/// Normalizes step-two output into exactly one dimension per recognized axis,
/// ordered revisit, resolution, coverage, cost.
///
/// Axes the model skipped are reported, never invented. A `reason` without a
/// numeric token is accepted but flagged.
pub fn normalize_gap_analysis(parsed: &Map<String, Value>) -> Normalized<GapAnalysisRecord> {
    let mut sink = WarningSink::new(StepKind::GapAnalysis);

    sink.require(parsed, &["goal"]);
    sink.require(parsed, &["to_be_requirements"]);
    sink.require(parsed, DIMENSION_KEYS);

    let mut dimensions: Vec<GapDimension> = Vec::new();
    for (label_hint, item) in dimension_items(parsed) {
        let Some(dimension) = dimension(label_hint, item, &mut sink) else {
            continue;
        };
        if dimensions.iter().any(|seen| seen.axis == dimension.axis) {
            sink.push(
                format!("dimensions.{}", dimension.axis),
                "duplicate axis, keeping the first occurrence",
            );
            continue;
        }
        dimensions.push(dimension);
    }
    dimensions.sort_by_key(|dimension| dimension.axis);

    for axis in Axis::ALL {
        if !dimensions.iter().any(|dimension| dimension.axis == axis) {
            sink.push(format!("dimensions.{axis}"), "axis missing from model output");
        }
    }

    for dimension in &dimensions {
        if !dimension.reason_is_quantified() {
            sink.push(
                format!("dimensions.{}.reason", dimension.axis),
                "reason carries no numeric evidence",
            );
        }
    }

    let priority_gaps_top3 = items(first(parsed, PRIORITY_KEYS))
        .into_iter()
        .map(priority_gap)
        .collect();

    sink.finish(GapAnalysisRecord {
        goal: text(parsed.get("goal")),
        to_be_requirements: text_map(parsed.get("to_be_requirements"), "summary"),
        dimensions,
        priority_gaps_top3,
    })
}

/// Dimension items paired with a label hint. Some outputs key the dimensions
/// by axis name instead of listing them.
fn dimension_items(parsed: &Map<String, Value>) -> Vec<(Option<&str>, &Value)> {
    match first(parsed, DIMENSION_KEYS) {
        Some(Value::Object(by_axis)) => by_axis
            .iter()
            .map(|(axis, item)| (Some(axis.as_str()), item))
            .collect(),
        other => items(other).into_iter().map(|item| (None, item)).collect(),
    }
}

fn dimension(
    label_hint: Option<&str>,
    item: &Value,
    sink: &mut WarningSink,
) -> Option<GapDimension> {
    let Value::Object(object) = item else {
        sink.push("dimensions", format!("dropped non-object entry {item}"));
        return None;
    };

    let label = match first(object, &["axis", "dimension", "name"]) {
        Some(value) => text(Some(value)),
        None => label_hint.unwrap_or_default().to_string(),
    };
    let Some(axis) = Axis::from_label(&label) else {
        sink.push("dimensions", format!("dropped entry with unrecognized axis '{label}'"));
        return None;
    };

    let level_label = text(first(object, &["gap_level", "gap", "level"]));
    let gap_level = GapLevel::from_label(&level_label);
    if gap_level.is_none() {
        let message = if level_label.trim().is_empty() {
            "missing gap level".to_string()
        } else {
            format!("unrecognized gap level '{level_label}'")
        };
        sink.push(format!("dimensions.{axis}.gap_level"), message);
    }

    Some(GapDimension {
        axis,
        current: text(first(object, &["current", "as_is"])),
        target: text(first(object, &["target", "to_be"])),
        gap_level,
        reason: text(object.get("reason")),
        risk: text(object.get("risk")),
        mitigation: text(object.get("mitigation")),
    })
}

fn priority_gap(item: &Value) -> PriorityGap {
    match item {
        Value::Object(object) => PriorityGap {
            axis: text(object.get("axis")),
            impact: text(object.get("impact")),
            why: text(first(object, &["why", "reason"])),
            quick_win: boolean(object.get("quick_win")),
        },
        other => PriorityGap {
            axis: text(Some(other)),
            ..PriorityGap::default()
        },
    }
}
