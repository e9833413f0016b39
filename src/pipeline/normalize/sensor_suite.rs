use serde_json::{Map, Value};

use crate::records::{CapabilitySummary, Platform, SensorEntry, SensorSuiteRecord};
use crate::workflow::StepKind;

use super::coerce::{first, items, text, text_list, unique_text_list};
use super::{Normalized, WarningSink};

const SENSOR_KEYS: &[&str] = &["sensor_suite", "sensors"];
const LEGACY_STACK_KEY: &str = "satellite_stack";

/// Normalizes step-one output.
///
/// Canonical input carries `sensor_suite` and `capability_summary`. The older
/// shape nested satellites under `satellite_stack.satellites`, named the orbit
/// `orbit`, sometimes gave a single `band`, and kept capabilities in
/// `capabilities_sat_only` / `limitations_sat_only`.
pub fn normalize_sensor_suite(parsed: &Map<String, Value>) -> Normalized<SensorSuiteRecord> {
    let mut sink = WarningSink::new(StepKind::SensorSuite);

    let sensor_items = match first(parsed, SENSOR_KEYS) {
        Some(value) => items(Some(value)),
        None => legacy_satellites(parsed),
    };

    let sensors: Vec<SensorEntry> = sensor_items
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| sensor_entry(idx, item, &mut sink))
        .collect();

    if sensors.is_empty() {
        sink.push("sensor_suite", "no sensors in model output");
    }

    let capability_summary = capability_summary(parsed, &mut sink);

    sink.finish(SensorSuiteRecord {
        sensors,
        capability_summary,
    })
}

fn legacy_satellites(parsed: &Map<String, Value>) -> Vec<&Value> {
    match parsed.get(LEGACY_STACK_KEY) {
        Some(Value::Object(stack)) => items(stack.get("satellites")),
        Some(list @ Value::Array(_)) => items(Some(list)),
        _ => Vec::new(),
    }
}

fn sensor_entry(idx: usize, item: &Value, sink: &mut WarningSink) -> Option<SensorEntry> {
    let object = match item {
        Value::Object(object) => object,
        Value::String(name) if !name.trim().is_empty() => {
            return Some(SensorEntry {
                name: name.clone(),
                ..SensorEntry::default()
            });
        }
        other => {
            sink.push(
                format!("sensor_suite[{idx}]"),
                format!("dropped non-object entry {other}"),
            );
            return None;
        }
    };

    let field = |name: &str| format!("sensor_suite[{idx}].{name}");

    let name = text(first(object, &["name", "satellite"]));
    if name.trim().is_empty() {
        sink.push(field("name"), "missing sensor name");
    }

    let platform_label = text(first(object, &["platform", "orbit"]));
    let platform = Platform::from_label(&platform_label);
    if platform.is_none() && !platform_label.trim().is_empty() {
        sink.push(
            field("platform"),
            format!("unrecognized orbit class '{platform_label}'"),
        );
    }

    let mut bands = unique_text_list(object.get("bands"));
    if bands.is_empty() {
        bands = unique_text_list(object.get("band"));
    }

    let mut constraints = text_list(object.get("constraints"));
    for legacy in ["role", "why"] {
        constraints.extend(text_list(object.get(legacy)));
    }

    Some(SensorEntry {
        gsd_m: sink.numeric(field("gsd_m"), object.get("gsd_m")),
        revisit_days: sink.numeric(field("revisit_days"), object.get("revisit_days")),
        swath_km: sink.numeric(field("swath_km"), object.get("swath_km")),
        typical_products: text_list(first(object, &["typical_products", "products"])),
        name,
        platform,
        bands,
        constraints,
    })
}

fn capability_summary(parsed: &Map<String, Value>, sink: &mut WarningSink) -> CapabilitySummary {
    let summary = match parsed.get("capability_summary") {
        Some(Value::Object(summary)) => Some(summary),
        _ => None,
    };

    let mut can = summary
        .map(|summary| text_list(summary.get("can")))
        .unwrap_or_default();
    if can.is_empty() {
        can = text_list(parsed.get("capabilities_sat_only"));
    }

    let mut cannot = summary
        .map(|summary| text_list(summary.get("cannot")))
        .unwrap_or_default();
    if cannot.is_empty() {
        cannot = text_list(parsed.get("limitations_sat_only"));
    }

    if summary.is_none()
        && parsed.get("capabilities_sat_only").is_none()
        && parsed.get("limitations_sat_only").is_none()
    {
        sink.push(
            "capability_summary",
            "missing from model output, defaulted to empty",
        );
    }

    CapabilitySummary { can, cannot }
}
