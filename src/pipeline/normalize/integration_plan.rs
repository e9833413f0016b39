use serde_json::{Map, Value};

use crate::records::{
    ConstellationEntry, FusionDesign, GapClosure, IntegrationPlanRecord, RiskMitigation,
    RoadmapPhase, SupplementaryAsset,
};
use crate::workflow::StepKind;

use super::coerce::{first, items, text, text_list, text_map, unique_text_list};
use super::{Normalized, WarningSink};

const CONSTELLATION_KEYS: &[&str] = &["constellation", "satellite_layer"];
const COST_KEYS: &[&str] = &["monthly_cost_estimate", "cost_estimate"];
const RISK_KEYS: &[&str] = &["risks_and_mitigations", "risks"];
const ROADMAP_KEYS: &[&str] = &["phased_roadmap", "roadmap"];

pub fn normalize_integration_plan(
    parsed: &Map<String, Value>,
) -> Normalized<IntegrationPlanRecord> {
    let mut sink = WarningSink::new(StepKind::IntegrationPlan);

    sink.require(parsed, &["rationale"]);
    sink.require(parsed, CONSTELLATION_KEYS);
    sink.require(parsed, &["aerial_layer"]);
    sink.require(parsed, &["ground_layer"]);
    sink.require(parsed, &["fusion_design"]);
    sink.require(parsed, &["gap_closures"]);
    sink.require(parsed, COST_KEYS);
    sink.require(parsed, RISK_KEYS);
    sink.require(parsed, ROADMAP_KEYS);

    let constellation = items(first(parsed, CONSTELLATION_KEYS))
        .into_iter()
        .enumerate()
        .filter_map(|(idx, item)| constellation_entry(idx, item, &mut sink))
        .collect();

    sink.finish(IntegrationPlanRecord {
        rationale: text_map(parsed.get("rationale"), "overview"),
        constellation,
        aerial_layer: assets(parsed.get("aerial_layer")),
        ground_layer: assets(parsed.get("ground_layer")),
        fusion_design: fusion_design(parsed.get("fusion_design")),
        gap_closures: items(parsed.get("gap_closures"))
            .into_iter()
            .filter_map(gap_closure)
            .collect(),
        monthly_cost_estimate: text_map(first(parsed, COST_KEYS), "total"),
        risks_and_mitigations: items(first(parsed, RISK_KEYS))
            .into_iter()
            .map(risk_mitigation)
            .collect(),
        phased_roadmap: items(first(parsed, ROADMAP_KEYS))
            .into_iter()
            .map(roadmap_phase)
            .collect(),
    })
}

fn constellation_entry(
    idx: usize,
    item: &Value,
    sink: &mut WarningSink,
) -> Option<ConstellationEntry> {
    let object = match item {
        Value::Object(object) => object,
        Value::String(name) if !name.trim().is_empty() => {
            return Some(ConstellationEntry {
                name: name.clone(),
                ..ConstellationEntry::default()
            });
        }
        other => {
            sink.push(
                format!("constellation[{idx}]"),
                format!("dropped non-object entry {other}"),
            );
            return None;
        }
    };

    let field = |name: &str| format!("constellation[{idx}].{name}");

    let mut bands = unique_text_list(object.get("bands"));
    if bands.is_empty() {
        bands = unique_text_list(object.get("band"));
    }

    Some(ConstellationEntry {
        name: text(object.get("name")),
        sensor_type: text(first(object, &["type", "sensor_type"])),
        bands,
        gsd_m: sink.numeric(field("gsd_m"), object.get("gsd_m")),
        revisit_days: sink.numeric(field("revisit_days"), object.get("revisit_days")),
        swath_km: sink.numeric(field("swath_km"), object.get("swath_km")),
        role: text(object.get("role")),
        why: text(object.get("why")),
    })
}

fn assets(value: Option<&Value>) -> Vec<SupplementaryAsset> {
    items(value)
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(object) => Some(object.clone()),
            Value::String(name) if !name.trim().is_empty() => {
                let mut asset = SupplementaryAsset::new();
                asset.insert("name".to_string(), Value::String(name.clone()));
                Some(asset)
            }
            _ => None,
        })
        .collect()
}

fn fusion_design(value: Option<&Value>) -> FusionDesign {
    match value {
        Some(Value::Object(object)) => FusionDesign {
            data_flow: text_list(object.get("data_flow")),
            processing: text_list(object.get("processing")),
            quality: text_list(first(object, &["quality", "qa_qc"])),
        },
        // a bare list is taken as the processing chain
        Some(other) => FusionDesign {
            processing: text_list(Some(other)),
            ..FusionDesign::default()
        },
        None => FusionDesign::default(),
    }
}

fn gap_closure(item: &Value) -> Option<GapClosure> {
    let Value::Object(object) = item else {
        return None;
    };
    Some(GapClosure {
        axis: text(object.get("axis")),
        gap_level: text(first(object, &["gap_level", "gap"])),
        approach: text(object.get("approach")),
        effect: text(object.get("effect")),
    })
}

fn risk_mitigation(item: &Value) -> RiskMitigation {
    match item {
        Value::Object(object) => RiskMitigation {
            risk: text(object.get("risk")),
            mitigation: text(object.get("mitigation")),
        },
        other => RiskMitigation {
            risk: text(Some(other)),
            mitigation: String::new(),
        },
    }
}

fn roadmap_phase(item: &Value) -> RoadmapPhase {
    match item {
        Value::Object(object) => RoadmapPhase {
            phase: text(object.get("phase")),
            months: text(first(object, &["months", "period"])),
            scope: text(object.get("scope")),
        },
        other => RoadmapPhase {
            scope: text(Some(other)),
            ..RoadmapPhase::default()
        },
    }
}
