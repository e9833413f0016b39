use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Aerial or ground asset. The layers mix UAVs, HAPS and in-situ networks, so
/// assets stay as free-form objects.
pub type SupplementaryAsset = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConstellationEntry {
    pub name: String,
    #[serde(rename = "type", default)]
    pub sensor_type: String,
    #[serde(default)]
    pub bands: Vec<String>,
    #[serde(default, serialize_with = "super::measure::serialize")]
    pub gsd_m: Option<f64>,
    #[serde(default, serialize_with = "super::measure::serialize")]
    pub revisit_days: Option<f64>,
    #[serde(default, serialize_with = "super::measure::serialize")]
    pub swath_km: Option<f64>,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub why: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FusionDesign {
    #[serde(default)]
    pub data_flow: Vec<String>,
    #[serde(default)]
    pub processing: Vec<String>,
    #[serde(default)]
    pub quality: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GapClosure {
    #[serde(default)]
    pub axis: String,
    #[serde(default)]
    pub gap_level: String,
    #[serde(default)]
    pub approach: String,
    #[serde(default)]
    pub effect: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskMitigation {
    #[serde(default)]
    pub risk: String,
    #[serde(default)]
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoadmapPhase {
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub months: String,
    #[serde(default)]
    pub scope: String,
}

/// Integrated satellite, aerial and ground observation plan from the third step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IntegrationPlanRecord {
    #[serde(default)]
    pub rationale: BTreeMap<String, String>,
    #[serde(default)]
    pub constellation: Vec<ConstellationEntry>,
    #[serde(default)]
    pub aerial_layer: Vec<SupplementaryAsset>,
    #[serde(default)]
    pub ground_layer: Vec<SupplementaryAsset>,
    #[serde(default)]
    pub fusion_design: FusionDesign,
    #[serde(default)]
    pub gap_closures: Vec<GapClosure>,
    #[serde(default)]
    pub monthly_cost_estimate: BTreeMap<String, String>,
    #[serde(default)]
    pub risks_and_mitigations: Vec<RiskMitigation>,
    #[serde(default)]
    pub phased_roadmap: Vec<RoadmapPhase>,
}
