use std::fmt;

use serde::{Deserialize, Serialize};

/// Orbit class of a satellite platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Leo,
    Sso,
    Geo,
}

impl Platform {
    /// Recognizes `LEO`/`SSO`/`GEO` anywhere in a free-form label, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        let upper = label.to_ascii_uppercase();
        // SSO first: "SSO (LEO)" is a sun-synchronous low orbit
        if upper.contains("SSO") || upper.contains("SUN-SYNCHRONOUS") {
            Some(Platform::Sso)
        } else if upper.contains("GEO") {
            Some(Platform::Geo)
        } else if upper.contains("LEO") {
            Some(Platform::Leo)
        } else {
            None
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Platform::Leo => "LEO",
            Platform::Sso => "SSO",
            Platform::Geo => "GEO",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorEntry {
    pub name: String,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub bands: Vec<String>,
    #[serde(default, serialize_with = "super::measure::serialize")]
    pub gsd_m: Option<f64>,
    #[serde(default, serialize_with = "super::measure::serialize")]
    pub revisit_days: Option<f64>,
    #[serde(default, serialize_with = "super::measure::serialize")]
    pub swath_km: Option<f64>,
    #[serde(default)]
    pub typical_products: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CapabilitySummary {
    #[serde(default)]
    pub can: Vec<String>,
    #[serde(default)]
    pub cannot: Vec<String>,
}

/// Satellite-only sensor configuration produced by the first workflow step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorSuiteRecord {
    #[serde(rename = "sensor_suite", default)]
    pub sensors: Vec<SensorEntry>,
    #[serde(default)]
    pub capability_summary: CapabilitySummary,
}
