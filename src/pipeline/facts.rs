use tracing::debug;

use crate::records::{Platform, SensorEntry, SensorSuiteRecord};

/// Published specification of a well-known satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSpec {
    pub name: &'static str,
    pub platform: Platform,
    pub bands: &'static [&'static str],
    pub typical_products: &'static [&'static str],
    pub gsd_m: f64,
    pub revisit_days: f64,
    pub swath_km: f64,
}

pub const REFERENCE_SPECS: &[ReferenceSpec] = &[
    ReferenceSpec {
        name: "Sentinel-2",
        platform: Platform::Sso,
        bands: &["VNIR", "SWIR"],
        typical_products: &["NDVI", "NDWI", "EVI"],
        gsd_m: 10.0,
        revisit_days: 5.0,
        swath_km: 290.0,
    },
    ReferenceSpec {
        name: "SMAP",
        platform: Platform::Sso,
        bands: &["L-Microwave"],
        typical_products: &["Soil moisture"],
        gsd_m: 36000.0,
        revisit_days: 3.0,
        swath_km: 1000.0,
    },
    ReferenceSpec {
        name: "VIIRS",
        platform: Platform::Sso,
        bands: &["VNIR", "SWIR", "TIR"],
        typical_products: &["NDVI", "LST", "Cloud and fire detection"],
        gsd_m: 750.0,
        revisit_days: 1.0,
        swath_km: 3000.0,
    },
    ReferenceSpec {
        name: "Sentinel-1",
        platform: Platform::Sso,
        bands: &["C-SAR"],
        typical_products: &["Flood detection", "Soil moisture proxy"],
        gsd_m: 10.0,
        revisit_days: 6.0,
        swath_km: 250.0,
    },
    ReferenceSpec {
        name: "ALOS-2",
        platform: Platform::Sso,
        bands: &["L-SAR"],
        typical_products: &["Surface deformation", "Forest structure"],
        gsd_m: 3.0,
        revisit_days: 14.0,
        swath_km: 50.0,
    },
];

/// Plausible ranges as (exclusive lower, inclusive upper).
pub const GSD_M_BOUNDS: (f64, f64) = (1.0, 100_000.0);
pub const REVISIT_DAYS_BOUNDS: (f64, f64) = (0.0, 60.0);
pub const SWATH_KM_BOUNDS: (f64, f64) = (0.0, 5000.0);

/// Reference entry whose name appears, ignoring case, inside the model's name.
/// Tolerates variants such as "Sentinel-2A/B" or "SMAP Mission".
pub fn lookup_reference(name: &str) -> Option<&'static ReferenceSpec> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    REFERENCE_SPECS
        .iter()
        .find(|spec| name.contains(&spec.name.to_lowercase()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactCorrection {
    pub sensor: String,
    pub reference: &'static str,
    pub field: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FactCorrectionReport {
    pub corrections: Vec<FactCorrection>,
}

impl FactCorrectionReport {
    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.corrections.len()
    }
}

/// Replaces missing or implausible attributes of known satellites with their
/// reference values. Plausible model values are kept as-is.
pub fn apply_fact_corrections(record: SensorSuiteRecord) -> SensorSuiteRecord {
    correct_sensor_suite(record).0
}

pub fn correct_sensor_suite(
    mut record: SensorSuiteRecord,
) -> (SensorSuiteRecord, FactCorrectionReport) {
    let mut report = FactCorrectionReport::default();
    for sensor in &mut record.sensors {
        if let Some(reference) = lookup_reference(&sensor.name) {
            correct_sensor(sensor, reference, &mut report);
        }
    }
    (record, report)
}

fn correct_sensor(
    sensor: &mut SensorEntry,
    reference: &'static ReferenceSpec,
    report: &mut FactCorrectionReport,
) {
    let mut corrected = Vec::new();

    if sensor.platform.is_none() {
        sensor.platform = Some(reference.platform);
        corrected.push("platform");
    }
    if sensor.bands.is_empty() {
        sensor.bands = to_strings(reference.bands);
        corrected.push("bands");
    }
    if sensor.typical_products.is_empty() {
        sensor.typical_products = to_strings(reference.typical_products);
        corrected.push("typical_products");
    }
    if !within(sensor.gsd_m, GSD_M_BOUNDS) {
        sensor.gsd_m = Some(reference.gsd_m);
        corrected.push("gsd_m");
    }
    if !within(sensor.revisit_days, REVISIT_DAYS_BOUNDS) {
        sensor.revisit_days = Some(reference.revisit_days);
        corrected.push("revisit_days");
    }
    if !within(sensor.swath_km, SWATH_KM_BOUNDS) {
        sensor.swath_km = Some(reference.swath_km);
        corrected.push("swath_km");
    }

    for field in corrected {
        debug!(sensor = %sensor.name, reference = reference.name, field, "applied reference value");
        report.corrections.push(FactCorrection {
            sensor: sensor.name.clone(),
            reference: reference.name,
            field,
        });
    }
}

fn within(value: Option<f64>, (lower, upper): (f64, f64)) -> bool {
    value.is_some_and(|value| value.is_finite() && value > lower && value <= upper)
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentinel_2(gsd_m: Option<f64>) -> SensorEntry {
        SensorEntry {
            name: "Sentinel-2A/B".to_string(),
            platform: Some(Platform::Sso),
            bands: vec!["VNIR".to_string(), "SWIR".to_string()],
            gsd_m,
            revisit_days: Some(5.0),
            swath_km: Some(290.0),
            typical_products: vec!["NDVI".to_string()],
            constraints: vec!["Cloud cover".to_string()],
        }
    }

    fn suite(sensors: Vec<SensorEntry>) -> SensorSuiteRecord {
        SensorSuiteRecord {
            sensors,
            ..SensorSuiteRecord::default()
        }
    }

    #[test]
    fn out_of_bounds_gsd_is_replaced_with_reference() {
        let corrected = apply_fact_corrections(suite(vec![sentinel_2(Some(999_999.0))]));
        assert_eq!(corrected.sensors[0].gsd_m, Some(10.0));
    }

    #[test]
    fn plausible_values_are_left_untouched() {
        let original = suite(vec![sentinel_2(Some(10.0))]);
        let (corrected, report) = correct_sensor_suite(original.clone());
        assert_eq!(corrected, original);
        assert!(report.is_empty());
    }

    #[test]
    fn plausible_but_different_model_value_is_trusted() {
        let corrected = apply_fact_corrections(suite(vec![sentinel_2(Some(20.0))]));
        assert_eq!(corrected.sensors[0].gsd_m, Some(20.0));
    }

    #[test]
    fn lower_bounds_are_exclusive() {
        let mut entry = sentinel_2(Some(1.0));
        entry.revisit_days = Some(0.0);
        entry.swath_km = Some(5000.0);

        let corrected = apply_fact_corrections(suite(vec![entry]));
        let sensor = &corrected.sensors[0];
        assert_eq!(sensor.gsd_m, Some(10.0));
        assert_eq!(sensor.revisit_days, Some(5.0));
        assert_eq!(sensor.swath_km, Some(5000.0));
    }

    #[test]
    fn missing_fields_are_filled_for_known_satellites() {
        let entry = SensorEntry {
            name: "smap mission".to_string(),
            ..SensorEntry::default()
        };

        let (corrected, report) = correct_sensor_suite(suite(vec![entry]));
        let sensor = &corrected.sensors[0];
        assert_eq!(sensor.platform, Some(Platform::Sso));
        assert_eq!(sensor.bands, vec!["L-Microwave".to_string()]);
        assert_eq!(sensor.typical_products, vec!["Soil moisture".to_string()]);
        assert_eq!(sensor.gsd_m, Some(36000.0));
        assert_eq!(sensor.revisit_days, Some(3.0));
        assert_eq!(sensor.swath_km, Some(1000.0));
        assert_eq!(report.len(), 6);
    }

    #[test]
    fn existing_platform_is_not_overwritten() {
        let mut entry = sentinel_2(Some(10.0));
        entry.platform = Some(Platform::Leo);

        let corrected = apply_fact_corrections(suite(vec![entry]));
        assert_eq!(corrected.sensors[0].platform, Some(Platform::Leo));
    }

    #[test]
    fn unknown_satellites_are_not_corrected() {
        let entry = SensorEntry {
            name: "WorldView-3".to_string(),
            gsd_m: Some(999_999.0),
            ..SensorEntry::default()
        };

        let (corrected, report) = correct_sensor_suite(suite(vec![entry.clone()]));
        assert_eq!(corrected.sensors[0], entry);
        assert!(report.is_empty());
    }

    #[test]
    fn lookup_distinguishes_sentinel_missions() {
        assert_eq!(lookup_reference("Sentinel-1A").map(|spec| spec.name), Some("Sentinel-1"));
        assert_eq!(lookup_reference("SENTINEL-2B").map(|spec| spec.name), Some("Sentinel-2"));
        assert_eq!(lookup_reference("Suomi NPP VIIRS").map(|spec| spec.name), Some("VIIRS"));
        assert!(lookup_reference("").is_none());
    }
}
