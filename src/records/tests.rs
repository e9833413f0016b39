use serde_json::json;

use super::*;

#[test]
fn platform_labels_are_matched_loosely() {
    assert_eq!(Platform::from_label("sso"), Some(Platform::Sso));
    assert_eq!(Platform::from_label("SSO (LEO, 786 km)"), Some(Platform::Sso));
    assert_eq!(Platform::from_label("Sun-synchronous"), Some(Platform::Sso));
    assert_eq!(Platform::from_label("GEO"), Some(Platform::Geo));
    assert_eq!(Platform::from_label("leo"), Some(Platform::Leo));
    assert_eq!(Platform::from_label("polar"), None);
}

#[test]
fn axis_labels_cover_english_and_japanese() {
    assert_eq!(Axis::from_label("観測頻度"), Some(Axis::Revisit));
    assert_eq!(Axis::from_label("空間分解能"), Some(Axis::Resolution));
    assert_eq!(Axis::from_label("観測範囲"), Some(Axis::Coverage));
    assert_eq!(Axis::from_label("コスト"), Some(Axis::Cost));
    assert_eq!(Axis::from_label("Revisit"), Some(Axis::Revisit));
    assert_eq!(Axis::from_label("gsd_m"), Some(Axis::Resolution));
    assert_eq!(Axis::from_label("Monthly budget"), Some(Axis::Cost));
    assert_eq!(Axis::from_label("latency"), None);
    assert_eq!(Axis::from_label("  "), None);
}

#[test]
fn spatial_coverage_is_not_read_as_resolution() {
    assert_eq!(Axis::from_label("spatial coverage"), Some(Axis::Coverage));
    assert_eq!(Axis::from_label("Spatial extent"), Some(Axis::Coverage));
    assert_eq!(Axis::from_label("spatial resolution"), Some(Axis::Resolution));
    assert_eq!(Axis::from_label("Spatial"), Some(Axis::Resolution));
    assert_eq!(Axis::from_label("coverage"), Some(Axis::Coverage));
}

#[test]
fn gap_levels_accept_synonyms() {
    assert_eq!(GapLevel::from_label("大"), Some(GapLevel::Large));
    assert_eq!(GapLevel::from_label("Medium"), Some(GapLevel::Medium));
    assert_eq!(GapLevel::from_label("low"), Some(GapLevel::Small));
    assert_eq!(GapLevel::from_label("unknown"), None);
}

#[test]
fn gap_levels_read_the_leading_word() {
    assert_eq!(GapLevel::from_label("大（高）"), Some(GapLevel::Large));
    assert_eq!(GapLevel::from_label("Large - cloud limited"), Some(GapLevel::Large));
    assert_eq!(GapLevel::from_label("medium/high"), Some(GapLevel::Medium));
    assert_eq!(GapLevel::from_label(" small "), Some(GapLevel::Small));
    assert_eq!(GapLevel::from_label("largest"), None);
    assert_eq!(GapLevel::from_label(""), None);
}

#[test]
fn sensor_suite_serializes_with_canonical_keys() {
    let record = SensorSuiteRecord {
        sensors: vec![SensorEntry {
            name: "Sentinel-2".to_string(),
            platform: Some(Platform::Sso),
            bands: vec!["VNIR".to_string()],
            gsd_m: Some(10.0),
            ..SensorEntry::default()
        }],
        capability_summary: CapabilitySummary::default(),
    };

    let value = CanonicalRecord::SensorSuite(record).to_json();
    assert_eq!(value["sensor_suite"][0]["name"], "Sentinel-2");
    assert_eq!(value["sensor_suite"][0]["platform"], "SSO");
    assert_eq!(value["sensor_suite"][0]["revisit_days"], json!(null));
    assert_eq!(value["sensor_suite"][0]["gsd_m"], json!(10));
    assert_eq!(value["capability_summary"]["can"], json!([]));
}

#[test]
fn measures_keep_fractions_and_write_whole_numbers_as_integers() {
    let entry = SensorEntry {
        name: "MODIS".to_string(),
        gsd_m: Some(250.0),
        revisit_days: Some(0.5),
        swath_km: Some(2330.0),
        ..SensorEntry::default()
    };

    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["gsd_m"], json!(250));
    assert_eq!(value["revisit_days"], json!(0.5));
    assert_eq!(value["swath_km"], json!(2330));
    assert!(value["gsd_m"].is_u64());
}

#[test]
fn reason_quantification_counts_fullwidth_digits() {
    let mut dimension = GapDimension {
        axis: Axis::Cost,
        current: String::new(),
        target: String::new(),
        gap_level: Some(GapLevel::Small),
        reason: "予算内に収まる".to_string(),
        risk: String::new(),
        mitigation: String::new(),
    };
    assert!(!dimension.reason_is_quantified());

    dimension.reason = "月額５０万円以内".to_string();
    assert!(dimension.reason_is_quantified());
}

#[test]
fn canonical_record_reports_its_step() {
    let record = CanonicalRecord::GapAnalysis(GapAnalysisRecord::default());
    assert_eq!(record.step(), crate::workflow::StepKind::GapAnalysis);
}
