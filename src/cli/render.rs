use colored::*;
use serde_json::Value;

use crate::records::{
    CanonicalRecord, GapAnalysisRecord, GapLevel, IntegrationPlanRecord, SensorSuiteRecord,
    SupplementaryAsset,
};
use crate::workflow::{StepKind, StepResult};

pub(crate) fn step_result(step: StepKind, result: &StepResult) -> String {
    let mut lines = vec![format!("{}", format!("▶ {}", step.title()).bold().cyan())];

    match result {
        StepResult::Ok(record) => lines.extend(record_lines(record)),
        StepResult::Error(signal) => {
            lines.push(format!("{} {}", "❌".red(), signal.message.red()));
            if let Some(raw) = signal.raw_excerpt.as_deref().filter(|raw| !raw.is_empty()) {
                lines.push(format!("   {}", "Model output excerpt:".dimmed()));
                lines.extend(raw.lines().map(|line| format!("   {}", line.dimmed())));
            }
        }
    }

    lines.push(String::new());
    lines.join("\n") + "\n"
}

fn record_lines(record: &CanonicalRecord) -> Vec<String> {
    match record {
        CanonicalRecord::SensorSuite(suite) => sensor_suite(suite),
        CanonicalRecord::GapAnalysis(gaps) => gap_analysis(gaps),
        CanonicalRecord::IntegrationPlan(plan) => integration_plan(plan),
    }
}

fn sensor_suite(suite: &SensorSuiteRecord) -> Vec<String> {
    let mut lines = Vec::new();

    for sensor in &suite.sensors {
        let platform = sensor
            .platform
            .map(|platform| format!(" [{platform}]"))
            .unwrap_or_default();
        lines.push(format!("  • {}{}", sensor.name.bold(), platform));
        lines.push(format!(
            "    bands {} | GSD {} m | revisit {} d | swath {} km",
            joined(&sensor.bands),
            number(sensor.gsd_m),
            number(sensor.revisit_days),
            number(sensor.swath_km),
        ));
        if !sensor.typical_products.is_empty() {
            lines.push(format!("    products: {}", sensor.typical_products.join(", ")));
        }
        if !sensor.constraints.is_empty() {
            lines.push(format!(
                "    constraints: {}",
                sensor.constraints.join("; ").dimmed()
            ));
        }
    }

    section(&mut lines, "Can do", &suite.capability_summary.can, |item| {
        format!("{} {item}", "✓".green())
    });
    section(&mut lines, "Cannot do", &suite.capability_summary.cannot, |item| {
        format!("{} {item}", "✗".red())
    });
    lines
}

fn gap_analysis(gaps: &GapAnalysisRecord) -> Vec<String> {
    let mut lines = vec![format!("  {} {}", "Goal:".bold(), gaps.goal)];

    if !gaps.to_be_requirements.is_empty() {
        lines.push(format!("  {}", "TO-BE requirements".bold()));
        for (key, value) in &gaps.to_be_requirements {
            lines.push(format!("    {key}: {value}"));
        }
    }

    for dimension in &gaps.dimensions {
        let level = match dimension.gap_level {
            Some(GapLevel::Large) => "large".red().bold(),
            Some(GapLevel::Medium) => "medium".yellow().bold(),
            Some(GapLevel::Small) => "small".green().bold(),
            None => "unknown".dimmed(),
        };
        lines.push(format!("  • {} gap: {level}", dimension.axis.to_string().bold()));
        lines.push(format!("    {} → {}", dimension.current, dimension.target));
        for (label, text) in [
            ("reason", &dimension.reason),
            ("risk", &dimension.risk),
            ("mitigation", &dimension.mitigation),
        ] {
            if !text.is_empty() {
                lines.push(format!("    {label}: {text}"));
            }
        }
    }

    section(&mut lines, "Priority gaps", &gaps.priority_gaps_top3, |gap| {
        let quick = if gap.quick_win { " (quick win)".green().to_string() } else { String::new() };
        format!("{}: {} {}{quick}", gap.axis.bold(), gap.impact, gap.why.dimmed())
    });
    lines
}

fn integration_plan(plan: &IntegrationPlanRecord) -> Vec<String> {
    let mut lines = Vec::new();

    let rationale: Vec<_> = plan.rationale.iter().collect();
    section(&mut lines, "Rationale", &rationale, |(key, value)| {
        format!("{}: {value}", key.bold())
    });
    section(&mut lines, "Satellite constellation", &plan.constellation, |entry| {
        format!(
            "{} ({}, {}) GSD {} m, revisit {} d: {}",
            entry.name.bold(),
            entry.sensor_type,
            joined(&entry.bands),
            number(entry.gsd_m),
            number(entry.revisit_days),
            entry.role
        )
    });
    section(&mut lines, "Aerial layer", &plan.aerial_layer, asset);
    section(&mut lines, "Ground layer", &plan.ground_layer, asset);

    let fusion = &plan.fusion_design;
    let stages: Vec<_> = [
        ("data flow", &fusion.data_flow),
        ("processing", &fusion.processing),
        ("quality", &fusion.quality),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .collect();
    section(&mut lines, "Fusion design", &stages, |(label, items)| {
        format!("{label}: {}", items.join("; "))
    });

    section(&mut lines, "Gap closures", &plan.gap_closures, |closure| {
        format!(
            "{} [{}] {} → {}",
            closure.axis.bold(),
            closure.gap_level,
            closure.approach,
            closure.effect
        )
    });

    let costs: Vec<_> = plan.monthly_cost_estimate.iter().collect();
    section(&mut lines, "Monthly cost estimate", &costs, |(key, value)| {
        format!("{key}: {value}")
    });
    section(&mut lines, "Risks", &plan.risks_and_mitigations, |item| {
        format!("{} → {}", item.risk, item.mitigation.dimmed())
    });
    section(&mut lines, "Roadmap", &plan.phased_roadmap, |phase| {
        format!("{} ({}): {}", phase.phase.bold(), phase.months, phase.scope)
    });
    lines
}

fn section<T>(lines: &mut Vec<String>, title: &str, items: &[T], describe: impl Fn(&T) -> String) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("  {}", title.bold()));
    lines.extend(items.iter().map(|item| format!("    - {}", describe(item))));
}

fn asset(asset: &SupplementaryAsset) -> String {
    let name = asset.get("name").and_then(Value::as_str).unwrap_or("unnamed");
    let details: Vec<String> = asset
        .iter()
        .filter(|(key, _)| key.as_str() != "name")
        .map(|(key, value)| match value {
            Value::String(text) => format!("{key}={text}"),
            other => format!("{key}={other}"),
        })
        .collect();

    if details.is_empty() {
        name.bold().to_string()
    } else {
        format!("{} {}", name.bold(), details.join(", ").dimmed())
    }
}

fn number(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_else(|| "-".to_string())
}

fn joined(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join("/")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::{ErrorKind, ErrorSignal};
    use crate::records::{Axis, CapabilitySummary, GapDimension, Platform, SensorEntry};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn sensor_suite_lists_sensors_and_capabilities() {
        plain();
        let suite = SensorSuiteRecord {
            sensors: vec![SensorEntry {
                name: "Sentinel-2".to_string(),
                platform: Some(Platform::Sso),
                bands: vec!["VNIR".to_string(), "SWIR".to_string()],
                gsd_m: Some(10.0),
                revisit_days: Some(5.0),
                swath_km: None,
                ..SensorEntry::default()
            }],
            capability_summary: CapabilitySummary {
                can: vec!["NDVI at 10 m".to_string()],
                cannot: vec![],
            },
        };

        let text = step_result(
            StepKind::SensorSuite,
            &StepResult::Ok(CanonicalRecord::SensorSuite(suite)),
        );

        assert!(text.contains("Sentinel-2 [SSO]"));
        assert!(text.contains("bands VNIR/SWIR | GSD 10 m | revisit 5 d | swath - km"));
        assert!(text.contains("✓ NDVI at 10 m"));
        assert!(!text.contains("Cannot do"));
    }

    #[test]
    fn gap_dimensions_show_level_and_reason() {
        plain();
        let gaps = GapAnalysisRecord {
            goal: "Detect drought within 3 days".to_string(),
            dimensions: vec![GapDimension {
                axis: Axis::Revisit,
                current: "5 days".to_string(),
                target: "3 days".to_string(),
                gap_level: Some(GapLevel::Large),
                reason: "5 > 3 days".to_string(),
                risk: String::new(),
                mitigation: String::new(),
            }],
            ..GapAnalysisRecord::default()
        };

        let text = step_result(
            StepKind::GapAnalysis,
            &StepResult::Ok(CanonicalRecord::GapAnalysis(gaps)),
        );

        assert!(text.contains("revisit gap: large"));
        assert!(text.contains("5 days → 3 days"));
        assert!(text.contains("reason: 5 > 3 days"));
        assert!(!text.contains("risk:"));
    }

    #[test]
    fn assets_render_name_and_details() {
        plain();
        let haps = json!({"name": "HAPS", "altitude_m": 20000, "role": "relay"});
        let haps = haps.as_object().unwrap().clone();
        assert_eq!(asset(&haps), "HAPS altitude_m=20000, role=relay");

        let unnamed = json!({}).as_object().unwrap().clone();
        assert_eq!(asset(&unnamed), "unnamed");
    }

    #[test]
    fn errors_include_the_raw_excerpt() {
        plain();
        let result = StepResult::Error(ErrorSignal {
            kind: ErrorKind::Parse,
            message: "failed to parse model output as JSON: expected value".to_string(),
            raw_excerpt: Some("Sorry, I can't".to_string()),
        });

        let text = step_result(StepKind::IntegrationPlan, &result);
        assert!(text.contains("Integrated observation plan"));
        assert!(text.contains("failed to parse model output"));
        assert!(text.contains("Sorry, I can't"));
    }
}
