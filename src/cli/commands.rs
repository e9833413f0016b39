use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::workflow::{StepKind, StepResult, Workflow, WorkflowSession};

use super::args::Cli;
use super::render;

pub(crate) async fn run(cli: Cli, mut config: Config) -> Result<()> {
    cli.apply_overrides(&mut config);

    let mut session = WorkflowSession::new(config, cli.use_case());
    if let Some(goal) = cli.goal.clone() {
        session = session.with_goal(goal);
    }

    let workflow = Workflow::default();
    let results = workflow.run_all(&mut session).await;
    let steps = StepKind::ALL.iter().copied().zip(results.iter());

    if cli.json {
        let report = json_report(steps);
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize results")?;
        println!("{text}");
    } else {
        for (step, result) in steps {
            print!("{}", render::step_result(step, result));
        }
    }

    let failed = StepKind::ALL
        .iter()
        .zip(results.iter())
        .find(|(_, result)| !result.is_ok());
    if let Some((step, _)) = failed {
        bail!("workflow stopped at the {} step", step.title().to_lowercase());
    }

    Ok(())
}

/// `{"sensor_suite": {"ok": ...}, "gap_analysis": {"error": ...}}` for the steps that ran.
pub(crate) fn json_report<'a>(steps: impl Iterator<Item = (StepKind, &'a StepResult)>) -> Value {
    let mut report = Map::new();
    for (step, result) in steps {
        report.insert(step.to_string(), result.to_json());
    }
    Value::Object(report)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::json_report;
    use crate::error::{ErrorKind, ErrorSignal};
    use crate::records::{CanonicalRecord, SensorSuiteRecord};
    use crate::workflow::{StepKind, StepResult};

    #[test]
    fn json_report_is_keyed_by_step() {
        let results = [
            StepResult::Ok(CanonicalRecord::SensorSuite(SensorSuiteRecord::default())),
            StepResult::Error(ErrorSignal {
                kind: ErrorKind::Parse,
                message: "bad".to_string(),
                raw_excerpt: Some("oops".to_string()),
            }),
        ];

        let report = json_report(StepKind::ALL.iter().copied().zip(results.iter()));

        assert_eq!(
            report["sensor_suite"]["ok"]["capability_summary"],
            json!({"can": [], "cannot": []})
        );
        assert_eq!(
            report["gap_analysis"],
            json!({"error": {"kind": "ParseError", "message": "bad", "rawExcerpt": "oops"}})
        );
        assert!(report.get("integration_plan").is_none());
    }
}
