use anyhow::Result;
use clap::Parser;

use crate::config::Config;
use crate::records::UseCase;

use super::commands;

/// Entry point for the `eo-advisor` command-line interface.
#[derive(Debug, Parser)]
#[command(
    name = "eo-advisor",
    about = "Satellite sensor suite, gap analysis and integrated observation plan for a use case",
    version,
    long_about = None
)]
pub struct Cli {
    /// Use case to plan for (e.g. "Crop insurance for drought damage")
    #[arg(short = 'u', long = "usecase")]
    pub usecase: String,

    /// Background of the use case
    #[arg(long, default_value = "")]
    pub background: String,

    /// The question the customer wants answered
    #[arg(long, default_value = "")]
    pub question: String,

    /// Known issues or constraints
    #[arg(long, default_value = "")]
    pub issues: String,

    /// Goal for the gap analysis (defaults to the built-in purpose hypothesis)
    #[arg(short = 'g', long)]
    pub goal: Option<String>,

    /// Override the model for every step
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Print the tagged results as JSON instead of formatted text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn use_case(&self) -> UseCase {
        UseCase {
            name: self.usecase.trim().to_string(),
            background: self.background.trim().to_string(),
            question: self.question.trim().to_string(),
            issues: self.issues.trim().to_string(),
        }
    }

    /// Command-line flags take precedence over file and environment settings.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(model) = self.model.as_deref().map(str::trim) {
            if !model.is_empty() {
                config.models.model = model.to_string();
            }
        }
    }

    pub async fn run(self, config: Config) -> Result<()> {
        commands::run(self, config).await
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Cli;
    use crate::config::Config;

    #[test]
    fn parses_use_case_context() {
        let cli = Cli::try_parse_from([
            "eo-advisor",
            "--usecase",
            " Crop insurance ",
            "--background",
            "Drought losses",
            "--issues",
            "Cloud cover",
        ])
        .unwrap();

        let use_case = cli.use_case();
        assert_eq!(use_case.name, "Crop insurance");
        assert_eq!(use_case.background, "Drought losses");
        assert_eq!(use_case.question, "");
        assert_eq!(use_case.issues, "Cloud cover");
        assert!(!cli.json);
    }

    #[test]
    fn usecase_is_required() {
        assert!(Cli::try_parse_from(["eo-advisor", "--json"]).is_err());
    }

    #[test]
    fn model_flag_overrides_config() {
        let cli =
            Cli::try_parse_from(["eo-advisor", "-u", "Floods", "-m", "llama-3.3-70b-versatile"])
                .unwrap();
        let mut config = Config::builder().build().unwrap();

        cli.apply_overrides(&mut config);
        assert_eq!(config.models.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn blank_model_flag_is_ignored() {
        let cli = Cli::try_parse_from(["eo-advisor", "-u", "Floods", "--model", "  "]).unwrap();
        let mut config = Config::builder().build().unwrap();

        cli.apply_overrides(&mut config);
        assert_eq!(config.models.model, crate::config::DEFAULT_MODEL);
    }
}
