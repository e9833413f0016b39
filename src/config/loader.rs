use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs::home_dir;
use tracing::debug;

use super::Config;
use super::builder::ConfigBuilder;
use super::environment::apply_env_overrides;
use super::types::{FileConfigV1, FileConfigV2, LlmProvider, RawConfig};
use super::validation::validate;

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".eo-advisor/config");
        Ok(path)
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Defaults, then the config file, then environment overrides.
    pub fn resolve() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = ConfigBuilder::new();

        if path.exists() {
            debug!(path = %path.display(), "reading config file");
            builder = Self::apply_file(builder, &path)?;
        }

        apply_env_overrides(builder)?.build()
    }

    /// Like [`Config::resolve`], but also requires usable credentials.
    pub fn load() -> Result<Self> {
        let config = Self::resolve()?;
        validate(&config)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let raw: RawConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        match raw {
            RawConfig::Nested(cfg) => cfg.apply(builder),
            RawConfig::Legacy(cfg) => Ok(cfg.apply(builder)),
        }
    }
}

impl FileConfigV1 {
    pub fn apply(self, builder: ConfigBuilder) -> ConfigBuilder {
        builder
            .with_llm(|llm| {
                if let Some(api_key) = self.groq_api_key {
                    llm.provider = LlmProvider::Groq;
                    llm.base_url = LlmProvider::Groq.default_base_url().to_string();
                    llm.api_key = api_key;
                }
                if let Some(timeout) = self.timeout_secs {
                    llm.timeout_secs = timeout;
                }
            })
            .with_models(|models| {
                if let Some(model) = self.model {
                    models.model = model;
                }
                if let Some(temperature) = self.temperature {
                    models.temperature = temperature;
                }
            })
    }
}

impl FileConfigV2 {
    pub fn apply(self, builder: ConfigBuilder) -> Result<ConfigBuilder> {
        let provider = self
            .llm
            .provider
            .as_deref()
            .map(str::parse::<LlmProvider>)
            .transpose()
            .context("Invalid provider in config file")?;

        let llm = self.llm;
        let builder = builder.with_llm(|settings| {
            if let Some(provider) = provider {
                if settings.provider != provider {
                    settings.provider = provider;
                    settings.base_url = provider.default_base_url().to_string();
                }
            }
            if let Some(api_key) = llm.api_key {
                settings.api_key = api_key;
            }
            if let Some(timeout) = llm.timeout_secs {
                settings.timeout_secs = timeout;
            }
            if let Some(base_url) = llm.base_url {
                settings.base_url = base_url;
            }
            if let Some(user_agent) = llm.user_agent {
                settings.user_agent = user_agent;
            }
        });

        let models = self.models.unwrap_or_default();
        Ok(builder.with_models(|settings| {
            if let Some(model) = models.model {
                settings.model = model;
            }
            if let Some(temperature) = models.temperature {
                settings.temperature = temperature;
            }
            if let Some(tokens) = models.sensor_suite_max_tokens {
                settings.sensor_suite_max_tokens = tokens;
            }
            if let Some(tokens) = models.gap_analysis_max_tokens {
                settings.gap_analysis_max_tokens = tokens;
            }
            if let Some(tokens) = models.integration_plan_max_tokens {
                settings.integration_plan_max_tokens = tokens;
            }
        }))
    }
}
