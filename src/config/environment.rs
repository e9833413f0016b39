use std::env;

use anyhow::{Context, Result, anyhow};

use super::builder::ConfigBuilder;
use super::types::LlmProvider;

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(provider_raw) = env_string("EO_ADVISOR_PROVIDER")? {
        let provider = provider_raw.parse::<LlmProvider>().with_context(|| {
            format!("Failed to parse EO_ADVISOR_PROVIDER value '{provider_raw}'")
        })?;
        builder = builder.with_llm(|llm| {
            if llm.provider != provider {
                llm.provider = provider;
                llm.base_url = provider.default_base_url().to_string();
            }
        });
    }

    if let Some(base_url) = env_string("EO_ADVISOR_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = base_url);
    }

    for provider in [LlmProvider::Groq, LlmProvider::OpenRouter] {
        if let Some(api_key) = env_string(provider.api_key_env_var())? {
            builder = builder.with_llm(|llm| {
                if llm.provider == provider {
                    llm.api_key = api_key;
                }
            });
        }
    }

    if let Some(timeout) = env_u64("EO_ADVISOR_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(model) = env_string("EO_ADVISOR_MODEL")? {
        builder = builder.with_models(|models| models.model = model);
    }

    if let Some(temperature) = env_f32("EO_ADVISOR_TEMPERATURE")? {
        builder = builder.with_models(|models| models.temperature = temperature);
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_u64(key: &str) -> Result<Option<u64>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {key} as u64"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

pub fn env_f32(key: &str) -> Result<Option<f32>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .trim()
            .parse::<f32>()
            .with_context(|| format!("Failed to parse {key} as a number"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}
