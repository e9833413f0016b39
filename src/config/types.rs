use std::fmt;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_GROQ_BASE_URL, DEFAULT_OPENROUTER_BASE_URL};

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub models: ModelSettings,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub timeout_secs: u64,
    pub base_url: String,
    pub user_agent: String,
}

/// Both providers speak the OpenAI-compatible chat completions protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LlmProvider {
    Groq,
    OpenRouter,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::Groq => write!(f, "groq"),
            LlmProvider::OpenRouter => write!(f, "openrouter"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(LlmProvider::Groq),
            "openrouter" => Ok(LlmProvider::OpenRouter),
            other => Err(anyhow!("Unknown LLM provider '{other}'")),
        }
    }
}

impl LlmProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::Groq => DEFAULT_GROQ_BASE_URL,
            LlmProvider::OpenRouter => DEFAULT_OPENROUTER_BASE_URL,
        }
    }

    pub fn api_key_env_var(self) -> &'static str {
        match self {
            LlmProvider::Groq => "GROQ_API_KEY",
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LlmProvider::Groq => "Groq",
            LlmProvider::OpenRouter => "OpenRouter",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub model: String,
    pub temperature: f32,
    pub sensor_suite_max_tokens: u32,
    pub gap_analysis_max_tokens: u32,
    pub integration_plan_max_tokens: u32,
}

// File configuration types
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum RawConfig {
    Nested(FileConfigV2),
    Legacy(FileConfigV1),
}

/// Flat shape: `{"groq_api_key": "...", "model": "..."}`.
#[derive(Debug, Deserialize)]
pub(super) struct FileConfigV1 {
    pub groq_api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileConfigV2 {
    pub llm: FileLlmSettings,
    #[serde(default)]
    pub models: Option<FileModelSettings>,
}

#[derive(Debug, Deserialize)]
pub(super) struct FileLlmSettings {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileModelSettings {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub sensor_suite_max_tokens: Option<u32>,
    pub gap_analysis_max_tokens: Option<u32>,
    pub integration_plan_max_tokens: Option<u32>,
}
