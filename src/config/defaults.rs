use super::constants::*;
use super::types::{LlmProvider, LlmSettings, ModelSettings};

pub fn default_user_agent() -> String {
    format!("eo-advisor/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LlmSettings {
    fn default() -> Self {
        let provider = LlmProvider::Groq;
        Self {
            provider,
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: provider.default_base_url().to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            sensor_suite_max_tokens: DEFAULT_SENSOR_SUITE_MAX_TOKENS,
            gap_analysis_max_tokens: DEFAULT_GAP_ANALYSIS_MAX_TOKENS,
            integration_plan_max_tokens: DEFAULT_INTEGRATION_PLAN_MAX_TOKENS,
        }
    }
}
