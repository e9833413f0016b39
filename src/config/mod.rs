//! Configuration for the advisor.
//!
//! Settings are layered from built-in defaults, the JSON file at
//! `~/.eo-advisor/config` (nested or legacy flat shape), and environment
//! overrides. Command-line flags are applied on top by the CLI.

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use builder::ConfigBuilder;
pub use constants::{
    DEFAULT_GAP_ANALYSIS_MAX_TOKENS, DEFAULT_GROQ_BASE_URL, DEFAULT_INTEGRATION_PLAN_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_SENSOR_SUITE_MAX_TOKENS,
    DEFAULT_TEMPERATURE,
};
pub use types::{Config, LlmProvider, LlmSettings, ModelSettings};

#[cfg(test)]
mod tests;
