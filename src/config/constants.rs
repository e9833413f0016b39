pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_SENSOR_SUITE_MAX_TOKENS: u32 = 1600;
pub const DEFAULT_GAP_ANALYSIS_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_INTEGRATION_PLAN_MAX_TOKENS: u32 = 2200;
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
