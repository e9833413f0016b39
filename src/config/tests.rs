use std::sync::{Mutex, MutexGuard, OnceLock};

use tempfile::TempDir;

use super::environment::{env_f32, env_string, env_u64};
use super::{
    Config, DEFAULT_GAP_ANALYSIS_MAX_TOKENS, DEFAULT_GROQ_BASE_URL, DEFAULT_MODEL,
    DEFAULT_OPENROUTER_BASE_URL, LlmProvider,
};

const MANAGED_VARS: &[&str] = &[
    "EO_ADVISOR_PROVIDER",
    "EO_ADVISOR_BASE_URL",
    "GROQ_API_KEY",
    "OPENROUTER_API_KEY",
    "EO_ADVISOR_TIMEOUT_SECS",
    "EO_ADVISOR_MODEL",
    "EO_ADVISOR_TEMPERATURE",
];

fn env_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let saved = vars
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect::<Vec<_>>();
        for (key, value) in vars {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
        Self { saved }
    }

    /// Points HOME at `home`, clears every advisor variable, then applies `vars`.
    fn isolated(home: &TempDir, vars: &[(&str, &str)]) -> Self {
        let home = home.path().to_str().unwrap();
        let mut all: Vec<(&str, Option<&str>)> = vec![("HOME", Some(home))];
        for key in MANAGED_VARS {
            let value = vars
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| *value);
            all.push((*key, value));
        }
        Self::new(&all)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => unsafe { std::env::set_var(key, val) },
                None => unsafe { std::env::remove_var(key) },
            }
        }
    }
}

fn write_config(home: &TempDir, contents: &str) {
    let dir = home.path().join(".eo-advisor");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config"), contents).unwrap();
}

#[test]
fn defaults_match_documented_values() {
    let config = Config::builder().build().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::Groq);
    assert_eq!(config.llm.base_url, DEFAULT_GROQ_BASE_URL);
    assert_eq!(config.models.model, DEFAULT_MODEL);
    assert_eq!(config.models.temperature, 0.2);
    assert_eq!(config.models.sensor_suite_max_tokens, 1600);
    assert_eq!(config.models.gap_analysis_max_tokens, 2000);
    assert_eq!(config.models.integration_plan_max_tokens, 2200);
}

#[test]
fn load_from_env_only() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(
        &home,
        &[
            ("GROQ_API_KEY", "env-key"),
            ("EO_ADVISOR_TIMEOUT_SECS", "45"),
            ("EO_ADVISOR_MODEL", "llama-3.3-70b-versatile"),
            ("EO_ADVISOR_TEMPERATURE", "0.5"),
        ],
    );

    let config = Config::load().unwrap();
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 45);
    assert_eq!(config.models.model, "llama-3.3-70b-versatile");
    assert_eq!(config.models.temperature, 0.5);
}

#[test]
fn legacy_flat_file_is_accepted() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    write_config(&home, r#"{"groq_api_key": "file-key", "model": "file-model"}"#);
    let _env = EnvGuard::isolated(&home, &[]);

    let config = Config::load().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::Groq);
    assert_eq!(config.llm.api_key, "file-key");
    assert_eq!(config.models.model, "file-model");
}

#[test]
fn nested_file_sets_provider_and_token_limits() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        r#"{
            "llm": {"provider": "openrouter", "api_key": "or-key"},
            "models": {"gap_analysis_max_tokens": 3000}
        }"#,
    );
    let _env = EnvGuard::isolated(&home, &[]);

    let config = Config::load().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::OpenRouter);
    assert_eq!(config.llm.base_url, DEFAULT_OPENROUTER_BASE_URL);
    assert_eq!(config.llm.api_key, "or-key");
    assert_eq!(config.models.gap_analysis_max_tokens, 3000);
    assert_eq!(config.models.sensor_suite_max_tokens, 1600);
}

#[test]
fn env_overrides_file() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        r#"{"groq_api_key": "file-key", "model": "file-model", "timeout_secs": 20}"#,
    );
    let _env = EnvGuard::isolated(
        &home,
        &[("GROQ_API_KEY", "env-key"), ("EO_ADVISOR_MODEL", "env-model")],
    );

    let config = Config::load().unwrap();
    assert_eq!(config.llm.api_key, "env-key");
    assert_eq!(config.llm.timeout_secs, 20);
    assert_eq!(config.models.model, "env-model");
    assert_eq!(config.models.gap_analysis_max_tokens, DEFAULT_GAP_ANALYSIS_MAX_TOKENS);
}

#[test]
fn provider_switch_picks_matching_key_and_url() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(
        &home,
        &[
            ("EO_ADVISOR_PROVIDER", "openrouter"),
            ("GROQ_API_KEY", "groq-key"),
            ("OPENROUTER_API_KEY", "or-key"),
        ],
    );

    let config = Config::load().unwrap();
    assert_eq!(config.llm.provider, LlmProvider::OpenRouter);
    assert_eq!(config.llm.api_key, "or-key");
    assert_eq!(config.llm.base_url, DEFAULT_OPENROUTER_BASE_URL);
}

#[test]
fn load_errors_without_api_key() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(&home, &[]);

    let err = Config::load().unwrap_err();
    assert!(err.to_string().contains("Groq API key not found"));
}

#[test]
fn resolve_succeeds_without_api_key() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(&home, &[]);

    let config = Config::resolve().unwrap();
    assert!(config.llm.api_key.is_empty());
}

#[test]
fn unknown_provider_is_rejected() {
    let _lock = env_lock();
    let home = TempDir::new().unwrap();
    let _env = EnvGuard::isolated(&home, &[("EO_ADVISOR_PROVIDER", "cerebras")]);

    let err = Config::resolve().unwrap_err();
    assert!(format!("{err:#}").contains("Unknown LLM provider"));
}

#[test]
fn out_of_range_temperature_fails_validation() {
    let mut config = Config::builder()
        .with_llm(|llm| llm.api_key = "key".to_string())
        .build()
        .unwrap();
    config.models.temperature = 3.5;
    assert!(config.validate().is_err());
}

#[test]
fn env_helpers_parse_and_skip_blank_values() {
    let _lock = env_lock();
    let _env = EnvGuard::new(&[
        ("EO_ADVISOR_TEST_STRING", Some("value")),
        ("EO_ADVISOR_TEST_BLANK", Some("  ")),
        ("EO_ADVISOR_TEST_U64", Some("123")),
        ("EO_ADVISOR_TEST_F32", Some("0.75")),
    ]);

    assert_eq!(env_string("EO_ADVISOR_TEST_STRING").unwrap(), Some("value".to_string()));
    assert_eq!(env_string("EO_ADVISOR_TEST_BLANK").unwrap(), None);
    assert_eq!(env_string("EO_ADVISOR_TEST_MISSING").unwrap(), None);
    assert_eq!(env_u64("EO_ADVISOR_TEST_U64").unwrap(), Some(123));
    assert_eq!(env_f32("EO_ADVISOR_TEST_F32").unwrap(), Some(0.75));
    assert!(env_u64("EO_ADVISOR_TEST_STRING").is_err());
}
