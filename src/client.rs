use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{LlmProvider, LlmSettings};

/// Sampling knobs forwarded with every completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_payload: String,
    pub model: String,
    pub options: CompletionOptions,
}

/// The one capability the workflow needs from a language model.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

pub type DynLlmClient = dyn LlmClient;

pub trait LlmClientFactory: Send + Sync {
    fn build(&self, settings: &LlmSettings) -> Result<Arc<DynLlmClient>>;
}

/// Builds reqwest-backed clients; refuses to build one without credentials.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpClientFactory;

impl LlmClientFactory for HttpClientFactory {
    fn build(&self, settings: &LlmSettings) -> Result<Arc<DynLlmClient>> {
        if settings.api_key.trim().is_empty() {
            return Err(anyhow!(
                "{} API key not found. Set {} or add it to the config file",
                settings.provider.display_name(),
                settings.provider.api_key_env_var()
            ));
        }
        Ok(Arc::new(AIClient::new(settings)?))
    }
}

#[derive(Debug, Clone)]
pub struct AIClient {
    http: Client,
    base_url: String,
    api_key: String,
    user_agent: String,
    provider: LlmProvider,
}

impl AIClient {
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            user_agent: settings.user_agent.clone(),
            provider: settings.provider,
        })
    }

    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut req_builder = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("User-Agent", &self.user_agent)
            .header("Content-Type", "application/json")
            .json(request);

        if matches!(self.provider, LlmProvider::OpenRouter) {
            req_builder = req_builder.header("X-Title", "eo-advisor");
        }

        let response = req_builder
            .send()
            .await
            .context("Failed to send request to chat completions endpoint")?;

        match response.status() {
            reqwest::StatusCode::OK => response
                .json::<ChatCompletionResponse>()
                .await
                .context("Failed to parse chat completion response JSON"),
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                let error_text = response.text().await.unwrap_or_default();
                Err(anyhow!(
                    "Rate limit exceeded. Please wait before trying again. (API response: {error_text})"
                ))
            }
            reqwest::StatusCode::UNAUTHORIZED => Err(anyhow!(
                "Invalid API key. Please check your API key configuration."
            )),
            reqwest::StatusCode::BAD_REQUEST => {
                let error_text = response.text().await.unwrap_or_default();
                Err(anyhow!("Invalid request: {error_text}"))
            }
            reqwest::StatusCode::INTERNAL_SERVER_ERROR
            | reqwest::StatusCode::SERVICE_UNAVAILABLE => Err(anyhow!(
                "Service is temporarily unavailable. Please try again later."
            )),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(anyhow!("API error (status {status}): {error_text}"))
            }
        }
    }
}

#[async_trait]
impl LlmClient for AIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatCompletionRequest::from(request);
        debug!(
            model = %body.model,
            payload_chars = request.user_payload.chars().count(),
            max_tokens = body.max_tokens,
            "sending completion request"
        );

        let response = self.chat_completion(&body).await?;
        response
            .first_text()
            .context("Completion response contained no choices")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl From<&CompletionRequest> for ChatCompletionRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: vec![
                ChatMessage {
                    role: ChatMessageRole::System,
                    content: Some(request.system_prompt.clone()),
                },
                ChatMessage {
                    role: ChatMessageRole::User,
                    content: Some(request.user_payload.clone()),
                },
            ],
            max_tokens: request.options.max_tokens,
            temperature: request.options.temperature,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatMessageRole,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Accepts chat-style (`message.content`) and completion-style (`text`) choices.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatMessage>,
    #[serde(default)]
    pub text: Option<String>,
    pub finish_reason: Option<String>,
}

impl ChatChoice {
    pub fn text(&self) -> String {
        self.message
            .as_ref()
            .and_then(|message| message.content.clone())
            .or_else(|| self.text.clone())
            .unwrap_or_default()
    }
}

impl ChatCompletionResponse {
    /// `None` only when there are no choices; null content reads as empty text.
    pub fn first_text(&self) -> Option<String> {
        self.choices.first().map(ChatChoice::text)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::config::Config;

    fn settings_for(server: &MockServer, provider: LlmProvider) -> LlmSettings {
        let mut config = Config::builder()
            .with_llm(|llm| {
                llm.provider = provider;
                llm.api_key = "test-key".to_string();
                llm.base_url = server.base_url();
            })
            .build()
            .unwrap();
        config.llm.timeout_secs = 5;
        config.llm
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_prompt: "system".to_string(),
            user_payload: "{\"usecase\":\"drought\"}".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            options: CompletionOptions {
                temperature: 0.2,
                max_tokens: 1600,
            },
        }
    }

    #[tokio::test]
    async fn complete_reads_chat_message_content() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer test-key")
                    .json_body_partial(r#"{"model": "llama-3.1-8b-instant", "max_tokens": 1600}"#);
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "{\"ok\": 1}"}, "finish_reason": "stop"}]
                }));
            })
            .await;

        let client = AIClient::new(&settings_for(&server, LlmProvider::Groq)).unwrap();
        let text = client.complete(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "{\"ok\": 1}");
    }

    #[tokio::test]
    async fn complete_accepts_completion_style_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200)
                    .json_body(json!({"choices": [{"text": "{\"legacy\": true}"}]}));
            })
            .await;

        let client = AIClient::new(&settings_for(&server, LlmProvider::Groq)).unwrap();
        assert_eq!(client.complete(&request()).await.unwrap(), "{\"legacy\": true}");
    }

    #[tokio::test]
    async fn null_content_reads_as_empty_text() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": null}}]
                }));
            })
            .await;

        let client = AIClient::new(&settings_for(&server, LlmProvider::Groq)).unwrap();
        assert_eq!(client.complete(&request()).await.unwrap(), "");
    }

    #[tokio::test]
    async fn openrouter_requests_carry_title_header() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("x-title", "eo-advisor");
                then.status(200)
                    .json_body(json!({"choices": [{"message": {"role": "assistant", "content": "{}"}}]}));
            })
            .await;

        let client = AIClient::new(&settings_for(&server, LlmProvider::OpenRouter)).unwrap();
        client.complete(&request()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unauthorized_maps_to_api_key_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(401);
            })
            .await;

        let client = AIClient::new(&settings_for(&server, LlmProvider::Groq)).unwrap();
        let err = client.complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid API key"));
    }

    #[tokio::test]
    async fn empty_choices_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let client = AIClient::new(&settings_for(&server, LlmProvider::Groq)).unwrap();
        let err = client.complete(&request()).await.unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn factory_refuses_empty_api_key() {
        let settings = LlmSettings::default();
        let err = HttpClientFactory.build(&settings).err().unwrap();
        assert!(err.to_string().contains("API key not found"));
    }
}
