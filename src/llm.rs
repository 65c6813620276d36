use async_trait::async_trait;
use serde::Serialize;
use reqwest::Client;
use crate::config::Config;
use crate::error::{AppError, Result, QUOTA_GUIDANCE};

/// A hosted text-completion model: one prompt in, one textual reply out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    fn name(&self) -> &str;

    async fn invoke(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

/// Chat-completions client for OpenRouter and compatible endpoints.
pub struct OpenRouterModel {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    site_url: Option<String>,
    site_name: Option<String>,
}

impl OpenRouterModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            site_url: None,
            site_name: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut model = Self::new(&config.openrouter_api_key, &config.model_name)
            .with_base_url(&config.base_url);
        model.site_url = config.site_url.clone();
        model.site_name = config.site_name.clone();
        model
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl LanguageModel for OpenRouterModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "user".into(),
                    content: prompt.into(),
                }
            ],
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);

        // Optional attribution headers
        if let Some(url) = &self.site_url {
            request = request.header("HTTP-Referer", url);
        }

        if let Some(name) = &self.site_name {
            request = request.header("X-Title", name);
        }

        let res = request
            .send()
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let message = res.text().await.unwrap_or_else(|e| {
                tracing::debug!(status, error = %e, "failed to read error body");
                String::new()
            });
            return Err(AppError::Api { status, message });
        }

        let json: serde_json::Value = res.json().await.map_err(|e| AppError::Llm(e.to_string()))?;
        let reply = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::Llm("Invalid response format from LLM".to_string()))?
            .to_string();

        Ok(reply)
    }
}

/// Invokes the model once and classifies quota exhaustion.
///
/// Any failure whose status is 429, or whose message mentions `quota` or
/// `429`, is surfaced as [`AppError::QuotaExceeded`]. Nothing is retried.
pub async fn call_model(model: &dyn LanguageModel, prompt: &str) -> Result<String> {
    match model.invoke(prompt).await {
        Ok(reply) => Ok(reply),
        Err(err) => Err(classify(err)),
    }
}

fn classify(err: AppError) -> AppError {
    if err.is_quota() {
        return err;
    }

    let message = err.to_string();
    let status_429 = matches!(err, AppError::Api { status: 429, .. });
    if status_429 || message.to_lowercase().contains("quota") || message.contains("429") {
        tracing::error!(model_error = %message, guidance = QUOTA_GUIDANCE, "API quota exceeded");
        return AppError::QuotaExceeded(message);
    }

    err
}
