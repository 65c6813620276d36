use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blog_script_gen::error::{AppError, Result};
use blog_script_gen::llm::LanguageModel;

/// Answers summary prompts with a tag built from the chunk's last word and script
/// prompts with a short dialogue. Prompts containing `fail_on` fail with
/// the configured error.
#[derive(Clone)]
pub struct MockModel {
    pub prompts: Arc<Mutex<Vec<String>>>,
    pub fail_on: Option<String>,
    pub error: fn() -> AppError,
    pub panics: bool,
}

impl Default for MockModel {
    fn default() -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail_on: None,
            error: || AppError::Llm("model unavailable".into()),
            panics: false,
        }
    }
}

impl MockModel {
    pub fn failing_on(marker: &str, error: fn() -> AppError) -> Self {
        Self {
            fail_on: Some(marker.to_string()),
            error,
            ..Self::default()
        }
    }

    pub fn quota_on(marker: &str) -> Self {
        Self::failing_on(marker, || AppError::Api {
            status: 429,
            message: "RESOURCE_EXHAUSTED: Quota exceeded for requests".into(),
        })
    }

    /// A model whose every call panics, for exercising task failure.
    pub fn panicking() -> Self {
        Self {
            panics: true,
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    async fn invoke(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        if self.panics {
            panic!("mock model crashed");
        }

        if let Some(marker) = &self.fail_on {
            if prompt.contains(marker.as_str()) {
                return Err((self.error)());
            }
        }

        if prompt.starts_with("Write a concise summary") {
            let chunk = prompt.split('"').nth(1).unwrap_or_default();
            let last = chunk.split_whitespace().last().unwrap_or_default();
            return Ok(format!("summary-of-{}", last));
        }

        let host = prompt
            .lines()
            .skip_while(|l| !l.starts_with("Speaker Profiles:"))
            .nth(1)
            .and_then(|l| l.split(" (").next())
            .unwrap_or("Host");
        Ok(format!("[00:00]\n[{}]: Welcome to the show!", host))
    }
}
