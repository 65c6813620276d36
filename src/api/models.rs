use serde::{Deserialize, Serialize};
use crate::script::Speaker;

pub const LOAD_FAILED: &str = "Failed to load blog content";
pub const ERROR_TITLE: &str = "Error";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScriptRequest {
    pub urls: Vec<String>,
    pub speakers: Vec<Speaker>,
    pub duration_minutes: u32,
}

/// Outcome for one requested URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationResult {
    pub title: String,
    pub url: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    pub fn success(title: impl Into<String>, url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
            error: None,
        }
    }

    pub fn failure(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            url: url.into(),
            content: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_omitted_on_success() {
        let json = serde_json::to_value(GenerationResult::success("T", "u", "body")).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["content"], "body");
    }

    #[test]
    fn failure_has_empty_content() {
        let result = GenerationResult::failure("u", LOAD_FAILED);
        assert_eq!(result.title, "Error");
        assert!(result.content.is_empty());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], LOAD_FAILED);
    }

    #[test]
    fn request_parses() {
        let req: ScriptRequest = serde_json::from_str(
            r#"{"urls":["https://example.com/post"],
                "speakers":[{"name":"Alex","role":"Host","background":"Tech journalist","style":"casual"}],
                "duration_minutes":5}"#,
        )
        .unwrap();
        assert_eq!(req.urls.len(), 1);
        assert_eq!(req.speakers[0].name, "Alex");
        assert_eq!(req.duration_minutes, 5);
    }
}
