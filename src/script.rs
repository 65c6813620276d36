use serde::{Deserialize, Serialize};
use crate::error::{AppError, Result};
use crate::llm::{call_model, LanguageModel};

pub const WORDS_PER_MINUTE: u32 = 140;
pub const MAX_SPEAKERS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    pub role: String,
    pub background: String,
    pub style: String,
}

impl Speaker {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        background: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            background: background.into(),
            style: style.into(),
        }
    }

    fn profile(&self) -> String {
        format!(
            "{} ({}):\n- Background: {}\n- Style: {}",
            self.name, self.role, self.background, self.style
        )
    }
}

pub fn target_word_count(duration_minutes: u32) -> u64 {
    u64::from(duration_minutes) * u64::from(WORDS_PER_MINUTE)
}

/// Rejects speaker lists and durations a script cannot be written for.
pub fn validate(speakers: &[Speaker], duration_minutes: u32) -> Result<()> {
    if speakers.is_empty() {
        return Err(AppError::InvalidRequest(
            "at least one speaker is required to host the script".to_string(),
        ));
    }
    if speakers.len() > MAX_SPEAKERS {
        return Err(AppError::InvalidRequest(format!(
            "at most {} speakers are supported, got {}",
            MAX_SPEAKERS,
            speakers.len()
        )));
    }
    if duration_minutes == 0 {
        return Err(AppError::InvalidRequest("duration_minutes must be positive".to_string()));
    }
    Ok(())
}

pub fn build_prompt(title: &str, summary: &str, speakers: &[Speaker], duration_minutes: u32) -> String {
    let target_words = target_word_count(duration_minutes);
    let profiles = speakers.iter().map(Speaker::profile).collect::<Vec<_>>().join("\n");

    format!(
        "Create a YouTube video script for {count} speakers based on this blog post:
Title: {title}

Target Duration: {duration_minutes} minutes
Target Word Count: approximately {target_words} words

Speaker Profiles:
{profiles}

Blog Content Summary:
{summary}

Please create an engaging multi-speaker script that:
1. Fits within the {duration_minutes}-minute target duration (approximately {target_words} words)
2. Starts with the Main Host introducing the topic and other speakers
3. Distributes content based on each speaker's expertise and role
4. Matches each speaker's designated presentation style
5. Creates natural dialogue and interactions between speakers
6. Uses speakers' backgrounds to add relevant insights and examples
7. Maintains clear speaker labels for each line
8. Ends with contributions from all speakers and a collaborative conclusion
9. Includes appropriate pacing and transitions between segments
10. Balances speaking time among participants

Format each line as: [Speaker Name]: Dialog
Include timestamps in [MM:SS] format before major segments
",
        count = speakers.len(),
    )
}

/// Writes the final script with a single model call.
pub async fn generate(
    model: &dyn LanguageModel,
    title: &str,
    summary: Option<&str>,
    speakers: &[Speaker],
    duration_minutes: u32,
) -> Result<String> {
    let summary = summary
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Summary("no summary available for script generation".to_string()))?;
    validate(speakers, duration_minutes)?;

    let prompt = build_prompt(title, summary, speakers, duration_minutes);
    tracing::debug!(title, prompt_len = prompt.len(), "requesting script");
    call_model(model, &prompt).await
}
