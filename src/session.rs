use std::fmt;
use std::str::FromStr;
use crate::error::{AppError, Result};
use crate::llm::{call_model, LanguageModel};
use crate::script::{self, Speaker};

const CONTINUE_PROMPT: &str = "Continue the multi-speaker script, maintaining:
- Speaker roles and expertise
- Individual presentation styles
- Natural interactions and dialogue
- Balanced participation";

const CONCLUSION_PROMPT: &str = "Generate a collaborative conclusion where:
- Each speaker contributes based on their expertise
- The Main Host summarizes key points
- All speakers participate in the call-to-action
- Maintain individual speaking styles";

pub const CHOICE_MENU: &str =
    "Would you like to: (1) Add more content (2) Generate conclusion (3) Move to next blog (4) Exit?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draft {
    Initial,
    Continuation,
    Conclusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// A draft is pending and will be produced by the next `advance`.
    Drafting(Draft),
    AwaitingChoice,
    Done { exit_requested: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    AddMore,
    Conclude,
    Next,
    Exit,
}

impl FromStr for Choice {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1" => Ok(Choice::AddMore),
            "2" => Ok(Choice::Conclude),
            "3" => Ok(Choice::Next),
            "4" => Ok(Choice::Exit),
            other => Err(AppError::InvalidRequest(format!("unknown choice: {:?}", other))),
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Drafting(draft) => write!(f, "drafting ({:?})", draft),
            SessionState::AwaitingChoice => f.write_str("awaiting choice"),
            SessionState::Done { exit_requested: true } => f.write_str("done (exit)"),
            SessionState::Done { exit_requested: false } => f.write_str("done"),
        }
    }
}

/// Interactive drafting of one blog's script.
#[derive(Debug, Clone)]
pub struct ScriptSession {
    pub title: String,
    pub url: String,
    pub speakers: Vec<Speaker>,
    pub duration_minutes: u32,
    content: String,
    state: SessionState,
}

impl ScriptSession {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        speakers: Vec<Speaker>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            speakers,
            duration_minutes,
            content: String::new(),
            state: SessionState::Drafting(Draft::Initial),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, SessionState::Done { .. })
    }

    /// Produces the pending draft and returns the newly written part.
    ///
    /// `summary` feeds the initial draft; follow-up drafts use fixed prompts.
    pub async fn advance(&mut self, model: &dyn LanguageModel, summary: Option<&str>) -> Result<String> {
        let SessionState::Drafting(draft) = self.state else {
            return Err(AppError::InvalidRequest(format!("nothing to draft while {}", self.state)));
        };

        let part = match draft {
            Draft::Initial => {
                script::generate(model, &self.title, summary, &self.speakers, self.duration_minutes).await?
            }
            Draft::Continuation => call_model(model, CONTINUE_PROMPT).await?,
            Draft::Conclusion => call_model(model, CONCLUSION_PROMPT).await?,
        };

        if !self.content.is_empty() {
            self.content.push_str("\n\n");
        }
        self.content.push_str(&part);
        self.state = SessionState::AwaitingChoice;
        Ok(part)
    }

    pub fn choose(&mut self, choice: Choice) -> Result<SessionState> {
        if self.state != SessionState::AwaitingChoice {
            return Err(AppError::InvalidRequest(format!("cannot choose while {}", self.state)));
        }

        self.state = match choice {
            Choice::AddMore => SessionState::Drafting(Draft::Continuation),
            Choice::Conclude => SessionState::Drafting(Draft::Conclusion),
            Choice::Next => SessionState::Done { exit_requested: false },
            Choice::Exit => SessionState::Done { exit_requested: true },
        };
        Ok(self.state)
    }

    /// Ends the session without waiting for a choice.
    pub fn finish(&mut self) {
        self.state = SessionState::Done { exit_requested: false };
    }
}
