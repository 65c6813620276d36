use std::time::Duration;
use tracing::{info, warn};
use crate::chunker::{ChunkPolicy, SUMMARY_SPLITTER};
use crate::error::{AppError, Result};
use crate::llm::{call_model, LanguageModel};

/// Chunk-wise summarizer.
///
/// Each chunk is summarized by its own model call and the partial
/// summaries are joined in chunk order. They are never re-summarized, so
/// the summary grows with the source text.
#[derive(Debug, Clone)]
pub struct Summarizer {
    splitter: ChunkPolicy,
    pacing: Duration,
}

impl Summarizer {
    pub fn new(pacing: Duration) -> Self {
        Self {
            splitter: SUMMARY_SPLITTER,
            pacing,
        }
    }

    pub fn with_splitter(mut self, splitter: ChunkPolicy) -> Self {
        self.splitter = splitter;
        self
    }

    pub async fn summarize(&self, model: &dyn LanguageModel, document_text: &str) -> Result<String> {
        let chunks = self.splitter.split(document_text)?;
        if chunks.is_empty() {
            return Err(AppError::Summary("document has no text to summarize".to_string()));
        }

        let total = chunks.len();
        let mut summaries = Vec::with_capacity(total);
        let mut failures = Vec::new();

        for (i, chunk) in chunks.iter().enumerate() {
            if i > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            info!(chunk = i + 1, total, "summarizing chunk");
            match call_model(model, &build_chunk_prompt(chunk)).await {
                Ok(summary) => summaries.push(summary.trim().to_string()),
                Err(e) => {
                    warn!(chunk = i + 1, error = %e, "failed to summarize chunk, skipping");
                    failures.push(e);
                }
            }
        }

        if summaries.is_empty() {
            if failures.iter().all(AppError::is_quota) {
                if let Some(quota) = failures.pop() {
                    return Err(quota);
                }
            }
            return Err(AppError::Summary(format!("no summary produced from {} chunks", total)));
        }

        Ok(summaries.join(" "))
    }
}

pub fn build_chunk_prompt(chunk: &str) -> String {
    let mut result = String::with_capacity(chunk.len() + 80);
    result.push_str("Write a concise summary of the following:\n\n\"");
    result.push_str(chunk);
    result.push_str("\"\n\nCONCISE SUMMARY:");
    result
}
