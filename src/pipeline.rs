use std::sync::Arc;
use tracing::{error, info, warn, Instrument};
use crate::api::models::{GenerationResult, ScriptRequest, LOAD_FAILED};
use crate::error::Result;
use crate::llm::LanguageModel;
use crate::loader::{ContentLoader, LoadedDocument};
use crate::script::{self, Speaker};
use crate::summarizer::Summarizer;

/// Load → summarize → script, one URL at a time.
#[derive(Clone)]
pub struct Pipeline {
    model: Arc<dyn LanguageModel>,
    loader: Arc<dyn ContentLoader>,
    summarizer: Summarizer,
}

impl Pipeline {
    pub fn new(model: Arc<dyn LanguageModel>, loader: Arc<dyn ContentLoader>, summarizer: Summarizer) -> Self {
        Self { model, loader, summarizer }
    }

    pub fn model(&self) -> &dyn LanguageModel {
        self.model.as_ref()
    }

    pub fn loader(&self) -> &dyn ContentLoader {
        self.loader.as_ref()
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Produces exactly one result per requested URL, in request order.
    pub async fn process(&self, request: &ScriptRequest) -> Vec<GenerationResult> {
        if let Err(e) = script::validate(&request.speakers, request.duration_minutes) {
            warn!(error = %e, "rejecting request");
            let message = e.to_string();
            return request
                .urls
                .iter()
                .map(|url| GenerationResult::failure(url, message.clone()))
                .collect();
        }

        let mut results = Vec::with_capacity(request.urls.len());
        for url in &request.urls {
            let span = tracing::info_span!("blog", url = %url);
            let result = self.process_url(url, request).instrument(span).await;
            results.push(result);
        }
        results
    }

    async fn process_url(&self, url: &str, request: &ScriptRequest) -> GenerationResult {
        let start = std::time::Instant::now();

        let document = match self.loader.load(url).await {
            Ok(document) => document,
            Err(e) => {
                error!(error = %e, "failed to load blog content");
                return GenerationResult::failure(url, LOAD_FAILED);
            }
        };
        info!(title = %document.title, chars = document.content.len(), "loaded blog");

        match self.script_for(&document, &request.speakers, request.duration_minutes).await {
            Ok(script) => {
                info!(elapsed = ?start.elapsed(), "script generated");
                GenerationResult::success(document.title, url, script)
            }
            Err(e) => {
                error!(error = %e, "script generation failed");
                GenerationResult::failure(url, e.to_string())
            }
        }
    }

    pub async fn script_for(
        &self,
        document: &LoadedDocument,
        speakers: &[Speaker],
        duration_minutes: u32,
    ) -> Result<String> {
        let summary = self.summarizer.summarize(self.model(), &document.content).await?;
        script::generate(self.model(), &document.title, Some(&summary), speakers, duration_minutes).await
    }
}
