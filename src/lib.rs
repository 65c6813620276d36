pub mod api;
pub mod chunker;
pub mod config;
pub mod error;
pub mod llm;
pub mod loader;
pub mod pipeline;
pub mod script;
pub mod session;
pub mod summarizer;
pub mod telemetry;

use std::sync::Arc;
use config::Config;
use llm::OpenRouterModel;
use loader::WebLoader;
use pipeline::Pipeline;
use summarizer::Summarizer;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Pipeline,
}

impl AppState {
    pub fn new(config: Config, pipeline: Pipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline,
        }
    }

    /// Wires the OpenRouter model and web loader from configuration.
    pub fn from_config(config: Config) -> Self {
        let model = Arc::new(OpenRouterModel::from_config(&config));
        let pipeline = Pipeline::new(model, Arc::new(WebLoader), Summarizer::new(config.summary_pacing));
        Self::new(config, pipeline)
    }
}
