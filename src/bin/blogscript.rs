use std::sync::Arc;
use std::time::Duration;

use blog_script_gen::{
    config::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PACING_MS},
    llm::OpenRouterModel,
    loader::{ContentLoader, WebLoader},
    pipeline::Pipeline,
    script::Speaker,
    session::{Choice, ScriptSession, SessionState, CHOICE_MENU},
    summarizer::Summarizer,
    telemetry::init_tracing,
};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "blogscript", about = "Turn blog posts into multi-speaker video scripts")]
struct Cli {
    /// Blog URLs to process, in order
    #[arg(required = true)]
    urls: Vec<String>,

    /// Speaker as "name|role|background|style" (repeatable, first one hosts)
    #[arg(short, long = "speaker", value_parser = parse_speaker, required = true)]
    speakers: Vec<Speaker>,

    /// Target video length in minutes
    #[arg(short, long, default_value = "5")]
    duration: u32,

    /// OpenRouter API key
    #[arg(long, env = "OPENROUTER_API_KEY")]
    api_key: String,

    #[arg(long, env = "MODEL_NAME", default_value = DEFAULT_MODEL)]
    model: String,

    #[arg(long, env = "OPENROUTER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Delay between summarization calls in milliseconds
    #[arg(long, env = "SUMMARY_PACING_MS", default_value_t = DEFAULT_PACING_MS)]
    pacing_ms: u64,

    /// Print each initial script without prompting for more content
    #[arg(long)]
    non_interactive: bool,
}

fn parse_speaker(s: &str) -> Result<Speaker, String> {
    let parts: Vec<&str> = s.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [name, role, background, style] if !name.is_empty() => {
            Ok(Speaker::new(*name, *role, *background, *style))
        }
        _ => Err(format!("expected \"name|role|background|style\", got {:?}", s)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let model = Arc::new(OpenRouterModel::new(&cli.api_key, &cli.model).with_base_url(&cli.base_url));
    let pipeline = Pipeline::new(
        model,
        Arc::new(WebLoader),
        Summarizer::new(Duration::from_millis(cli.pacing_ms)),
    );

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    for url in &cli.urls {
        println!("\nProcessing: {}", url);
        let document = match pipeline.loader().load(url).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "failed to load blog content");
                continue;
            }
        };

        let summary = match pipeline.summarizer().summarize(pipeline.model(), &document.content).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(url = %url, error = %e, "failed to summarize");
                continue;
            }
        };

        let mut session = ScriptSession::new(&document.title, url, cli.speakers.clone(), cli.duration);
        match session.advance(pipeline.model(), Some(&summary)).await {
            Ok(script) => println!("\nGenerated Script for '{}':\n\n{}", session.title, script),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "failed to generate script");
                continue;
            }
        }

        if cli.non_interactive {
            session.finish();
        }

        while !session.is_done() {
            if session.state() == SessionState::AwaitingChoice {
                println!("\n{}", CHOICE_MENU);
                let Some(line) = stdin.next_line().await? else {
                    session.finish();
                    break;
                };
                match line.parse::<Choice>() {
                    Ok(choice) => {
                        session.choose(choice)?;
                    }
                    Err(e) => println!("{}", e),
                }
                continue;
            }

            match session.advance(pipeline.model(), None).await {
                Ok(part) => println!("\n{}", part),
                Err(e) => {
                    tracing::error!(error = %e, "drafting failed");
                    session.finish();
                }
            }
        }

        if matches!(session.state(), SessionState::Done { exit_requested: true }) {
            break;
        }
    }

    Ok(())
}
