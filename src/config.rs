use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_MODEL: &str = "google/gemini-pro";
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_PACING_MS: u64 = 1000;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub openrouter_api_key: String,
    pub model_name: String,
    pub base_url: String,
    /// Delay between consecutive summarization calls.
    pub summary_pacing: Duration,
    pub site_url: Option<String>,
    pub site_name: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let openrouter_api_key = env::var("OPENROUTER_API_KEY")?;
        if openrouter_api_key.trim().is_empty() {
            return Err(AppError::Config("OPENROUTER_API_KEY is empty".to_string()));
        }

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let server_addr = parse_addr(&host, &port)?;

        let model_name = env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = env::var("OPENROUTER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let summary_pacing = match env::var("SUMMARY_PACING_MS") {
            Ok(ms) => parse_pacing(&ms)?,
            Err(_) => Duration::from_millis(DEFAULT_PACING_MS),
        };

        Ok(Config {
            server_addr,
            openrouter_api_key,
            model_name,
            base_url,
            summary_pacing,
            site_url: env::var("SITE_URL").ok(),
            site_name: env::var("SITE_NAME").ok(),
        })
    }
}

fn parse_addr(host: &str, port: &str) -> Result<SocketAddr> {
    let port = port.parse::<u16>().map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
    let ip = IpAddr::from_str(host).map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;
    Ok(SocketAddr::new(ip, port))
}

fn parse_pacing(ms: &str) -> Result<Duration> {
    ms.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| AppError::Config(format!("Invalid SUMMARY_PACING_MS: {}", e)))
}
