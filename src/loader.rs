use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use std::time::Duration;
use once_cell::sync::Lazy;
use crate::chunker::LOAD_SPLITTER;
use crate::error::{AppError, Result};

pub const UNTITLED: &str = "Untitled";

// Create a static client to reuse connections
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .timeout(Duration::from_secs(10))
        .connect_timeout(Duration::from_secs(5))
        .pool_max_idle_per_host(10)
        .build()
        .unwrap_or_default()
});

// Create static selectors to avoid recompiling them each time
static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

const SKIPPED_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Text and title extracted from a blog page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedDocument {
    pub title: String,
    pub content: String,
}

#[async_trait]
pub trait ContentLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<LoadedDocument>;
}

/// Loads documents over HTTP(S).
#[derive(Debug, Default, Clone, Copy)]
pub struct WebLoader;

#[async_trait]
impl ContentLoader for WebLoader {
    async fn load(&self, url: &str) -> Result<LoadedDocument> {
        let html = fetch_html(url).await?;
        tracing::debug!(url, bytes = html.len(), "fetched page");
        document_from_html(&html)
    }
}

pub async fn fetch_html(url: &str) -> Result<String> {
    let response = CLIENT.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Fetch(format!("{} returned HTTP {}", url, status.as_u16())));
    }
    let html = response.text().await?;
    Ok(html)
}

/// Extracts title and readable text, then normalizes the text through the
/// loading splitter. A page without readable text is a parse failure.
pub fn document_from_html(html: &str) -> Result<LoadedDocument> {
    let document = Html::parse_document(html);
    let title = extract_title(&document).unwrap_or_else(|| UNTITLED.to_string());
    let text = format_text(&extract_text(&document));

    let segments = LOAD_SPLITTER.split(&text)?;
    if segments.is_empty() {
        return Err(AppError::Parse("No readable text found in the page".to_string()));
    }

    Ok(LoadedDocument {
        title,
        content: segments.join("\n"),
    })
}

fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

fn extract_text(document: &Html) -> String {
    let root = document
        .select(&BODY_SELECTOR)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    collect_text(root, &mut text);
    text
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if SKIPPED_TAGS.contains(&e.name()) => {}
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    out.push('\n');
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

/// Trims every line and drops blank ones.
pub fn format_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            if !result.is_empty() {
                result.push('\n');
            }
            result.push_str(trimmed);
        }
    }

    result
}
