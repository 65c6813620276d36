use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blog_script_gen::error::{AppError, Result};
use blog_script_gen::loader::{ContentLoader, LoadedDocument};

/// Serves canned documents by URL; unknown URLs fail to load.
#[derive(Clone, Default)]
pub struct MockLoader {
    pub pages: HashMap<String, LoadedDocument>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockLoader {
    pub fn with_page(mut self, url: &str, title: &str, content: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            LoadedDocument {
                title: title.to_string(),
                content: content.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl ContentLoader for MockLoader {
    async fn load(&self, url: &str) -> Result<LoadedDocument> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Fetch(format!("{} returned HTTP 404", url)))
    }
}
