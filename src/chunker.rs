use text_splitter::{Characters, ChunkConfig, TextSplitter};
use crate::error::{AppError, Result};

/// Policy used to segment freshly loaded page text.
pub const LOAD_SPLITTER: ChunkPolicy = ChunkPolicy { chunk_size: 2000, overlap: 200 };

/// Policy used to bound the size of each summarization call.
pub const SUMMARY_SPLITTER: ChunkPolicy = ChunkPolicy { chunk_size: 1000, overlap: 100 };

/// Chunk size and overlap, both in chars.
///
/// Text is cut at the coarsest semantic boundary that fits (paragraphs,
/// lines, sentences, words, then characters). Consecutive chunks share up
/// to `overlap` characters of context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPolicy {
    chunk_size: usize,
    overlap: usize,
}

impl ChunkPolicy {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AppError::Config("chunk size must be positive".to_string()));
        }
        let policy = Self { chunk_size, overlap };
        policy.config()?;
        Ok(policy)
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    fn config(&self) -> Result<ChunkConfig<Characters>> {
        ChunkConfig::new(self.chunk_size)
            .with_overlap(self.overlap)
            .map_err(|e| AppError::Config(format!("invalid chunk policy: {}", e)))
    }

    pub fn splitter(&self) -> Result<TextSplitter<Characters>> {
        Ok(TextSplitter::new(self.config()?))
    }

    /// Splits `text` into trimmed, non-empty chunks in document order.
    pub fn split(&self, text: &str) -> Result<Vec<String>> {
        let splitter = self.splitter()?;
        Ok(splitter.chunks(text).map(str::to_string).collect())
    }
}
