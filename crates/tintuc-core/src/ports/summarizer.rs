//! Summarization model port

use crate::Result;
use async_trait::async_trait;

/// An external abstractive summarization model.
///
/// Implementations fail with `TinTucError::Downstream` when the model call fails.
#[async_trait]
pub trait Summarizer: Send + Sync {
    fn name(&self) -> &str;

    async fn summarize(&self, text: &str) -> Result<String>;
}
