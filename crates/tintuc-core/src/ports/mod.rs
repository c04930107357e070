//! Port traits (interfaces) for dependency injection

pub mod storage;
pub mod summarizer;

pub use storage::{ArticleStore, CategoryStore};
pub use summarizer::Summarizer;
