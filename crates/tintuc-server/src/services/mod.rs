//! Business logic services

pub mod article_service;
pub mod summarizer;

pub use article_service::ArticleService;
pub use summarizer::HuggingFaceSummarizer;
