//! Error types for Tin Tuc

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TinTucError>;

#[derive(Error, Debug)]
pub enum TinTucError {
    #[error("Article not found: {0}")]
    ArticleNotFound(i64),

    #[error("Category does not exist: {0}")]
    CategoryNotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Summarization failed: {0}")]
    Downstream(String),

    #[error("Config error: {0}")]
    Config(String),
}
