//! Storage traits for persistence

use crate::Result;
use async_trait::async_trait;
use tintuc_types::{Article, Category, NewArticle, Page};

/// Category store
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn create_category(&self, name: &str) -> Result<Category>;
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn count_categories(&self) -> Result<i64>;
}

/// Article store
///
/// Every list is ordered newest first (published timestamp, then id).
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn list_featured(&self, page: Page) -> Result<Vec<Article>>;
    async fn list_latest(&self, page: Page) -> Result<Vec<Article>>;
    async fn list_by_category(&self, category_id: i64, page: Page) -> Result<Vec<Article>>;
    async fn get_article(&self, id: i64) -> Result<Option<Article>>;

    /// Insert with a store-assigned id and the current time as publish date.
    /// Fails with `CategoryNotFound` when the category does not exist.
    async fn create_article(&self, article: &NewArticle) -> Result<Article>;

    /// Increment the view count in a single statement and return the updated row.
    async fn record_view(&self, id: i64) -> Result<Option<Article>>;
}
