//! Article and category service

use std::sync::Arc;
use tintuc_core::ports::{ArticleStore, CategoryStore};
use tintuc_core::{Article, Category, NewArticle, Page, Result, TinTucError};
use tracing::{debug, info};

pub struct ArticleService {
    articles: Arc<dyn ArticleStore>,
    categories: Arc<dyn CategoryStore>,
}

impl ArticleService {
    pub fn new(articles: Arc<dyn ArticleStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self {
            articles,
            categories,
        }
    }

    pub async fn hot(&self, page: Page) -> Result<Vec<Article>> {
        self.articles.list_featured(page).await
    }

    pub async fn latest(&self, page: Page) -> Result<Vec<Article>> {
        self.articles.list_latest(page).await
    }

    /// Unknown categories yield an empty list, not an error
    pub async fn by_category(&self, category_id: i64, page: Page) -> Result<Vec<Article>> {
        self.articles.list_by_category(category_id, page).await
    }

    /// Fetch an article for display, counting the view
    pub async fn view(&self, id: i64) -> Result<Article> {
        let article = self
            .articles
            .record_view(id)
            .await?
            .ok_or(TinTucError::ArticleNotFound(id))?;

        debug!("Article {} viewed ({} views)", id, article.view_count);
        Ok(article)
    }

    pub async fn create(&self, req: NewArticle) -> Result<Article> {
        validate(&req)?;

        info!(
            "Creating article: title={:?}, category={}, featured={}",
            req.title,
            req.category_id,
            req.is_featured.unwrap_or(false)
        );

        let article = self.articles.create_article(&req).await?;

        info!("Article {} created", article.id);
        Ok(article)
    }

    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.categories.list_categories().await
    }
}

fn validate(req: &NewArticle) -> Result<()> {
    if req.title.trim().is_empty() {
        return Err(TinTucError::Validation("tieu_de must not be blank".into()));
    }
    if req.body.trim().is_empty() {
        return Err(TinTucError::Validation("noi_dung must not be blank".into()));
    }
    Ok(())
}
