//! Category handlers

use super::resource_id;
use crate::error::ApiError;
use crate::extractors::{ApiPath, ApiQuery};
use crate::AppState;
use axum::{extract::State, Json};
use tintuc_core::{Article, Category, Page};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.articles.categories().await?))
}

pub async fn articles(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<i64>,
    ApiQuery(page): ApiQuery<Page>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let category_id = resource_id(category_id)?;
    Ok(Json(state.articles.by_category(category_id, page).await?))
}
