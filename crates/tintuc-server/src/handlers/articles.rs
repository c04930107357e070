//! Article handlers

use super::resource_id;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use tintuc_core::{Article, NewArticle, Page};

pub async fn hot(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Page>,
) -> Result<Json<Vec<Article>>, ApiError> {
    Ok(Json(state.articles.hot(page).await?))
}

pub async fn latest(
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<Page>,
) -> Result<Json<Vec<Article>>, ApiError> {
    Ok(Json(state.articles.latest(page).await?))
}

/// Every successful fetch counts as one view
pub async fn detail(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Article>, ApiError> {
    let id = resource_id(id)?;
    Ok(Json(state.articles.view(id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewArticle>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let article = state.articles.create(req).await?;
    Ok((StatusCode::CREATED, Json(article)))
}
