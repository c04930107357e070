//! Summarization passthrough

use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::AppState;
use axum::{extract::State, Json};
use tintuc_core::{SummarizeRequest, SummarizeResponse};
use tracing::debug;

pub async fn summarize(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    if req.is_blank() {
        return Err(ApiError::BadRequest("empty text".into()));
    }

    debug!(
        "Summarizing {} chars via {}",
        req.text.chars().count(),
        state.summarizer.name()
    );

    let summary = state.summarizer.summarize(&req.text).await?;
    Ok(Json(SummarizeResponse { summary }))
}
