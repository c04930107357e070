//! HTTP handlers

pub mod articles;
pub mod categories;
pub mod summarize;

use crate::error::ApiError;
use axum::Json;
use tintuc_core::WelcomeMessage;

pub async fn root() -> Json<WelcomeMessage> {
    Json(WelcomeMessage {
        message: "Chào mừng đến với API tin tức".to_string(),
    })
}

/// Ids in paths are positive database keys
fn resource_id(id: i64) -> Result<i64, ApiError> {
    if id < 0 {
        return Err(ApiError::BadRequest(format!("invalid id: {}", id)));
    }
    Ok(id)
}
