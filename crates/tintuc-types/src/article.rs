//! Article types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published news item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    #[serde(rename = "tieu_de")]
    pub title: String,
    #[serde(rename = "mo_ta")]
    pub description: Option<String>,
    #[serde(rename = "noi_dung")]
    pub body: String,
    #[serde(rename = "hinh_anh")]
    pub image_url: Option<String>,
    #[serde(rename = "ngay_dang")]
    pub published_at: DateTime<Utc>,
    #[serde(rename = "luot_xem")]
    pub view_count: i64,
    #[serde(rename = "la_tin_hot")]
    pub is_featured: bool,
    #[serde(rename = "danh_muc_id")]
    pub category_id: i64,
}

/// Article creation request (`POST /api/tintuc/`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewArticle {
    #[serde(rename = "tieu_de")]
    pub title: String,
    #[serde(rename = "mo_ta", default)]
    pub description: Option<String>,
    #[serde(rename = "noi_dung")]
    pub body: String,
    #[serde(rename = "hinh_anh", default)]
    pub image_url: Option<String>,
    #[serde(rename = "la_tin_hot", default)]
    pub is_featured: Option<bool>,
    #[serde(rename = "danh_muc_id")]
    pub category_id: i64,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, body: impl Into<String>, category_id: i64) -> Self {
        Self {
            title: title.into(),
            description: None,
            body: body.into(),
            image_url: None,
            is_featured: None,
            category_id,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn featured(mut self, is_featured: bool) -> Self {
        self.is_featured = Some(is_featured);
        self
    }
}
