//! Tin Tuc Types - Wire types shared by the API server and the dashboard client
//!
//! JSON field names follow the public API contract (`tieu_de`, `luot_xem`, ...),
//! Rust field names describe what the value is.

pub mod article;
pub mod category;
pub mod summarize;

pub use article::*;
pub use category::*;
pub use summarize::*;

use serde::{Deserialize, Serialize};

/// Default page size for every list endpoint
pub const DEFAULT_LIMIT: u32 = 10;

/// Offset/limit window for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Payload of `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub message: String,
}

/// Body of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_when_query_is_empty() {
        let page: Page = serde_json::from_str("{}").unwrap();
        assert_eq!(page, Page::new(0, 10));
    }

    #[test]
    fn page_keeps_explicit_values() {
        let page: Page = serde_json::from_str(r#"{"skip": 20, "limit": 500}"#).unwrap();
        assert_eq!(page.skip, 20);
        assert_eq!(page.limit, 500);
    }
}
