//! Category types

use serde::{Deserialize, Serialize};

/// A named grouping of articles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "ten")]
    pub name: String,
}
