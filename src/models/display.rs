use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Tag;

/// Display-ready recommendation card returned to the client
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DisplayRecord {
    pub id: String,
    pub title: String,
    /// Four-character year, empty when the source had no date
    pub release_date_year: String,
    /// HTML-stripped description; non-string payloads are passed through
    pub description: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub image: Value,
    pub tags: Vec<Tag>,
    /// Pre-rendered multi-line block of auxiliary details
    pub extra_data: String,
    pub action: Option<Value>,
    pub context: String,
}
