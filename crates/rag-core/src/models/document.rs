use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ingestion call's input text. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// 32-char lowercase hex UUIDv4.
    pub id: String,
    pub source: String,
    pub raw_text: String,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// A fresh document with a new id stamped now.
    pub fn new(source: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            source: source.into(),
            raw_text: raw_text.into(),
            created_at: Utc::now(),
        }
    }
}
