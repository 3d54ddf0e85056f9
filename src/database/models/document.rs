use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::format;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Document {
    pub id: i64,
    pub title: String,
    #[serde(serialize_with = "format::timestamp")]
    pub date_created: NaiveDateTime,
    #[serde(serialize_with = "format::timestamp")]
    pub date_updated: NaiveDateTime,
    pub category: String,
    pub has_comments: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDocument {
    pub title: String,
    pub category: String,
}
