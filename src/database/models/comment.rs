use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use super::format;

/// Comment as read from `comment_view`: author and position resolved to names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub document_id: i64,
    pub text: String,
    #[serde(serialize_with = "format::timestamp")]
    pub date_created: NaiveDateTime,
    #[serde(serialize_with = "format::timestamp")]
    pub date_updated: NaiveDateTime,
    #[sqlx(flatten)]
    pub author: CommentAuthor,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentAuthor {
    #[sqlx(rename = "author_name")]
    pub name: String,
    /// Position held by the author when the comment was written
    #[sqlx(rename = "author_position")]
    pub position: String,
}
