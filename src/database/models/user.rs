use serde::Serialize;
use sqlx::FromRow;

/// Sign-in credentials. `password` holds the bcrypt hash, never the plain text.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
}
