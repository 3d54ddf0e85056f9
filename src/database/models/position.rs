use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Position {
    pub id: i64,
    pub name: String,
    pub employees_count: i64,
}
