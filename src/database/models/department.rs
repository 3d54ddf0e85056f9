use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Full name of the head employee, if one is assigned
    pub head: Option<String>,
    pub employees_count: i64,
}
