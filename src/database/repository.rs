use sqlx::{self, sqlite::SqliteRow, FromRow, SqlitePool};

use crate::database::manager::DatabaseError;

/// Read access to one table or view keyed by an integer `id` column.
///
/// Table and column names are `'static` so only identifiers written in this crate
/// ever reach the SQL text; values are always bound.
pub struct Repository<T> {
    table_name: &'static str,
    pool: SqlitePool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str, pool: SqlitePool) -> Self {
        Self {
            table_name,
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Every row, in insertion order
    pub async fn select_all(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} ORDER BY id", self.table_name);
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn select_one(&self, id: i64) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", self.table_name);
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn select_404(&self, id: i64) -> Result<T, DatabaseError> {
        self.select_one(id).await?.ok_or_else(|| {
            DatabaseError::NotFound(format!("{} with id {}", self.table_name, id))
        })
    }

    /// Rows whose foreign key `column` equals `value`, in insertion order
    pub async fn select_by(&self, column: &'static str, value: i64) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ? ORDER BY id",
            self.table_name, column
        );
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", self.table_name);
        let found: i64 = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found != 0)
    }
}
