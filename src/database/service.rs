use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::{Employee, EventKind, NewDocument, NewEmployee, NewEvent, User};
use crate::database::repository::Repository;

fn map_unique(err: sqlx::Error, what: &str) -> DatabaseError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DatabaseError::Conflict(what.to_string())
        }
        _ => DatabaseError::Sqlx(err),
    }
}

/// Look up sign-in credentials by user name
pub async fn find_user_by_name(pool: &SqlitePool, name: &str) -> Result<Option<User>, DatabaseError> {
    let user = sqlx::query_as::<_, User>(r#"SELECT id, name, password FROM "user" WHERE name = ?"#)
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Store a new user; `password_hash` must already be hashed
pub async fn insert_user<'e, E>(executor: E, name: &str, password_hash: &str) -> Result<i64, DatabaseError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(r#"INSERT INTO "user" (name, password) VALUES (?, ?)"#)
        .bind(name)
        .bind(password_hash)
        .execute(executor)
        .await
        .map_err(|e| map_unique(e, name))?;

    Ok(result.last_insert_rowid())
}

pub async fn find_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, DatabaseError> {
    Repository::<Employee>::new("employee", pool.clone())
        .select_one(id)
        .await
}

/// Write a comment and flag its document as commented, in one transaction.
/// The author's current position is copied onto the comment.
pub async fn insert_comment(
    pool: &SqlitePool,
    document_id: i64,
    text: &str,
    author: &Employee,
) -> Result<i64, DatabaseError> {
    let now = Utc::now().naive_utc();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO comments (document_id, text, date_created, date_updated, author_id, position_id)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(document_id)
    .bind(text)
    .bind(now)
    .bind(now)
    .bind(author.id)
    .bind(author.position_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE document SET has_comments = 1, date_updated = ? WHERE id = ?")
        .bind(now)
        .bind(document_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.last_insert_rowid())
}

/// Overwrite every mutable column of an employee row
pub async fn update_employee(pool: &SqlitePool, employee: &Employee) -> Result<(), DatabaseError> {
    let result = sqlx::query(
        "UPDATE employee SET
            fullname = ?, work_phone_number = ?, phone_number = ?, office_number = ?,
            email = ?, birth_day = ?, department_id = ?, position_id = ?,
            manager_id = ?, assistant_id = ?, other = ?
         WHERE id = ?",
    )
    .bind(&employee.fullname)
    .bind(&employee.work_phone_number)
    .bind(&employee.phone_number)
    .bind(&employee.office_number)
    .bind(&employee.email)
    .bind(employee.birth_day)
    .bind(employee.department_id)
    .bind(employee.position_id)
    .bind(employee.manager_id)
    .bind(employee.assistant_id)
    .bind(&employee.other)
    .bind(employee.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound(format!("employee with id {}", employee.id)));
    }
    Ok(())
}

// Seeding. These are used by `hrdocs fixture load` and by tests; the HTTP API
// never creates directory rows.

pub async fn insert_position<'e, E>(executor: E, name: &str) -> Result<i64, DatabaseError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO position (name) VALUES (?)")
        .bind(name)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_department<'e, E>(
    executor: E,
    name: &str,
    description: Option<&str>,
) -> Result<i64, DatabaseError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("INSERT INTO department (name, description) VALUES (?, ?)")
        .bind(name)
        .bind(description)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn set_department_head<'e, E>(
    executor: E,
    department_id: i64,
    head_id: Option<i64>,
) -> Result<(), DatabaseError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE department SET head_id = ? WHERE id = ?")
        .bind(head_id)
        .bind(department_id)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn insert_employee<'e, E>(executor: E, employee: &NewEmployee) -> Result<i64, DatabaseError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query(
        "INSERT INTO employee (fullname, work_phone_number, phone_number, office_number, email,
            birth_day, department_id, position_id, manager_id, assistant_id, other)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&employee.fullname)
    .bind(&employee.work_phone_number)
    .bind(&employee.phone_number)
    .bind(&employee.office_number)
    .bind(&employee.email)
    .bind(employee.birth_day)
    .bind(employee.department_id)
    .bind(employee.position_id)
    .bind(employee.manager_id)
    .bind(employee.assistant_id)
    .bind(&employee.other)
    .execute(executor)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_document<'e, E>(executor: E, document: &NewDocument) -> Result<i64, DatabaseError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now().naive_utc();
    let result = sqlx::query(
        "INSERT INTO document (title, date_created, date_updated, category, has_comments)
         VALUES (?, ?, ?, ?, 0)",
    )
    .bind(&document.title)
    .bind(now)
    .bind(now)
    .bind(&document.category)
    .execute(executor)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_event<'e, E>(executor: E, kind: EventKind, event: &NewEvent) -> Result<i64, DatabaseError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "INSERT INTO {} (employee_id, name, start_date, end_date, description) VALUES (?, ?, ?, ?, ?)",
        kind.table_name()
    );
    let result = sqlx::query(&sql)
        .bind(event.employee_id)
        .bind(&event.name)
        .bind(event.start_date)
        .bind(event.end_date)
        .bind(&event.description)
        .execute(executor)
        .await?;
    Ok(result.last_insert_rowid())
}
