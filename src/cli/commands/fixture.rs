use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use serde::Deserialize;
use serde_json::json;

use crate::auth;
use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;
use crate::database::models::{EventKind, NewDocument, NewEmployee, NewEvent};
use crate::database::{service, Database};

#[derive(Subcommand)]
pub enum FixtureCommands {
    #[command(about = "Load seed rows from a JSON fixture file")]
    Load {
        #[arg(help = "Path to the fixture file (e.g., fixtures/demo.json)")]
        file: PathBuf,
    },
}

/// Seed file layout. Rows are inserted in field order and ids are assigned
/// sequentially, so references use the 1-based position within a fresh database.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub users: Vec<FixtureUser>,
    pub positions: Vec<String>,
    pub departments: Vec<FixtureDepartment>,
    pub employees: Vec<NewEmployee>,
    pub documents: Vec<NewDocument>,
    pub events: Vec<FixtureEvent>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureUser {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct FixtureDepartment {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Applied after employees exist
    #[serde(default)]
    pub head_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureEvent {
    pub kind: EventKind,
    #[serde(flatten)]
    pub event: NewEvent,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub users: usize,
    pub positions: usize,
    pub departments: usize,
    pub employees: usize,
    pub documents: usize,
    pub events: usize,
}

pub async fn handle(
    cmd: FixtureCommands,
    config: AppConfig,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        FixtureCommands::Load { file } => {
            let fixture = read_fixture(&file)?;

            let db = Database::connect(&config.database).await?;
            db.init_schema().await?;
            let summary = load(&db, &fixture, config.security.bcrypt_cost).await;
            db.close().await;
            let summary = summary?;

            utils::output_success(
                output_format,
                &format!("Loaded fixture {}", file.display()),
                Some(json!({
                    "users": summary.users,
                    "positions": summary.positions,
                    "departments": summary.departments,
                    "employees": summary.employees,
                    "documents": summary.documents,
                    "events": summary.events,
                })),
            )
        }
    }
}

pub fn read_fixture(path: &Path) -> anyhow::Result<Fixture> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fixture {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid fixture {}", path.display()))
}

/// Insert every row of `fixture` in one transaction. Department heads are set
/// after employees because they point at employees, which in turn point at
/// departments.
pub async fn load(db: &Database, fixture: &Fixture, bcrypt_cost: u32) -> anyhow::Result<LoadSummary> {
    // Rolled back on drop if any insert fails
    let mut tx = db.pool().begin().await?;

    for user in &fixture.users {
        let hash = auth::hash_password(&user.password, bcrypt_cost)?;
        service::insert_user(&mut *tx, &user.name, &hash)
            .await
            .with_context(|| format!("user {}", user.name))?;
    }

    for name in &fixture.positions {
        service::insert_position(&mut *tx, name).await?;
    }

    let mut department_ids = Vec::with_capacity(fixture.departments.len());
    for department in &fixture.departments {
        let id = service::insert_department(&mut *tx, &department.name, department.description.as_deref())
            .await
            .with_context(|| format!("department {}", department.name))?;
        department_ids.push(id);
    }

    for employee in &fixture.employees {
        service::insert_employee(&mut *tx, employee)
            .await
            .with_context(|| format!("employee {}", employee.fullname))?;
    }

    for (department, id) in fixture.departments.iter().zip(&department_ids) {
        if department.head_id.is_some() {
            service::set_department_head(&mut *tx, *id, department.head_id).await?;
        }
    }

    for document in &fixture.documents {
        service::insert_document(&mut *tx, document).await?;
    }

    for entry in &fixture.events {
        service::insert_event(&mut *tx, entry.kind, &entry.event)
            .await
            .with_context(|| format!("{:?} event {}", entry.kind, entry.event.name))?;
    }

    tx.commit().await?;

    tracing::info!(
        "Fixture loaded: {} employees, {} documents",
        fixture.employees.len(),
        fixture.documents.len()
    );

    Ok(LoadSummary {
        users: fixture.users.len(),
        positions: fixture.positions.len(),
        departments: fixture.departments.len(),
        employees: fixture.employees.len(),
        documents: fixture.documents.len(),
        events: fixture.events.len(),
    })
}
