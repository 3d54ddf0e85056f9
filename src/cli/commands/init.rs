use serde_json::json;

use crate::cli::{utils, OutputFormat};
use crate::config::AppConfig;
use crate::database::Database;

pub async fn handle(config: AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let db = Database::connect(&config.database).await?;
    db.init_schema().await?;
    db.close().await;

    utils::output_success(
        output_format,
        "Database schema is ready",
        Some(json!({ "database": config.database.url })),
    )
}
