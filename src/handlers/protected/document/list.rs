use axum::extract::State;

use crate::database::models::Document;
use crate::database::Repository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/Documents - every document, unpaginated
pub async fn documents_get(State(state): State<AppState>) -> ApiResult<Vec<Document>> {
    let documents = Repository::<Document>::new("document", state.db.pool().clone())
        .select_all()
        .await?;

    Ok(ApiResponse::success(documents))
}
