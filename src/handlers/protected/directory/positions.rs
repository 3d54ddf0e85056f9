use axum::extract::State;

use crate::database::models::Position;
use crate::database::Repository;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/v1/positions
pub async fn positions_get(State(state): State<AppState>) -> ApiResult<Vec<Position>> {
    let positions = Repository::<Position>::new("position_view", state.db.pool().clone())
        .select_all()
        .await?;

    Ok(ApiResponse::success(positions))
}
