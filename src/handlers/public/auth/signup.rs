use axum::{body::Bytes, extract::State, http::StatusCode};
use serde_json::Value;

use super::Credentials;
use crate::auth::hash_password;
use crate::database::{service, DatabaseError};
use crate::error::{codes, ApiError};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/v1/SignUp - Register a new user
///
/// Input: `{"name": "string", "password": "string"}`
///
/// 201 `{"message": ...}` on success; 400/1001 when a field is missing,
/// 400/1003 when the name is taken (whatever the password).
pub async fn signup(State(state): State<AppState>, body: Bytes) -> ApiResult<Value> {
    let Credentials { name, password } = Credentials::from_body(&body)?;
    let pool = state.db.pool();

    if service::find_user_by_name(pool, &name).await?.is_some() {
        tracing::info!("Sign-up rejected: name '{}' already taken", name);
        return Err(duplicate_name());
    }

    let cost = state.config.security.bcrypt_cost;
    let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            ApiError::internal_server_error("An error occurred while processing your request")
        })??;

    // A concurrent sign-up can win between the lookup and the insert
    let user_id = match service::insert_user(pool, &name, &hash).await {
        Ok(id) => id,
        Err(DatabaseError::Conflict(_)) => return Err(duplicate_name()),
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Registered user '{}' (id {})", name, user_id);
    Ok(ApiResponse::message(StatusCode::CREATED, "User registered successfully"))
}

fn duplicate_name() -> ApiError {
    ApiError::bad_request(codes::DUPLICATE_USER, "A user with this name already exists")
}
