use axum::{body::Bytes, extract::State};
use serde::Serialize;

use super::Credentials;
use crate::auth::verify_password;
use crate::database::service;
use crate::error::{codes, ApiError};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/v1/SignIn - Authenticate and receive a bearer token
///
/// Input: `{"name": "string", "password": "string"}`
///
/// 200 `{"token": "eyJ..."}`; 400/1001 when a field is missing; 403/1002 for an
/// unknown name or a wrong password (indistinguishable to the caller).
pub async fn signin(State(state): State<AppState>, body: Bytes) -> ApiResult<TokenResponse> {
    let Credentials { name, password } = Credentials::from_body(&body)?;

    let user = service::find_user_by_name(state.db.pool(), &name).await?;

    let matched = match user {
        Some(user) => {
            let hash = user.password.clone();
            let ok = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
                .await
                .map_err(|e| {
                    tracing::error!("Password verification task failed: {}", e);
                    ApiError::internal_server_error("An error occurred while processing your request")
                })?;
            ok.then_some(user)
        }
        None => None,
    };

    let Some(user) = matched else {
        tracing::info!("Sign-in failed for '{}'", name);
        return Err(ApiError::forbidden(codes::BAD_CREDENTIALS, "Invalid credentials"));
    };

    let token = state.keys.issue(user.id)?;
    tracing::info!("Issued token for user '{}' (id {})", user.name, user.id);

    Ok(ApiResponse::success(TokenResponse { token }))
}
