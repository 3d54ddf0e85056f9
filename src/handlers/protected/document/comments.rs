use axum::{body::Bytes, extract::State};
use serde_json::Value;

use crate::database::models::{Comment, Document};
use crate::database::{service, Repository};
use crate::error::{codes, ApiError};
use crate::handlers::{json_object, IdPath};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

fn documents(state: &AppState) -> Repository<Document> {
    Repository::new("document", state.db.pool().clone())
}

fn comments(state: &AppState) -> Repository<Comment> {
    Repository::new("comment_view", state.db.pool().clone())
}

/// GET /api/v1/Document/:id/Comments - a document's comments in the order written
///
/// 404/2002 when the document does not exist; `[]` when it exists without comments.
pub async fn comments_get(
    State(state): State<AppState>,
    IdPath(document_id): IdPath,
) -> ApiResult<Vec<Comment>> {
    if !documents(&state).exists(document_id).await? {
        return Err(ApiError::not_found(
            codes::COMMENTS_DOCUMENT_NOT_FOUND,
            "Document not found",
        ));
    }

    let list = comments(&state).select_by("document_id", document_id).await?;
    Ok(ApiResponse::success(list))
}

/// POST /api/v1/Document/:id/Comment - add a comment as the calling employee
///
/// Input: `{"text": "string"}`
///
/// The document is checked before the body: 404/2004, then 400/2005 for a
/// missing `text`. The caller's user id must also be an employee id (403/2006).
/// Returns 201 with the stored comment.
pub async fn comment_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(document_id): IdPath,
    body: Bytes,
) -> ApiResult<Comment> {
    if !documents(&state).exists(document_id).await? {
        return Err(ApiError::not_found(
            codes::COMMENT_DOCUMENT_NOT_FOUND,
            "Document not found",
        ));
    }

    let text = json_object(&body)
        .and_then(|map| map.get("text").and_then(Value::as_str).map(str::to_owned))
        .ok_or_else(|| ApiError::bad_request(codes::MALFORMED_COMMENT, "Malformed request"))?;

    let pool = state.db.pool();
    let author = service::find_employee(pool, auth.user_id).await?.ok_or_else(|| {
        tracing::warn!("User {} has no employee record, cannot comment", auth.user_id);
        ApiError::forbidden(codes::AUTHOR_NOT_EMPLOYEE, "Only employees can comment on documents")
    })?;

    let comment_id = service::insert_comment(pool, document_id, &text, &author).await?;
    tracing::info!(
        "Employee {} commented on document {} (comment {})",
        author.id,
        document_id,
        comment_id
    );

    let comment = comments(&state).select_404(comment_id).await?;
    Ok(ApiResponse::created(comment))
}
