// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth): sign-up, sign-in, service info, health
// Protected (bearer token): documents, comments, directory

pub mod protected;
pub mod public;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Numeric `:id` path segment. Anything other than plain digits is treated as an
/// unknown route, the same as a path that matches nothing.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::unknown_route())?;

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::unknown_route());
        }
        raw.parse().map(IdPath).map_err(|_| ApiError::unknown_route())
    }
}

/// Parse a request body that must be a JSON object. Anything else yields `None`.
pub(crate) fn json_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_accepts_only_objects() {
        assert!(json_object(br#"{"text": "hi"}"#).is_some());
        assert!(json_object(br#"["text"]"#).is_none());
        assert!(json_object(b"").is_none());
        assert!(json_object(b"text=hi").is_none());
    }
}
