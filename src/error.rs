// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// HTTP API error. Every variant carries the numeric error code clients switch on.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest { code: &'static str, message: String },

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden { code: &'static str, message: String },

    // 404 Not Found
    NotFound { code: &'static str, message: String },

    // 405 Method Not Allowed
    MethodNotAllowed(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

/// Error codes shared with API clients
pub mod codes {
    pub const MALFORMED_AUTH_REQUEST: &str = "1001";
    pub const BAD_CREDENTIALS: &str = "1002";
    pub const DUPLICATE_USER: &str = "1003";
    pub const UNKNOWN_ROUTE: &str = "1004";
    pub const UNAUTHORIZED: &str = "1005";

    pub const COMMENTS_DOCUMENT_NOT_FOUND: &str = "2002";
    pub const COMMENT_DOCUMENT_NOT_FOUND: &str = "2004";
    pub const MALFORMED_COMMENT: &str = "2005";
    pub const AUTHOR_NOT_EMPLOYEE: &str = "2006";

    pub const EMPLOYEE_NOT_FOUND: &str = "3002";
    pub const DEPARTMENT_NOT_FOUND: &str = "3004";
    pub const DEPARTMENT_EMPLOYEES_NOT_FOUND: &str = "3005";
    pub const EVENTS_EMPLOYEE_NOT_FOUND: &str = "3007";
    pub const UPDATE_EMPLOYEE_NOT_FOUND: &str = "3009";
    pub const MISSING_FIELD: &str = "3010";
    pub const INVALID_WORK_PHONE: &str = "3011";
    pub const INVALID_PHONE: &str = "3012";
    pub const INVALID_EMAIL: &str = "3013";
    pub const INVALID_BIRTH_DAY: &str = "3014";

    pub const INTERNAL: &str = "5000";
    pub const UNAVAILABLE: &str = "5003";
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden { message, .. } => message,
            ApiError::NotFound { message, .. } => message,
            ApiError::MethodNotAllowed(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { code, .. } => *code,
            ApiError::Unauthorized(_) => codes::UNAUTHORIZED,
            ApiError::Forbidden { code, .. } => *code,
            ApiError::NotFound { code, .. } => *code,
            ApiError::MethodNotAllowed(_) => codes::UNKNOWN_ROUTE,
            ApiError::InternalServerError(_) => codes::INTERNAL,
            ApiError::ServiceUnavailable(_) => codes::UNAVAILABLE,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "timestamp": chrono::Utc::now().timestamp(),
            "message": self.message(),
            "errorCode": self.error_code()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::BadRequest { code, message: message.into() }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::Forbidden { code, message: message.into() }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        ApiError::NotFound { code, message: message.into() }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    /// Fallback for any path or method combination without a handler
    pub fn unknown_route() -> Self {
        ApiError::not_found(codes::UNKNOWN_ROUTE, "Resource not found")
    }

    /// Known path, but no handler for the request method
    pub fn method_not_allowed() -> Self {
        ApiError::MethodNotAllowed("Method not allowed".to_string())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidDatabaseUrl(url) => {
                tracing::error!("Invalid database URL: {}", url);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            // Handlers check existence up front, so reaching these means a row
            // changed underneath the request.
            DatabaseError::NotFound(msg) | DatabaseError::Conflict(msg) => {
                tracing::error!("Database state changed during request: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken(msg) => ApiError::unauthorized(msg),
            other => {
                tracing::error!("Auth error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.error_code())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_has_timestamp_message_and_code() {
        let err = ApiError::bad_request(codes::MALFORMED_AUTH_REQUEST, "Malformed request");
        let body = err.to_json();
        assert_eq!(body["errorCode"], "1001");
        assert_eq!(body["message"], "Malformed request");
        assert!(body["timestamp"].as_i64().unwrap() > 0);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_errors_hide_details() {
        let err: ApiError = DatabaseError::Sqlx(sqlx::Error::RowNotFound).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), codes::INTERNAL);
        assert!(!err.message().contains("RowNotFound"));
    }

    #[test]
    fn method_not_allowed_uses_route_code() {
        let err = ApiError::method_not_allowed();
        assert_eq!(err.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.to_json()["errorCode"], "1004");
    }

    #[test]
    fn invalid_token_maps_to_unauthorized() {
        let err: ApiError = AuthError::InvalidToken("ExpiredSignature".into()).into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), codes::UNAUTHORIZED);
    }
}
