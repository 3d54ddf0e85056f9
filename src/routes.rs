use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full HTTP application around an already-constructed state
pub fn app(state: AppState) -> Router {
    let api = &state.config.api;
    let security = &state.config.security;

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(auth_public_routes())
        // Protected API
        .merge(protected_routes(state.clone()))
        .method_not_allowed_fallback(public::method_not_allowed)
        .fallback(public::fallback)
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    if security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/SignUp", post(public::signup))
        .route("/api/v1/SignIn", post(public::signin))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(document_routes())
        .merge(directory_routes())
        // route_layer: unmatched paths fall through to the 1004 fallback unauthenticated
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn document_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/Documents", get(protected::documents_get))
        .route("/api/v1/Document/:id/Comments", get(protected::comments_get))
        .route("/api/v1/Document/:id/Comment", post(protected::comment_post))
}

fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/employees", get(protected::employees_get))
        .route(
            "/api/v1/employees/:id",
            get(protected::employee_get).put(protected::employee_put),
        )
        .route("/api/v1/employees/:id/events", get(protected::employee_events_get))
        .route("/api/v1/departments", get(protected::departments_get))
        .route("/api/v1/departments/:id", get(protected::department_get))
        .route(
            "/api/v1/departments/:id/employees",
            get(protected::department_employees_get),
        )
        .route("/api/v1/positions", get(protected::positions_get))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::database::Database;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    async fn test_app() -> (Router, AppState) {
        let config = AppConfig::for_testing("sqlite::memory:");
        let mut db_config = config.database.clone();
        db_config.max_connections = 1;
        let db = Database::connect(&db_config).await.unwrap();
        db.init_schema().await.unwrap();
        let state = AppState::new(db, config);
        (app(state.clone()), state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unknown_route_is_1004() {
        let (app, _) = test_app().await;
        let response = app
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["errorCode"], "1004");
    }

    #[tokio::test]
    async fn protected_route_requires_token() {
        let (app, _) = test_app().await;
        let response = app
            .oneshot(Request::get("/api/v1/Documents").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["errorCode"], "1005");
    }

    #[tokio::test]
    async fn non_numeric_id_is_unknown_route() {
        let (app, state) = test_app().await;
        let token = state.keys.issue(1).unwrap();
        let response = app
            .oneshot(
                Request::get("/api/v1/employees/abc")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["errorCode"], "1004");
    }

    #[tokio::test]
    async fn wrong_method_gets_json_envelope() {
        let (app, state) = test_app().await;
        let token = state.keys.issue(1).unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::post("/api/v1/Documents")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(response).await["errorCode"], "1004");

        let response = app
            .oneshot(Request::get("/api/v1/SignUp").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_json(response).await["errorCode"], "1004");
    }

    #[tokio::test]
    async fn documents_list_starts_empty() {
        let (app, state) = test_app().await;
        let token = state.keys.issue(1).unwrap();
        let response = app
            .oneshot(
                Request::get("/api/v1/Documents")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }
}
