use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;

use config::{AppConfig, SecurityConfig};
use state::AppState;

/// Assemble the HTTP application
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Bearer token required
        .merge(superhero_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

fn superhero_routes(state: AppState) -> Router<AppState> {
    use handlers::superheroes;

    Router::new()
        .route(
            "/superheroes",
            get(superheroes::index).post(superheroes::create),
        )
        .route(
            "/superheroes/:id",
            get(superheroes::show)
                .patch(superheroes::update)
                .delete(superheroes::destroy),
        )
        // route_layer: auth runs only for matched routes, before any extractor
        .route_layer(from_fn_with_state(state, middleware::require_token))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_jwt, Claims, JwtAuthenticator};
    use crate::database::MemoryStore;
    use axum::body::Body;
    use axum::http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Request, StatusCode,
    };
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    const SECRET: &str = "router-test-secret";

    fn test_app() -> Router {
        test_app_with(AppConfig::development())
    }

    fn test_app_with(config: AppConfig) -> Router {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(JwtAuthenticator::new(SECRET).unwrap()),
        );
        app(state, &config)
    }

    #[tokio::test]
    async fn public_routes_need_no_token() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn superhero_routes_require_token() {
        let response = test_app()
            .oneshot(Request::builder().uri("/superheroes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_lists_superheroes() {
        let token = generate_jwt(SECRET, &Claims::new(Uuid::new_v4(), 1).unwrap()).unwrap();
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/superheroes")
                    .header(AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn oversized_body_is_payload_too_large() {
        let mut config = AppConfig::development();
        config.api.max_request_size_bytes = 64;

        let token = generate_jwt(SECRET, &Claims::new(Uuid::new_v4(), 1).unwrap()).unwrap();
        let body = format!(
            r#"{{"superhero":{{"name":"{}","alias":"N"}}}}"#,
            "x".repeat(200)
        );

        let response = test_app_with(config)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/superheroes")
                    .header(AUTHORIZATION, format!("Bearer {}", token))
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
