use crate::config::Config;
use crate::services::exercise_service::ExerciseService;
use crate::services::health_service::HealthService;
use axum::body::Body;
use axum::http::Request;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod exercises;
pub mod health;
pub mod landing;
pub mod schemas;
pub mod users;

#[derive(Clone, Debug)]
pub struct AppState {
    pub exercise_service: ExerciseService,
}

#[derive(Clone, Debug)]
pub struct MgmtState {
    pub health_service: HealthService,
}

/// Configures and returns the public API router.
///
/// Files under the configured public directory are served for any path that
/// no route matches.
pub fn app_router(config: &Config, exercise_service: ExerciseService) -> Router {
    let state = AppState { exercise_service };

    let api_routes = Router::new()
        .route("/new-user", post(users::create_user))
        .route("/users", get(users::list_users))
        .route("/add", post(exercises::add_exercise))
        .route("/log", get(exercises::exercise_log));

    Router::new()
        .route("/", get(landing::index))
        .nest("/api/exercise", api_routes)
        .fallback_service(ServeDir::new(&config.server.public_dir))
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .extensions()
                        .get::<tower_http::request_id::RequestId>()
                        .and_then(|id| id.header_value().to_str().ok())
                        .unwrap_or_default()
                        .to_string();

                    tracing::info_span!(
                        "request",
                        "request_id" = %request_id,
                        "http.request.method" = %request.method(),
                        "url.path" = %request.uri().path(),
                        "http.response.status_code" = tracing::field::Empty,
                        "otel.kind" = "server",
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                        let status = response.status();
                        span.record("http.response.status_code", status.as_u16());

                        tracing::info!(
                            latency_ms = %latency.as_millis(),
                            status = %status.as_u16(),
                            "request completed"
                        );
                    },
                )
                .on_failure(|error, _latency, _span: &tracing::Span| {
                    tracing::error!(error = %error, "request failed");
                }),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

pub fn mgmt_router(state: MgmtState) -> Router {
    Router::new().route("/livez", get(health::livez)).route("/readyz", get(health::readyz)).with_state(state)
}
