pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod schema;
pub mod telemetry;
pub mod types;

use axum::extract::MatchedPath;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

use config::HttpConfig;
use db::DbPool;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    /// `Cache-Control` value sent with read responses.
    pub cache_control: String,
    /// Status of the catch-all response.
    pub not_found_status: StatusCode,
}

impl AppState {
    pub fn new(pool: DbPool, http: &HttpConfig) -> Self {
        Self {
            pool,
            cache_control: http.cache_control(),
            not_found_status: http.not_found_status,
        }
    }
}

/// Check out a pooled connection, or log the failure and return `$fallback`
/// from the enclosing handler.
#[macro_export]
macro_rules! get_conn {
    ($pool:expr, $fallback:expr) => {
        match $pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                tracing::error!("Failed to get database connection: {}", e);
                return $fallback;
            }
        }
    };
}

/// Build the full application: recipe routes with request tracing, trailing
/// slash normalization, and the Swagger UI.
pub fn app(state: AppState) -> Router {
    let service: Router = api::router().with_state(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %matched_path,
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &Span| {
                    tracing::info!(
                        status = %response.status().as_u16(),
                        latency_ms = %latency.as_millis(),
                        "request completed"
                    );
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: std::time::Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    );

    // `/recipes/` and `/recipes` are the same resource. The docs stay outside the
    // normalization because Swagger UI redirects `/swagger-ui` to `/swagger-ui/`.
    let service = NormalizePathLayer::trim_trailing_slash().layer(service);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi()))
        .fallback_service(service)
}
