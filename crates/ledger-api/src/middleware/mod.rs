//! Middleware stack for the API server
//!
//! Every route gets request ids, tracing and a timeout. Ledger routes
//! additionally get CORS and a global rate limit.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use ledger_common::{CorsConfig, RateLimitConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Requests are cut off with 503 after this long
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

fn http_trace_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Apply the base middleware stack
///
/// Request -> RequestID -> Trace -> Timeout -> router
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(http_trace_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            )),
    )
}

/// Apply the base stack plus CORS and rate limiting
///
/// Request -> RateLimit -> RequestID -> Trace -> Timeout -> CORS -> router
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let router = apply_middleware(router.layer(cors_layer(cors_config, is_production)));
    with_rate_limit(router, rate_limit_config)
}

/// Wrap `router` in one bucket shared by all clients
///
/// A token is replenished every `1000 / rps` ms, up to `burst` tokens.
fn with_rate_limit(router: Router<AppState>, config: &RateLimitConfig) -> Router<AppState> {
    let replenish_ms = (1000 / u64::from(config.requests_per_second.max(1))).max(1);
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(config.burst.max(1))
        .key_extractor(GlobalKeyExtractor)
        .finish();

    match governor_conf {
        Some(governor_conf) => router.layer(GovernorLayer {
            config: Arc::new(governor_conf),
        }),
        None => {
            warn!(
                requests_per_second = config.requests_per_second,
                burst = config.burst,
                "Invalid rate limit configuration, rate limiting disabled"
            );
            router
        }
    }
}

/// CORS for the ledger API
///
/// Configured origins are always honored. Without any, development allows
/// every origin and production allows none.
fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
            request_id_header(),
        ])
        .expose_headers([request_id_header()]);

    if !config.allowed_origins.is_empty() {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        info!(count = origins.len(), "CORS restricted to configured origins");
        return layer.allow_origin(AllowOrigin::list(origins));
    }

    if is_production {
        warn!("CORS_ALLOWED_ORIGINS is empty in production; browser requests will be rejected");
        layer.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
    } else {
        layer.allow_origin(Any)
    }
}
