//! Rate limiting middleware.

use axum::{
    body::Body,
    extract::{ConnectInfo, MatchedPath, State},
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::warn;

use common::RateLimitConfig;

use crate::state::AppState;

/// Rate limit middleware for the protected area.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.config.rate_limit.clone();
    rate_limit_internal(state, connect_info, request, next, limit).await
}

/// Rate limit middleware for login and registration (stricter).
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.config.auth_rate_limit.clone();
    rate_limit_internal(state, connect_info, request, next, limit).await
}

async fn rate_limit_internal(
    state: AppState,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
    limit: RateLimitConfig,
) -> Response {
    let identifier = limiter_key(&request, connect_info);

    let (count, allowed) = match state
        .cache
        .check_rate_limit(&identifier, limit.max_requests, limit.window_seconds)
        .await
    {
        Ok(result) => result,
        Err(e) => {
            // Fail closed
            warn!("Rate limiter unavailable: {}", e);
            return rate_limit_exceeded_response(&limit, limit.window_seconds);
        }
    };

    if !allowed {
        let retry_after = state
            .cache
            .rate_limit_ttl(&identifier)
            .await
            .ok()
            .flatten()
            .unwrap_or(limit.window_seconds);
        return rate_limit_exceeded_response(&limit, retry_after);
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit.max_requests));
    headers.insert(
        "X-RateLimit-Remaining",
        HeaderValue::from(limit.max_requests.saturating_sub(count)),
    );

    response
}

/// Bucket for a request: the route template (`/agents/:id`, not the concrete
/// id) and the caller address.
fn limiter_key(request: &Request<Body>, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str())
        .unwrap_or_else(|| request.uri().path());
    format!("{}:{}", route, client_ip(request.headers(), connect_info))
}

/// Caller address: proxy headers first, then the socket.
fn client_ip(headers: &HeaderMap, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    if let Some(ip) = headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|forwarded| forwarded.split(',').next())
    {
        return ip.trim().to_string();
    }

    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        return real_ip.to_string();
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limit_exceeded_response(limit: &RateLimitConfig, retry_after: u64) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        "Too many requests. Please try again later.",
    )
        .into_response();

    let headers = response.headers_mut();
    headers.insert("Retry-After", HeaderValue::from(retry_after));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit.max_requests));

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;

    async fn key_for(uri: &str) -> String {
        let app = Router::new().nest(
            "/agents",
            Router::new()
                .route("/", get(|| async { "" }))
                .route("/:id", get(|| async { "" }))
                .route_layer(from_fn(|request: Request<Body>, _next: Next| async move {
                    limiter_key(&request, None).into_response()
                })),
        );

        let request = Request::builder()
            .uri(uri)
            .header("X-Real-IP", "10.0.0.9")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_ids_share_the_route_bucket() {
        let first = key_for("/agents/6f1c2d3e-0000-4000-8000-000000000001").await;
        let second = key_for("/agents/6f1c2d3e-0000-4000-8000-000000000002").await;

        assert_eq!(first, "/agents/:id:10.0.0.9");
        assert_eq!(first, second);
        assert_ne!(key_for("/agents").await, first);
    }

    #[test]
    fn test_unrouted_request_falls_back_to_path() {
        let request = Request::builder()
            .uri("/auth/login")
            .body(Body::empty())
            .unwrap();
        assert_eq!(limiter_key(&request, None), "/auth/login:unknown");
    }

    #[test]
    fn test_forwarded_for_wins() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Forwarded-For", HeaderValue::from_static("10.0.0.7, 172.16.0.1"));
        headers.insert("X-Real-IP", HeaderValue::from_static("10.0.0.9"));

        assert_eq!(client_ip(&headers, None), "10.0.0.7");
    }

    #[test]
    fn test_socket_address_is_the_fallback() {
        let addr: SocketAddr = "192.168.1.20:41000".parse().unwrap();
        assert_eq!(client_ip(&HeaderMap::new(), Some(ConnectInfo(addr))), "192.168.1.20");
        assert_eq!(client_ip(&HeaderMap::new(), None), "unknown");
    }

    #[test]
    fn test_exceeded_response_headers() {
        let limit = RateLimitConfig {
            max_requests: 10,
            window_seconds: 60,
        };
        let response = rate_limit_exceeded_response(&limit, 42);

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["Retry-After"], "42");
        assert_eq!(response.headers()["X-RateLimit-Limit"], "10");
        assert_eq!(response.headers()["X-RateLimit-Remaining"], "0");
    }
}
