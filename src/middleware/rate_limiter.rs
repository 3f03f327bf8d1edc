use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::models::ErrorResponse;

/// Track request rates per IP address using a sliding window
#[derive(Clone)]
pub struct RateLimiter {
    /// Map of IP -> list of request timestamps
    requests: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
    /// Last cleanup time
    last_cleanup: Arc<Mutex<Instant>>,
    /// Cleanup interval in seconds
    cleanup_interval: u64,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(HashMap::new())),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            cleanup_interval: 60,
        }
    }

    /// Check if request is allowed under rate limit
    ///
    /// # Arguments
    ///
    /// * `ip` - Client IP address
    /// * `limit` - Maximum requests allowed in window
    /// * `window` - Length of the sliding window
    async fn is_allowed(&self, ip: IpAddr, limit: usize, window: Duration) -> bool {
        let now = Instant::now();

        let mut requests = self.requests.lock().await;
        let timestamps = requests.entry(ip).or_default();

        timestamps.retain(|&ts| now.duration_since(ts) < window);

        if timestamps.len() >= limit {
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Remove stale IP entries to prevent memory leaks
    async fn cleanup_old_entries(&self) {
        let now = Instant::now();

        let mut last_cleanup = self.last_cleanup.lock().await;
        if now.duration_since(*last_cleanup) < Duration::from_secs(self.cleanup_interval) {
            return;
        }

        let stale = Duration::from_secs(60);
        let mut requests = self.requests.lock().await;
        requests.retain(|_, timestamps| {
            timestamps
                .iter()
                .any(|&ts| now.duration_since(ts) < stale)
        });

        *last_cleanup = now;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Requests per second allowed for a path, or None to skip rate limiting
fn get_rate_limit(path: &str) -> Option<usize> {
    if path.starts_with("/static") {
        return None;
    }

    if path == "/health" {
        return Some(10);
    }

    // Draws are the only writes players make
    if path == "/draw" || (path.starts_with("/api/games/") && path.ends_with("/draw")) {
        return Some(20);
    }

    if path.starts_with("/admin") || path.starts_with("/api") {
        return Some(30);
    }

    Some(50)
}

/// Axum middleware enforcing per-IP rate limits
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let limit = match get_rate_limit(req.uri().path()) {
        Some(l) => l,
        None => return next.run(req).await,
    };

    if !limiter.is_allowed(ip, limit, Duration::from_secs(1)).await {
        tracing::warn!(%ip, path = req.uri().path(), "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(ErrorResponse {
                error: "Rate limit exceeded. Please try again later.".to_string(),
                code: "rate_limited".to_string(),
            }),
        )
            .into_response();
    }

    limiter.cleanup_old_entries().await;

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_rate_limit_static() {
        assert_eq!(get_rate_limit("/static/app.js"), None);
    }

    #[test]
    fn test_get_rate_limit_health() {
        assert_eq!(get_rate_limit("/health"), Some(10));
    }

    #[test]
    fn test_get_rate_limit_draw() {
        assert_eq!(get_rate_limit("/draw"), Some(20));
        assert_eq!(get_rate_limit("/api/games/office/draw"), Some(20));
    }

    #[test]
    fn test_get_rate_limit_admin() {
        assert_eq!(get_rate_limit("/admin/pairs"), Some(30));
        assert_eq!(get_rate_limit("/api/games/office/pairs"), Some(30));
    }

    #[test]
    fn test_get_rate_limit_default() {
        assert_eq!(get_rate_limit("/"), Some(50));
    }

    #[tokio::test]
    async fn test_rate_limiter_blocks_over_limit() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.is_allowed(ip, 5, Duration::from_secs(1)).await);
        }

        assert!(!limiter.is_allowed(ip, 5, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_rate_limiter_different_ips() {
        let limiter = RateLimiter::new();
        let ip1: IpAddr = "127.0.0.1".parse().unwrap();
        let ip2: IpAddr = "192.168.1.1".parse().unwrap();

        for _ in 0..5 {
            assert!(limiter.is_allowed(ip1, 5, Duration::from_secs(1)).await);
        }

        assert!(!limiter.is_allowed(ip1, 5, Duration::from_secs(1)).await);
        assert!(limiter.is_allowed(ip2, 5, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_rate_limiter_window_reset() {
        let limiter = RateLimiter::new();
        let ip: IpAddr = "127.0.0.1".parse().unwrap();

        for _ in 0..3 {
            assert!(limiter.is_allowed(ip, 3, Duration::from_millis(100)).await);
        }
        assert!(!limiter.is_allowed(ip, 3, Duration::from_millis(100)).await);

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert!(limiter.is_allowed(ip, 3, Duration::from_millis(100)).await);
    }
}
