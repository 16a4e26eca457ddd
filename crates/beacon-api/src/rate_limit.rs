//! Fixed-window rate limiter for the chat endpoints.
//!
//! Counts requests per wall-clock second across all clients. Requests over
//! the limit get a 429 with the usual JSON error body.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Extension, Request};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::ErrorBody;

/// Requests allowed per second when none is configured.
pub const DEFAULT_REQUESTS_PER_SEC: u64 = 50;

#[derive(Clone)]
pub struct RateLimiter {
    max_per_sec: u64,
    count: Arc<AtomicU64>,
    window: Arc<AtomicU64>,
}

impl RateLimiter {
    pub fn new(max_per_sec: u64) -> Self {
        Self {
            max_per_sec,
            count: Arc::new(AtomicU64::new(0)),
            window: Arc::new(AtomicU64::new(0)),
        }
    }

    fn try_acquire(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.try_acquire_at(now)
    }

    /// Take a permit in the window starting at epoch second `now`.
    fn try_acquire_at(&self, now: u64) -> bool {
        if self.window.swap(now, Ordering::Relaxed) != now {
            self.count.store(1, Ordering::Relaxed);
            return self.max_per_sec > 0;
        }
        self.count.fetch_add(1, Ordering::Relaxed) < self.max_per_sec
    }
}

/// Axum middleware that enforces the limit.
pub async fn rate_limit_middleware(
    Extension(limiter): Extension<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if limiter.try_acquire() {
        return next.run(req).await;
    }
    tracing::debug!(path = %req.uri().path(), "Rate limit exceeded");
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorBody {
            error: "too_many_requests".to_string(),
            message: "Rate limit exceeded".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit_per_window() {
        let limiter = RateLimiter::new(3);
        assert!(limiter.try_acquire_at(100));
        assert!(limiter.try_acquire_at(100));
        assert!(limiter.try_acquire_at(100));
        assert!(!limiter.try_acquire_at(100));
    }

    #[test]
    fn test_new_window_resets_count() {
        let limiter = RateLimiter::new(1);
        assert!(limiter.try_acquire_at(100));
        assert!(!limiter.try_acquire_at(100));
        assert!(limiter.try_acquire_at(101));
    }

    #[test]
    fn test_zero_limit_rejects_everything() {
        let limiter = RateLimiter::new(0);
        assert!(!limiter.try_acquire_at(5));
        assert!(!limiter.try_acquire_at(5));
    }
}
