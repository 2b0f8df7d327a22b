// src/middleware/rate_limit.rs
//
// Janela fixa por IP. O estado vive atrás de `RateLimitStore`, injetado no
// AppState; a implementação em memória serve para uma instância só.

use std::{
    collections::HashMap,
    net::SocketAddr,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, Extensions, HeaderMap, Request},
};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    pub fn is_limited(&self) -> bool {
        matches!(self, RateDecision::Limited { .. })
    }
}

#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Conta uma requisição para `key` e diz se ela passa.
    async fn hit(&self, key: &str) -> RateDecision;
}

#[derive(Debug)]
struct Window {
    count: u32,
    reset_at: Instant,
}

// Sem eviction: chaves antigas só são reaproveitadas quando o IP volta.
pub struct InMemoryRateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl InMemoryRateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub async fn hit_at(&self, key: &str, now: Instant) -> RateDecision {
        let mut windows = self.windows.lock().await;

        let window = windows.entry(key.to_string()).or_insert(Window {
            count: 0,
            reset_at: now + self.window,
        });
        if now > window.reset_at {
            window.count = 0;
            window.reset_at = now + self.window;
        }

        // Com max 0 nem a primeira requisição da janela passa.
        if window.count >= self.max_requests {
            return RateDecision::Limited {
                retry_after: window.reset_at.saturating_duration_since(now),
            };
        }
        window.count += 1;
        RateDecision::Allowed {
            remaining: self.max_requests - window.count,
        }
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimiter {
    async fn hit(&self, key: &str) -> RateDecision {
        self.hit_at(key, Instant::now()).await
    }
}

/// Segundos inteiros para o header Retry-After (nunca 0).
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}

/// IP de origem: x-forwarded-for (primeiro salto), x-real-ip, o socket, ou "unknown".
pub fn client_ip<B>(request: &Request<B>) -> String {
    client_ip_from(request.headers(), request.extensions())
}

fn client_ip_from(headers: &HeaderMap, extensions: &Extensions) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded
        .or(real_ip)
        .map(str::to_string)
        .or_else(|| {
            extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

// Extrator do IP de origem (limite de tentativas de login)
pub struct ClientIp(pub String);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientIp(client_ip_from(&parts.headers, &parts.extensions)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[tokio::test]
    async fn limit_is_reached_then_reset_after_window() {
        let limiter = InMemoryRateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();

        for _ in 0..3 {
            assert!(!limiter.hit_at("10.0.0.1", start).await.is_limited());
        }

        match limiter.hit_at("10.0.0.1", start + Duration::from_secs(10)).await {
            RateDecision::Limited { retry_after } => assert_eq!(retry_after, Duration::from_secs(50)),
            other => panic!("esperava Limited, veio {other:?}"),
        }

        // Ainda dentro da janela no instante exato do reset.
        assert!(limiter.hit_at("10.0.0.1", start + Duration::from_secs(60)).await.is_limited());

        let after = limiter.hit_at("10.0.0.1", start + Duration::from_secs(61)).await;
        assert_eq!(after, RateDecision::Allowed { remaining: 2 });
    }

    #[tokio::test]
    async fn zero_max_blocks_every_request() {
        let limiter = InMemoryRateLimiter::new(0, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.hit_at("1.2.3.4", start).await.is_limited());
        assert!(limiter.hit_at("1.2.3.4", start + Duration::from_secs(61)).await.is_limited());
    }

    #[tokio::test]
    async fn keys_are_counted_separately() {
        let limiter = InMemoryRateLimiter::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(!limiter.hit_at("a", now).await.is_limited());
        assert!(limiter.hit_at("a", now).await.is_limited());
        assert!(!limiter.hit_at("b", now).await.is_limited());
    }

    #[test]
    fn retry_after_rounds_up() {
        assert_eq!(retry_after_secs(Duration::from_millis(1500)), 2);
        assert_eq!(retry_after_secs(Duration::from_secs(30)), 30);
        assert_eq!(retry_after_secs(Duration::ZERO), 1);
    }

    #[test]
    fn forwarded_for_wins_over_real_ip() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.2")
            .header("x-real-ip", "198.51.100.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), "203.0.113.7");

        let request = Request::builder()
            .header("x-real-ip", "198.51.100.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), "198.51.100.1");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request), "unknown");
    }
}
