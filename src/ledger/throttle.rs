use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::ThrottleConfig;
use crate::config::ThrottleKind;

/// Gate awaited before every child fetch of a trace
#[async_trait]
pub trait Throttle: Send + Sync {
    async fn acquire(&self);
}

/// Sleeps the same gap every time
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn none() -> Self {
        Self { delay: Duration::ZERO }
    }
}

#[async_trait]
impl Throttle for FixedDelay {
    async fn acquire(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

// Rate limiter state for the current window
#[derive(Debug)]
struct RateLimiterState {
    last_reset:    Instant,
    request_count: usize,
}

/// Admits at most `max_requests` callers per window
#[derive(Debug)]
pub struct WindowLimiter {
    max_requests: usize,
    window:       Duration,
    state:        Mutex<RateLimiterState>,
}

impl WindowLimiter {
    pub fn new(
        max_requests: usize,
        window: Duration,
    ) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            state: Mutex::new(RateLimiterState {
                last_reset:    Instant::now(),
                request_count: 0,
            }),
        }
    }

    pub fn per_second(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(1))
    }
}

#[async_trait]
impl Throttle for WindowLimiter {
    async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let now = Instant::now();
                if now.duration_since(state.last_reset) >= self.window {
                    state.last_reset = now;
                    state.request_count = 0;
                }

                if state.request_count < self.max_requests {
                    state.request_count += 1;
                    return;
                }

                self.window.saturating_sub(now.duration_since(state.last_reset))
            };

            #[cfg(feature = "deep-trace")]
            tracing::debug!("throttle_window_full::waiting_ms::{}", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }
}

pub fn make_throttle(config: &ThrottleConfig) -> Arc<dyn Throttle> {
    match config.kind {
        ThrottleKind::FixedDelay => Arc::new(FixedDelay::new(Duration::from_millis(config.delay_ms))),
        ThrottleKind::Window => Arc::new(WindowLimiter::per_second(config.requests_per_second)),
    }
}
