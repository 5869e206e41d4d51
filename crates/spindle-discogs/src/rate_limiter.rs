// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::{sleep, Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{DiscogsError, Result};

/// Discogs allows 25 requests per minute without credentials.
pub const RATE_LIMIT_ANONYMOUS: u32 = 25;
/// Discogs allows 60 requests per minute with a consumer key and secret.
pub const RATE_LIMIT_AUTHENTICATED: u32 = 60;

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Token-bucket limiter shared by every request a client issues.
///
/// The bucket refills at `limit()` tokens per second up to `burst()` tokens.
/// Waiting for a token happens outside the lock: `acquire` reserves its
/// token up front, so the bucket may go negative while waiters sleep off
/// their share of the deficit.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    bucket: Arc<Mutex<Bucket>>,
}

#[derive(Debug)]
struct Bucket {
    /// Tokens per second.
    rate: f64,
    burst: u32,
    tokens: f64,
    last: Instant,
    /// Caller-configured requests-per-minute ceiling.
    ceiling: Option<u32>,
}

impl Bucket {
    fn advance(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(f64::from(self.burst));
        self.last = now;
    }

    fn set_per_minute(&mut self, requests_per_minute: u32) {
        self.advance(Instant::now());
        self.rate = f64::from(requests_per_minute) / SECONDS_PER_MINUTE;
        self.burst = requests_per_minute;
        self.tokens = self.tokens.min(f64::from(requests_per_minute));
    }
}

impl RateLimiter {
    /// A full bucket allowing `requests_per_minute`, with a burst of the same
    /// size. Zero is treated as one.
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self::build(requests_per_minute.max(1), None)
    }

    /// Like [`per_minute`](Self::per_minute), but also records the value as
    /// an explicit ceiling that server feedback can never raise.
    pub fn with_ceiling(requests_per_minute: u32) -> Self {
        let requests_per_minute = requests_per_minute.max(1);
        Self::build(requests_per_minute, Some(requests_per_minute))
    }

    /// Baseline for a client without an explicit ceiling.
    pub fn baseline(authenticated: bool) -> Self {
        if authenticated {
            Self::per_minute(RATE_LIMIT_AUTHENTICATED)
        } else {
            Self::per_minute(RATE_LIMIT_ANONYMOUS)
        }
    }

    fn build(requests_per_minute: u32, ceiling: Option<u32>) -> Self {
        Self {
            bucket: Arc::new(Mutex::new(Bucket {
                rate: f64::from(requests_per_minute) / SECONDS_PER_MINUTE,
                burst: requests_per_minute,
                tokens: f64::from(requests_per_minute),
                last: Instant::now(),
                ceiling,
            })),
        }
    }

    /// Wait for one token, or fail with `Cancelled` once `cancel` fires.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(DiscogsError::Cancelled);
        }

        let wait = {
            let mut bucket = self.bucket.lock();
            bucket.advance(Instant::now());
            bucket.tokens -= 1.0;
            if bucket.tokens >= 0.0 {
                None
            } else {
                Some(Duration::from_secs_f64(-bucket.tokens / bucket.rate))
            }
        };

        let Some(wait) = wait else {
            return Ok(());
        };

        debug!(target: "discogs", "rate limiting: waiting {:?}", wait);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.release();
                Err(DiscogsError::Cancelled)
            }
            _ = sleep(wait) => Ok(()),
        }
    }

    /// Hand back a reserved token that was never used.
    fn release(&self) {
        let mut bucket = self.bucket.lock();
        bucket.advance(Instant::now());
        bucket.tokens = (bucket.tokens + 1.0).min(f64::from(bucket.burst));
    }

    /// Refill rate in tokens per second.
    pub fn limit(&self) -> f64 {
        self.bucket.lock().rate
    }

    pub fn burst(&self) -> u32 {
        self.bucket.lock().burst
    }

    /// Tokens currently available. Negative while requests are queued.
    pub fn tokens(&self) -> f64 {
        let mut bucket = self.bucket.lock();
        bucket.advance(Instant::now());
        bucket.tokens
    }

    /// The explicit ceiling, if one was ever configured.
    pub fn max_requests(&self) -> Option<u32> {
        self.bucket.lock().ceiling
    }

    /// Set an explicit requests-per-minute ceiling and apply it immediately.
    /// Zero is ignored.
    pub fn set_max_requests(&self, requests_per_minute: u32) {
        if requests_per_minute == 0 {
            return;
        }
        let mut bucket = self.bucket.lock();
        bucket.ceiling = Some(requests_per_minute);
        bucket.set_per_minute(requests_per_minute);
        debug!(target: "discogs", requests_per_minute, "rate limit set explicitly");
    }

    /// Recalibrate from a server-reported requests-per-minute limit.
    ///
    /// The effective limit is capped by the explicit ceiling. A zero result
    /// leaves the bucket untouched, since it would otherwise freeze it.
    pub fn update_from_server(&self, server_limit: u32) {
        let mut bucket = self.bucket.lock();
        let effective = match bucket.ceiling {
            Some(ceiling) => ceiling.min(server_limit),
            None => server_limit,
        };
        if effective == 0 {
            return;
        }
        if bucket.burst != effective {
            debug!(
                target: "discogs",
                server_limit,
                effective,
                "rate limit recalibrated from response"
            );
        }
        bucket.set_per_minute(effective);
    }
}
