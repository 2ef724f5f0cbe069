//! Retry with exponential backoff and additive jitter.
//!
//! Shared by every call site that retries: speech recognition and, when
//! enabled, audio downloads.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use rand::Rng;

pub const DEFAULT_ATTEMPTS: u32 = 3;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub initial_delay: Duration,
    pub max_jitter: Duration,
}

impl RetryPolicy {
    /// `attempts` below one is clamped to one.
    pub fn new(attempts: u32, initial_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            initial_delay,
            max_jitter: DEFAULT_MAX_JITTER,
        }
    }

    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    pub fn backoff(&self) -> Backoff {
        Backoff::new(self.initial_delay, self.max_jitter)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_ATTEMPTS, DEFAULT_INITIAL_DELAY)
    }
}

/// Context handed to each attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// 1-based.
    pub number: u32,
    /// Time slept before this attempt started.
    pub delay: Duration,
    pub is_last: bool,
}

/// Jittered exponential schedule: `base + U[0, max_jitter)`, base doubling
/// after every step.
#[derive(Debug, Clone)]
pub struct Backoff {
    base: Duration,
    max_jitter: Duration,
}

impl Backoff {
    pub fn new(initial_delay: Duration, max_jitter: Duration) -> Self {
        Self {
            base: initial_delay,
            max_jitter,
        }
    }

    pub fn base_delay(&self) -> Duration {
        self.base
    }

    pub fn next_delay(&mut self) -> Duration {
        let wait = self.base + jitter(self.max_jitter);
        self.base = self.base.saturating_mul(2);
        wait
    }
}

fn jitter(max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..max_ms))
}

/// Runs `attempt_fn` until it succeeds or `policy.attempts` calls have failed.
///
/// The first call is immediate. The last failure is returned verbatim, with no
/// trailing sleep.
pub async fn retry_with_backoff<T, E, F, Fut>(
    operation: &str,
    policy: &RetryPolicy,
    mut attempt_fn: F,
) -> Result<T, E>
where
    F: FnMut(Attempt) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = policy.attempts.max(1);
    let mut backoff = policy.backoff();
    let mut delay = Duration::ZERO;
    let mut number = 1;

    loop {
        let is_last = number >= max_attempts;

        match attempt_fn(Attempt {
            number,
            delay,
            is_last,
        })
        .await
        {
            Ok(value) => {
                if number > 1 {
                    tracing::info!(operation, attempt = number, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) if is_last => {
                tracing::warn!(
                    operation,
                    attempt = number,
                    max_attempts,
                    will_retry = false,
                    error = %e,
                    "Attempt failed, no more retries"
                );
                return Err(e);
            }
            Err(e) => {
                delay = backoff.next_delay();
                tracing::warn!(
                    operation,
                    attempt = number,
                    max_attempts,
                    will_retry = true,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                number += 1;
            }
        }
    }
}
