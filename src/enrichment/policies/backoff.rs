use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Jitter function applied to each computed backoff delay.
pub type JitterFn = fn(Duration) -> Duration;

/// Upper bound on any single backoff delay.
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

/// BackoffPolicy encodes the retry behavior of the model invoker as a
/// value: maximum attempt count, exponential base delay, delay cap, and an
/// injectable jitter function.
///
/// Keeping the jitter injectable lets tests drive the retry loop with
/// [`no_jitter`] and assert exact attempt counts and delays.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    max_attempts: u32,
    base_delay: Duration,
    max_delay: Duration,
    jitter: JitterFn,
}

impl BackoffPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self::with_jitter(max_attempts, base_delay, full_jitter)
    }

    pub fn with_jitter(max_attempts: u32, base_delay: Duration, jitter: JitterFn) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: DEFAULT_MAX_DELAY,
            jitter,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Delay to sleep after the given (1-based) failed attempt:
    /// `base * 2^(attempt-1)`, capped, then jittered.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let raw = self.base_delay.saturating_mul(1u32 << exponent);
        (self.jitter)(raw.min(self.max_delay))
    }
}

/// Spreads a delay over `[delay/2, delay]` using the clock's sub-second
/// nanos as the entropy source; the corpus carries no dedicated RNG and
/// retry spreading only needs to decorrelate concurrent invocations.
pub fn full_jitter(delay: Duration) -> Duration {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as u64)
        .unwrap_or(0);
    let half = delay / 2;
    let span_ms = delay.saturating_sub(half).as_millis() as u64;
    if span_ms == 0 {
        return delay;
    }
    half + Duration::from_millis(nanos % (span_ms + 1))
}

/// Identity jitter for deterministic tests.
pub fn no_jitter(delay: Duration) -> Duration {
    delay
}
