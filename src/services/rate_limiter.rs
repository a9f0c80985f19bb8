use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Enforces a fixed minimum spacing between upstream requests
///
/// All endpoints share one clock. The lock is held while waiting, so concurrent
/// callers queue up and each one observes the full delay after its predecessor.
pub struct RateLimiter {
    request_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(request_delay: Duration) -> Self {
        Self {
            request_delay,
            last_call: Mutex::new(None),
        }
    }

    /// Waits until `request_delay` has passed since the previous call, then
    /// records the current time as the new previous call
    pub async fn throttle(&self) {
        let mut last_call = self.last_call.lock().await;

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.request_delay {
                let wait = self.request_delay - elapsed;
                tracing::trace!(wait_ms = wait.as_millis() as u64, "Throttling upstream request");
                tokio::time::sleep(wait).await;
            }
        }

        *last_call = Some(Instant::now());
    }
}
