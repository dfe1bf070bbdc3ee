use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Sliding-window limiter: at most `max_calls` acquisitions in any `window`.
///
/// Callers over the quota wait until the oldest call in the window ages out;
/// nothing is ever rejected. One instance is shared by all requests.
pub struct SlidingWindowLimiter {
    max_calls: usize,
    window: Duration,
    recent: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// A `max_calls` of zero is treated as one.
    pub fn new(max_calls: u32, window: Duration) -> Self {
        let max_calls = max_calls.max(1) as usize;
        Self {
            max_calls,
            window,
            recent: Mutex::new(VecDeque::with_capacity(max_calls)),
        }
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Wait for a permit and record the call.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut recent = self.recent.lock().await;
                let now = Instant::now();
                self.evict_expired(&mut recent, now);

                if recent.len() < self.max_calls {
                    recent.push_back(now);
                    return;
                }

                match recent.front() {
                    Some(&oldest) => (oldest + self.window).saturating_duration_since(now),
                    None => Duration::ZERO,
                }
            };

            debug!(
                wait_ms = wait.as_millis() as u64,
                limit = self.max_calls,
                "Rate limit reached, waiting for capacity"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Calls still inside the current window.
    pub async fn in_flight(&self) -> usize {
        let mut recent = self.recent.lock().await;
        self.evict_expired(&mut recent, Instant::now());
        recent.len()
    }

    fn evict_expired(&self, recent: &mut VecDeque<Instant>, now: Instant) {
        while let Some(&oldest) = recent.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                recent.pop_front();
            } else {
                break;
            }
        }
    }
}
