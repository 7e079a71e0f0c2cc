use super::error::EngineError;
use std::time::{Duration, Instant};

/// A wall-clock limit polled between units of work.
///
/// Expiry aborts the whole computation for a structure; nothing partial is kept.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Option<Instant>,
}

impl Deadline {
    pub fn after(timeout: Option<Duration>) -> Self {
        let started = Instant::now();
        Self {
            started,
            limit: timeout.map(|t| started + t),
        }
    }

    pub fn unbounded() -> Self {
        Self::after(None)
    }

    pub fn is_expired(&self) -> bool {
        self.limit.is_some_and(|limit| Instant::now() >= limit)
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[inline]
    pub fn check(&self) -> Result<(), EngineError> {
        if self.is_expired() {
            return Err(EngineError::DeadlineExceeded {
                elapsed_ms: self.elapsed().as_millis(),
            });
        }
        Ok(())
    }
}
