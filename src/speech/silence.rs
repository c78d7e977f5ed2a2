//! Silence window for auto-commit.
//!
//! Deadline based rather than a spawned timer: the driver sleeps until
//! [`SilenceTimer::deadline`] and then asks [`SilenceTimer::is_due`].
//! Every final span re-arms the deadline, so the last one decides.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct SilenceTimer {
    window: Duration,
    deadline: Option<Instant>,
}

impl SilenceTimer {
    pub fn new(window: Duration) -> Self {
        log::debug!("[SPEECH] SilenceTimer created: window={}ms", window.as_millis());
        Self {
            window,
            deadline: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Start or restart the window from `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }
}
