//! Clock abstraction for the controller's timers
//!
//! Every timer deadline is computed from a [`TimeProvider`] so gesture and
//! visibility logic can be driven deterministically in tests.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Trait for providing time in tests and production
pub trait TimeProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get the current instant
    fn now(&self) -> Instant;

    /// Clone the time provider into a boxed trait object
    fn clone_box(&self) -> Box<dyn TimeProvider>;
}

impl Clone for Box<dyn TimeProvider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Production time provider.
///
/// Reads tokio's clock, which is the system clock unless the runtime has
/// paused time, so the driver's `sleep_until` and the controller agree on
/// what "now" is.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }

    fn clone_box(&self) -> Box<dyn TimeProvider> {
        Box::new(*self)
    }
}

/// Virtual time provider for testing
#[derive(Clone, Debug)]
pub struct VirtualTimeProvider {
    instant: Arc<Mutex<Instant>>,
    base_instant: Instant,
}

impl VirtualTimeProvider {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            instant: Arc::new(Mutex::new(now)),
            base_instant: now,
        }
    }

    /// Advance time by a duration
    pub fn advance(&self, duration: Duration) {
        *self.instant.lock() += duration;
    }

    pub fn advance_ms(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    /// Move the clock to `instant`; earlier instants are ignored.
    pub fn set_instant(&self, instant: Instant) {
        let mut current = self.instant.lock();
        if instant > *current {
            *current = instant;
        }
    }

    /// Virtual time elapsed since construction
    pub fn elapsed(&self) -> Duration {
        *self.instant.lock() - self.base_instant
    }
}

impl Default for VirtualTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for VirtualTimeProvider {
    fn now(&self) -> Instant {
        *self.instant.lock()
    }

    fn clone_box(&self) -> Box<dyn TimeProvider> {
        Box::new(self.clone())
    }
}
