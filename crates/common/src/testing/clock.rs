//! Time abstraction for testability
//!
//! Provides a trait-based approach to sampling the wall clock that allows
//! for deterministic testing without relying on the actual current time.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeDelta, TimeZone, Utc};
//! use tempus_common::testing::{Clock, MockClock, SystemClock};
//!
//! // Use the system clock in production
//! let clock = SystemClock;
//! let _ = clock.now();
//!
//! // Use a mock clock in tests
//! let reference = Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap().fixed_offset();
//! let mock = MockClock::at(reference);
//! mock.advance(TimeDelta::seconds(5));
//! assert_eq!(mock.now(), reference + TimeDelta::seconds(5));
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset, Local, TimeDelta};

/// Trait for wall-clock sampling to enable testing
///
/// The parsing engine asks a `Clock` for the reference instant whenever the
/// caller does not supply one explicitly.
pub trait Clock: Send + Sync {
    /// Get the current wall-clock instant, including the local UTC offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Real system clock implementation
///
/// Samples the local wall clock. Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Mock clock for deterministic testing
///
/// Holds a settable instant that only moves when the test advances it.
/// Clones share the same underlying instant.
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<FixedOffset>>>,
}

impl MockClock {
    /// Create a mock clock pinned to the current system time.
    pub fn new() -> Self {
        Self::at(SystemClock.now())
    }

    /// Create a mock clock pinned to a specific instant.
    pub fn at(instant: DateTime<FixedOffset>) -> Self {
        Self { now: Arc::new(Mutex::new(instant)) }
    }

    /// Advance the mock clock by a signed duration.
    pub fn advance(&self, delta: TimeDelta) {
        // Test utility: panic on poisoned mutex or range overflow to fail
        // tests early
        let mut now = self.now.lock().expect("mutex poisoned");
        *now = now.checked_add_signed(delta).expect("mock clock out of range");
    }

    /// Pin the mock clock to a new instant, replacing the previous one.
    pub fn set(&self, instant: DateTime<FixedOffset>) {
        // Test utility: panic on poisoned mutex to fail tests early
        let mut now = self.now.lock().expect("mutex poisoned");
        *now = instant;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<FixedOffset> {
        // Test utility: panic on poisoned mutex to fail tests early
        *self.now.lock().expect("mutex poisoned")
    }
}
