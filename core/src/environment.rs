//! Dependency-injection traits shared by all environments.
//!
//! External dependencies are abstracted behind traits and injected via a
//! reducer's `Environment` parameter, so production wiring and tests differ
//! only in which implementations they pass in.

use chrono::{DateTime, Utc};

/// Abstracts time so reducers stay deterministic under test.
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
