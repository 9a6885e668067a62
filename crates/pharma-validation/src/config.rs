//! Validator configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timing settings shared by every existence validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Quiet period after the last input change before a lookup is issued
    pub debounce_ms: u64,
    /// Deadline for a single lookup; `None` waits for the collaborator
    pub lookup_timeout_ms: Option<u64>,
}

impl ValidatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With debounce window
    #[inline]
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// With lookup deadline
    #[inline]
    #[must_use]
    pub fn with_lookup_timeout_ms(mut self, ms: u64) -> Self {
        self.lookup_timeout_ms = Some(ms);
        self
    }

    /// Leave lookups unbounded
    #[inline]
    #[must_use]
    pub fn without_lookup_timeout(mut self) -> Self {
        self.lookup_timeout_ms = None;
        self
    }

    /// Debounce window
    #[inline]
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Lookup deadline
    #[inline]
    #[must_use]
    pub fn lookup_timeout(&self) -> Option<Duration> {
        self.lookup_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            lookup_timeout_ms: Some(10_000),
        }
    }
}
