//! Deadline wrapper for lookup collaborators

use crate::error::LookupError;
use crate::query::{EntityRef, LookupQuery};
use crate::Lookup;
use async_trait::async_trait;
use std::time::Duration;

/// Bounds every lookup of the inner collaborator by a fixed deadline
///
/// An elapsed deadline surfaces as [`LookupError::Timeout`], so a hung call
/// never leaves a caller pending indefinitely.
#[derive(Debug, Clone)]
pub struct TimeoutLookup<L> {
    inner: L,
    deadline: Duration,
}

impl<L: Lookup> TimeoutLookup<L> {
    /// Wrap collaborator
    #[inline]
    #[must_use]
    pub fn new(inner: L, deadline: Duration) -> Self {
        Self { inner, deadline }
    }

    /// Configured deadline
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Unwrap collaborator
    #[inline]
    pub fn into_inner(self) -> L {
        self.inner
    }
}

#[async_trait]
impl<L: Lookup> Lookup for TimeoutLookup<L> {
    async fn lookup(&self, query: &LookupQuery) -> Result<EntityRef, LookupError> {
        match tokio::time::timeout(self.deadline, self.inner.lookup(query)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout {
                after_ms: u64::try_from(self.deadline.as_millis()).unwrap_or(u64::MAX),
            }),
        }
    }
}
