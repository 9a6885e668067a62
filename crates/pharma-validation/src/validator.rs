//! Existence validator
//!
//! Confirms that an identifier typed into a form field refers to an existing
//! entity. Absence and lookup failure both produce the invalid outcome, so a
//! field whose reference cannot be confirmed blocks submission.

use crate::config::ValidatorConfig;
use crate::field::FieldHandle;
use crate::outcome::{FieldOutcome, ReasonCode};
use pharma_lookup::{Lookup, LookupKind, LookupQuery, TimeoutLookup};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Query for the trimmed input, or `None` if the field is empty or whitespace-only
#[inline]
#[must_use]
pub fn settle_input(kind: LookupKind, raw: &str) -> Option<LookupQuery> {
    LookupQuery::new(kind, raw).ok()
}

/// Result of one lookup, with whether it may be reused for the same value
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub(crate) outcome: FieldOutcome,
    /// Found or affirmatively absent; transport failures are not conclusive
    pub(crate) conclusive: bool,
}

/// Asynchronous existence validator for one kind of reference
///
/// Cheap to clone; clones share the lookup collaborator.
#[derive(Clone)]
pub struct ExistenceValidator {
    kind: LookupKind,
    reason: ReasonCode,
    lookup: Arc<dyn Lookup>,
    config: ValidatorConfig,
}

impl ExistenceValidator {
    /// Create validator for a lookup kind
    ///
    /// If the configuration carries a lookup deadline, the collaborator is
    /// wrapped so an elapsed deadline counts as a transport failure.
    #[must_use]
    pub fn new(kind: LookupKind, lookup: Arc<dyn Lookup>, config: ValidatorConfig) -> Self {
        let lookup: Arc<dyn Lookup> = match config.lookup_timeout() {
            Some(deadline) => Arc::new(TimeoutLookup::new(lookup, deadline)),
            None => lookup,
        };
        Self {
            kind,
            reason: ReasonCode::for_kind(kind),
            lookup,
            config,
        }
    }

    /// Validator for salesperson references (`vendedorNotExists`)
    #[inline]
    #[must_use]
    pub fn salesperson_exists(lookup: Arc<dyn Lookup>, config: ValidatorConfig) -> Self {
        Self::new(LookupKind::Salesperson, lookup, config)
    }

    /// Validator for product SKU references (`productoNotExists`)
    #[inline]
    #[must_use]
    pub fn product_exists(lookup: Arc<dyn Lookup>, config: ValidatorConfig) -> Self {
        Self::new(LookupKind::Product, lookup, config)
    }

    /// Lookup kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    /// Reason code reported on failure
    #[inline]
    #[must_use]
    pub fn reason(&self) -> ReasonCode {
        self.reason
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a single value: wait out the debounce window, then look it up
    ///
    /// Empty input is valid immediately. Dropping the future cancels both the
    /// wait and any lookup in flight.
    pub async fn validate(&self, raw: &str) -> FieldOutcome {
        let Some(query) = settle_input(self.kind, raw) else {
            return FieldOutcome::Valid;
        };
        tokio::time::sleep(self.config.debounce()).await;
        self.resolve(&query).await.outcome
    }

    /// Validate without debouncing, e.g. when the form is submitted
    pub async fn check_now(&self, raw: &str) -> FieldOutcome {
        match settle_input(self.kind, raw) {
            Some(query) => self.resolve(&query).await.outcome,
            None => FieldOutcome::Valid,
        }
    }

    /// Per-field handle that debounces input changes and discards stale lookups
    ///
    /// Must be used from within a tokio runtime.
    #[must_use]
    pub fn attach(&self) -> FieldHandle {
        FieldHandle::new(self.clone())
    }

    /// Issue one lookup for a settled query
    pub(crate) async fn resolve(&self, query: &LookupQuery) -> Resolution {
        let value = query.id();
        match self.lookup.lookup(query).await {
            Ok(_) => {
                debug!(kind = %self.kind, value, "referenced entity exists");
                Resolution {
                    outcome: FieldOutcome::Valid,
                    conclusive: true,
                }
            }
            Err(err) => {
                let category = err.category();
                if err.is_conclusive() {
                    debug!(kind = %self.kind, value, %category, "referenced entity does not exist");
                } else {
                    warn!(
                        kind = %self.kind,
                        value,
                        %category,
                        error = %err,
                        "existence could not be confirmed, failing closed"
                    );
                }
                Resolution {
                    outcome: FieldOutcome::invalid(self.reason, value),
                    conclusive: err.is_conclusive(),
                }
            }
        }
    }
}

impl fmt::Debug for ExistenceValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExistenceValidator")
            .field("kind", &self.kind)
            .field("reason", &self.reason)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
