//! Per-field validation handle
//!
//! Every input change bumps a generation counter and restarts the
//! debounce. A cycle publishes its outcome only while its generation is
//! still current, so a slow lookup for an old value can never overwrite the
//! state of a newer one.

use crate::outcome::{FieldOutcome, FieldState};
use crate::validator::{settle_input, ExistenceValidator};
use parking_lot::Mutex;
use pharma_lookup::LookupQuery;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Previous settle, kept only when its outcome came from a conclusive lookup
type SettledLookup = (LookupQuery, FieldOutcome);

struct FieldInner {
    validator: ExistenceValidator,
    generation: AtomicU64,
    state: watch::Sender<FieldState>,
    /// Guards generation bumps and publishes; holds the running cycle
    pending: Mutex<Option<JoinHandle<()>>>,
    /// Replaced on every settle; reuse is limited to consecutive identical values
    last_settle: Mutex<Option<SettledLookup>>,
    /// Latest trimmed input, empty when cleared
    current: Mutex<String>,
    lookups_issued: AtomicU64,
}

impl FieldInner {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn run_cycle(self: Arc<Self>, generation: u64, query: LookupQuery) {
        tokio::time::sleep(self.validator.config().debounce()).await;
        if !self.is_current(generation) {
            return;
        }

        let reused = self
            .last_settle
            .lock()
            .as_ref()
            .filter(|(settled, _)| *settled == query)
            .map(|(_, outcome)| outcome.clone());

        if let Some(outcome) = reused {
            debug!(kind = %self.validator.kind(), value = query.id(), "value unchanged since previous settle");
            self.publish(generation, outcome.clone(), Some((query, outcome)));
            return;
        }

        self.lookups_issued.fetch_add(1, Ordering::SeqCst);
        let resolution = self.validator.resolve(&query).await;
        if !self.is_current(generation) {
            debug!(kind = %self.validator.kind(), value = query.id(), "discarding stale lookup result");
            return;
        }
        let remember = resolution
            .conclusive
            .then(|| (query, resolution.outcome.clone()));
        self.publish(generation, resolution.outcome, remember);
    }

    /// Publish a settle and record it as the previous one, if still current
    fn publish(&self, generation: u64, outcome: FieldOutcome, remember: Option<SettledLookup>) {
        let _guard = self.pending.lock();
        if self.is_current(generation) {
            *self.last_settle.lock() = remember;
            self.state.send_replace(FieldState::Settled(outcome));
        }
    }

    fn fail_closed(&self) -> FieldOutcome {
        let current = self.current.lock();
        if current.is_empty() {
            FieldOutcome::Valid
        } else {
            FieldOutcome::invalid(self.validator.reason(), current.as_str())
        }
    }
}

/// Validation state of one form field bound to an [`ExistenceValidator`]
///
/// Dropping the handle cancels any cycle still running.
pub struct FieldHandle {
    inner: Arc<FieldInner>,
}

impl FieldHandle {
    pub(crate) fn new(validator: ExistenceValidator) -> Self {
        let (state, _) = watch::channel(FieldState::default());
        Self {
            inner: Arc::new(FieldInner {
                validator,
                generation: AtomicU64::new(0),
                state,
                pending: Mutex::new(None),
                last_settle: Mutex::new(None),
                current: Mutex::new(String::new()),
                lookups_issued: AtomicU64::new(0),
            }),
        }
    }

    /// Report a new raw value for the field
    ///
    /// Abandons any pending debounce or lookup. Empty input settles as valid
    /// immediately; anything else goes `Pending` until its cycle completes.
    pub fn set_value(&self, raw: &str) {
        let mut pending = self.inner.pending.lock();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = pending.take() {
            task.abort();
        }

        let Some(query) = settle_input(self.inner.validator.kind(), raw) else {
            self.inner.current.lock().clear();
            *self.inner.last_settle.lock() = None;
            self.inner
                .state
                .send_replace(FieldState::Settled(FieldOutcome::Valid));
            return;
        };

        *self.inner.current.lock() = query.id().to_string();
        self.inner.state.send_replace(FieldState::Pending);
        let inner = Arc::clone(&self.inner);
        *pending = Some(tokio::spawn(inner.run_cycle(generation, query)));
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> FieldState {
        self.inner.state.borrow().clone()
    }

    /// Watch state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FieldState> {
        self.inner.state.subscribe()
    }

    /// Wait until the current value has an outcome
    ///
    /// With no lookup deadline configured, a hung lookup keeps this pending.
    /// If no outcome can be observed, a non-empty value reports as invalid.
    pub async fn settled(&self) -> FieldOutcome {
        let mut rx = self.inner.state.subscribe();
        let settled = rx
            .wait_for(|state| !state.is_pending())
            .await
            .ok()
            .and_then(|state| state.outcome().cloned());
        settled.unwrap_or_else(|| self.inner.fail_closed())
    }

    /// Number of lookups this field has issued
    #[inline]
    #[must_use]
    pub fn lookups_issued(&self) -> u64 {
        self.inner.lookups_issued.load(Ordering::SeqCst)
    }

    /// Validator the field is bound to
    #[inline]
    #[must_use]
    pub fn validator(&self) -> &ExistenceValidator {
        &self.inner.validator
    }
}

impl Drop for FieldHandle {
    fn drop(&mut self) {
        if let Some(task) = self.inner.pending.lock().take() {
            task.abort();
        }
    }
}

impl std::fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldHandle")
            .field("validator", &self.inner.validator)
            .field("state", &*self.inner.state.borrow())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
