//! State-transition context.
//!
//! A [`StateContext`] is the only handle through which the keeper touches
//! state. It buffers every write in a [`CacheStore`]; nothing reaches the
//! backing store until the surrounding transaction commits.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tokenpool_store::{BatchStore, CacheStore, ChangeSet, StateStore, StoreError};

/// Scoped view of chain state for one transaction or block callback.
pub struct StateContext<'a, S: ?Sized> {
    cache: CacheStore<'a, S>,
    height: u64,
}

impl<'a, S: StateStore + ?Sized> StateContext<'a, S> {
    pub fn new(store: &'a S, height: u64) -> Self {
        Self {
            cache: CacheStore::new(store),
            height,
        }
    }

    /// Block height the transition executes at.
    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn store(&self) -> &CacheStore<'a, S> {
        &self.cache
    }

    /// Number of records written so far.
    pub fn pending_writes(&self) -> usize {
        self.cache.pending()
    }

    /// Drop the context and return its buffered writes unapplied.
    pub fn into_changes(self) -> ChangeSet {
        self.cache.into_changes()
    }
}

impl<S: StateStore + BatchStore + ?Sized> StateContext<'_, S> {
    /// Apply every buffered write to the backing store atomically.
    pub fn commit(self) -> Result<(), StoreError> {
        self.cache.commit()
    }
}

/// How a transaction ended.
#[derive(Debug, PartialEq, Eq)]
pub enum TxOutcome<T, E> {
    /// The closure succeeded and its writes were committed.
    Committed(T),
    /// The closure returned an error; its writes were discarded.
    Rejected(E),
    /// A fatal violation unwound through the closure; its writes were discarded.
    Aborted(String),
}

impl<T, E> TxOutcome<T, E> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Run `f` inside a fresh context at `height`.
///
/// Commits on `Ok`, discards on `Err`, and converts a fatal halt into
/// [`TxOutcome::Aborted`] carrying the violation message. Only errors from the
/// final commit itself are returned as `Err`.
pub fn run_transaction<S, T, E, F>(
    store: &S,
    height: u64,
    f: F,
) -> Result<TxOutcome<T, E>, StoreError>
where
    S: StateStore + BatchStore + ?Sized,
    F: FnOnce(&mut StateContext<'_, S>) -> Result<T, E>,
{
    let mut ctx = StateContext::new(store, height);
    let result = panic::catch_unwind(AssertUnwindSafe(|| f(&mut ctx)));
    match result {
        Ok(Ok(value)) => {
            let writes = ctx.pending_writes();
            ctx.commit()?;
            tracing::debug!(height, writes, "transaction committed");
            Ok(TxOutcome::Committed(value))
        }
        Ok(Err(err)) => {
            tracing::debug!(height, "transaction rejected, writes discarded");
            Ok(TxOutcome::Rejected(err))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(height, %message, "transaction aborted, writes discarded");
            Ok(TxOutcome::Aborted(message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    }
}
