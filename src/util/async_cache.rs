//! Single-flight memoization of asynchronous results.
//!
//! An [`AsyncCache`] maps keys to [`PendingValue`]s. The first request for a
//! key runs the producer and spawns its future; every later request for the
//! same key gets the same `PendingValue`, already settled or still in flight.
//! Entries are never evicted, and a failure stays cached for the key.
//!
//! DESIGN
//! ======
//! Everything runs on the single UI thread, so state lives in
//! `Rc<RefCell<..>>` and each waiter gets its own `oneshot` channel. Driving
//! the producer future is left to an injected spawner (`spawn_local` in the
//! browser, a `LocalPool` in tests).

#[cfg(test)]
#[path = "async_cache_test.rs"]
mod async_cache_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};

/// Error observed by a waiter on a [`PendingValue`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WaitError<E> {
    /// The computation failed; every waiter sees the same error.
    #[error("{0}")]
    Failed(E),
    /// The computation was dropped before it produced a result.
    #[error("pending value was dropped before it settled")]
    Abandoned,
}

enum Slot<T, E> {
    Waiting(Vec<oneshot::Sender<Result<T, E>>>),
    Resolved(T),
    Failed(E),
    Abandoned,
}

/// A result that settles exactly once and can be awaited by any number of
/// consumers, before or after it settles.
pub struct PendingValue<T, E> {
    slot: Rc<RefCell<Slot<T, E>>>,
}

impl<T, E> Clone for PendingValue<T, E> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T, E> Default for PendingValue<T, E> {
    fn default() -> Self {
        Self {
            slot: Rc::new(RefCell::new(Slot::Waiting(Vec::new()))),
        }
    }
}

impl<T: Clone + 'static, E: Clone + 'static> PendingValue<T, E> {
    /// Create an unsettled value with no waiters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the result and wake every queued waiter.
    ///
    /// Returns `false` (and changes nothing) if the value already settled.
    pub fn settle(&self, result: Result<T, E>) -> bool {
        let waiters = {
            let mut slot = self.slot.borrow_mut();
            if !matches!(*slot, Slot::Waiting(_)) {
                return false;
            }
            let next = match &result {
                Ok(value) => Slot::Resolved(value.clone()),
                Err(err) => Slot::Failed(err.clone()),
            };
            match std::mem::replace(&mut *slot, next) {
                Slot::Waiting(waiters) => waiters,
                _ => Vec::new(),
            }
        };
        for tx in waiters {
            // A waiter that stopped listening has nothing to receive.
            tx.send(result.clone()).unwrap_or_default();
        }
        true
    }

    /// `true` once the value has resolved, failed, or been abandoned.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !matches!(*self.slot.borrow(), Slot::Waiting(_))
    }

    /// Number of consumers currently queued on an unsettled value.
    #[must_use]
    pub fn waiter_count(&self) -> usize {
        match &*self.slot.borrow() {
            Slot::Waiting(waiters) => waiters.len(),
            _ => 0,
        }
    }

    /// Await the result.
    ///
    /// Completes immediately when the value has already settled; otherwise
    /// the caller is queued and woken exactly once.
    pub fn wait(&self) -> LocalBoxFuture<'static, Result<T, WaitError<E>>> {
        let rx = {
            let mut slot = self.slot.borrow_mut();
            match &mut *slot {
                Slot::Resolved(value) => return future::ready(Ok(value.clone())).boxed_local(),
                Slot::Failed(err) => {
                    return future::ready(Err(WaitError::Failed(err.clone()))).boxed_local();
                }
                Slot::Abandoned => return future::ready(Err(WaitError::Abandoned)).boxed_local(),
                Slot::Waiting(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    rx
                }
            }
        };
        async move {
            match rx.await {
                Ok(result) => result.map_err(WaitError::Failed),
                Err(oneshot::Canceled) => Err(WaitError::Abandoned),
            }
        }
        .boxed_local()
    }

    fn abandon(&self) {
        let mut slot = self.slot.borrow_mut();
        if matches!(*slot, Slot::Waiting(_)) {
            // Dropping the senders wakes queued waiters with `Canceled`.
            *slot = Slot::Abandoned;
        }
    }
}

/// Abandons its value if dropped before the producer settles it.
struct SettleGuard<T: Clone + 'static, E: Clone + 'static>(PendingValue<T, E>);

impl<T: Clone + 'static, E: Clone + 'static> Drop for SettleGuard<T, E> {
    fn drop(&mut self) {
        self.0.abandon();
    }
}

/// Runs a `'static` local future to completion.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Keyed registry of [`PendingValue`]s with at-most-once producers.
pub struct AsyncCache<K, T, E> {
    entries: Rc<RefCell<HashMap<K, PendingValue<T, E>>>>,
    spawner: Spawner,
}

impl<K, T, E> Clone for AsyncCache<K, T, E> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
            spawner: Rc::clone(&self.spawner),
        }
    }
}

impl<K, T, E> AsyncCache<K, T, E>
where
    K: Eq + Hash,
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Build an empty cache that drives producer futures with `spawner`.
    pub fn new(spawner: impl Fn(LocalBoxFuture<'static, ()>) + 'static) -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
            spawner: Rc::new(spawner),
        }
    }

    /// Return the value registered for `key`, creating it on first use.
    ///
    /// `producer` is only invoked when `key` is absent. Its future is spawned
    /// and settles the returned value when it completes.
    pub fn get_or_create<F, Fut>(&self, key: K, producer: F) -> PendingValue<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + 'static,
    {
        if let Some(existing) = self.entries.borrow().get(&key) {
            return existing.clone();
        }

        let pending = PendingValue::new();
        self.entries.borrow_mut().insert(key, pending.clone());

        let work = producer();
        let guard = SettleGuard(pending.clone());
        (self.spawner)(
            async move {
                let result = work.await;
                guard.0.settle(result);
            }
            .boxed_local(),
        );
        pending
    }

    /// Look up a key without creating it.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<PendingValue<T, E>> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of keys ever requested.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
