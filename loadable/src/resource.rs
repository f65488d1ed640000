#![cfg(feature = "async")]
//! Async **producer cell** holding one [`Loadable`].
//!
//! A [`Resource<T>`] is the place an asynchronous producer puts its
//! eventual result. Every clone is a handle to the same slot:
//!
//! - Producers write through [`Resource::resolve`], or hand the cell a
//!   future with [`Resource::spawn`] / [`Resource::refresh`], which
//!   runs it on the tokio runtime and resolves the cell with its
//!   output.
//! - Readers can:
//!   - take a synchronous snapshot with [`Resource::get`],
//!   - read inside a suspendable task with [`Resource::wait_for`],
//!     whose [`Suspend`] wakes on the cell's next state change,
//!   - `await` the value with [`Resource::load`], or
//!   - watch every snapshot through [`Resource::subscribe`].
//!
//! Internally the slot is a `tokio::sync::watch` channel: the sender
//! owns the authoritative `Loadable<T>` and broadcasts each new value
//! to subscribers. The snapshots handed out are plain immutable
//! containers.
//!
//! If a spawned producer is cancelled, panics, or is otherwise dropped
//! before it resolves the cell, the cell is marked *abandoned*: pending
//! [`load`](Resource::load) calls return [`LoadableError::Abandoned`]
//! instead of waiting forever.

use std::fmt;
use std::future::Future;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::error::LoadableError;
use crate::loadable::Loadable;
use crate::suspend::Suspend;

/// A shared cell an async producer resolves and consumers read.
pub struct Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<Inner<T>>,
}

struct Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    tx: watch::Sender<Loadable<T>>,
    producer: Mutex<Option<AbortHandle>>,
    // Bumped whenever the current producer is replaced or cancelled.
    generation: AtomicU64,
    abandoned: AtomicBool,
}

impl<T> Inner<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn producer(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.producer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }

    fn publish(&self, value: T) {
        self.abandoned.store(false, Ordering::Release);
        self.tx.send_replace(Loadable::Loaded(value));
        tracing::trace!(ty = std::any::type_name::<T>(), "resource resolved");
    }

    // The generation check runs under the channel's write lock, so a
    // producer retired by `refresh` or `cancel` can never land a value
    // after the retiring call returns.
    fn publish_from(&self, generation: u64, value: T) -> bool {
        let published = self.tx.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            self.abandoned.store(false, Ordering::Release);
            *state = Loadable::Loaded(value);
            true
        });
        if published {
            tracing::trace!(ty = std::any::type_name::<T>(), generation, "resource resolved");
        } else {
            tracing::trace!(
                ty = std::any::type_name::<T>(),
                generation,
                "superseded producer output discarded"
            );
        }
        published
    }

    // Marks a still-pending cell abandoned. `None` skips the producer
    // generation check.
    fn abandon_pending(&self, generation: Option<u64>) -> bool {
        let abandoned = self.tx.send_if_modified(|state| {
            let current = generation.map_or(true, |g| self.is_current(g));
            if !current || state.is_loaded() {
                return false;
            }
            self.abandoned.store(true, Ordering::Release);
            // Notify so waiters observe the flag.
            true
        });
        if abandoned {
            tracing::warn!(
                ty = std::any::type_name::<T>(),
                "resource producer went away before resolving"
            );
        }
        abandoned
    }
}

// Lives inside a spawned producer task. Dropped on completion, panic
// or abort.
struct ProducerGuard<T>
where
    T: Clone + Send + Sync + 'static,
{
    inner: Arc<Inner<T>>,
    generation: u64,
    resolved: bool,
}

impl<T> Drop for ProducerGuard<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn drop(&mut self) {
        if !self.resolved {
            self.inner.abandon_pending(Some(self.generation));
        }
    }
}

impl<T> Clone for Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Resource<T>
where
    T: Clone + Send + Sync + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("value", &*self.inner.tx.borrow())
            .field("abandoned", &self.inner.abandoned.load(Ordering::Acquire))
            .finish()
    }
}

impl<T> Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a cell initialized to `NotLoaded`, with no producer.
    pub fn new() -> Self {
        Self::with_state(Loadable::NotLoaded)
    }

    /// Create a cell that is already loaded.
    pub fn loaded(value: T) -> Self {
        Self::with_state(Loadable::Loaded(value))
    }

    fn with_state(state: Loadable<T>) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            inner: Arc::new(Inner {
                tx,
                producer: Mutex::new(None),
                generation: AtomicU64::new(0),
                abandoned: AtomicBool::new(false),
            }),
        }
    }

    /// Create a cell and resolve it with the output of `producer`,
    /// run as a tokio task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(producer: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let cell = Self::new();
        let generation = cell.supersede();
        cell.launch(generation, producer);
        cell
    }

    /// Reset the cell to `NotLoaded` and start a new producer,
    /// aborting the previous one if it is still running.
    ///
    /// Must be called from within a tokio runtime.
    pub fn refresh<F>(&self, producer: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        let generation = self.supersede();
        self.invalidate();
        self.launch(generation, producer);
    }

    // Retire the running producer and return the next generation.
    // Output from retired producers is discarded.
    fn supersede(&self) -> u64 {
        let generation = self.inner.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Some(previous) = self.inner.producer().take() {
            previous.abort();
        }
        generation
    }

    fn launch<F>(&self, generation: u64, producer: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.inner.abandoned.store(false, Ordering::Release);

        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let mut guard = ProducerGuard {
                inner,
                generation,
                resolved: false,
            };
            let value = producer.await;
            guard.resolved = guard.inner.publish_from(generation, value);
        });

        let mut slot = self.inner.producer();
        if self.inner.is_current(generation) {
            if let Some(previous) = slot.replace(task.abort_handle()) {
                previous.abort();
            }
        } else {
            // Retired by a concurrent refresh or cancel before it was
            // registered.
            task.abort();
        }
        drop(slot);
        tracing::debug!(
            ty = std::any::type_name::<T>(),
            generation,
            "resource producer started"
        );
    }

    /// Current snapshot.
    pub fn get(&self) -> Loadable<T> {
        self.inner.tx.borrow().clone()
    }

    /// True if the cell currently holds a value.
    pub fn is_loaded(&self) -> bool {
        self.inner.tx.borrow().is_loaded()
    }

    /// True if the last producer went away without resolving the cell.
    pub fn is_abandoned(&self) -> bool {
        self.inner.abandoned.load(Ordering::Acquire)
    }

    /// Store `value` and notify every waiter and subscriber.
    pub fn resolve(&self, value: T) {
        self.inner.publish(value);
    }

    /// Drop the current value. Returns true if the cell was loaded.
    ///
    /// A running producer is left alone and will resolve the cell
    /// when it finishes.
    pub fn invalidate(&self) -> bool {
        let changed = self.inner.tx.send_if_modified(|state| {
            if state.is_loaded() {
                *state = Loadable::NotLoaded;
                true
            } else {
                false
            }
        });
        if changed {
            tracing::debug!(ty = std::any::type_name::<T>(), "resource invalidated");
        }
        changed
    }

    /// Abort the running producer, if any. The cell keeps whatever it
    /// holds; if that is `NotLoaded` the cell becomes abandoned.
    ///
    /// Returns true if a producer was cancelled.
    pub fn cancel(&self) -> bool {
        let Some(handle) = self.inner.producer().take() else {
            return false;
        };
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        let was_running = !handle.is_finished();
        handle.abort();
        tracing::debug!(
            ty = std::any::type_name::<T>(),
            was_running,
            "resource producer cancelled"
        );
        if was_running {
            self.inner.abandon_pending(None);
        }
        was_running
    }

    /// The value, or a [`Suspend`] that completes on the cell's next
    /// state change.
    ///
    /// The subscription is taken before the state is read, so a
    /// resolve that races with this call is never missed. An abandoned
    /// cell hands out an [abandoned](Suspend::is_abandoned) signal
    /// instead, since no further change is coming.
    pub fn wait_for(&self) -> Result<T, Suspend> {
        let mut rx = self.inner.tx.subscribe();
        let current = rx.borrow_and_update().clone();
        match current {
            Loadable::Loaded(value) => Ok(value),
            Loadable::NotLoaded if self.is_abandoned() => Err(Suspend::abandoned()),
            Loadable::NotLoaded => Err(Suspend::on(async move {
                // A closed channel also ends the wait.
                let _ = rx.changed().await;
            })),
        }
    }

    /// Wait for the value.
    ///
    /// Returns [`LoadableError::Abandoned`] if the cell is not loaded
    /// and its producer went away.
    pub async fn load(&self) -> Result<T, LoadableError> {
        let mut rx = self.inner.tx.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if let Loadable::Loaded(value) = current {
                return Ok(value);
            }
            if self.is_abandoned() {
                return Err(LoadableError::Abandoned);
            }
            if rx.changed().await.is_err() {
                return Err(LoadableError::Abandoned);
            }
        }
    }

    /// A receiver observing every snapshot of the cell.
    pub fn subscribe(&self) -> watch::Receiver<Loadable<T>> {
        self.inner.tx.subscribe()
    }
}

#[cfg(all(test, feature = "async"))]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;
    use tokio::time::timeout;

    async fn failing_producer() -> i32 {
        panic!("producer failed")
    }

    #[tokio::test]
    async fn spawn_resolves_the_cell() {
        let cell = Resource::spawn(async { 7 });
        let got = timeout(Duration::from_millis(200), cell.load())
            .await
            .expect("timed out");
        assert_eq!(got, Ok(7));
        assert_eq!(cell.get(), Loadable::Loaded(7));
    }

    #[tokio::test]
    async fn loaded_cell_reads_immediately() {
        let cell = Resource::loaded("ready");
        assert!(cell.is_loaded());
        assert_eq!(cell.wait_for().ok(), Some("ready"));
        let got = timeout(Duration::from_millis(50), cell.load())
            .await
            .expect("timed out");
        assert_eq!(got, Ok("ready"));
    }

    #[tokio::test]
    async fn wait_for_wakes_on_resolve() {
        let cell = Resource::<u32>::new();
        let signal = cell.wait_for().expect_err("cell starts pending");
        assert!(signal.is_linked());

        let producer = {
            let cell = cell.clone();
            tokio::spawn(async move {
                sleep(Duration::from_millis(10)).await;
                cell.resolve(42);
            })
        };

        timeout(Duration::from_millis(200), signal)
            .await
            .expect("signal never fired");
        assert_eq!(cell.wait_for().ok(), Some(42));
        producer.await.unwrap();
    }

    #[tokio::test]
    async fn subscribers_see_each_transition() {
        let cell = Resource::<i32>::new();
        let mut rx = cell.subscribe();

        cell.resolve(1);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Loadable::Loaded(1));

        assert!(cell.invalidate());
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), Loadable::NotLoaded);

        // Already pending: no notification.
        assert!(!cell.invalidate());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn cancel_abandons_pending_cell() {
        let cell = Resource::spawn(futures::future::pending::<i32>());
        let waiter = {
            let cell = cell.clone();
            tokio::spawn(async move { cell.load().await })
        };
        tokio::task::yield_now().await;

        assert!(cell.cancel());
        let got = timeout(Duration::from_millis(200), waiter)
            .await
            .expect("timed out")
            .unwrap();
        assert_eq!(got, Err(LoadableError::Abandoned));
        assert_eq!(cell.get(), Loadable::NotLoaded);
        assert!(!cell.cancel());
    }

    #[tokio::test]
    async fn cancel_keeps_loaded_value() {
        let cell = Resource::loaded(3);
        cell.refresh(futures::future::pending());
        cell.resolve(4);
        assert!(cell.cancel());
        assert_eq!(cell.get(), Loadable::Loaded(4));
        assert!(!cell.is_abandoned());
    }

    #[tokio::test]
    async fn panicking_producer_abandons_cell() {
        let cell = Resource::spawn(failing_producer());
        let got = timeout(Duration::from_millis(200), cell.load())
            .await
            .expect("timed out");
        assert_eq!(got, Err(LoadableError::Abandoned));
    }

    #[tokio::test]
    async fn refresh_replaces_value() {
        let cell = Resource::loaded(1);
        cell.refresh(async {
            sleep(Duration::from_millis(5)).await;
            2
        });
        assert_eq!(cell.get(), Loadable::NotLoaded);
        let got = timeout(Duration::from_millis(200), cell.load())
            .await
            .expect("timed out");
        assert_eq!(got, Ok(2));
    }

    #[tokio::test]
    async fn refresh_supersedes_running_producer() {
        let cell = Resource::spawn(async {
            sleep(Duration::from_millis(50)).await;
            "stale"
        });
        cell.refresh(async { "fresh" });
        let got = timeout(Duration::from_millis(200), cell.load())
            .await
            .expect("timed out");
        assert_eq!(got, Ok("fresh"));

        sleep(Duration::from_millis(80)).await;
        assert_eq!(cell.get(), Loadable::Loaded("fresh"));
    }

    #[tokio::test]
    async fn abandoned_cell_hands_out_abandoned_signal() {
        let cell = Resource::spawn(futures::future::pending::<u8>());
        assert!(!cell.wait_for().expect_err("pending").is_abandoned());
        tokio::task::yield_now().await;

        assert!(cell.cancel());
        let signal = cell.wait_for().expect_err("still pending");
        assert!(signal.is_abandoned());
        assert!(!signal.is_linked());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn retired_producer_never_lands_after_refresh() {
        let cell = Resource::<u32>::new();
        for _ in 0..2_000 {
            cell.refresh(async { 1 });
            cell.refresh(futures::future::pending());
            tokio::task::yield_now().await;
            assert_ne!(cell.get(), Loadable::Loaded(1));
        }
        assert!(cell.cancel());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn finished_producer_does_not_abandon_after_invalidate() {
        for _ in 0..200 {
            let cell = Resource::spawn(async { 1 });
            let got = timeout(Duration::from_millis(200), cell.load())
                .await
                .expect("timed out");
            assert_eq!(got, Ok(1));
            // The producer task may still be unwinding its guard here.
            assert!(cell.invalidate());
            sleep(Duration::from_millis(1)).await;
            assert!(!cell.is_abandoned());
            assert_eq!(cell.get(), Loadable::NotLoaded);
        }
    }
}
