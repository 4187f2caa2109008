//! Core bounded pool implementation

use crate::config::PoolConfig;
use crate::errors::{FactoryError, PoolError, PoolResult};
use crate::kind::ResourceKind;
use crate::metrics::{MetricsTracker, PoolMetrics};

use crossbeam::queue::ArrayQueue;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{Semaphore, SemaphorePermit, TryAcquireError};

type Factory<T> = Box<dyn Fn() -> Result<T, FactoryError> + Send + Sync>;

/// Bounded pool of reusable readers.
///
/// The pool composes two primitives: a lock-free reuse cache of idle readers
/// and an admission gate with exactly `capacity` slots. Every checkout holds
/// one slot, whether the reader was freshly built or pulled from the cache,
/// so no more than `capacity` readers are ever outstanding at once.
///
/// Readers are built lazily: the factory runs only when a checkout finds the
/// cache empty. A factory failure hands its slot back before the error
/// reaches the caller, so failed builds never shrink the pool.
///
/// `Pool` is cheap to clone; all clones share the same state.
pub struct Pool<T: Send> {
    inner: Arc<PoolInner<T>>,
}

impl<T: Send> Clone for Pool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct PoolInner<T: Send> {
    kind: ResourceKind,
    idle: ArrayQueue<T>,
    gate: Semaphore,
    factory: Factory<T>,
    capacity: usize,
    acquire_timeout: Option<Duration>,
    outstanding: AtomicUsize,
    metrics: MetricsTracker,
}

impl<T: Send + 'static> Pool<T> {
    /// Create a pool around a reader factory.
    ///
    /// The factory is bound but not invoked; no readers are built eagerly.
    /// Fails with [`PoolError::InvalidCapacity`] when the configured
    /// capacity is zero.
    pub fn new<F>(kind: ResourceKind, config: PoolConfig, factory: F) -> PoolResult<Self>
    where
        F: Fn() -> Result<T, FactoryError> + Send + Sync + 'static,
    {
        if config.capacity < 1 {
            return Err(PoolError::InvalidCapacity(config.capacity));
        }

        Ok(Self {
            inner: Arc::new(PoolInner {
                kind,
                idle: ArrayQueue::new(config.capacity),
                gate: Semaphore::new(config.capacity),
                factory: Box::new(factory),
                capacity: config.capacity,
                acquire_timeout: config.acquire_timeout,
                outstanding: AtomicUsize::new(0),
                metrics: MetricsTracker::new(),
            }),
        })
    }

    /// Check out a reader, waiting for a free admission slot.
    ///
    /// Suspends without limit while `capacity` readers are outstanding,
    /// unless the pool was configured with an acquire timeout. The wait is
    /// cancel-safe: dropping the future before it resolves leaves no slot
    /// held, so callers can race it against a cancellation signal with
    /// `tokio::select!`.
    pub async fn acquire(&self) -> PoolResult<Pooled<T>> {
        match self.inner.acquire_timeout {
            Some(deadline) => self.acquire_with_deadline(deadline).await,
            None => {
                let permit = self
                    .inner
                    .gate
                    .acquire()
                    .await
                    .map_err(|_| PoolError::Closed)?;
                self.checkout(permit)
            }
        }
    }

    /// Check out a reader, giving up after `deadline`.
    pub async fn acquire_with_deadline(&self, deadline: Duration) -> PoolResult<Pooled<T>> {
        let permit = tokio::time::timeout(deadline, self.inner.gate.acquire())
            .await
            .map_err(|_| PoolError::Timeout(deadline))?
            .map_err(|_| PoolError::Closed)?;
        self.checkout(permit)
    }

    /// Check out a reader without waiting.
    ///
    /// Fails with [`PoolError::Empty`] when every admission slot is held;
    /// the caller may retry or fall back to [`acquire`](Self::acquire).
    pub fn try_acquire(&self) -> PoolResult<Pooled<T>> {
        let permit = self.inner.gate.try_acquire().map_err(|e| match e {
            TryAcquireError::Closed => PoolError::Closed,
            TryAcquireError::NoPermits => PoolError::Empty,
        })?;
        self.checkout(permit)
    }

    fn checkout(&self, permit: SemaphorePermit<'_>) -> PoolResult<Pooled<T>> {
        let reader = match self.inner.idle.pop() {
            Some(reader) => reader,
            None => match (self.inner.factory)() {
                Ok(reader) => {
                    self.inner
                        .metrics
                        .factory_builds
                        .fetch_add(1, Ordering::Relaxed);
                    reader
                }
                Err(source) => {
                    self.inner
                        .metrics
                        .construction_failures
                        .fetch_add(1, Ordering::Relaxed);
                    // permit drops here, returning the slot to the gate
                    return Err(PoolError::ConstructionFailed(source));
                }
            },
        };

        permit.forget();
        self.inner.outstanding.fetch_add(1, Ordering::Relaxed);
        self.inner
            .metrics
            .total_acquired
            .fetch_add(1, Ordering::Relaxed);

        Ok(Pooled {
            reader: Some(reader),
            pool: Arc::downgrade(&self.inner),
        })
    }

    /// Close the pool.
    ///
    /// Callers already suspended in [`acquire`](Self::acquire) are woken
    /// with [`PoolError::Closed`] and later acquires fail fast. Idempotent.
    /// Idle readers are not dropped and checked-out readers stay with their
    /// holders; teardown belongs to the surrounding system.
    pub fn close(&self) {
        self.inner.gate.close();
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.inner.gate.is_closed()
    }

    /// Kind tag this pool was built for
    pub fn kind(&self) -> ResourceKind {
        self.inner.kind
    }

    /// Number of admission slots
    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Readers currently checked out
    pub fn outstanding(&self) -> usize {
        self.inner.outstanding.load(Ordering::Relaxed)
    }

    /// Readers idle in the reuse cache
    pub fn idle_count(&self) -> usize {
        self.inner.idle.len()
    }

    /// Snapshot of activity counters
    pub fn metrics(&self) -> PoolMetrics {
        self.inner
            .metrics
            .snapshot(self.outstanding(), self.idle_count(), self.capacity())
    }
}

impl<T: Send> PoolInner<T> {
    fn restore(&self, reader: T) {
        // full queue is unreachable while slot accounting holds
        let _ = self.idle.push(reader);
        self.release_slot();
    }

    fn release_slot(&self) {
        self.outstanding.fetch_sub(1, Ordering::Relaxed);
        self.metrics.total_released.fetch_add(1, Ordering::Relaxed);
        self.gate.add_permits(1);
    }
}

/// A checked-out reader that checks itself back in when dropped
///
/// The holder has exclusive use of the reader between checkout and drop.
/// Dropping the guard pushes the reader into the reuse cache and releases
/// the admission slot, which may wake one waiting acquirer.
#[must_use]
#[derive(Debug)]
pub struct Pooled<T: Send> {
    reader: Option<T>,
    pool: Weak<PoolInner<T>>,
}

impl<T: Send> Pooled<T> {
    /// Detach the reader from its pool permanently.
    ///
    /// The admission slot is released but the reader is not returned to the
    /// cache; closing it becomes the caller's responsibility.
    pub fn take(mut this: Self) -> T {
        let reader = this.reader.take().expect("reader already taken");
        if let Some(pool) = this.pool.upgrade() {
            pool.release_slot();
        }
        reader
    }
}

impl<T: Send> Deref for Pooled<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.reader.as_ref().expect("reader already taken")
    }
}

impl<T: Send> DerefMut for Pooled<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.reader.as_mut().expect("reader already taken")
    }
}

impl<T: Send> Drop for Pooled<T> {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            if let Some(pool) = self.pool.upgrade() {
                pool.restore(reader);
            }
        }
    }
}
