use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use concurrent_queue::{ConcurrentQueue, PushError};
use parking_lot::Mutex;
use suspend::Suspend;

use super::error::{AcquireError, BuildError, PoolClosed};
use super::wait::WaitQueue;
use crate::resource::{Close, Managed, Poolable};

pub(crate) type CreateFn<C, E> = Box<dyn Fn() -> Result<Poolable<C>, E> + Send + Sync>;

pub(crate) struct PoolState {
    pub active: usize,
    pub closed: bool,
}

pub(crate) struct PoolInternal<C: Close, E> {
    pub(crate) create: CreateFn<C, E>,
    pub(crate) idle: ConcurrentQueue<Poolable<C>>,
    pub(crate) max_count: usize,
    pub(crate) state: Mutex<PoolState>,
    pub(crate) wait: WaitQueue,
}

impl<C: Close, E> PoolInternal<C, E> {
    pub fn new(create: CreateFn<C, E>, max_count: usize) -> Self {
        Self {
            create,
            idle: ConcurrentQueue::bounded(max_count),
            max_count,
            state: Mutex::new(PoolState {
                active: 0,
                closed: false,
            }),
            wait: WaitQueue::new(max_count),
        }
    }

    /// Construct one resource for each slot and place it in the idle queue.
    /// On failure, anything already constructed is closed again.
    pub fn fill(&self) -> Result<(), E> {
        let mut state = self.state.lock();
        while state.active < self.max_count {
            match (self.create)() {
                Ok(res) => {
                    state.active += 1;
                    match self.idle.push(res) {
                        Ok(()) => (),
                        Err(PushError::Full(res)) | Err(PushError::Closed(res)) => {
                            state.active -= 1;
                            close_quiet(res);
                            break;
                        }
                    }
                }
                Err(err) => {
                    while let Ok(res) = self.idle.pop() {
                        state.active -= 1;
                        close_quiet(res);
                    }
                    return Err(err);
                }
            }
        }
        tracing::debug!(active = state.active, max = self.max_count, "pool filled");
        Ok(())
    }

    /// Account for a closed resource and wake any waiters.
    pub fn discard(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.active > 0, "discarded more resources than were created");
        state.active = state.active.saturating_sub(1);
        self.wait.notice();
        tracing::trace!(active = state.active, max = self.max_count, "resource closed");
        drop(state);
        self.wait.wake_all();
    }

    pub fn is_closed(&self) -> bool {
        self.idle.is_closed()
    }

    /// Park the current thread until a resource may be available. Returns
    /// immediately if the pool state changed since the last attempt.
    pub fn wait(&self, suspend: &mut Suspend) {
        let notifier = suspend.notifier();
        let mut listener = suspend.listen();
        self.wait.register(notifier);

        if self.wait.take_notice() || !self.idle.is_empty() {
            return;
        }
        {
            let state = self.state.lock();
            if state.closed || state.active < self.max_count {
                return;
            }
        }
        listener.wait();
    }
}

impl<C: Close, E> Drop for PoolInternal<C, E> {
    fn drop(&mut self) {
        // A pool dropped without a release still closes its idle resources
        self.idle.close();
        while let Ok(res) = self.idle.pop() {
            close_quiet(res);
        }
    }
}

/// Close a resource the pool is discarding on its own behalf. Close errors
/// have no caller to be returned to.
pub(crate) fn close_quiet<C: Close>(res: Poolable<C>) {
    let (conn, _) = res.into_inner();
    if conn.close().is_err() {
        tracing::debug!("error closing discarded resource");
    }
}

/// A bounded pool of closable resources of type `C`, created on demand by a
/// constructor which may fail with an error of type `E`.
///
/// Cloning a `Pool` produces another handle to the same set of resources.
pub struct Pool<C: Close, E> {
    pub(crate) inner: Arc<PoolInternal<C, E>>,
}

impl<C: Close, E> Pool<C, E> {
    /// Build a pool with `max_count` eagerly-constructed resources.
    pub fn new<F>(max_count: usize, create: F) -> Result<Self, BuildError<E>>
    where
        F: Fn() -> Result<Poolable<C>, E> + Send + Sync + 'static,
    {
        super::PoolConfig::new(create).max_count(max_count).build()
    }

    pub(crate) fn from_internal(inner: PoolInternal<C, E>) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Acquire a live resource, blocking the current thread while the pool is
    /// at capacity and no resource is idle.
    ///
    /// Resources whose liveness signal is done are closed and replaced
    /// without being returned. Constructor errors are returned as
    /// `AcquireError::ResourceError` and are not retried.
    pub fn acquire(&self) -> Result<Poolable<C>, AcquireError<E>> {
        let mut suspend = Suspend::new();
        loop {
            match self.inner.try_next()? {
                Some(res) => {
                    if let Some(res) = self.inner.check_live(res) {
                        return Ok(res);
                    }
                }
                None => self.inner.wait(&mut suspend),
            }
        }
    }

    /// Acquire a resource wrapped in a guard which returns it to the pool
    /// when dropped.
    pub fn acquire_managed(&self) -> Result<Managed<C, E>, AcquireError<E>> {
        self.acquire().map(|res| Managed::new(res, self.clone()))
    }

    /// Acquire a live resource without blocking. Returns `Ok(None)` when the
    /// pool is at capacity and no resource is idle.
    pub fn try_acquire(&self) -> Result<Option<Poolable<C>>, AcquireError<E>> {
        loop {
            match self.inner.try_next()? {
                Some(res) => {
                    if let Some(res) = self.inner.check_live(res) {
                        return Ok(Some(res));
                    }
                }
                None => return Ok(None),
            }
        }
    }

    /// Close a resource instead of returning it to the pool, freeing its
    /// slot for a replacement.
    ///
    /// The slot is freed even when closing the underlying handle fails; the
    /// close error is then returned.
    pub fn close(&self, res: Poolable<C>) -> Result<(), C::Error> {
        let (conn, _) = res.into_inner();
        let result = conn.close();
        self.inner.discard();
        result
    }

    /// Fetch the number of constructed resources which have not been closed,
    /// whether idle or checked out.
    pub fn count(&self) -> usize {
        self.inner.state.lock().active
    }

    /// Fetch the number of idle resources.
    pub fn idle_count(&self) -> usize {
        self.inner.idle.len()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    pub fn max_count(&self) -> usize {
        self.inner.max_count
    }

    /// Return a resource to the pool, making it available to the next
    /// acquire.
    ///
    /// Once the pool is released this fails and hands the resource back,
    /// which remains valid and should be closed by the caller.
    pub fn regain(&self, res: Poolable<C>) -> Result<(), PoolClosed<Poolable<C>>> {
        match self.inner.idle.push(res) {
            Ok(()) => {
                self.inner.wait.wake_all();
                Ok(())
            }
            Err(PushError::Closed(res)) => Err(PoolClosed(res)),
            Err(PushError::Full(res)) => {
                // More resources were returned than this pool ever created
                tracing::warn!(
                    max = self.inner.max_count,
                    "resource returned to a full pool, closing it"
                );
                close_quiet(res);
                Ok(())
            }
        }
    }

    /// Shut down the pool, closing every idle resource.
    ///
    /// Resources currently checked out are not reclaimed: returning one with
    /// `regain` will fail with `PoolClosed`, while `close` still succeeds.
    /// Blocked acquirers are woken and fail with `AcquireError::PoolClosed`.
    pub fn release(&self) -> Result<(), PoolClosed> {
        let mut state = self.inner.state.lock();
        if state.closed {
            return Err(PoolClosed(()));
        }
        self.inner.idle.close();
        let mut drained: usize = 0;
        while let Ok(res) = self.inner.idle.pop() {
            state.active -= 1;
            drained += 1;
            close_quiet(res);
        }
        state.closed = true;
        tracing::debug!(
            drained,
            outstanding = state.active,
            "pool released"
        );
        drop(state);
        self.inner.wait.wake_all();
        Ok(())
    }
}

impl<C: Close, E> Clone for Pool<C, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C: Close, E> Debug for Pool<C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("count", &self.count())
            .field("idle", &self.idle_count())
            .field("max_count", &self.max_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}
