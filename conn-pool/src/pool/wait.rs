use std::fmt::{self, Debug, Formatter};

use concurrent_queue::ConcurrentQueue;
use suspend::Notifier;

/// Tracks parked acquirers along with the saturating notice channel.
///
/// A notice means a slot may have been freed. At most one notice is kept
/// pending: any waiter which consumes it re-runs the acquire protocol, and
/// surplus waiters simply park again.
pub(crate) struct WaitQueue {
    notice: ConcurrentQueue<()>,
    waiters: ConcurrentQueue<Notifier>,
}

impl WaitQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            notice: ConcurrentQueue::bounded(capacity),
            waiters: ConcurrentQueue::unbounded(),
        }
    }

    /// Post a notice unless one is already pending. Must be called with the
    /// pool state locked.
    pub fn notice(&self) {
        if self.notice.is_empty() {
            // Full only when racing another notice, which is equivalent
            self.notice.push(()).unwrap_or(());
        }
    }

    /// Register a parked acquirer. It is woken by the next call to
    /// `wake_all`, after which it must register again.
    pub fn register(&self, notifier: Notifier) {
        // The waiter queue is never closed
        self.waiters.push(notifier).unwrap_or(());
    }

    pub fn take_notice(&self) -> bool {
        self.notice.pop().is_ok()
    }

    pub fn wake_all(&self) {
        while let Ok(waiter) = self.waiters.pop() {
            waiter.notify();
        }
    }
}

impl Debug for WaitQueue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitQueue")
            .field("notice", &self.notice.len())
            .field("waiters", &self.waiters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suspend::Suspend;

    #[test]
    fn notice_saturates() {
        let queue = WaitQueue::new(4);
        queue.notice();
        queue.notice();
        assert_eq!(queue.notice.len(), 1);
        assert!(queue.take_notice());
        assert!(!queue.take_notice());
    }

    #[test]
    fn wake_registered() {
        let queue = WaitQueue::new(1);
        let mut suspend = Suspend::new();
        let notifier = suspend.notifier();
        let mut listener = suspend.listen();
        queue.register(notifier);
        queue.wake_all();
        // returns immediately, the notification was already delivered
        listener.wait();
    }
}
