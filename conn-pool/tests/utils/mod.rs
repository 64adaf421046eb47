use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use conn_pool::{Close, Liveness, PoolConfig, Poolable};

#[derive(Debug)]
pub struct AtomicCounter {
    count: AtomicUsize,
}

#[allow(unused)]
impl AtomicCounter {
    pub fn new(val: usize) -> Self {
        Self {
            count: AtomicUsize::new(val),
        }
    }

    pub fn increment(&self) -> usize {
        self.count.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn decrement(&self) -> usize {
        self.count.fetch_sub(1, Ordering::SeqCst) - 1
    }

    pub fn value(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}

impl Default for AtomicCounter {
    fn default() -> Self {
        Self::new(0)
    }
}

/// A connection stand-in which records when it is closed.
#[derive(Debug)]
pub struct TestConn {
    pub id: usize,
    pub fail_close: bool,
    closed: Arc<AtomicCounter>,
}

impl Close for TestConn {
    type Error = &'static str;

    fn close(self) -> Result<(), Self::Error> {
        self.closed.increment();
        if self.fail_close {
            Err("close failed")
        } else {
            Ok(())
        }
    }
}

/// Tracks created and closed connections for a test pool.
#[derive(Clone, Default)]
pub struct Tracker {
    pub created: Arc<AtomicCounter>,
    pub closed: Arc<AtomicCounter>,
}

#[allow(unused)]
impl Tracker {
    pub fn conn(&self) -> TestConn {
        TestConn {
            id: self.created.increment(),
            fail_close: false,
            closed: self.closed.clone(),
        }
    }

    pub fn live(&self) -> usize {
        self.created.value() - self.closed.value()
    }

    pub fn config(&self) -> PoolConfig<TestConn, &'static str> {
        let tracker = self.clone();
        PoolConfig::new(move || Ok(Poolable::new(tracker.conn(), Liveness::new())))
    }
}

#[allow(unused)]
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init()
        .unwrap_or(());
}
