use std::fmt::{self, Debug, Formatter};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::{Duration, Instant};

struct Inner {
    canceled: AtomicBool,
    deadline: Option<Instant>,
}

/// A one-shot cancellation signal attached to each pooled resource.
///
/// Clones share the same state, so a constructor may keep a clone around and
/// cancel the resource later on (for instance when the peer hangs up). The
/// pool checks the signal each time the resource is handed out, and replaces
/// the resource if it is done.
#[derive(Clone, Default)]
pub struct Liveness {
    inner: Option<Arc<Inner>>,
}

impl Liveness {
    /// A cancelable signal with no deadline.
    pub fn new() -> Self {
        Self::from_deadline(None)
    }

    /// A signal which never expires and cannot be canceled.
    pub fn forever() -> Self {
        Self { inner: None }
    }

    /// A cancelable signal which expires at `expire`.
    pub fn deadline(expire: Instant) -> Self {
        Self::from_deadline(Some(expire))
    }

    /// A cancelable signal which expires after `timeout` has elapsed.
    pub fn timeout(timeout: Duration) -> Self {
        Self::from_deadline(Instant::now().checked_add(timeout))
    }

    fn from_deadline(deadline: Option<Instant>) -> Self {
        Self {
            inner: Some(Arc::new(Inner {
                canceled: AtomicBool::new(false),
                deadline,
            })),
        }
    }

    /// Cancel the signal. Returns `true` if this call performed the
    /// cancellation.
    pub fn cancel(&self) -> bool {
        match self.inner.as_ref() {
            Some(inner) => !inner.canceled.swap(true, Ordering::AcqRel),
            None => false,
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.inner
            .as_ref()
            .map(|inner| inner.canceled.load(Ordering::Acquire))
            .unwrap_or(false)
    }

    /// Check whether the signal has been canceled or its deadline has passed.
    /// This never blocks.
    pub fn is_done(&self) -> bool {
        match self.inner.as_ref() {
            Some(inner) => {
                inner.canceled.load(Ordering::Acquire)
                    || inner
                        .deadline
                        .map(|expire| expire <= Instant::now())
                        .unwrap_or(false)
            }
            None => false,
        }
    }
}

impl Debug for Liveness {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let state = match self.inner {
            None => "Forever",
            Some(_) if self.is_canceled() => "Canceled",
            Some(_) if self.is_done() => "Expired",
            Some(_) => "Live",
        };
        write!(f, "Liveness({})", state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn liveness_cancel_shared() {
        let live = Liveness::new();
        let copy = live.clone();
        assert!(!live.is_done());
        assert!(copy.cancel());
        assert!(!live.cancel());
        assert!(live.is_done());
        assert!(live.is_canceled());
        assert_eq!(format!("{:?}", live), "Liveness(Canceled)");
    }

    #[test]
    fn liveness_forever() {
        let live = Liveness::default();
        assert!(!live.cancel());
        assert!(!live.is_done());
        assert_eq!(format!("{:?}", live), "Liveness(Forever)");
    }

    #[test]
    fn liveness_deadline() {
        let expired = Liveness::deadline(Instant::now() - Duration::from_millis(1));
        assert!(expired.is_done());
        assert!(!expired.is_canceled());
        assert_eq!(format!("{:?}", expired), "Liveness(Expired)");

        let live = Liveness::timeout(Duration::from_secs(3600));
        assert!(!live.is_done());
    }
}
