use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Deref, DerefMut};

use super::{Close, Liveness, Poolable};
use crate::pool::{Pool, PoolClosed};

/// A guard around an acquired resource which returns it to the pool when
/// dropped.
///
/// If the pool has been released in the meantime, the resource is closed
/// instead.
pub struct Managed<C: Close, E> {
    pool: Option<Pool<C, E>>,
    value: Option<Poolable<C>>,
}

impl<C: Close, E> Managed<C, E> {
    pub(crate) fn new(value: Poolable<C>, pool: Pool<C, E>) -> Self {
        Self {
            pool: Some(pool),
            value: Some(value),
        }
    }

    /// Close the resource instead of returning it to the pool.
    pub fn discard(mut mng_self: Self) -> Result<(), C::Error> {
        match (mng_self.pool.take(), mng_self.value.take()) {
            (Some(pool), Some(value)) => pool.close(value),
            _ => Ok(()),
        }
    }

    /// Detach the resource from the guard. The caller becomes responsible
    /// for passing it to `Pool::regain` or `Pool::close`.
    pub fn into_inner(mut mng_self: Self) -> Poolable<C> {
        mng_self.pool.take();
        // note: the value is only taken by consuming methods
        mng_self.value.take().unwrap()
    }

    pub fn liveness(mng_self: &Self) -> &Liveness {
        mng_self.value.as_ref().unwrap().liveness()
    }
}

impl<C: Close + Debug, E> Debug for Managed<C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("ManagedResource")
                .field("value", &self.deref())
                .finish()
        } else {
            Debug::fmt(self.deref(), f)
        }
    }
}

impl<C: Close + Display, E> Display for Managed<C, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.deref(), f)
    }
}

impl<C: Close, E> Deref for Managed<C, E> {
    type Target = C;
    fn deref(&self) -> &Self::Target {
        // note: panics after drop when value is taken
        self.value.as_ref().unwrap()
    }
}

impl<C: Close, E> DerefMut for Managed<C, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // note: panics after drop when value is taken
        self.value.as_mut().unwrap()
    }
}

impl<C: Close, E> Drop for Managed<C, E> {
    fn drop(&mut self) {
        if let (Some(pool), Some(value)) = (self.pool.take(), self.value.take()) {
            if let Err(PoolClosed(value)) = pool.regain(value) {
                if pool.close(value).is_err() {
                    tracing::debug!("error closing resource returned after release");
                }
            }
        }
    }
}
