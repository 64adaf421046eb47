use super::error::AcquireError;
use super::pool::{close_quiet, PoolInternal};
use crate::resource::{Close, Poolable};

impl<C: Close, E> PoolInternal<C, E> {
    /// Run one non-blocking pass of the acquire protocol: take an idle
    /// resource, or construct one when below capacity. Returns `Ok(None)`
    /// when the pool is saturated.
    pub fn try_next(&self) -> Result<Option<Poolable<C>>, AcquireError<E>> {
        if self.is_closed() {
            return Err(AcquireError::PoolClosed);
        }

        // Fast path: the idle queue
        if let Ok(res) = self.idle.pop() {
            return Ok(Some(res));
        }

        // Construction happens with the state locked, so `active` never
        // exceeds `max_count`
        let mut state = self.state.lock();
        if state.closed {
            return Err(AcquireError::PoolClosed);
        }
        if state.active < self.max_count {
            let res = (self.create)().map_err(AcquireError::ResourceError)?;
            state.active += 1;
            tracing::trace!(
                active = state.active,
                max = self.max_count,
                "resource created"
            );
            return Ok(Some(res));
        }
        Ok(None)
    }

    /// Check the liveness signal of an acquired resource, closing it and
    /// releasing its slot if it is done.
    pub fn check_live(&self, res: Poolable<C>) -> Option<Poolable<C>> {
        if res.is_done() {
            tracing::debug!("replacing expired resource");
            close_quiet(res);
            self.discard();
            None
        } else {
            Some(res)
        }
    }
}
