use super::error::{BuildError, ConfigError};
use super::pool::{CreateFn, Pool, PoolInternal};
use crate::resource::{Close, Poolable};

pub struct PoolConfig<C, E> {
    create: CreateFn<C, E>,
    eager: bool,
    max_count: usize,
}

impl<C: Close, E> PoolConfig<C, E> {
    pub fn new<F>(create: F) -> Self
    where
        F: Fn() -> Result<Poolable<C>, E> + Send + Sync + 'static,
    {
        Self {
            create: Box::new(create),
            eager: true,
            max_count: 0,
        }
    }

    /// Whether to construct every resource up front when the pool is built
    /// (the default), or only as acquirers need them.
    pub fn eager(mut self, val: bool) -> Self {
        self.eager = val;
        self
    }

    pub fn max_count(mut self, val: usize) -> Self {
        self.max_count = val;
        self
    }

    pub fn build(self) -> Result<Pool<C, E>, BuildError<E>> {
        if self.max_count == 0 {
            return Err(ConfigError("max_count must be greater than zero".to_string()).into());
        }
        let inner = PoolInternal::new(self.create, self.max_count);
        if self.eager {
            inner.fill().map_err(BuildError::ResourceError)?;
        }
        Ok(Pool::from_internal(inner))
    }
}
