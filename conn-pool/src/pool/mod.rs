mod acquire;

mod config;
pub use config::PoolConfig;

mod error;
pub use error::{AcquireError, BuildError, ConfigError, PoolClosed};

mod pool;
pub use pool::Pool;

mod wait;
