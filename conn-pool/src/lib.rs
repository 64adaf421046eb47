//! A bounded, blocking pool of closable resources such as network
//! connections.
//!
//! At most `max_count` resources are alive at once. Acquirers park their
//! thread while the pool is saturated, resources whose [`Liveness`] signal is
//! done are replaced transparently, and [`Pool::release`] closes everything
//! idle exactly once.
//!
//! ```
//! use conn_pool::{Close, Pool, Poolable};
//!
//! struct Conn(usize);
//!
//! impl Close for Conn {
//!     type Error = ();
//!
//!     fn close(self) -> Result<(), ()> {
//!         Ok(())
//!     }
//! }
//!
//! let pool = Pool::<Conn, ()>::new(2, || Ok(Poolable::from(Conn(1)))).unwrap();
//! let conn = pool.acquire().unwrap();
//! assert_eq!(conn.0, 1);
//! pool.regain(conn).unwrap();
//! pool.release().unwrap();
//! assert!(pool.acquire().is_err());
//! ```

mod pool;
pub use self::pool::{AcquireError, BuildError, ConfigError, Pool, PoolClosed, PoolConfig};

mod resource;
pub use self::resource::{Close, Liveness, Managed, Poolable};
