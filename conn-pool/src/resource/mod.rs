use std::fmt::{self, Debug, Formatter};
use std::ops::{Deref, DerefMut};

mod liveness;
pub use liveness::Liveness;

mod managed;
pub use managed::Managed;

/// A resource handle which must be closed exactly once when it is discarded.
pub trait Close {
    type Error;

    fn close(self) -> Result<(), Self::Error>;
}

/// A resource handle paired with its liveness signal, as produced by a pool's
/// constructor and handed out by `Pool::acquire`.
pub struct Poolable<C> {
    conn: C,
    liveness: Liveness,
}

impl<C> Poolable<C> {
    pub fn new(conn: C, liveness: Liveness) -> Self {
        Self { conn, liveness }
    }

    pub fn liveness(&self) -> &Liveness {
        &self.liveness
    }

    pub fn is_done(&self) -> bool {
        self.liveness.is_done()
    }

    pub fn into_inner(self) -> (C, Liveness) {
        (self.conn, self.liveness)
    }
}

impl<C> From<C> for Poolable<C> {
    fn from(conn: C) -> Self {
        Self::new(conn, Liveness::forever())
    }
}

impl<C: Debug> Debug for Poolable<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poolable")
            .field("conn", &self.conn)
            .field("liveness", &self.liveness)
            .finish()
    }
}

impl<C> Deref for Poolable<C> {
    type Target = C;
    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl<C> DerefMut for Poolable<C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
