use std::fmt::{self, Debug, Display, Formatter};

/// An error during resource acquisition.
pub enum AcquireError<E> {
    /// The resource pool is closed
    PoolClosed,
    /// Wraps an error result from the pool's constructor
    ResourceError(E),
}

impl<E: Debug> Debug for AcquireError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self {
            Self::PoolClosed => write!(f, "AcquireError::PoolClosed"),
            Self::ResourceError(err) => f
                .debug_tuple("AcquireError::ResourceError")
                .field(err)
                .finish(),
        }
    }
}

impl<E: Display> Display for AcquireError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self {
            Self::PoolClosed => write!(f, "The resource pool is closed"),
            Self::ResourceError(err) => write!(f, "Resource error: {}", err),
        }
    }
}

impl<E: Debug + Display> std::error::Error for AcquireError<E> {}

/// An error while building a pool.
pub enum BuildError<E> {
    /// The pool configuration is invalid
    Config(ConfigError),
    /// Wraps an error result from the constructor while filling the pool
    ResourceError(E),
}

impl<E: Debug> Debug for BuildError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self {
            Self::Config(err) => f.debug_tuple("BuildError::Config").field(err).finish(),
            Self::ResourceError(err) => f
                .debug_tuple("BuildError::ResourceError")
                .field(err)
                .finish(),
        }
    }
}

impl<E: Display> Display for BuildError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self {
            Self::Config(err) => Display::fmt(err, f),
            Self::ResourceError(err) => write!(f, "Resource error: {}", err),
        }
    }
}

impl<E: Debug + Display> std::error::Error for BuildError<E> {}

impl<E> From<ConfigError> for BuildError<E> {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// A configuration error.
#[derive(Debug)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Config error: {}", &self.0)
    }
}

impl std::error::Error for ConfigError {}

/// The pool has been released. Carries back the value which could not be
/// accepted, if any.
pub struct PoolClosed<T = ()>(pub T);

impl<T> PoolClosed<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Debug for PoolClosed<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "PoolClosed(..)")
    }
}

impl<T> Display for PoolClosed<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "The resource pool is closed")
    }
}

impl<T> std::error::Error for PoolClosed<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            AcquireError::<String>::PoolClosed.to_string(),
            "The resource pool is closed"
        );
        assert_eq!(
            AcquireError::ResourceError("refused").to_string(),
            "Resource error: refused"
        );
        assert_eq!(
            BuildError::<String>::from(ConfigError("bad".into()))
                .to_string()
                .as_str(),
            "Config error: bad"
        );
        assert_eq!(PoolClosed(5).to_string(), "The resource pool is closed");
        assert_eq!(PoolClosed(5).into_inner(), 5);
    }

    #[test]
    fn error_debug() {
        assert_eq!(
            format!("{:?}", AcquireError::ResourceError(1)),
            "AcquireError::ResourceError(1)"
        );
        assert_eq!(format!("{:?}", PoolClosed(())), "PoolClosed(..)");
    }
}
