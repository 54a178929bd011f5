use crate::arena::Handle;
use std::collections::TryReserveError;
use std::error;
use std::fmt;
use std::result;

/// A broken red-black or ordering property found by `RedBlackSet::validate`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    /// The sentinel is not black or has a real child.
    Sentinel,
    /// The root is red or its parent link is not the sentinel.
    Root,
    /// A red node has a red child.
    RedRed(Handle),
    /// The two subtrees of a node have different black-heights.
    BlackHeight(Handle),
    /// A child does not point back at its parent.
    ParentLink(Handle),
    /// A node's key is not strictly greater than its in-order predecessor.
    Order(Handle),
    /// The size counter disagrees with the number of reachable nodes.
    Size { expected: usize, actual: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Sentinel => write!(f, "sentinel is not a black leaf"),
            Violation::Root => write!(f, "root is red or has a parent"),
            Violation::RedRed(handle) => write!(f, "red node {} has a red child", handle.index()),
            Violation::BlackHeight(handle) => {
                write!(f, "unequal black-heights below node {}", handle.index())
            },
            Violation::ParentLink(handle) => {
                write!(f, "node {} does not link back to its parent", handle.index())
            },
            Violation::Order(handle) => write!(f, "node {} is out of order", handle.index()),
            Violation::Size { expected, actual } => {
                write!(f, "size is {} but {} nodes are reachable", expected, actual)
            },
        }
    }
}

/// An enum representing the failures of fallible set operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The node pool could not grow. The set is left exactly as it was.
    AllocationFailed(TryReserveError),
    /// A cursor at the end position was dereferenced.
    EndDereference,
    /// The tree no longer satisfies its invariants.
    Corrupted(Violation),
}

impl From<TryReserveError> for Error {
    fn from(err: TryReserveError) -> Error {
        Error::AllocationFailed(err)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::AllocationFailed(error) => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed(error) => write!(f, "node allocation failed: {}", error),
            Error::EndDereference => write!(f, "attempted to dereference the end cursor"),
            Error::Corrupted(violation) => write!(f, "corrupted tree: {}", violation),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// The failure of a fallible insert. It carries the key that could not be inserted back to the
/// caller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InsertError<T> {
    error: Error,
    key: T,
}

impl<T> InsertError<T> {
    pub(crate) fn new(error: Error, key: T) -> Self {
        InsertError { error, key }
    }

    /// Returns the reason the insert failed.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Returns the rejected key.
    pub fn into_key(self) -> T {
        self.key
    }
}

impl<T> error::Error for InsertError<T>
where
    T: fmt::Debug,
{
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<T> fmt::Display for InsertError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insert failed: {}", self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, InsertError, Violation};
    use crate::arena::Handle;
    use std::error::Error as StdError;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::EndDereference.to_string(),
            "attempted to dereference the end cursor",
        );
        assert_eq!(
            Error::Corrupted(Violation::Size { expected: 2, actual: 1 }).to_string(),
            "corrupted tree: size is 2 but 1 nodes are reachable",
        );
        assert_eq!(
            Error::Corrupted(Violation::RedRed(Handle::RESERVED)).to_string(),
            "corrupted tree: red node 0 has a red child",
        );
    }

    #[test]
    fn test_source() {
        let err = Vec::<u64>::new().try_reserve(usize::max_value()).unwrap_err();
        let err = Error::from(err);
        assert!(err.source().is_some());
        assert!(Error::EndDereference.source().is_none());
    }

    #[test]
    fn test_insert_error_returns_key() {
        let err = InsertError::new(Error::EndDereference, String::from("key"));
        assert_eq!(err.to_string(), "insert failed: attempted to dereference the end cursor");
        assert_eq!(err.error(), &Error::EndDereference);
        assert!(err.source().is_some());
        assert_eq!(err.into_key(), "key");
    }
}
