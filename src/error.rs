use thiserror::Error;

/// Errors returned by [`AvlTree`](crate::AvlTree) operations.
///
/// A key that is simply not present is never an error - lookups that may
/// find nothing return an [`Option`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The rank passed to [`select()`](crate::AvlTree::select) is not in the
    /// range `[0, len)`.
    #[error("rank {rank} is out of bounds for a tree of {len} keys")]
    InvalidArgument {
        /// The requested rank.
        rank: usize,
        /// The number of keys in the tree at the time of the call.
        len: usize,
    },

    /// An operation requiring at least one key was called on an empty tree.
    #[error("{op}() called on an empty tree")]
    EmptyCollection {
        /// The name of the operation that was invoked.
        op: &'static str,
    },
}

/// A [`Result`](std::result::Result) defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
