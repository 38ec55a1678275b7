//! An ordered symbol table backed by a height-balanced (AVL) binary search
//! tree, augmented with subtree sizes for logarithmic order-statistic queries.
//!
//! ```
//! use rankavl::AvlTree;
//!
//! let mut t = AvlTree::new();
//! for k in [5, 3, 8, 1, 4, 7, 9] {
//!     t.insert(k, k * 10);
//! }
//!
//! assert_eq!(t.get(&4), Some(&40));
//!
//! // Order statistics
//! assert_eq!(t.select(0), Ok(&1));
//! assert_eq!(t.rank(&5), Ok(3));
//! assert_eq!(t.floor(&6), Ok(Some(&5)));
//! assert_eq!(t.ceiling(&6), Ok(Some(&7)));
//!
//! // Putting `None` removes the key.
//! t.put(4, None);
//! assert!(!t.contains_key(&4));
//!
//! assert_eq!(t.keys().copied().collect::<Vec<_>>(), [1, 3, 5, 7, 8, 9]);
//! ```
//!
//! Structural events (rotations, node insertion and removal) are emitted as
//! `trace` records through the [`log`] facade.

#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(missing_debug_implementations)]

mod error;
mod iter;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use error::*;
pub use iter::{IntoIter, Iter};
pub use tree::*;
