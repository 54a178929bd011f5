//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Nodes are kept in a `TypedArena` and refer to each other by handle. A single black sentinel,
//! the arena's reserved slot, stands in for every empty child and for the parent of the root.

mod compare;
mod cursor;
mod node;
mod set;
mod tree;

pub use self::compare::{Compare, Greater, Less};
pub use self::cursor::{Cursor, RedBlackSetIter};
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, DEFAULT_CHUNK_SIZE};
