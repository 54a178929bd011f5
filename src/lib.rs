//! An ordered set backed by a red black tree whose nodes live in an arena.
//!
//! # Examples
//!
//! ```
//! use red_black_set::red_black_tree::RedBlackSet;
//!
//! let mut set: RedBlackSet<u32> = (1..=10).collect();
//! assert_eq!(set.len(), 10);
//! assert_eq!(set.erase(&5), 1);
//! assert!(set.validate().is_ok());
//! ```

pub mod arena;
mod error;
pub mod red_black_tree;

pub use crate::error::{Error, InsertError, Result, Violation};
