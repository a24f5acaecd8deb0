//! Ordered collections augmented with subtree sizes, so that elements can be fetched and removed
//! by their position in sorted order in `O(log N)` time.

mod error;
pub mod red_black_tree;

pub use crate::error::{Error, InvariantViolation, Result};
