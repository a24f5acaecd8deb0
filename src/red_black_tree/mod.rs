//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions. Every node also tracks the size of its
//! subtree, which allows the tree to be indexed by rank.

mod iter;
mod node;
mod rank;
mod set;
mod tree;

pub use self::iter::{RedBlackSetIntoIter, RedBlackSetIter};
pub use self::set::RedBlackSet;
