use std::error;
use std::fmt;
use std::result;

/// Errors returned by index-based operations on a `RedBlackSet<T>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The index was not in `[0, len)`.
    OutOfRange { index: usize, len: usize },
    /// The start of an index range was past its end.
    InvalidRange { start: usize, end: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { index, len } => write!(
                f,
                "index out of range: the len is {} but the index is {}",
                len, index,
            ),
            Error::InvalidRange { start, end } => write!(
                f,
                "invalid range: the start is {} but the end is {}",
                start, end,
            ),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// A broken red-black or size invariant reported by `RedBlackSet::validate`.
///
/// None of the public operations should ever leave a tree in a state that produces one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The root node is red.
    RedRoot,
    /// A red node has a red child.
    ConsecutiveReds,
    /// The two subtrees of a node contain a different number of black nodes on their paths.
    UnbalancedBlacks { left: usize, right: usize },
    /// A node's size is not one more than the sum of its children's sizes.
    SizeMismatch { expected: usize, actual: usize },
    /// A value is on the wrong side of one of its ancestors.
    OutOfOrder,
}

impl error::Error for InvariantViolation {}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::RedRoot => write!(f, "root node is red"),
            InvariantViolation::ConsecutiveReds => write!(f, "red node has a red child"),
            InvariantViolation::UnbalancedBlacks { left, right } => write!(
                f,
                "unbalanced black height: left is {} and right is {}",
                left, right,
            ),
            InvariantViolation::SizeMismatch { expected, actual } => write!(
                f,
                "size mismatch: expected {} but node stores {}",
                expected, actual,
            ),
            InvariantViolation::OutOfOrder => write!(f, "values are out of order"),
        }
    }
}
