use crate::red_black_tree::tree::{self, Tree};
use std::borrow::Borrow;
use std::cmp::Ordering;

pub fn len<T>(tree: &Tree<T>) -> usize {
    tree::size(tree)
}

/// Returns the value at position `index` in sorted order, or `None` if `index` is not less than
/// the size of the tree.
pub fn select<T>(tree: &Tree<T>, index: usize) -> Option<&T> {
    tree.as_ref().and_then(|node| {
        let left = tree::size(&node.left);
        match index.cmp(&left) {
            Ordering::Less => select(&node.left, index),
            Ordering::Greater => select(&node.right, index - left - 1),
            Ordering::Equal => Some(&node.value),
        }
    })
}

/// Returns the position in sorted order of the first value equal to `key`.
///
/// Equal values can end up on either side of one another after rotations, so the descent keeps
/// going left after a match and reports the leftmost one.
pub fn rank<T, V>(tree: &Tree<T>, key: &V) -> Option<usize>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    let mut preceding = 0;
    let mut ret = None;
    while let Some(node) = curr {
        match key.cmp(node.value.borrow()) {
            Ordering::Less => curr = &node.left,
            Ordering::Equal => {
                ret = Some(preceding + tree::size(&node.left));
                curr = &node.left;
            },
            Ordering::Greater => {
                preceding += tree::size(&node.left) + 1;
                curr = &node.right;
            },
        }
    }
    ret
}
