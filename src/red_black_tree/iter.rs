use crate::red_black_tree::node::Node;
use crate::red_black_tree::tree::{self, Tree};
use std::cmp::Ordering;
use std::iter::FusedIterator;

/// An iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references. It
/// can be driven from both ends, so `iter().rev()` yields the elements in descending order. Each
/// end keeps an explicit stack of at most one node per level of the tree.
pub struct RedBlackSetIter<'a, T>
where
    T: 'a,
{
    front: Vec<&'a Node<T>>,
    back: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> RedBlackSetIter<'a, T>
where
    T: 'a,
{
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        let mut iter = RedBlackSetIter {
            front: Vec::new(),
            back: Vec::new(),
            remaining: tree::size(tree),
        };
        iter.push_left_spine(tree);
        iter.push_right_spine(tree);
        iter
    }

    // Yields the values at positions `start..end`. The caller checks that `start <= end <= len`.
    pub(crate) fn with_range(tree: &'a Tree<T>, start: usize, end: usize) -> Self {
        let mut iter = RedBlackSetIter {
            front: Vec::new(),
            back: Vec::new(),
            remaining: end - start,
        };
        if start < end {
            iter.seek_front(tree, start);
            iter.seek_back(tree, end - 1);
        }
        iter
    }

    // Leaves the node at `index` on top of the front stack, above every ancestor that follows it.
    fn seek_front(&mut self, mut curr: &'a Tree<T>, mut index: usize) {
        while let Some(node) = curr {
            let left = tree::size(&node.left);
            match index.cmp(&left) {
                Ordering::Less => {
                    self.front.push(node);
                    curr = &node.left;
                },
                Ordering::Equal => {
                    self.front.push(node);
                    return;
                },
                Ordering::Greater => {
                    index -= left + 1;
                    curr = &node.right;
                },
            }
        }
    }

    fn seek_back(&mut self, mut curr: &'a Tree<T>, mut index: usize) {
        while let Some(node) = curr {
            let left = tree::size(&node.left);
            match index.cmp(&left) {
                Ordering::Less => curr = &node.left,
                Ordering::Equal => {
                    self.back.push(node);
                    return;
                },
                Ordering::Greater => {
                    self.back.push(node);
                    index -= left + 1;
                    curr = &node.right;
                },
            }
        }
    }

    fn push_left_spine(&mut self, mut curr: &'a Tree<T>) {
        while let Some(node) = curr {
            self.front.push(node);
            curr = &node.left;
        }
    }

    fn push_right_spine(&mut self, mut curr: &'a Tree<T>) {
        while let Some(node) = curr {
            self.back.push(node);
            curr = &node.right;
        }
    }
}

impl<'a, T> Iterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.front.pop().map(|node| {
            self.push_left_spine(&node.right);
            self.remaining -= 1;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.back.pop().map(|node| {
            self.push_right_spine(&node.left);
            self.remaining -= 1;
            &node.value
        })
    }
}

impl<'a, T> ExactSizeIterator for RedBlackSetIter<'a, T> where T: 'a {}

impl<'a, T> FusedIterator for RedBlackSetIter<'a, T> where T: 'a {}

impl<'a, T> Clone for RedBlackSetIter<'a, T>
where
    T: 'a,
{
    fn clone(&self) -> Self {
        RedBlackSetIter {
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

/// An owning iterator for `RedBlackSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned values.
pub struct RedBlackSetIntoIter<T> {
    current: Tree<T>,
    stack: Vec<Node<T>>,
    remaining: usize,
}

impl<T> RedBlackSetIntoIter<T> {
    pub(crate) fn new(tree: Tree<T>) -> Self {
        RedBlackSetIntoIter {
            remaining: tree::size(&tree),
            current: tree,
            stack: Vec::new(),
        }
    }
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { value, right, .. } = node;
            self.current = right;
            self.remaining -= 1;
            value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for RedBlackSetIntoIter<T> {}

impl<T> FusedIterator for RedBlackSetIntoIter<T> {}
