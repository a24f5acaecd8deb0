use crate::error::InvariantViolation;
use crate::red_black_tree::node::{Color, Node, Side};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn color<T>(tree: &Tree<T>) -> Color {
    match tree {
        None => Color::Black,
        Some(ref node) => node.color,
    }
}

pub fn is_red<T>(tree: &Tree<T>) -> bool {
    color(tree) == Color::Red
}

pub fn size<T>(tree: &Tree<T>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.size,
    }
}

fn set_color<T>(tree: &mut Tree<T>, color: Color) {
    if let Some(ref mut node) = tree {
        node.color = color;
    }
}

// `node` is the grandparent of the insertion path through its child on `side`. If that child and
// one of its children are both red, the violation is resolved here.
fn fix_insert<T>(node: &mut Node<T>, side: Side) {
    let grandchild_side = match node.child(side) {
        Some(child) if child.is_red() => {
            if is_red(&child.left) {
                Side::Left
            } else if is_red(&child.right) {
                Side::Right
            } else {
                return;
            }
        },
        _ => return,
    };

    let other = side.opposite();
    if is_red(node.child(other)) {
        node.color = Color::Red;
        set_color(node.child_mut(side), Color::Black);
        set_color(node.child_mut(other), Color::Black);
        return;
    }

    if grandchild_side != side {
        if let Some(child) = node.child_mut(side) {
            child.rotate(side);
        }
    }
    node.rotate(other);
    node.color = Color::Black;
    set_color(node.child_mut(other), Color::Red);
}

fn insert_rec<T>(tree: &mut Tree<T>, value: T, allow_duplicates: bool) -> bool
where
    T: Ord,
{
    match tree {
        Some(ref mut node) => {
            let side = match value.cmp(&node.value) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal if allow_duplicates => Side::Right,
                Ordering::Equal => return false,
            };
            if !insert_rec(node.child_mut(side), value, allow_duplicates) {
                return false;
            }
            node.size += 1;
            fix_insert(node, side);
            true
        },
        None => {
            *tree = Some(Box::new(Node::new(value)));
            true
        },
    }
}

/// Inserts `value` into the tree. Equal values descend to the right when `allow_duplicates` is
/// set, and are rejected otherwise. Returns `true` if a node was added.
pub fn insert<T>(tree: &mut Tree<T>, value: T, allow_duplicates: bool) -> bool
where
    T: Ord,
{
    let inserted = insert_rec(tree, value, allow_duplicates);
    set_color(tree, Color::Black);
    inserted
}

// Every path through `node`'s child on `side` has one fewer black node than the paths through its
// other child. Returns `true` if the deficiency could not be absorbed and now applies to all of
// `node`'s subtree.
fn fix_remove<T>(node: &mut Node<T>, side: Side) -> bool {
    let other = side.opposite();

    if is_red(node.child(other)) {
        node.rotate(side);
        node.color = Color::Black;
        let lowered = node
            .child_mut(side)
            .as_mut()
            .expect("Expected child node to be `Some`.");
        lowered.color = Color::Red;
        let short = fix_remove(lowered, side);
        debug_assert!(!short);
        return false;
    }

    let color = node.color;
    let sibling = node
        .child_mut(other)
        .as_mut()
        .expect("Expected sibling node to be `Some`.");

    if !is_red(sibling.child(side)) && !is_red(sibling.child(other)) {
        sibling.color = Color::Red;
        node.color = Color::Black;
        return color == Color::Black;
    }

    if !is_red(sibling.child(other)) {
        sibling.rotate(other);
        sibling.color = Color::Black;
        set_color(sibling.child_mut(other), Color::Red);
    }
    node.rotate(side);
    node.color = color;
    set_color(node.child_mut(side), Color::Black);
    set_color(node.child_mut(other), Color::Black);
    false
}

// precondition: the root of the tree has at most one child
fn splice<T>(tree: &mut Tree<T>) -> (T, bool) {
    let mut node = tree.take().expect("Expected a non-empty tree.");
    let mut child = node.left.take().or_else(|| node.right.take());
    let short = match child {
        _ if node.is_red() => false,
        Some(ref mut red_child) if red_child.is_red() => {
            red_child.color = Color::Black;
            false
        },
        _ => true,
    };
    *tree = child;
    (node.value, short)
}

// precondition: there exists a minimum node in the tree
fn remove_min<T>(tree: &mut Tree<T>) -> (T, bool) {
    if let Some(ref mut node) = tree {
        if node.left.is_some() {
            let (value, short) = remove_min(&mut node.left);
            node.size -= 1;
            return (value, short && fix_remove(node, Side::Left));
        }
    }
    splice(tree)
}

/// Steers a removal through the tree. `Less` descends left, `Greater` descends right and `Equal`
/// removes the current node.
trait Seek<T> {
    fn seek(&mut self, node: &Node<T>) -> Ordering;
}

struct ByValue<'a, V: ?Sized>(&'a V);

impl<'a, T, V> Seek<T> for ByValue<'a, V>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn seek(&mut self, node: &Node<T>) -> Ordering {
        self.0.cmp(node.value.borrow())
    }
}

struct ByIndex(usize);

impl<T> Seek<T> for ByIndex {
    fn seek(&mut self, node: &Node<T>) -> Ordering {
        let left = size(&node.left);
        match self.0.cmp(&left) {
            Ordering::Greater => {
                self.0 -= left + 1;
                Ordering::Greater
            },
            ordering => ordering,
        }
    }
}

fn remove_with<T, S>(tree: &mut Tree<T>, seek: &mut S) -> Option<(T, bool)>
where
    S: Seek<T>,
{
    let node = tree.as_mut()?;
    let side = match seek.seek(node) {
        Ordering::Less => Side::Left,
        Ordering::Greater => Side::Right,
        Ordering::Equal => {
            if node.left.is_some() && node.right.is_some() {
                let (successor, short) = remove_min(&mut node.right);
                node.size -= 1;
                let value = mem::replace(&mut node.value, successor);
                return Some((value, short && fix_remove(node, Side::Right)));
            }
            return Some(splice(tree));
        },
    };

    let (value, short) = remove_with(node.child_mut(side), seek)?;
    node.size -= 1;
    Some((value, short && fix_remove(node, side)))
}

fn remove_and_recolor<T, S>(tree: &mut Tree<T>, seek: &mut S) -> Option<T>
where
    S: Seek<T>,
{
    let ret = remove_with(tree, seek).map(|(value, _)| value);
    set_color(tree, Color::Black);
    ret
}

/// Removes the first node equal to `key` met while descending from the root.
pub fn remove<T, V>(tree: &mut Tree<T>, key: &V) -> Option<T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    remove_and_recolor(tree, &mut ByValue(key))
}

/// Removes the node at position `index` in sorted order.
pub fn remove_at<T>(tree: &mut Tree<T>, index: usize) -> Option<T> {
    if index >= size(tree) {
        return None;
    }
    remove_and_recolor(tree, &mut ByIndex(index))
}

pub fn get<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| {
        match key.cmp(node.value.borrow()) {
            Ordering::Less => get(&node.left, key),
            Ordering::Greater => get(&node.right, key),
            Ordering::Equal => Some(&node.value),
        }
    })
}

pub fn ceil<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| {
        match key.cmp(node.value.borrow()) {
            Ordering::Greater => ceil(&node.right, key),
            Ordering::Less => {
                match ceil(&node.left, key) {
                    None => Some(&node.value),
                    res => res,
                }
            },
            Ordering::Equal => Some(&node.value),
        }
    })
}

pub fn floor<'a, T, V>(tree: &'a Tree<T>, key: &V) -> Option<&'a T>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| {
        match key.cmp(node.value.borrow()) {
            Ordering::Less => floor(&node.left, key),
            Ordering::Greater => {
                match floor(&node.right, key) {
                    None => Some(&node.value),
                    res => res,
                }
            },
            Ordering::Equal => Some(&node.value),
        }
    })
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.value
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.value
    })
}

/// Checks every red-black, ordering and size invariant of the tree. Returns the number of black
/// nodes on each path from the root to an empty subtree.
pub fn validate<T>(tree: &Tree<T>) -> Result<usize, InvariantViolation>
where
    T: Ord,
{
    if is_red(tree) {
        return Err(InvariantViolation::RedRoot);
    }
    validate_subtree(tree, None, None)
}

fn validate_subtree<'a, T>(
    tree: &'a Tree<T>,
    lower: Option<&'a T>,
    upper: Option<&'a T>,
) -> Result<usize, InvariantViolation>
where
    T: Ord,
{
    let node = match tree {
        None => return Ok(0),
        Some(node) => node,
    };

    let below_lower = lower.map_or(false, |lower| node.value < *lower);
    let above_upper = upper.map_or(false, |upper| node.value > *upper);
    if below_lower || above_upper {
        return Err(InvariantViolation::OutOfOrder);
    }

    if node.is_red() && (is_red(&node.left) || is_red(&node.right)) {
        return Err(InvariantViolation::ConsecutiveReds);
    }

    let left = validate_subtree(&node.left, lower, Some(&node.value))?;
    let right = validate_subtree(&node.right, Some(&node.value), upper)?;
    if left != right {
        return Err(InvariantViolation::UnbalancedBlacks { left, right });
    }

    let expected = 1 + size(&node.left) + size(&node.right);
    if node.size != expected {
        return Err(InvariantViolation::SizeMismatch {
            expected,
            actual: node.size,
        });
    }

    match node.color {
        Color::Red => Ok(left),
        Color::Black => Ok(left + 1),
    }
}
