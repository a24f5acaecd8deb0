use crate::red_black_tree::tree;
use std::mem;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// An enum representing which child of a node is being referred to. Every rotation and fixup case
/// is written once in terms of a `Side` and its opposite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing an internal node of a red black tree.
#[derive(Clone)]
pub struct Node<T> {
    pub value: T,
    pub color: Color,
    pub size: usize,
    pub left: tree::Tree<T>,
    pub right: tree::Tree<T>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Node {
            value,
            color: Color::Red,
            size: 1,
            left: None,
            right: None,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    pub fn child(&self, side: Side) -> &tree::Tree<T> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut tree::Tree<T> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn update(&mut self) {
        self.size = 1 + tree::size(&self.left) + tree::size(&self.right);
    }

    // Rotates towards `side`: the child on the opposite side takes this node's place, and this
    // node becomes its child on `side`. Colors are left to the caller.
    pub fn rotate(&mut self, side: Side) {
        let other = side.opposite();
        let mut child = self
            .child_mut(other)
            .take()
            .expect("Expected child node to be `Some`.");
        *self.child_mut(other) = child.child_mut(side).take();
        mem::swap(&mut *child, self);
        child.update();
        *self.child_mut(side) = Some(child);
        self.update();
    }
}
