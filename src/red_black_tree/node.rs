use crate::arena::Handle;

/// A reference to a node of the tree, or to the sentinel.
pub type NodeRef = Handle;

/// The sentinel: the shared black leaf below every node and the parent of the root.
pub const NIL: NodeRef = Handle::RESERVED;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// An enum representing which child of its parent a node is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
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

/// The structural part of a node, shared by real nodes and the sentinel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Links {
    pub color: Color,
    pub parent: NodeRef,
    pub left: NodeRef,
    pub right: NodeRef,
}

impl Links {
    pub fn sentinel() -> Self {
        Links {
            color: Color::Black,
            parent: NIL,
            left: NIL,
            right: NIL,
        }
    }

    pub fn child(&self, side: Side) -> NodeRef {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut NodeRef {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A struct representing an internal node of a red black tree.
#[derive(Clone)]
pub struct Node<T> {
    pub key: T,
    pub links: Links,
}

impl<T> Node<T> {
    /// New nodes are red leaves.
    pub fn new(key: T, parent: NodeRef) -> Self {
        Node {
            key,
            links: Links {
                color: Color::Red,
                parent,
                left: NIL,
                right: NIL,
            },
        }
    }
}
