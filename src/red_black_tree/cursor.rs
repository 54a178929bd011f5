use crate::error::{Error, Result};
use crate::red_black_tree::node::{NodeRef, NIL};
use crate::red_black_tree::tree::Tree;
use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

/// A position in the sorted sequence of a `RedBlackSet<T, C>`.
///
/// A cursor either points at a key or at the end position, one past the largest key. Two
/// cursors are equal when they point at the same node of the same set. A cursor borrows the set,
/// so the set cannot be mutated while the cursor is alive.
pub struct Cursor<'a, T> {
    tree: &'a Tree<T>,
    node: NodeRef,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, node: NodeRef) -> Self {
        Cursor { tree, node }
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.node == NIL
    }

    /// Returns the key at the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        self.tree.key(self.node)
    }

    /// Returns the key at the cursor.
    ///
    /// # Errors
    ///
    /// Returns `Error::EndDereference` if the cursor is at the end position.
    pub fn key(&self) -> Result<&'a T> {
        self.get().ok_or(Error::EndDereference)
    }

    /// Moves the cursor to the next larger key, or to the end position after the largest key.
    /// The end position does not move.
    pub fn move_next(&mut self) {
        if self.node != NIL {
            self.node = self.tree.successor(self.node);
        }
    }

    /// Moves the cursor to the next smaller key. From the end position it moves to the largest
    /// key, and from the smallest key it moves to the end position.
    pub fn move_prev(&mut self) {
        self.node = if self.node == NIL {
            self.tree.maximum(self.tree.root())
        } else {
            self.tree.predecessor(self.node)
        };
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> fmt::Debug for Cursor<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// An iterator for `RedBlackSet<T, C>`.
///
/// This iterator walks the tree in-order through successor links and yields immutable
/// references.
pub struct RedBlackSetIter<'a, T> {
    front: Cursor<'a, T>,
    back: Cursor<'a, T>,
    remaining: usize,
}

impl<'a, T> RedBlackSetIter<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        RedBlackSetIter {
            front: Cursor::new(tree, tree.minimum(tree.root())),
            back: Cursor::new(tree, tree.maximum(tree.root())),
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Clone for RedBlackSetIter<'a, T> {
    fn clone(&self) -> Self {
        RedBlackSetIter {
            front: self.front,
            back: self.back,
            remaining: self.remaining,
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
        let ret = self.front.get();
        self.front.move_next();
        self.remaining -= 1;
        ret
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
        let ret = self.back.get();
        self.back.move_prev();
        self.remaining -= 1;
        ret
    }
}

impl<'a, T> ExactSizeIterator for RedBlackSetIter<'a, T> where T: 'a {}

impl<'a, T> FusedIterator for RedBlackSetIter<'a, T> where T: 'a {}

#[cfg(test)]
mod tests {
    use super::{Cursor, RedBlackSetIter};
    use crate::error::Error;
    use crate::red_black_tree::compare::Less;
    use crate::red_black_tree::node::NIL;
    use crate::red_black_tree::tree::Tree;

    fn tree_of(keys: &[u32]) -> Tree<u32> {
        let mut tree = Tree::new(16);
        for &key in keys {
            tree.insert(key, &Less);
        }
        tree
    }

    #[test]
    fn test_end_dereference() {
        let tree = tree_of(&[1]);
        let cursor = Cursor::new(&tree, NIL);
        assert!(cursor.is_end());
        assert_eq!(cursor.get(), None);
        assert_eq!(cursor.key(), Err(Error::EndDereference));
    }

    #[test]
    fn test_move_next_walks_in_order() {
        let tree = tree_of(&[5, 3, 8, 1, 4, 7, 9]);
        let mut cursor = Cursor::new(&tree, tree.minimum(tree.root()));
        let mut keys = Vec::new();
        while !cursor.is_end() {
            keys.push(*cursor.key().unwrap());
            cursor.move_next();
        }
        assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);

        cursor.move_next();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_move_prev_from_end() {
        let tree = tree_of(&[2, 1, 3]);
        let mut cursor = Cursor::new(&tree, NIL);
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&3));
        cursor.move_prev();
        cursor.move_prev();
        assert_eq!(cursor.get(), Some(&1));
        cursor.move_prev();
        assert!(cursor.is_end());
    }

    #[test]
    fn test_cursor_equality() {
        let tree = tree_of(&[1, 2]);
        let other = tree_of(&[1, 2]);
        let one = tree.find(&1, &Less);

        let mut cursor = Cursor::new(&tree, one);
        assert_eq!(cursor, Cursor::new(&tree, one));
        assert_ne!(cursor, Cursor::new(&other, other.find(&1, &Less)));

        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor, Cursor::new(&tree, NIL));
    }

    #[test]
    fn test_iter_both_ends() {
        let tree = tree_of(&[4, 2, 6, 1, 3, 5]);
        let mut iter = RedBlackSetIter::new(&tree);
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.collect::<Vec<&u32>>(), vec![&2, &3, &4]);
    }

    #[test]
    fn test_iter_empty() {
        let tree: Tree<u32> = Tree::new(16);
        let mut iter = RedBlackSetIter::new(&tree);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }
}
