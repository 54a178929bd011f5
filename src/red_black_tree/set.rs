use crate::error::{InsertError, Result};
use crate::red_black_tree::compare::{Compare, Less};
use crate::red_black_tree::cursor::{Cursor, RedBlackSetIter};
use crate::red_black_tree::node::NIL;
use crate::red_black_tree::tree::Tree;
use std::fmt;
use std::iter::FromIterator;
use std::result;

/// The number of nodes the set's node pool grows by when it is full.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black
/// so that no red node has a red child and every path from a node down to a leaf passes through
/// the same number of black nodes. Nodes live in an arena and link to each other by index, with
/// one shared black sentinel standing in for every empty subtree.
///
/// Keys are ordered by a comparator `C`, the natural order `Less` by default. Keys that the
/// comparator considers equivalent are the same key: inserting one when another is present
/// leaves the set unchanged.
///
/// # Examples
///
/// ```
/// use red_black_set::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.find(&3).get(), Some(&3));
///
/// assert_eq!(set.erase(&0), 1);
/// assert_eq!(set.erase(&1), 0);
/// ```
pub struct RedBlackSet<T, C = Less> {
    tree: Tree<T>,
    comparator: C,
}

impl<T> RedBlackSet<T, Less>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackSet<T>` ordered by `T`'s natural order.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose node pool grows by `chunk_size` nodes at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::with_chunk_size(64);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self::with_comparator_and_chunk_size(Less, chunk_size)
    }
}

impl<T, C> RedBlackSet<T, C>
where
    C: Compare<T>,
{
    /// Constructs a new, empty `RedBlackSet<T, C>` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::{Greater, RedBlackSet};
    ///
    /// let mut set = RedBlackSet::with_comparator(Greater);
    /// set.insert_all(vec![1, 2, 3]);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_and_chunk_size(comparator, DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackSet<T, C>` ordered by `comparator` whose node pool grows
    /// by `chunk_size` nodes at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_comparator_and_chunk_size(comparator: C, chunk_size: usize) -> Self {
        RedBlackSet {
            tree: Tree::new(chunk_size),
            comparator,
        }
    }

    /// Returns the comparator that orders the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::{Compare, RedBlackSet};
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.comparator().less(&1, &2));
    /// ```
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Inserts a key into the set. Returns a cursor at the key in the set and whether the key was
    /// inserted. If an equivalent key already exists, the set is unchanged, the cursor points at
    /// the existing key, and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let (cursor, inserted) = set.insert(1);
    /// assert_eq!(cursor.get(), Some(&1));
    /// assert!(inserted);
    ///
    /// assert!(!set.insert(1).1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> (Cursor<'_, T>, bool) {
        let (node, inserted) = self.tree.insert(key, &self.comparator);
        (Cursor::new(&self.tree, node), inserted)
    }

    /// Inserts a key into the set like `insert`, but returns an error instead of aborting if the
    /// node pool cannot grow. The set is unchanged when an error is returned, and the error hands
    /// the key back so the caller can retry.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.try_insert(1).unwrap().1);
    ///
    /// let mut set = RedBlackSet::with_chunk_size(usize::max_value());
    /// let err = set.try_insert(String::from("key")).unwrap_err();
    /// assert_eq!(err.into_key(), "key");
    /// assert!(set.is_empty());
    /// ```
    pub fn try_insert(
        &mut self,
        key: T,
    ) -> result::Result<(Cursor<'_, T>, bool), InsertError<T>> {
        let (node, inserted) = self.tree.try_insert(key, &self.comparator)?;
        Ok((Cursor::new(&self.tree, node), inserted))
    }

    /// Inserts every key of `keys` into the set. Returns the number of keys that were inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.insert_all(vec![3, 1, 3, 2]), 3);
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn insert_all<I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut count = 0;
        for key in keys {
            if self.tree.insert(key, &self.comparator).1 {
                count += 1;
            }
        }
        count
    }

    /// Removes a key from the set. Returns the number of keys removed, which is `1` if an
    /// equivalent key was present and `0` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.erase(&1), 1);
    /// assert_eq!(set.erase(&1), 0);
    /// ```
    pub fn erase(&mut self, key: &T) -> usize {
        match self.take(key) {
            Some(_) => 1,
            None => 0,
        }
    }

    /// Removes a key from the set and returns it. Returns `None` if no equivalent key exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.take(&1), Some(1));
    /// assert_eq!(set.take(&1), None);
    /// ```
    pub fn take(&mut self, key: &T) -> Option<T> {
        self.tree.remove(key, &self.comparator)
    }

    /// Returns a cursor at the key equivalent to `key`, or the end cursor if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.find(&1).get(), Some(&1));
    /// assert_eq!(set.find(&2), set.end());
    /// ```
    pub fn find(&self, key: &T) -> Cursor<'_, T> {
        Cursor::new(&self.tree, self.tree.find(key, &self.comparator))
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.tree.find(key, &self.comparator) != NIL
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a cursor at the minimum key, or the end cursor if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.begin(), set.end());
    ///
    /// set.insert(2);
    /// set.insert(1);
    /// let mut cursor = set.begin();
    /// assert_eq!(cursor.get(), Some(&1));
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some(&2));
    /// cursor.move_next();
    /// assert_eq!(cursor, set.end());
    /// ```
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(&self.tree, self.tree.minimum(self.tree.root()))
    }

    /// Returns the end cursor, positioned one past the maximum key.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(&self.tree, NIL)
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.key(self.tree.minimum(self.tree.root()))
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.key(self.tree.maximum(self.tree.root()))
    }

    /// Removes and returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![2, 1].into_iter().collect();
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        pop_first(&mut self.tree)
    }

    /// Removes and returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![2, 1].into_iter().collect();
    /// assert_eq!(set.pop_last(), Some(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn pop_last(&mut self) -> Option<T> {
        pop_last(&mut self.tree)
    }

    /// Returns an iterator over the set. The iterator will yield keys in ascending order of the
    /// comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackSetIter<'_, T> {
        RedBlackSetIter::new(&self.tree)
    }

    /// Checks that the set still satisfies every red black tree property, that its keys are
    /// strictly increasing under the comparator, and that its size is consistent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Corrupted` naming the first violation found.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = (0..100).collect();
    /// assert!(set.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.tree.validate(&self.comparator)
    }
}

fn pop_first<T>(tree: &mut Tree<T>) -> Option<T> {
    match tree.minimum(tree.root()) {
        NIL => None,
        node => Some(tree.remove_node(node)),
    }
}

fn pop_last<T>(tree: &mut Tree<T>) -> Option<T> {
    match tree.maximum(tree.root()) {
        NIL => None,
        node => Some(tree.remove_node(node)),
    }
}

impl<T, C> Clone for RedBlackSet<T, C>
where
    T: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        RedBlackSet {
            tree: self.tree.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

/// Two sets are equal when they hold the same number of keys and their keys are pairwise
/// equivalent under the left-hand set's comparator. `T`'s own `PartialEq` is not consulted.
impl<T, C> PartialEq for RedBlackSet<T, C>
where
    C: Compare<T>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(lhs, rhs)| self.comparator.equivalent(lhs, rhs))
    }
}

impl<T, C> Eq for RedBlackSet<T, C> where C: Compare<T> {}

impl<T, C> fmt::Debug for RedBlackSet<T, C>
where
    T: fmt::Debug,
    C: Compare<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for RedBlackSet<T, Less>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for RedBlackSet<T, Less>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.insert_all(iter);
        set
    }
}

impl<T, const N: usize> From<[T; N]> for RedBlackSet<T, Less>
where
    T: Ord,
{
    fn from(keys: [T; N]) -> Self {
        IntoIterator::into_iter(keys).collect()
    }
}

impl<T, C> Extend<T> for RedBlackSet<T, C>
where
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.insert_all(iter);
    }
}

impl<'a, T, C> Extend<&'a T> for RedBlackSet<T, C>
where
    T: 'a + Copy,
    C: Compare<T>,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = &'a T>,
    {
        self.insert_all(iter.into_iter().copied());
    }
}

impl<T, C> IntoIterator for RedBlackSet<T, C> {
    type IntoIter = RedBlackSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter { tree: self.tree }
    }
}

impl<'a, T, C> IntoIterator for &'a RedBlackSet<T, C>
where
    T: 'a,
    C: Compare<T>,
{
    type IntoIter = RedBlackSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackSet<T, C>`.
///
/// This iterator yields owned keys in ascending order of the set's comparator.
pub struct RedBlackSetIntoIter<T> {
    tree: Tree<T>,
}

impl<T> Iterator for RedBlackSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        pop_first(&mut self.tree)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T> DoubleEndedIterator for RedBlackSetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        pop_last(&mut self.tree)
    }
}

impl<T> ExactSizeIterator for RedBlackSetIntoIter<T> {}
