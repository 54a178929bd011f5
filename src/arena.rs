//! Slot pool that owns the nodes of a tree.

use crate::error::Result;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object allocated in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(usize);

impl Handle {
    /// The handle of the slot at index zero. The arena never hands it out, so it can stand for
    /// "no object".
    pub const RESERVED: Handle = Handle(0);

    /// Returns the position of the slot in the arena.
    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_reserved(self) -> bool {
        self == Handle::RESERVED
    }
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A pool that allocates a single type of object and addresses it by index.
///
/// Objects are stored in fixed-size chunks. When every chunk is full a new one is allocated, so
/// objects are never moved and growing costs the same no matter how many objects are live.
/// Freed slots are threaded onto a free list and recycled before a new chunk is allocated. The
/// next chunk can be requested fallibly up front with `try_reserve` so a caller can bail out
/// before changing any of its own state. Slot zero is reserved and has no storage.
///
/// # Examples
///
/// ```
/// use red_black_set::arena::TypedArena;
///
/// let mut arena = TypedArena::new(1024);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// ```
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<usize>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    slots: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    // handles are 1-based so that slot zero needs no block
    fn position(&self, handle: Handle) -> Option<(usize, usize)> {
        if handle.is_reserved() || handle.0 > self.slots {
            return None;
        }
        let offset = handle.0 - 1;
        Some((offset / self.chunk_size, offset % self.chunk_size))
    }

    fn block_mut(&mut self, index: usize) -> &mut Block<T> {
        let offset = index - 1;
        &mut self.chunks[offset / self.chunk_size][offset % self.chunk_size]
    }

    fn is_full(&self) -> bool {
        self.head.is_none() && self.slots == self.capacity
    }

    fn push_chunk(&mut self, chunk: Vec<Block<T>>) {
        self.chunks.push(chunk);
        self.capacity = self.capacity.saturating_add(self.chunk_size);
    }

    /// Constructs a new `TypedArena<T>` that allocates `chunk_size` slots at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Expected a positive chunk size.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            size: 0,
            slots: 0,
            capacity: 0,
        }
    }

    /// Ensures that the next call to `allocate` will not need to allocate a chunk. Returns an
    /// error if the chunk could not be allocated, in which case no object is affected.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::arena::TypedArena;
    ///
    /// let mut arena: TypedArena<u32> = TypedArena::new(16);
    /// assert!(arena.try_reserve().is_ok());
    ///
    /// let mut arena: TypedArena<u32> = TypedArena::new(usize::max_value());
    /// assert!(arena.try_reserve().is_err());
    /// ```
    pub fn try_reserve(&mut self) -> Result<()> {
        if self.is_full() {
            let mut chunk = Vec::new();
            chunk.try_reserve_exact(self.chunk_size)?;
            self.chunks.try_reserve(1)?;
            self.push_chunk(chunk);
        }
        Ok(())
    }

    /// Allocates an object in the arena and returns its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert!(!x.is_reserved());
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if self.is_full() {
            let chunk = Vec::with_capacity(self.chunk_size);
            self.push_chunk(chunk);
        }
        self.size += 1;

        match self.head.take() {
            None => {
                let last_chunk = self
                    .chunks
                    .last_mut()
                    .expect("Expected a chunk with a free slot.");
                last_chunk.push(Block::Occupied(value));
                self.slots += 1;
                Handle(self.slots)
            },
            Some(index) => {
                let vacant_block = mem::replace(self.block_mut(index), Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next_index) => {
                        self.head = next_index;
                        Handle(index)
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block on the free list."),
                }
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle is reserved, out of bounds, or refers to a vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_set::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if self.position(handle).is_none() {
            panic!("Error: attempting to free invalid block.");
        }
        let head = self.head;
        let old_block = mem::replace(self.block_mut(handle.0), Block::Vacant(head));
        match old_block {
            Block::Occupied(value) => {
                self.size -= 1;
                self.head = Some(handle.0);
                value
            },
            Block::Vacant(_) => panic!("Error: attempting to free vacant block."),
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle does
    /// not refer to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let (chunk_index, block_index) = self.position(handle)?;
        match self.chunks[chunk_index][block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle does not
    /// refer to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let (chunk_index, block_index) = self.position(handle)?;
        match self.chunks[chunk_index][block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops every live object and releases every chunk.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.head = None;
        self.size = 0;
        self.slots = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle does not refer to a live object.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    #[test]
    #[should_panic]
    fn test_new_zero_chunk_size() {
        let _: TypedArena<u32> = TypedArena::new(0);
    }

    #[test]
    #[should_panic]
    fn test_free_reserved_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.allocate(0);
        arena.free(Handle::RESERVED);
    }

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(Handle(1));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(x);
        arena.free(x);
    }

    #[test]
    fn test_allocate_skips_reserved() {
        let mut arena = TypedArena::new(1024);
        assert_eq!(arena.allocate(0), Handle(1));
        assert_eq!(arena.allocate(0), Handle(2));
        assert_eq!(arena.allocate(0), Handle(3));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        let handles: Vec<Handle> = (0..5).map(|i| arena.allocate(i)).collect();
        assert_eq!(arena.chunks.len(), 3);
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(arena[handle], i);
        }
    }

    #[test]
    fn test_chunks_are_never_reallocated() {
        let mut arena: TypedArena<u32> = TypedArena::new(4);
        let first = arena.allocate(0);
        let first_chunk = arena.chunks[0].as_ptr();
        let first_value = &arena[first] as *const u32;

        for i in 1..101 {
            arena.allocate(i);
        }

        assert_eq!(arena.chunks.len(), 26);
        assert_eq!(arena.chunks[0].as_ptr(), first_chunk);
        assert_eq!(&arena[first] as *const u32, first_value);
        assert!(arena.chunks.iter().all(|chunk| chunk.capacity() == 4));
    }

    #[test]
    fn test_free_recycles_slots() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        assert_eq!(arena.free(x), 0);
        assert_eq!(arena.free(y), 1);
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(2), y);
        assert_eq!(arena.allocate(3), x);
        assert_eq!(arena.allocate(4), Handle(3));
    }

    #[test]
    fn test_free_list_fills_before_new_chunk() {
        let mut arena = TypedArena::new(2);
        let x = arena.allocate(0);
        arena.allocate(1);
        arena.free(x);
        assert!(arena.try_reserve().is_ok());
        assert_eq!(arena.chunks.len(), 1);
        assert_eq!(arena.allocate(2), x);
    }

    #[test]
    fn test_try_reserve_overflow() {
        let mut arena: TypedArena<u32> = TypedArena::new(usize::max_value());
        assert!(arena.try_reserve().is_err());
        assert!(arena.is_empty());
        assert!(arena.chunks.is_empty());
    }

    #[test]
    fn test_get() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        assert_eq!(arena.get(x), Some(&0));
        assert_eq!(arena.get(Handle::RESERVED), None);
        assert_eq!(arena.get(Handle(2)), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        *arena.get_mut(x).unwrap() = 1;
        assert_eq!(arena.get(x), Some(&1));
        arena.free(x);
        assert_eq!(arena.get_mut(x), None);
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(1024);
        arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.allocate(2), Handle(1));
    }
}
