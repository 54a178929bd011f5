use crate::arena::TypedArena;
use crate::error::{Error, InsertError, Result, Violation};
use crate::red_black_tree::compare::Compare;
use crate::red_black_tree::node::{Color, Links, Node, NodeRef, Side, NIL};
use log::{debug, trace};
use std::result;

/// Where a key lives in the tree, or where it would be attached.
enum Location {
    Occupied(NodeRef),
    Vacant { parent: NodeRef, side: Side },
}

/// The red black tree engine.
///
/// Every node lives in `nodes`; `left`, `right` and `parent` are handles into it. The sentinel is
/// the reserved handle `NIL`, whose links are kept in `nil` rather than in the arena. Only the
/// sentinel's `parent` is ever written, and only for the duration of an erase.
#[derive(Clone)]
pub struct Tree<T> {
    nodes: TypedArena<Node<T>>,
    nil: Links,
    root: NodeRef,
    len: usize,
}

impl<T> Tree<T> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            nodes: TypedArena::new(chunk_size),
            nil: Links::sentinel(),
            root: NIL,
            len: 0,
        }
    }

    fn links(&self, node: NodeRef) -> &Links {
        if node == NIL {
            &self.nil
        } else {
            &self.nodes[node].links
        }
    }

    fn links_mut(&mut self, node: NodeRef) -> &mut Links {
        if node == NIL {
            &mut self.nil
        } else {
            &mut self.nodes[node].links
        }
    }

    fn color(&self, node: NodeRef) -> Color {
        self.links(node).color
    }

    fn is_red(&self, node: NodeRef) -> bool {
        self.color(node) == Color::Red
    }

    fn set_color(&mut self, node: NodeRef, color: Color) {
        if node == NIL {
            debug_assert_eq!(color, Color::Black, "the sentinel must stay black");
            return;
        }
        self.links_mut(node).color = color;
    }

    pub fn parent(&self, node: NodeRef) -> NodeRef {
        self.links(node).parent
    }

    pub fn left(&self, node: NodeRef) -> NodeRef {
        self.links(node).left
    }

    pub fn right(&self, node: NodeRef) -> NodeRef {
        self.links(node).right
    }

    fn child(&self, node: NodeRef, side: Side) -> NodeRef {
        self.links(node).child(side)
    }

    fn set_child(&mut self, node: NodeRef, side: Side, child: NodeRef) {
        debug_assert!(node != NIL, "the sentinel has no children");
        *self.links_mut(node).child_mut(side) = child;
    }

    // precondition: node is not the root
    fn side_of(&self, node: NodeRef) -> Side {
        if self.left(self.parent(node)) == node {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn root(&self) -> NodeRef {
        self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the key stored at `node`, or `None` for the sentinel or a freed node.
    pub fn key(&self, node: NodeRef) -> Option<&T> {
        self.nodes.get(node).map(|node| &node.key)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nil = Links::sentinel();
        self.root = NIL;
        self.len = 0;
    }

    /// Returns the leftmost node of the subtree rooted at `node`.
    pub fn minimum(&self, mut node: NodeRef) -> NodeRef {
        if node == NIL {
            return NIL;
        }
        while self.left(node) != NIL {
            node = self.left(node);
        }
        node
    }

    /// Returns the rightmost node of the subtree rooted at `node`.
    pub fn maximum(&self, mut node: NodeRef) -> NodeRef {
        if node == NIL {
            return NIL;
        }
        while self.right(node) != NIL {
            node = self.right(node);
        }
        node
    }

    /// Returns the in-order successor of `node`, or `NIL` if `node` holds the largest key.
    pub fn successor(&self, mut node: NodeRef) -> NodeRef {
        if self.right(node) != NIL {
            return self.minimum(self.right(node));
        }
        let mut parent = self.parent(node);
        while parent != NIL && node == self.right(parent) {
            node = parent;
            parent = self.parent(parent);
        }
        parent
    }

    /// Returns the in-order predecessor of `node`, or `NIL` if `node` holds the smallest key.
    pub fn predecessor(&self, mut node: NodeRef) -> NodeRef {
        if self.left(node) != NIL {
            return self.maximum(self.left(node));
        }
        let mut parent = self.parent(node);
        while parent != NIL && node == self.left(parent) {
            node = parent;
            parent = self.parent(parent);
        }
        parent
    }

    fn locate<C>(&self, key: &T, comparator: &C) -> Location
    where
        C: Compare<T>,
    {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut curr = self.root;
        while curr != NIL {
            let curr_key = &self.nodes[curr].key;
            if comparator.less(key, curr_key) {
                side = Side::Left;
            } else if comparator.less(curr_key, key) {
                side = Side::Right;
            } else {
                return Location::Occupied(curr);
            }
            parent = curr;
            curr = self.child(curr, side);
        }
        Location::Vacant { parent, side }
    }

    /// Returns the node holding a key equivalent to `key`, or `NIL`.
    pub fn find<C>(&self, key: &T, comparator: &C) -> NodeRef
    where
        C: Compare<T>,
    {
        match self.locate(key, comparator) {
            Location::Occupied(node) => node,
            Location::Vacant { .. } => NIL,
        }
    }

    /// Inserts `key` unless an equivalent key is present. Returns the node holding the key and
    /// whether it was newly inserted.
    pub fn insert<C>(&mut self, key: T, comparator: &C) -> (NodeRef, bool)
    where
        C: Compare<T>,
    {
        match self.locate(&key, comparator) {
            Location::Occupied(node) => (node, false),
            Location::Vacant { parent, side } => {
                let node = self.nodes.allocate(Node::new(key, parent));
                (self.attach(node, parent, side), true)
            },
        }
    }

    /// Like `insert`, but reports a failure to grow the node pool instead of aborting. The tree
    /// is untouched when an error is returned, and the error hands `key` back.
    pub fn try_insert<C>(
        &mut self,
        key: T,
        comparator: &C,
    ) -> result::Result<(NodeRef, bool), InsertError<T>>
    where
        C: Compare<T>,
    {
        match self.locate(&key, comparator) {
            Location::Occupied(node) => Ok((node, false)),
            Location::Vacant { parent, side } => {
                if let Err(err) = self.nodes.try_reserve() {
                    debug!("insert aborted, node pool could not grow: {}", err);
                    return Err(InsertError::new(err, key));
                }
                let node = self.nodes.allocate(Node::new(key, parent));
                Ok((self.attach(node, parent, side), true))
            },
        }
    }

    fn attach(&mut self, node: NodeRef, parent: NodeRef, side: Side) -> NodeRef {
        if parent == NIL {
            self.root = node;
        } else {
            self.set_child(parent, side, node);
        }
        self.len += 1;
        self.insert_fixup(node);
        node
    }

    fn insert_fixup(&mut self, mut node: NodeRef) {
        while self.is_red(self.parent(node)) {
            // a red parent is never the root, so the grandparent is real
            let parent = self.parent(node);
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                trace!("insert fixup: recolor at {:?}", grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
            } else {
                if node == self.child(parent, side.opposite()) {
                    trace!("insert fixup: straighten inner child {:?}", node);
                    node = parent;
                    self.rotate(node, side);
                }
                let parent = self.parent(node);
                let grandparent = self.parent(parent);
                trace!("insert fixup: rotate at {:?}", grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate(grandparent, side.opposite());
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Rotates `node` down towards `side`; its child on the other side takes its place.
    ///
    /// # Panics
    ///
    /// Panics if the child that would take `node`'s place is the sentinel.
    fn rotate(&mut self, node: NodeRef, side: Side) {
        let pivot = self.child(node, side.opposite());
        assert!(
            node != NIL && pivot != NIL,
            "Expected {:?} child of rotated node to be a real node.",
            side.opposite(),
        );
        trace!("rotate {:?} at {:?}", side, node);

        let inner = self.child(pivot, side);
        self.set_child(node, side.opposite(), inner);
        if inner != NIL {
            self.links_mut(inner).parent = node;
        }

        let parent = self.parent(node);
        self.links_mut(pivot).parent = parent;
        if parent == NIL {
            self.root = pivot;
        } else {
            let node_side = self.side_of(node);
            self.set_child(parent, node_side, pivot);
        }

        self.set_child(pivot, side, node);
        self.links_mut(node).parent = pivot;
    }

    /// Replaces the subtree rooted at `old` with the one rooted at `new`. `new` may be the
    /// sentinel, whose parent is then set so that the delete fixup can climb from it.
    fn transplant(&mut self, old: NodeRef, new: NodeRef) {
        let parent = self.parent(old);
        if parent == NIL {
            self.root = new;
        } else {
            let side = self.side_of(old);
            self.set_child(parent, side, new);
        }
        self.links_mut(new).parent = parent;
    }

    /// Removes the node holding a key equivalent to `key` and returns the key.
    pub fn remove<C>(&mut self, key: &T, comparator: &C) -> Option<T>
    where
        C: Compare<T>,
    {
        match self.find(key, comparator) {
            NIL => None,
            node => Some(self.remove_node(node)),
        }
    }

    /// Unlinks `node` from the tree, rebalances, and returns its key.
    ///
    /// A node with two children is replaced by its successor, which is moved into its position
    /// and color, so only a node with at most one real child is ever spliced out and handles to
    /// every other node stay valid.
    pub fn remove_node(&mut self, node: NodeRef) -> T {
        let left = self.left(node);
        let right = self.right(node);
        let mut removed_color = self.color(node);
        let replacement;

        if left == NIL {
            replacement = right;
            self.transplant(node, right);
        } else if right == NIL {
            replacement = left;
            self.transplant(node, left);
        } else {
            let successor = self.minimum(right);
            removed_color = self.color(successor);
            replacement = self.right(successor);
            if self.parent(successor) == node {
                self.links_mut(replacement).parent = successor;
            } else {
                self.transplant(successor, replacement);
                self.set_child(successor, Side::Right, right);
                self.links_mut(right).parent = successor;
            }
            self.transplant(node, successor);
            self.set_child(successor, Side::Left, left);
            self.links_mut(left).parent = successor;
            let color = self.color(node);
            self.set_color(successor, color);
        }

        if removed_color == Color::Black {
            self.delete_fixup(replacement);
        }
        self.nil.parent = NIL;
        self.len -= 1;
        self.nodes.free(node).key
    }

    fn delete_fixup(&mut self, mut node: NodeRef) {
        while node != self.root && !self.is_red(node) {
            let parent = self.parent(node);
            let side = if node == self.left(parent) {
                Side::Left
            } else {
                Side::Right
            };
            let mut sibling = self.child(parent, side.opposite());

            if self.is_red(sibling) {
                trace!("delete fixup: red sibling {:?}", sibling);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(parent, side.opposite());
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                trace!("delete fixup: push extra black up to {:?}", parent);
                self.set_color(sibling, Color::Red);
                node = parent;
            } else {
                if !self.is_red(far) {
                    trace!("delete fixup: straighten red near child {:?}", near);
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate(sibling, side.opposite());
                    sibling = self.child(parent, side.opposite());
                }
                trace!("delete fixup: rotate at {:?}", parent);
                let parent_color = self.color(parent);
                self.set_color(sibling, parent_color);
                self.set_color(parent, Color::Black);
                let far = self.child(sibling, side.opposite());
                self.set_color(far, Color::Black);
                self.rotate(parent, side);
                node = self.root;
            }
        }
        self.set_color(node, Color::Black);
    }

    /// Checks every red black property, every parent link, the ordering of keys and the size
    /// counter.
    pub fn validate<C>(&self, comparator: &C) -> Result<()>
    where
        C: Compare<T>,
    {
        if self.nil != Links::sentinel() {
            return Err(Error::Corrupted(Violation::Sentinel));
        }
        if self.is_red(self.root) || (self.root != NIL && self.parent(self.root) != NIL) {
            return Err(Error::Corrupted(Violation::Root));
        }
        self.black_height(self.root)?;

        let mut count = 0;
        let mut prev: Option<&T> = None;
        let mut curr = self.minimum(self.root);
        while curr != NIL {
            let key = &self.nodes[curr].key;
            if let Some(prev) = prev {
                if !comparator.less(prev, key) {
                    return Err(Error::Corrupted(Violation::Order(curr)));
                }
            }
            prev = Some(key);
            count += 1;
            curr = self.successor(curr);
        }

        if count != self.len || self.nodes.len() != self.len {
            return Err(Error::Corrupted(Violation::Size {
                expected: self.len,
                actual: count,
            }));
        }
        Ok(())
    }

    fn black_height(&self, node: NodeRef) -> Result<usize> {
        if node == NIL {
            return Ok(0);
        }
        let Links {
            color, left, right, ..
        } = *self.links(node);
        for &child in &[left, right] {
            if child != NIL && self.parent(child) != node {
                return Err(Error::Corrupted(Violation::ParentLink(child)));
            }
            if color == Color::Red && self.is_red(child) {
                return Err(Error::Corrupted(Violation::RedRed(node)));
            }
        }

        let left_height = self.black_height(left)?;
        let right_height = self.black_height(right)?;
        if left_height != right_height {
            return Err(Error::Corrupted(Violation::BlackHeight(node)));
        }
        Ok(left_height + if color == Color::Black { 1 } else { 0 })
    }
}
