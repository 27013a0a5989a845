//! Ordered binary trees and red-black trees over one node arena
//!
//! [`BalancedTree`] implements two disciplines that share a node representation:
//!
//! - **Ordered**: a plain binary search tree. Ties go to the left subtree.
//! - **Red-black**: the same search tree kept balanced by node colors, with
//!   height bounded by 2·log₂(n + 1).
//!
//! The discipline is fixed when the tree is built. Calling an insert or delete of
//! the other discipline is a contract violation and panics.
//!
//! # Design
//!
//! Nodes live in a [`SlotMap`] and link to each other through [`NodeId`] keys, so
//! parent links are plain back-references into the same arena. Keys are
//! generational: a `NodeId` whose node was deleted is rejected instead of
//! silently aliasing a newer node.
//!
//! # Time Complexity
//!
//! | Operation            | Ordered | Red-black |
//! |----------------------|---------|-----------|
//! | `insert_*`           | O(h)    | O(log n)  |
//! | `search`             | O(h)    | O(log n)  |
//! | `delete_*`           | O(h)    | O(log n)  |
//! | `rotate_*`           | O(1)    | O(1)      |
//! | `depth`, `is_ordered`| O(n)    | O(n)      |
//!
//! # Example
//!
//! ```rust
//! use rust_linked_structures::tree::BalancedTree;
//!
//! let mut tree = BalancedTree::red_black();
//! for i in 0..100 {
//!     tree.insert_red_black(i);
//! }
//! assert!(tree.verify_red_black());
//! assert!(tree.depth() <= 13);
//!
//! tree.delete_red_black(&50);
//! assert!(tree.search(&50).is_none());
//! assert_eq!(tree.len(), 99);
//! ```

use crate::traits::{Comparator, NaturalOrder};
use slotmap::{new_key_type, SlotMap};
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

new_key_type! {
    /// Handle to a node of a [`BalancedTree`]
    pub struct NodeId;
}

/// Node color; ordered trees leave every node at [`Color::None`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// No color (ordered discipline)
    None,
    /// Black node
    Black,
    /// Red node
    Red,
}

/// The balancing discipline chosen at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    /// Plain binary search tree
    Ordered,
    /// Red-black tree
    RedBlack,
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::Ordered => write!(f, "ordered"),
            Discipline::RedBlack => write!(f, "red-black"),
        }
    }
}

#[derive(Debug)]
struct Node<T> {
    element: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    color: Color,
}

/// A binary search tree, optionally red-black balanced
///
/// The tree owns its elements. Dropping it drops every element; use
/// [`BalancedTree::into_elements`] to take them back instead.
#[derive(Debug)]
pub struct BalancedTree<T, C = NaturalOrder> {
    nodes: SlotMap<NodeId, Node<T>>,
    root: Option<NodeId>,
    discipline: Discipline,
    comparator: C,
}

impl<T: Ord> BalancedTree<T, NaturalOrder> {
    /// Creates an empty ordered tree using `T: Ord`
    pub fn ordered() -> Self {
        Self::ordered_with(NaturalOrder)
    }

    /// Creates an empty red-black tree using `T: Ord`
    pub fn red_black() -> Self {
        Self::red_black_with(NaturalOrder)
    }
}

impl<T, C: Comparator<T>> BalancedTree<T, C> {
    /// Creates an empty ordered tree using `comparator`
    pub fn ordered_with(comparator: C) -> Self {
        Self::with_discipline(Discipline::Ordered, comparator)
    }

    /// Creates an empty red-black tree using `comparator`
    pub fn red_black_with(comparator: C) -> Self {
        Self::with_discipline(Discipline::RedBlack, comparator)
    }

    /// Creates an empty tree of the given discipline
    pub fn with_discipline(discipline: Discipline, comparator: C) -> Self {
        BalancedTree {
            nodes: SlotMap::with_key(),
            root: None,
            discipline,
            comparator,
        }
    }

    /// The root node, or `None` for an empty tree
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of elements in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no elements
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The discipline fixed at construction
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// True iff the tree was built as a red-black tree
    ///
    /// This is a capability flag; use [`BalancedTree::verify_red_black`] to check
    /// the color invariants.
    pub fn is_red_black(&self) -> bool {
        self.discipline == Discipline::RedBlack
    }

    /// Length in edges of the longest root-to-leaf path; `-1` for an empty tree
    pub fn depth(&self) -> isize {
        let Some(root) = self.root else {
            return -1;
        };

        let mut deepest = 0;
        let mut stack = vec![(root, 0)];
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = self.node(id);
            for child in [node.left, node.right].into_iter().flatten() {
                stack.push((child, level + 1));
            }
        }
        deepest
    }

    /// The element held by `id`, or `None` if `id` is not a node of this tree
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.element)
    }

    /// The element held by `id`
    ///
    /// # Panics
    /// Panics if `id` is not a node of this tree.
    pub fn element(&self, id: NodeId) -> &T {
        &self.node(id).element
    }

    /// Parent of `id`; `None` for the root
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Left child of `id`
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    /// Right child of `id`
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    /// Color of `id`
    pub fn color(&self, id: NodeId) -> Color {
        self.node(id).color
    }

    /// Rotates left around `id`, lifting its right child into its place
    ///
    /// The in-order sequence is preserved. Colors are untouched; any fix-up is
    /// the caller's business.
    ///
    /// # Panics
    /// Panics if `id` has no right child.
    pub fn rotate_left(&mut self, id: NodeId) {
        let Some(pivot) = self.node(id).right else {
            panic!("rotate_left needs a node with a right child");
        };

        let moved = self.node(pivot).left;
        self.node_mut(id).right = moved;
        if let Some(moved) = moved {
            self.node_mut(moved).parent = Some(id);
        }

        let parent = self.node(id).parent;
        self.replace_child(parent, id, Some(pivot));
        self.node_mut(pivot).left = Some(id);
        self.node_mut(id).parent = Some(pivot);
    }

    /// Rotates right around `id`, lifting its left child into its place
    ///
    /// # Panics
    /// Panics if `id` has no left child.
    pub fn rotate_right(&mut self, id: NodeId) {
        let Some(pivot) = self.node(id).left else {
            panic!("rotate_right needs a node with a left child");
        };

        let moved = self.node(pivot).right;
        self.node_mut(id).left = moved;
        if let Some(moved) = moved {
            self.node_mut(moved).parent = Some(id);
        }

        let parent = self.node(id).parent;
        self.replace_child(parent, id, Some(pivot));
        self.node_mut(pivot).right = Some(id);
        self.node_mut(id).parent = Some(pivot);
    }

    /// Inserts into an ordered tree and returns the new node
    ///
    /// # Panics
    /// Panics if the tree is red-black.
    pub fn insert_ordered(&mut self, element: T) -> NodeId {
        self.require(Discipline::Ordered, "insert_ordered");
        self.attach(element, Color::None)
    }

    /// Inserts into a red-black tree and returns the new node
    ///
    /// The node starts red and the tree is recolored and rotated upward until no
    /// red node has a red parent; the root ends black.
    ///
    /// # Panics
    /// Panics if the tree is ordered.
    pub fn insert_red_black(&mut self, element: T) -> NodeId {
        self.require(Discipline::RedBlack, "insert_red_black");
        let id = self.attach(element, Color::Red);
        self.rebalance_after_insert(id);
        id
    }

    /// Finds a node holding an element equal to `element`
    pub fn search(&self, element: &T) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match self.comparator.compare(element, &node.element) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Deletes one element equal to `element` from an ordered tree
    ///
    /// Returns the removed element, or `None` (leaving the tree untouched) if no
    /// element matches. A node with two children trades its element with its
    /// in-order successor, whose node is the one unlinked; the successor's old
    /// `NodeId` is invalidated.
    ///
    /// # Panics
    /// Panics if the tree is red-black.
    pub fn delete_ordered(&mut self, element: &T) -> Option<T> {
        self.require(Discipline::Ordered, "delete_ordered");
        let id = self.search(element)?;
        Some(self.detach(id))
    }

    /// Deletes one element equal to `element` from a red-black tree
    ///
    /// Same contract as [`BalancedTree::delete_ordered`], followed by the
    /// double-black fix-up when a black node leaves the tree.
    ///
    /// # Panics
    /// Panics if the tree is ordered.
    pub fn delete_red_black(&mut self, element: &T) -> Option<T> {
        self.require(Discipline::RedBlack, "delete_red_black");
        let id = self.search(element)?;
        Some(self.detach(id))
    }

    /// Checks that an in-order walk is non-decreasing under the tree's comparator
    pub fn is_ordered(&self) -> bool {
        self.in_order_holds(|a, b| self.comparator.compare(a, b))
    }

    /// Checks that an in-order walk is non-decreasing under `comparator`
    pub fn is_ordered_by<K: Comparator<T>>(&self, comparator: K) -> bool {
        self.in_order_holds(|a, b| comparator.compare(a, b))
    }

    /// Checks the red-black invariants
    ///
    /// The root is black, every node is red or black, no red node has a red
    /// child, and every downward path to a leaf crosses the same number of black
    /// nodes. An empty tree passes.
    pub fn verify_red_black(&self) -> bool {
        match self.root {
            None => true,
            Some(root) => {
                self.node(root).color == Color::Black && self.black_height(Some(root)).is_some()
            }
        }
    }

    /// Checks that parent links mirror child links and that the node count
    /// matches what is reachable from the root
    pub fn is_well_linked(&self) -> bool {
        let Some(root) = self.root else {
            return self.nodes.is_empty();
        };
        if self.node(root).parent.is_some() {
            return false;
        }

        let mut reached = 0;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            reached += 1;
            let node = self.node(id);
            for child in [node.left, node.right].into_iter().flatten() {
                match self.nodes.get(child) {
                    Some(c) if c.parent == Some(id) => stack.push(child),
                    _ => return false,
                }
            }
        }
        reached == self.nodes.len()
    }

    /// Iterates the elements in order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.node_ids().map(move |id| &self.node(id).element)
    }

    /// Iterates the nodes in order
    pub fn node_ids(&self) -> InOrder<'_, T, C> {
        let mut walk = InOrder {
            tree: self,
            stack: Vec::new(),
        };
        walk.push_left_spine(self.root);
        walk
    }

    /// Draws the tree, one node per line, with box-drawing branches
    ///
    /// Red-black nodes are wrapped as `R{x}` (red) or `N{x}` (black); ordered
    /// nodes print bare.
    ///
    /// ```rust
    /// use rust_linked_structures::tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::ordered();
    /// for i in [1, 0, 2] {
    ///     tree.insert_ordered(i);
    /// }
    /// assert_eq!(tree.render(|e| e.to_string()), "1\n├─›0\n└─»2\n");
    /// ```
    pub fn render<F: Fn(&T) -> String>(&self, to_string: F) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            let levels = self.depth() as usize + 1;
            let mut branches: SmallVec<[bool; 32]> = smallvec![false; levels];
            self.render_node(root, 0, &mut branches, &to_string, &mut out);
        }
        out
    }

    /// Releases every node and returns the elements in order
    pub fn into_elements(mut self) -> Vec<T> {
        let order: Vec<NodeId> = self.node_ids().collect();
        order
            .into_iter()
            .filter_map(|id| self.nodes.remove(id))
            .map(|node| node.element)
            .collect()
    }

    /// Drops every element
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    fn in_order_holds(&self, compare: impl Fn(&T, &T) -> Ordering) -> bool {
        let mut previous: Option<&T> = None;
        for element in self.iter() {
            if let Some(previous) = previous {
                if compare(previous, element) == Ordering::Greater {
                    return false;
                }
            }
            previous = Some(element);
        }
        true
    }

    fn require(&self, discipline: Discipline, operation: &str) {
        if self.discipline != discipline {
            panic!(
                "{operation} requires a {discipline} tree, but this tree is {}",
                self.discipline
            );
        }
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        match self.nodes.get(id) {
            Some(node) => node,
            None => panic!("node {id:?} does not belong to this tree"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        match self.nodes.get_mut(id) {
            Some(node) => node,
            None => panic!("node {id:?} does not belong to this tree"),
        }
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|id| self.node(id).color == Color::Red)
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    /// Points `parent`'s link to `old` (or the root) at `new`
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let parent_node = self.node_mut(p);
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    parent_node.right = new;
                }
            }
        }
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /// Plain BST descent and link; ties go left
    fn attach(&mut self, element: T, color: Color) -> NodeId {
        let mut parent = None;
        let mut go_left = false;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            go_left = self.comparator.compare(&element, &node.element) != Ordering::Greater;
            parent = Some(id);
            current = if go_left { node.left } else { node.right };
        }

        let id = self.nodes.insert(Node {
            element,
            parent,
            left: None,
            right: None,
            color,
        });
        match parent {
            None => self.root = Some(id),
            Some(p) if go_left => self.node_mut(p).left = Some(id),
            Some(p) => self.node_mut(p).right = Some(id),
        }
        id
    }

    fn rebalance_after_insert(&mut self, mut id: NodeId) {
        while let Some(mut parent) = self.node(id).parent {
            if self.node(parent).color != Color::Red {
                break;
            }
            // A red parent is never the root.
            let Some(grand) = self.node(parent).parent else {
                break;
            };

            let parent_is_left = self.node(grand).left == Some(parent);
            let uncle = if parent_is_left {
                self.node(grand).right
            } else {
                self.node(grand).left
            };

            if let Some(uncle) = uncle.filter(|&u| self.node(u).color == Color::Red) {
                trace!("insert fix-up: red uncle, recolor");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grand, Color::Red);
                id = grand;
                continue;
            }

            let id_is_left = self.node(parent).left == Some(id);
            if parent_is_left && !id_is_left {
                trace!("insert fix-up: inner child, rotate parent left");
                self.rotate_left(parent);
                std::mem::swap(&mut id, &mut parent);
            } else if !parent_is_left && id_is_left {
                trace!("insert fix-up: inner child, rotate parent right");
                self.rotate_right(parent);
                std::mem::swap(&mut id, &mut parent);
            }

            trace!("insert fix-up: outer child, rotate grandparent");
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            if parent_is_left {
                self.rotate_right(grand);
            } else {
                self.rotate_left(grand);
            }
            break;
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Unlinks `id` (or its successor) and returns the element it held
    fn detach(&mut self, id: NodeId) -> T {
        let mut target = id;
        if let (Some(_), Some(right)) = (self.node(id).left, self.node(id).right) {
            let successor = self.leftmost(right);
            if let Some([a, b]) = self.nodes.get_disjoint_mut([id, successor]) {
                std::mem::swap(&mut a.element, &mut b.element);
            }
            target = successor;
        }

        let node = self.node(target);
        let child = node.left.or(node.right);
        if self.discipline == Discipline::RedBlack && node.color == Color::Black {
            match child {
                // A black node with a single child always has a red one.
                Some(child) => self.set_color(child, Color::Black),
                None => self.rebalance_before_unlink(target),
            }
        }

        let parent = self.node(target).parent;
        self.replace_child(parent, target, child);
        match self.nodes.remove(target) {
            Some(node) => node.element,
            None => unreachable!("detached node vanished from the arena"),
        }
    }

    /// Double-black fix-up for a black leaf that is about to be unlinked
    fn rebalance_before_unlink(&mut self, mut id: NodeId) {
        while let Some(parent) = self.node(id).parent {
            if self.node(id).color == Color::Red {
                break;
            }

            let id_is_left = self.node(parent).left == Some(id);
            let sibling_of = |tree: &Self| {
                if id_is_left {
                    tree.node(parent).right
                } else {
                    tree.node(parent).left
                }
            };
            // Black-height above a black node guarantees a sibling.
            let Some(mut sibling) = sibling_of(self) else {
                break;
            };

            if self.node(sibling).color == Color::Red {
                trace!("delete fix-up: red sibling");
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                if id_is_left {
                    self.rotate_left(parent);
                } else {
                    self.rotate_right(parent);
                }
                let Some(next) = sibling_of(self) else {
                    break;
                };
                sibling = next;
            }

            let (near, far) = if id_is_left {
                (self.node(sibling).left, self.node(sibling).right)
            } else {
                (self.node(sibling).right, self.node(sibling).left)
            };

            if !self.is_red(near) && !self.is_red(far) {
                trace!("delete fix-up: black sibling with black children");
                self.set_color(sibling, Color::Red);
                id = parent;
                continue;
            }

            let far = match (far.filter(|&f| self.node(f).color == Color::Red), near) {
                (Some(far), _) => far,
                (None, Some(near)) => {
                    trace!("delete fix-up: red near nephew");
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    if id_is_left {
                        self.rotate_right(sibling);
                    } else {
                        self.rotate_left(sibling);
                    }
                    let old_sibling = sibling;
                    sibling = near;
                    old_sibling
                }
                (None, None) => unreachable!("a red nephew exists at this point"),
            };

            trace!("delete fix-up: red far nephew");
            let parent_color = self.node(parent).color;
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            self.set_color(far, Color::Black);
            if id_is_left {
                self.rotate_left(parent);
            } else {
                self.rotate_right(parent);
            }
            return;
        }

        self.set_color(id, Color::Black);
    }

    /// Black nodes on every path below `id`, or `None` if a rule is broken
    fn black_height(&self, id: Option<NodeId>) -> Option<usize> {
        let Some(id) = id else {
            return Some(0);
        };
        let node = self.node(id);
        match node.color {
            Color::None => return None,
            Color::Red if self.is_red(node.left) || self.is_red(node.right) => return None,
            _ => {}
        }

        let left = self.black_height(node.left)?;
        let right = self.black_height(node.right)?;
        if left != right {
            return None;
        }
        Some(left + usize::from(node.color == Color::Black))
    }

    fn render_node<F: Fn(&T) -> String>(
        &self,
        id: NodeId,
        level: usize,
        branches: &mut [bool],
        to_string: &F,
        out: &mut String,
    ) {
        let node = self.node(id);
        let label = to_string(&node.element);
        match node.color {
            Color::None => out.push_str(&label),
            Color::Red => out.push_str(&format!("R{{{label}}}")),
            Color::Black => out.push_str(&format!("N{{{label}}}")),
        }
        out.push('\n');
        branches[level] = true;

        match (node.left, node.right) {
            (Some(left), Some(right)) => {
                Self::indent(level, branches, out);
                out.push_str("├─›");
                self.render_node(left, level + 1, branches, to_string, out);
                Self::indent(level, branches, out);
                out.push_str("└─»");
                branches[level] = false;
                self.render_node(right, level + 1, branches, to_string, out);
            }
            (Some(left), None) => {
                Self::indent(level, branches, out);
                out.push_str("└─›");
                branches[level] = false;
                self.render_node(left, level + 1, branches, to_string, out);
            }
            (None, Some(right)) => {
                Self::indent(level, branches, out);
                out.push_str("└─»");
                branches[level] = false;
                self.render_node(right, level + 1, branches, to_string, out);
            }
            (None, None) => {}
        }
    }

    fn indent(level: usize, branches: &[bool], out: &mut String) {
        for &open in &branches[..level] {
            out.push_str(if open { "│  " } else { "   " });
        }
    }
}

impl<T: fmt::Display, C: Comparator<T>> fmt::Display for BalancedTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(|e| e.to_string()))
    }
}

/// In-order walk over the nodes of a [`BalancedTree`]
pub struct InOrder<'a, T, C> {
    tree: &'a BalancedTree<T, C>,
    stack: Vec<NodeId>,
}

impl<T, C> InOrder<'_, T, C> {
    fn push_left_spine(&mut self, mut current: Option<NodeId>) {
        while let Some(id) = current {
            self.stack.push(id);
            current = self.tree.nodes.get(id).and_then(|node| node.left);
        }
    }
}

impl<T, C> Iterator for InOrder<'_, T, C> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let right = self.tree.nodes.get(id).and_then(|node| node.right);
        self.push_left_spine(right);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered_from(values: &[i32]) -> BalancedTree<i32> {
        let mut tree = BalancedTree::ordered();
        for &v in values {
            tree.insert_ordered(v);
        }
        tree
    }

    #[test]
    fn test_render_three_nodes() {
        let tree = ordered_from(&[1, 0, 2]);
        assert_eq!(tree.render(|e| e.to_string()), "1\n├─›0\n└─»2\n");
        assert_eq!(tree.to_string(), "1\n├─›0\n└─»2\n");
    }

    #[test]
    fn test_render_branches_and_single_children() {
        let tree = ordered_from(&[5, 2, 8, 1, 3, 9]);
        let expected = "5\n\
                        ├─›2\n\
                        │  ├─›1\n\
                        │  └─»3\n\
                        └─»8\n   \
                        └─»9\n";
        assert_eq!(tree.to_string(), expected);

        let left_only = ordered_from(&[2, 1]);
        assert_eq!(left_only.to_string(), "2\n└─›1\n");
        assert_eq!(BalancedTree::<i32>::ordered().to_string(), "");
    }

    #[test]
    fn test_render_red_black_colors() {
        let mut tree = BalancedTree::red_black();
        for x in [1, 0, 2] {
            tree.insert_red_black(x);
        }
        assert_eq!(tree.to_string(), "N{1}\n├─›R{0}\n└─»R{2}\n");

        // Fourth insert recolors the children black and hangs 3 red.
        tree.insert_red_black(3);
        assert_eq!(tree.to_string(), "N{1}\n├─›N{0}\n└─»N{2}\n   └─»R{3}\n");
        assert_eq!(
            tree.render(|x| format!("<{x}>")),
            "N{<1>}\n├─›N{<0>}\n└─»N{<2>}\n   └─»R{<3>}\n"
        );
    }

    #[test]
    fn test_depth() {
        let mut tree = BalancedTree::ordered();
        assert_eq!(tree.depth(), -1);
        for i in 0..10 {
            tree.insert_ordered(i);
            assert_eq!(tree.depth(), i as isize);
        }
    }

    #[test]
    fn test_ties_go_left() {
        let mut tree = BalancedTree::ordered();
        let root = tree.insert_ordered(4);
        let tie = tree.insert_ordered(4);
        assert_eq!(tree.left(root), Some(tie));
        assert!(tree.is_ordered());
    }

    #[test]
    fn test_rotation_round_trip() {
        let mut tree = ordered_from(&[4, 2, 6, 1, 3, 5, 7]);
        let root = tree.root().unwrap();
        let before: Vec<i32> = tree.iter().copied().collect();

        tree.rotate_right(root);
        let lifted = tree.root().unwrap();
        assert_eq!(*tree.element(lifted), 2);
        assert_eq!(tree.right(lifted), Some(root));
        assert_eq!(tree.parent(root), Some(lifted));
        assert_eq!(tree.left(root).map(|id| *tree.element(id)), Some(3));
        assert!(tree.is_well_linked());

        tree.rotate_left(lifted);
        assert_eq!(tree.root(), Some(root));
        assert_eq!(tree.left(root), Some(lifted));
        assert_eq!(tree.right(lifted).map(|id| *tree.element(id)), Some(3));
        assert!(tree.is_well_linked());
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
    }

    #[test]
    #[should_panic(expected = "right child")]
    fn test_rotate_without_pivot_panics() {
        let mut tree = ordered_from(&[1]);
        let root = tree.root().unwrap();
        tree.rotate_left(root);
    }

    #[test]
    #[should_panic(expected = "requires a red-black tree")]
    fn test_wrong_discipline_panics() {
        let mut tree = BalancedTree::ordered();
        tree.insert_red_black(1);
    }

    #[test]
    fn test_delete_ordered_cases() {
        let mut tree = ordered_from(&[50, 30, 70, 20, 40, 60, 80, 65]);

        // leaf
        assert_eq!(tree.delete_ordered(&20), Some(20));
        // one child
        assert_eq!(tree.delete_ordered(&60), Some(60));
        // two children; successor 65 takes the node
        let root = tree.root().unwrap();
        assert_eq!(tree.delete_ordered(&50), Some(50));
        assert_eq!(tree.root(), Some(root));
        assert_eq!(*tree.element(root), 65);

        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![30, 40, 65, 70, 80]);
        assert!(tree.is_well_linked());

        assert_eq!(tree.delete_ordered(&999), None);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_red_black_ascending_inserts_stay_balanced() {
        let mut tree = BalancedTree::red_black();
        for i in 0..1024 {
            tree.insert_red_black(i);
            assert!(tree.verify_red_black());
        }
        assert!(tree.depth() <= 20);
        assert!(tree.is_well_linked());
    }

    #[test]
    fn test_red_black_delete_everything() {
        let mut tree = BalancedTree::red_black();
        for i in 0..200 {
            tree.insert_red_black((i * 37) % 200);
        }
        for i in 0..200 {
            assert_eq!(tree.delete_red_black(&i), Some(i));
            assert!(tree.verify_red_black(), "broken after deleting {i}");
            assert!(tree.is_well_linked());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_colors() {
        let mut tree = BalancedTree::red_black();
        let a = tree.insert_red_black(1);
        assert_eq!(tree.color(a), Color::Black);
        let b = tree.insert_red_black(2);
        assert_eq!(tree.color(b), Color::Red);
        assert!(tree.is_red_black());

        let plain = ordered_from(&[1]);
        assert_eq!(plain.color(plain.root().unwrap()), Color::None);
        assert!(!plain.is_red_black());
    }

    #[test]
    fn test_stale_node_id_rejected() {
        let mut tree = ordered_from(&[2, 1]);
        let leaf = tree.search(&1).unwrap();
        tree.delete_ordered(&1);
        assert!(tree.get(leaf).is_none());
    }

    #[test]
    fn test_is_ordered_by_external_comparator() {
        let tree = ordered_from(&[3, 1, 2]);
        assert!(tree.is_ordered());
        assert!(!tree.is_ordered_by(|a: &i32, b: &i32| b.cmp(a)));
    }
}
