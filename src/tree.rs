use std::{
    cmp::Ordering,
    marker::PhantomData,
    mem,
    ops::{Bound, Deref},
};

use crate::balance::{Avl, Balance, Unbalanced};
use crate::depth::Depth;
use crate::error::Error;
use crate::node::{self, Node};

// number of keys gathered by each batch of an in-order walk.
const ITER_LIMIT: usize = 100;

/// Unbalanced binary search tree over integer keys.
pub type OrderedTree = Tree<Unbalanced>;

/// Height balanced binary search tree over integer keys.
pub type BalancedTree = Tree<Avl>;

/// Tree manage a single instance of in-memory binary search tree over
/// `i64` keys, shaped by balancing policy `B`. Refer to [`OrderedTree`]
/// and [`BalancedTree`].
#[derive(Clone)]
pub struct Tree<B>
where
    B: Balance,
{
    name: String,
    root: Option<Box<Node>>,
    n_count: usize, // number of entries in the tree.
    _balance: PhantomData<B>,
}

/// Different ways to construct a new Tree instance.
impl<B> Tree<B>
where
    B: Balance,
{
    /// Create an empty instance of Tree, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Tree<B>
    where
        S: AsRef<str>,
    {
        Tree {
            name: name.as_ref().to_string(),
            root: Default::default(),
            n_count: Default::default(),
            _balance: PhantomData,
        }
    }

    /// Create a new instance of Tree and load it with keys from `iter`.
    /// Duplicate keys are ignored.
    pub fn load_from<S, I>(name: S, iter: I) -> Tree<B>
    where
        S: AsRef<str>,
        I: IntoIterator<Item = i64>,
    {
        let mut tree = Tree::new(name);
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}

/// Maintenance API.
impl<B> Tree<B>
where
    B: Balance,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating Tree instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return height of the tree, an empty tree has height 0 and a
    /// single entry has height 1.
    #[inline]
    pub fn height(&self) -> usize {
        node::height(self.root.as_ref().map(Deref::deref))
    }

    /// Return the root node, if any. Useful for inspecting tree shape.
    #[inline]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref().map(Deref::deref)
    }

    /// Return quickly with basic statisics, only entries() and
    /// node_size() are valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node>())
    }

    /// Validate tree with following rules:
    ///
    /// * Make sure keys are in sorted order.
    /// * Cached height of every node match its actual height.
    /// * Shape rule of balancing policy `B`, like AVL balance-factor.
    /// * Number of nodes match the number of entries.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, Error> {
        let mut stats = Stats::new(self.n_count, mem::size_of::<Node>());
        let mut depths = Depth::new();
        let mut counted = 0;
        let height = Tree::<B>::validate_tree(self.root(), 1, &mut counted, &mut depths)?;
        if counted != self.n_count {
            let expected = self.n_count;
            return Err(Error::CountMismatch { counted, expected });
        }
        stats.set_height(height);
        stats.set_depths(depths);
        Ok(stats)
    }
}

type Delete = (Option<Box<Node>>, bool);

/// Write operations on Tree instance.
impl<B> Tree<B>
where
    B: Balance,
{
    /// Insert key into this instance, return true if key was added. If
    /// key is already present, this is a no-op and return false.
    pub fn insert(&mut self, key: i64) -> bool {
        let (root, ok) = Tree::<B>::do_insert(self.root.take(), key);
        self.root = Some(root);
        if ok {
            self.n_count += 1;
        }
        ok
    }

    /// Delete key from this instance, return true if key was removed. If
    /// key is not present, then delete is effectively a no-op.
    pub fn delete(&mut self, key: i64) -> bool {
        let (root, ok) = Tree::<B>::do_delete(self.root.take(), key);
        self.root = root;
        if ok {
            self.n_count -= 1;
        }
        ok
    }

    /// Insert every key from `keys`, return the number of keys added.
    pub fn insert_batch(&mut self, keys: &[i64]) -> usize {
        keys.iter().filter(|key| self.insert(**key)).count()
    }

    /// Delete every key in `keys`, return the number of keys removed.
    pub fn delete_batch(&mut self, keys: &[i64]) -> usize {
        keys.iter().filter(|key| self.delete(**key)).count()
    }
}

/// Read operations on Tree instance.
impl<B> Tree<B>
where
    B: Balance,
{
    /// Check whether key is present.
    pub fn contains(&self, key: i64) -> bool {
        let mut node = self.root();
        while let Some(nref) = node {
            node = match nref.key.cmp(&key) {
                Ordering::Less => nref.right_deref(),
                Ordering::Greater => nref.left_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Return the smallest key, fail with [`Error::EmptyTree`] if there
    /// are no entries.
    pub fn find_min(&self) -> Result<i64, Error> {
        self.root().map(Node::min_key).ok_or(Error::EmptyTree)
    }

    /// Return the largest key, fail with [`Error::EmptyTree`] if there
    /// are no entries.
    pub fn find_max(&self) -> Result<i64, Error> {
        self.root().map(Node::max_key).ok_or(Error::EmptyTree)
    }

    /// Return an iterator over all keys in ascending order. Each call
    /// starts a fresh walk from the smallest key.
    pub fn traverse_in_order(&self) -> Iter {
        Iter {
            root: self.root(),
            node_iter: vec![].into_iter(),
            after_key: Some(Bound::Unbounded),
            limit: ITER_LIMIT,
        }
    }

    /// Same as [`Tree::traverse_in_order`].
    #[inline]
    pub fn iter(&self) -> Iter {
        self.traverse_in_order()
    }
}

impl<B> Tree<B>
where
    B: Balance,
{
    fn do_insert(node: Option<Box<Node>>, key: i64) -> (Box<Node>, bool) {
        let mut node = match node {
            None => return (Node::new(key), true),
            Some(node) => node,
        };

        let ok = match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, ok) = Tree::<B>::do_insert(node.left.take(), key);
                node.left = Some(left);
                ok
            }
            Ordering::Less => {
                let (right, ok) = Tree::<B>::do_insert(node.right.take(), key);
                node.right = Some(right);
                ok
            }
            Ordering::Equal => return (node, false),
        };

        node.renew_height();
        (B::on_insert(node, key), ok)
    }

    fn do_delete(node: Option<Box<Node>>, key: i64) -> Delete {
        let mut node = match node {
            None => return (None, false),
            Some(node) => node,
        };

        let ok = match node.key.cmp(&key) {
            Ordering::Greater => {
                let (left, ok) = Tree::<B>::do_delete(node.left.take(), key);
                node.left = left;
                ok
            }
            Ordering::Less => {
                let (right, ok) = Tree::<B>::do_delete(node.right.take(), key);
                node.right = right;
                ok
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, right) => return (right, true),
                (left, None) => return (left, true),
                (left, Some(right)) => {
                    // copy in-order successor and remove it from right
                    // sub-tree, which rebalances on its own way back up.
                    let successor = right.min_key();
                    let (right, ok) = Tree::<B>::do_delete(Some(right), successor);
                    if !ok {
                        panic!("do_delete(): missing successor ? Call the programmer");
                    }
                    node.key = successor;
                    node.left = left;
                    node.right = right;
                    true
                }
            },
        };

        node.renew_height();
        (Some(B::on_delete(node)), ok)
    }

    // return the actual height of the sub-tree rooted at `node`.
    fn validate_tree(
        node: Option<&Node>,
        depth: usize,
        counted: &mut usize,
        depths: &mut Depth,
    ) -> Result<usize, Error> {
        let node = match node {
            None => return Ok(0),
            Some(node) => node,
        };
        *counted += 1;

        let (left, right) = (node.left_deref(), node.right_deref());
        if left.is_none() && right.is_none() {
            depths.sample(depth);
        }
        if let Some(left) = left {
            if left.key >= node.key {
                return Err(Error::SortError(left.key, node.key));
            }
        }
        if let Some(right) = right {
            if right.key <= node.key {
                return Err(Error::SortError(right.key, node.key));
            }
        }

        let lh = Tree::<B>::validate_tree(left, depth + 1, counted, depths)?;
        let rh = Tree::<B>::validate_tree(right, depth + 1, counted, depths)?;
        let actual = std::cmp::max(lh, rh) + 1;
        if actual != node.height {
            let (key, cached) = (node.key, node.height);
            return Err(Error::HeightMismatch { key, cached, actual });
        }
        B::check(node)?;
        Ok(actual)
    }
}

impl<'a, B> IntoIterator for &'a Tree<B>
where
    B: Balance,
{
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// In-order walk over a [`Tree`], yielding keys in ascending order.
pub struct Iter<'a> {
    root: Option<&'a Node>,
    node_iter: std::vec::IntoIter<i64>,
    after_key: Option<Bound<i64>>,
    limit: usize,
}

impl<'a> Iter<'a> {
    fn scan_iter(
        &self,
        node: Option<&Node>,
        acc: &mut Vec<i64>, // accumulator for batch of keys
    ) -> bool {
        let node = match node {
            None => return true,
            Some(node) => node,
        };

        let (left, right) = (node.left_deref(), node.right_deref());
        match &self.after_key {
            None => return false,
            Some(Bound::Included(akey)) | Some(Bound::Excluded(akey)) => {
                if node.key <= *akey {
                    return self.scan_iter(right, acc);
                }
            }
            Some(Bound::Unbounded) => (),
        }

        if !self.scan_iter(left, acc) {
            return false;
        }

        acc.push(node.key);
        if acc.len() >= self.limit {
            return false;
        }

        self.scan_iter(right, acc)
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        match self.node_iter.next() {
            None => {
                let mut acc: Vec<i64> = Vec::with_capacity(self.limit);
                self.scan_iter(self.root, &mut acc);
                self.after_key = acc.last().map(|key| Bound::Excluded(*key));
                self.node_iter = acc.into_iter();
                self.node_iter.next()
            }
            item @ Some(_) => item,
        }
    }
}

/// Statistics on [`Tree`]. Serves two purpose:
///
/// * To get partial but quick statistics via [`Tree::stats`] method.
/// * To get full statisics via [`Tree::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    height: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            height: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_height(&mut self, height: usize) {
        self.height = Some(height)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Tree`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for a tree node. EG:
    ///
    /// ```
    /// use avl_bench::OrderedTree;
    /// let tree = OrderedTree::new("myinstance");
    ///
    /// // key: 8 bytes, height: 8 bytes, two child links: 16 bytes
    /// assert_eq!(tree.stats().node_size(), 32);
    /// ```
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return height of the tree, computed from its leaves.
    #[inline]
    pub fn height(&self) -> Option<usize> {
        self.height
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match &self.depths {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
