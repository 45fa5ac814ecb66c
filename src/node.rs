use std::{cmp, ops::Deref};

/// Node corresponds to a single key in a [`Tree`](crate::Tree) instance.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) key: i64,
    pub(crate) height: usize,             // cached, leaf is 1.
    pub(crate) left: Option<Box<Node>>,  // store: left child
    pub(crate) right: Option<Box<Node>>, // store: right child
}

impl Node {
    pub(crate) fn new(key: i64) -> Box<Node> {
        Box::new(Node {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    /// Return the key held by this node.
    #[inline]
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Return height of the sub-tree rooted at this node.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Return the left child, holding smaller keys.
    #[inline]
    pub fn left(&self) -> Option<&Node> {
        self.left_deref()
    }

    /// Return the right child, holding larger keys.
    #[inline]
    pub fn right(&self) -> Option<&Node> {
        self.right_deref()
    }

    #[inline]
    pub(crate) fn left_deref(&self) -> Option<&Node> {
        self.left.as_ref().map(Deref::deref)
    }

    #[inline]
    pub(crate) fn right_deref(&self) -> Option<&Node> {
        self.right.as_ref().map(Deref::deref)
    }

    /// renew the cached height from the children.
    #[inline]
    pub(crate) fn renew_height(&mut self) {
        let (lh, rh) = (height(self.left_deref()), height(self.right_deref()));
        self.height = cmp::max(lh, rh) + 1;
    }

    /// height of left sub-tree minus height of right sub-tree.
    #[inline]
    pub(crate) fn balance_factor(&self) -> isize {
        height(self.left_deref()) as isize - height(self.right_deref()) as isize
    }

    // in-order successor lookup, descend all-left.
    pub(crate) fn min_key(&self) -> i64 {
        let mut node = self;
        while let Some(left) = node.left_deref() {
            node = left;
        }
        node.key
    }

    pub(crate) fn max_key(&self) -> i64 {
        let mut node = self;
        while let Some(right) = node.right_deref() {
            node = right;
        }
        node.key
    }
}

/// Cached height of an optional sub-tree, absent sub-tree is 0.
#[inline]
pub(crate) fn height(node: Option<&Node>) -> usize {
    node.map_or(0, |node| node.height)
}

