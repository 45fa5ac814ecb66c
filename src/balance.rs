use crate::{error::Error, node::Node};

/// Balancing policy applied by [`Tree`](crate::Tree) on every frame while
/// unwinding from an insert or a delete. Each hook takes ownership of
/// the sub-tree root, whose cached height is already renewed, and
/// returns the (possibly new) sub-tree root.
pub trait Balance {
    /// Rebalance after `key` was inserted somewhere below `node`.
    fn on_insert(node: Box<Node>, key: i64) -> Box<Node>;

    /// Rebalance after a key was removed somewhere below `node`.
    fn on_delete(node: Box<Node>) -> Box<Node>;

    /// Check the shape rule enforced by this policy, called for every
    /// node by [`Tree::validate`](crate::Tree::validate).
    fn check(_node: &Node) -> Result<(), Error> {
        Ok(())
    }
}

/// No rebalancing, plain binary search tree.
#[derive(Clone, Debug, Default)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    #[inline]
    fn on_insert(node: Box<Node>, _key: i64) -> Box<Node> {
        node
    }

    #[inline]
    fn on_delete(node: Box<Node>) -> Box<Node> {
        node
    }
}

/// Height balancing using [AVL][avl] rotations.
///
/// [avl]: https://en.wikipedia.org/wiki/AVL_tree
#[derive(Clone, Debug, Default)]
pub struct Avl;

impl Balance for Avl {
    fn on_insert(mut node: Box<Node>, key: i64) -> Box<Node> {
        let balance = node.balance_factor();
        if balance > 1 {
            if key < node.left_deref().map_or(key, |left| left.key) {
                Avl::rotate_right(node)
            } else {
                node.left = node.left.take().map(Avl::rotate_left);
                Avl::rotate_right(node)
            }
        } else if balance < -1 {
            if key > node.right_deref().map_or(key, |right| right.key) {
                Avl::rotate_left(node)
            } else {
                node.right = node.right.take().map(Avl::rotate_right);
                Avl::rotate_left(node)
            }
        } else {
            node
        }
    }

    fn on_delete(mut node: Box<Node>) -> Box<Node> {
        let balance = node.balance_factor();
        if balance > 1 {
            // key that caused the imbalance is gone, decide from the child.
            let factor = node.left_deref().map_or(0, Node::balance_factor);
            if factor >= 0 {
                Avl::rotate_right(node)
            } else {
                node.left = node.left.take().map(Avl::rotate_left);
                Avl::rotate_right(node)
            }
        } else if balance < -1 {
            let factor = node.right_deref().map_or(0, Node::balance_factor);
            if factor <= 0 {
                Avl::rotate_left(node)
            } else {
                node.right = node.right.take().map(Avl::rotate_right);
                Avl::rotate_left(node)
            }
        } else {
            node
        }
    }

    fn check(node: &Node) -> Result<(), Error> {
        let factor = node.balance_factor();
        if factor < -1 || factor > 1 {
            return Err(Error::Unbalanced {
                key: node.key,
                factor,
            });
        }
        Ok(())
    }
}

impl Avl {
    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //          left      x              node      xr
    //                   / \             /  \
    //                 xl   xr        left   xl
    //
    pub(crate) fn rotate_left(mut node: Box<Node>) -> Box<Node> {
        let mut x = match node.right.take() {
            Some(x) => x,
            None => panic!("rotate_left(): missing right child ? Call the programmer"),
        };
        node.right = x.left.take();
        node.renew_height();
        x.left = Some(node);
        x.renew_height();
        x
    }

    //               |                         |
    //              node                       x
    //              /  \                      / \
    //             /    \                    /   \
    //            /      \                  /     \
    //           x       right            xl      node
    //          / \                               / \
    //        xl   xr                           xr  right
    //
    pub(crate) fn rotate_right(mut node: Box<Node>) -> Box<Node> {
        let mut x = match node.left.take() {
            Some(x) => x,
            None => panic!("rotate_right(): missing left child ? Call the programmer"),
        };
        node.left = x.right.take();
        node.renew_height();
        x.right = Some(node);
        x.renew_height();
        x
    }
}
