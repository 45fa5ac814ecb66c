use crate::balance::{Avl, Balance, Unbalanced};
use crate::error::Error;
use crate::node::Node;
use crate::tree::BalancedTree;

fn leaf(key: i64) -> Option<Box<Node>> {
    Some(Node::new(key))
}

fn join(key: i64, left: Option<Box<Node>>, right: Option<Box<Node>>) -> Option<Box<Node>> {
    let mut node = Node::new(key);
    node.left = left;
    node.right = right;
    node.renew_height();
    Some(node)
}

fn keys(node: Option<&Node>, acc: &mut Vec<i64>) {
    if let Some(node) = node {
        keys(node.left_deref(), acc);
        acc.push(node.key);
        keys(node.right_deref(), acc);
    }
}

#[test]
fn test_rotate_left() {
    // 2 -> (1, 4 -> (3, 5))
    let node = join(2, leaf(1), join(4, leaf(3), leaf(5))).unwrap();
    let node = Avl::rotate_left(node);
    assert_eq!(node.key, 4);
    assert_eq!(node.height, 3);
    assert_eq!(node.left_deref().unwrap().key, 2);
    assert_eq!(node.left_deref().unwrap().height, 2);
    assert_eq!(node.left_deref().unwrap().right_deref().unwrap().key, 3);
    assert_eq!(node.right_deref().unwrap().key, 5);

    let mut acc = vec![];
    keys(Some(&node), &mut acc);
    assert_eq!(acc, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_rotate_right() {
    // 4 -> (2 -> (1, 3), 5)
    let node = join(4, join(2, leaf(1), leaf(3)), leaf(5)).unwrap();
    let node = Avl::rotate_right(node);
    assert_eq!(node.key, 2);
    assert_eq!(node.height, 3);
    assert_eq!(node.right_deref().unwrap().key, 4);
    assert_eq!(node.right_deref().unwrap().left_deref().unwrap().key, 3);
    assert_eq!(node.left_deref().unwrap().key, 1);

    let mut acc = vec![];
    keys(Some(&node), &mut acc);
    assert_eq!(acc, vec![1, 2, 3, 4, 5]);
}

#[test]
#[should_panic]
fn test_rotate_missing_child() {
    Avl::rotate_left(Node::new(1));
}

#[test]
fn test_balance_factor() {
    let node = join(3, join(2, leaf(1), None), None).unwrap();
    assert_eq!(node.balance_factor(), 2);
    assert_eq!(node.left_deref().unwrap().balance_factor(), 1);
    assert_eq!(node.left_deref().unwrap().left_deref().unwrap().balance_factor(), 0);
    assert_eq!(
        Avl::check(&node),
        Err(Error::Unbalanced { key: 3, factor: 2 })
    );
    assert_eq!(Unbalanced::check(&node), Ok(()));

    let node = join(1, None, join(2, None, leaf(3))).unwrap();
    assert_eq!(node.balance_factor(), -2);
    assert!(Avl::check(&node).is_err());
    assert!(Avl::check(node.right_deref().unwrap()).is_ok());
}

#[test]
fn test_unbalanced_policy() {
    let node = join(3, join(2, leaf(1), None), None).unwrap();
    let node = Unbalanced::on_insert(node, 1);
    assert_eq!(node.key, 3);
    let node = Unbalanced::on_delete(node);
    assert_eq!(node.key, 3);
    assert_eq!(node.height, 3);
}

#[test]
fn test_insert_rotations() {
    // left-left, left-right, right-right, right-left.
    for seq in [[3, 2, 1], [3, 1, 2], [1, 2, 3], [1, 3, 2]].iter() {
        let avl: BalancedTree = BalancedTree::load_from("test-avl", seq.to_vec());
        let root = avl.root().unwrap();
        assert_eq!(root.key(), 2, "{:?}", seq);
        assert_eq!(root.left().unwrap().key(), 1, "{:?}", seq);
        assert_eq!(root.right().unwrap().key(), 3, "{:?}", seq);
        assert_eq!(avl.height(), 2);
        assert!(avl.validate().is_ok());
    }
}

#[test]
fn test_delete_rotations() {
    // (insert sequence, deleted key, (root, left, right))
    let testcases = vec![
        (vec![2, 1, 3, 4], 1, (3, 2, 4)), // right heavy, single
        (vec![3, 2, 5, 4], 2, (4, 3, 5)), // right heavy, double
        (vec![3, 2, 4, 1], 4, (2, 1, 3)), // left heavy, single
        (vec![3, 1, 4, 2], 4, (2, 1, 3)), // left heavy, double
    ];
    for (seq, key, (root, left, right)) in testcases.into_iter() {
        let mut avl: BalancedTree = BalancedTree::load_from("test-avl", seq.clone());
        assert!(avl.delete(key));
        let node = avl.root().unwrap();
        assert_eq!(node.key(), root, "{:?}", seq);
        assert_eq!(node.left().unwrap().key(), left, "{:?}", seq);
        assert_eq!(node.right().unwrap().key(), right, "{:?}", seq);
        assert!(avl.validate().is_ok());
    }

    // left child with balance factor 0 takes a single rotation.
    let mut avl: BalancedTree = BalancedTree::load_from("test-avl", vec![5, 3, 8, 2, 4]);
    assert!(avl.delete(8));
    let node = avl.root().unwrap();
    assert_eq!(node.key(), 3);
    assert_eq!(node.right().unwrap().key(), 5);
    assert_eq!(node.right().unwrap().left().unwrap().key(), 4);
    assert_eq!(avl.height(), 3);
    assert!(avl.validate().is_ok());
}

#[test]
fn test_delete_successor_path() {
    // successor removal rebalances the right sub-tree on its own.
    //          4
    //      2       6
    //    1   3   5   8
    //                  9
    let mut avl: BalancedTree = BalancedTree::load_from("test-avl", vec![4, 2, 6, 1, 3, 5, 8, 9]);
    assert!(avl.delete(4));
    assert_eq!(avl.root().unwrap().key(), 5);
    let right = avl.root().unwrap().right().unwrap();
    assert_eq!(right.key(), 8);
    assert_eq!(right.left().unwrap().key(), 6);
    assert_eq!(right.right().unwrap().key(), 9);
    assert_eq!(avl.iter().collect::<Vec<i64>>(), vec![1, 2, 3, 5, 6, 8, 9]);
    assert!(avl.validate().is_ok());
}
