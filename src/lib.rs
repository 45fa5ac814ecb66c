mod balance;
mod depth;
mod error;
mod node;
pub mod perf;
mod tree;

pub use crate::balance::{Avl, Balance, Unbalanced};
pub use crate::depth::Depth;
pub use crate::error::Error;
pub use crate::node::Node;
pub use crate::tree::{BalancedTree, Iter, OrderedTree, Stats, Tree};

#[cfg(test)]
mod balance_test;
