use std::fmt;

/// Error enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Returned by find_min() and find_max() APIs on an empty tree.
    EmptyTree,
    /// Fatal case, index entries are not in sort-order. Carries the
    /// offending (child, parent) keys.
    SortError(i64, i64),
    /// Fatal case, balance factor of node outside {-1, 0, 1}. Only
    /// checked for balanced trees.
    Unbalanced { key: i64, factor: isize },
    /// Fatal case, cached height of node differs from its actual height.
    HeightMismatch {
        key: i64,
        cached: usize,
        actual: usize,
    },
    /// Fatal case, number of nodes in the tree differs from its count.
    CountMismatch { counted: usize, expected: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyTree => write!(f, "empty tree"),
            Error::SortError(child, parent) => {
                write!(f, "sort error, child {} parent {}", child, parent)
            }
            Error::Unbalanced { key, factor } => {
                write!(f, "unbalanced node {}, factor {}", key, factor)
            }
            Error::HeightMismatch {
                key,
                cached,
                actual,
            } => write!(
                f,
                "height mismatch at {}, cached {} actual {}",
                key, cached, actual
            ),
            Error::CountMismatch { counted, expected } => write!(
                f,
                "count mismatch, counted {} expected {}",
                counted, expected
            ),
        }
    }
}

impl std::error::Error for Error {}
