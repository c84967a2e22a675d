//! Wire Shape of Leveled Documents
//!
//! Courses and tutorials both persist their tree as a list of
//! `[levelIndex, [node, ...]]` pairs. [`WireLevel`] is that pair as a tuple
//! struct, so serde enforces the arity and the numeric index on read.

use serde::{Deserialize, Serialize};

/// One persisted level: `[index, nodes]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireLevel<T>(pub usize, pub Vec<T>);

impl<T> WireLevel<T> {
    pub fn index(&self) -> usize {
        self.0
    }

    pub fn nodes(&self) -> &[T] {
        &self.1
    }
}
