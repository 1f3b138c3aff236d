//! Variable assignments supplied to an evaluation.

use std::collections::HashMap;

use crate::node::NodeId;

/// Values that can be coerced to a truth value.
///
/// Integers are true when non-zero, so bit patterns such as `i % 2` can be
/// assigned directly.
pub trait Truthy {
    fn truthy(&self) -> bool;
}

impl Truthy for bool {
    fn truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl Truthy for $t {
                fn truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

truthy_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<T: Truthy + ?Sized> Truthy for &T {
    fn truthy(&self) -> bool {
        (**self).truthy()
    }
}

/// Mapping from variable nodes to truth values.
///
/// Entries for variables the evaluated root never reaches are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<NodeId, bool>,
}

impl Assignment {
    /// Create an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, returning its previous value.
    pub fn insert(&mut self, var: NodeId, value: impl Truthy) -> Option<bool> {
        self.values.insert(var, value.truthy())
    }

    /// Builder-style [`Assignment::insert`].
    pub fn with(mut self, var: NodeId, value: impl Truthy) -> Self {
        self.insert(var, value);
        self
    }

    /// Value assigned to a variable, if any.
    pub fn get(&self, var: NodeId) -> Option<bool> {
        self.values.get(&var).copied()
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been assigned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T: Truthy> FromIterator<(NodeId, T)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (NodeId, T)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(var, value)| (var, value.truthy()))
                .collect(),
        }
    }
}

impl<T: Truthy, const N: usize> From<[(NodeId, T); N]> for Assignment {
    fn from(entries: [(NodeId, T); N]) -> Self {
        entries.into_iter().collect()
    }
}
