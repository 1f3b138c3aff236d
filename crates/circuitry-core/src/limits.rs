//! Resource limits for graph growth and evaluation.

/// Resource limits for a session.
///
/// These bound how large a graph may grow, how deep evaluation may recurse
/// before it is reported as runaway, and how many variables a truth table
/// may enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nodes in a single graph.
    pub max_nodes: usize,
    /// Maximum dependency depth during evaluation.
    pub max_depth: usize,
    /// Maximum number of variables a truth table may enumerate.
    pub max_variables: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nodes: 65_536,
            max_depth: 1024,
            max_variables: 16,
        }
    }
}

impl Limits {
    /// Create limits with custom values.
    pub fn new(max_nodes: usize, max_depth: usize, max_variables: usize) -> Self {
        Self {
            max_nodes,
            max_depth,
            max_variables,
        }
    }

    /// Permissive limits for large generated circuits.
    pub fn permissive() -> Self {
        Self {
            max_nodes: 1 << 20,
            max_depth: 4096,
            max_variables: 24,
        }
    }

    /// Strict limits for small, hand-built circuits.
    pub fn strict() -> Self {
        Self {
            max_nodes: 256,
            max_depth: 64,
            max_variables: 8,
        }
    }
}
