//! Error types for circuit construction and evaluation.

use thiserror::Error;

use crate::node::{Arity, GateKind, NodeId};
use crate::session::GraphId;

/// Errors that can occur while registering nodes or switching graphs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Dependency count does not match the node kind.
    #[error("{kind} takes {expected} dependencies, got {found}")]
    Arity {
        kind: GateKind,
        expected: Arity,
        found: usize,
    },

    /// Dependency is not registered in the target graph.
    #[error("dependency {0} is not registered in this graph")]
    UnknownDependency(NodeId),

    /// Maximum node count exceeded.
    #[error("maximum nodes exceeded ({0})")]
    MaxNodesExceeded(usize),

    /// Graph handle does not belong to this session.
    #[error("unknown graph {0}")]
    UnknownGraph(GraphId),

    /// Session cannot be replaced while a scoped graph is active.
    #[error("graph {0} is still active")]
    ScopeActive(GraphId),
}

/// Errors that can occur during evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Node is not registered in the graph being evaluated.
    #[error("node {0} not found in graph")]
    NotFound(NodeId),

    /// Reachable variable has no value in the assignment.
    #[error("missing assignment for variable {0}")]
    MissingAssignment(NodeId),

    /// Node was reached again while still being resolved.
    #[error("cycle detected at node {0}")]
    Cycle(NodeId),

    /// Evaluation descended deeper than the configured limit.
    #[error("maximum evaluation depth exceeded ({0})")]
    DepthExceeded(usize),

    /// Truth table would have too many rows.
    #[error("too many variables for a truth table ({count} > {max})")]
    TooManyVariables { count: usize, max: usize },
}
