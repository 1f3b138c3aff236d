//! Dependency graph for circuitry circuits.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{BuildError, EvalError};
use crate::limits::Limits;
use crate::node::{GateKind, Node, NodeId};

/// Registry mapping each node to its kind and ordered dependencies.
///
/// A graph only grows: nodes are never mutated or removed once inserted.
/// Every dependency must already be registered in the same graph when a
/// node is inserted, so the graph is a DAG by construction and iteration in
/// registration order is a topological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// Nodes keyed by id. Ids are allocated increasingly, so key order is
    /// registration order.
    nodes: BTreeMap<NodeId, Node>,
    /// Variable ids in registration order.
    variables: Vec<NodeId>,
    max_nodes: usize,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create an empty graph with default limits.
    pub fn new() -> Self {
        Self::with_limits(&Limits::default())
    }

    /// Create an empty graph with custom limits.
    pub fn with_limits(limits: &Limits) -> Self {
        Self {
            nodes: BTreeMap::new(),
            variables: Vec::new(),
            max_nodes: limits.max_nodes,
        }
    }

    /// Register a node and return its fresh identity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A dependency is not registered in this graph
    /// - The graph already holds the maximum number of nodes
    pub fn insert(&mut self, node: Node) -> Result<NodeId, BuildError> {
        if self.nodes.len() >= self.max_nodes {
            return Err(BuildError::MaxNodesExceeded(self.max_nodes));
        }
        if let Some(&dep) = node
            .dependencies()
            .iter()
            .find(|&&dep| !self.nodes.contains_key(&dep))
        {
            return Err(BuildError::UnknownDependency(dep));
        }

        let id = NodeId::fresh();
        debug!(node = %id, kind = %node.kind(), deps = node.dependencies().len(), "registered node");
        if node.kind() == GateKind::Variable {
            self.variables.push(id);
        }
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Register a node under a chosen id, skipping dependency checks.
    ///
    /// Only used to build malformed graphs in tests.
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, id: NodeId, node: Node) {
        if node.kind() == GateKind::Variable {
            self.variables.push(id);
        }
        self.nodes.insert(id, node);
    }

    /// Ordered dependencies of a node.
    pub fn lookup(&self, id: NodeId) -> Result<&[NodeId], EvalError> {
        self.nodes
            .get(&id)
            .map(Node::dependencies)
            .ok_or(EvalError::NotFound(id))
    }

    /// Get a node by its id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check if a node is registered here.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no node has been registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Registered variables, in registration order.
    pub fn variables(&self) -> &[NodeId] {
        &self.variables
    }

    /// Iterate nodes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(&id, node)| (id, node))
    }

    /// Longest dependency path below `root`.
    ///
    /// Leaves have depth 0; a gate has depth 1 + the deepest of its
    /// dependencies. A gate with no dependencies has depth 1.
    pub fn depth(&self, root: NodeId) -> Result<usize, EvalError> {
        if !self.contains(root) {
            return Err(EvalError::NotFound(root));
        }

        // Registration order is topological, so one forward pass suffices.
        let mut depths: HashMap<NodeId, usize> = HashMap::new();
        for (id, node) in self.iter() {
            if id > root {
                break;
            }
            let depth = if node.kind().is_leaf() {
                0
            } else {
                1 + node
                    .dependencies()
                    .iter()
                    .filter_map(|dep| depths.get(dep).copied())
                    .max()
                    .unwrap_or(0)
            };
            depths.insert(id, depth);
        }

        Ok(depths.get(&root).copied().unwrap_or(0))
    }
}
