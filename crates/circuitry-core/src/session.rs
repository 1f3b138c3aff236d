//! Sessions: a default graph, scoped graphs, and the active-graph stack.
//!
//! A session owns every graph it creates. Nodes are always registered into
//! the *active* graph, which is the default graph unless a scoped graph has
//! been activated. Activation is scoped: [`Session::activate`] returns a
//! guard that restores the previously active graph when dropped, on every
//! exit path.

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::{debug, warn};

use crate::assignment::Assignment;
use crate::error::{BuildError, EvalError};
use crate::eval::{self, Evaluator, PartialEvalOptions};
use crate::graph::Graph;
use crate::limits::Limits;
use crate::node::{GateKind, Node, NodeId};
use crate::table::TruthTable;

/// Handle to a graph owned by a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(usize);

impl GraphId {
    /// The graph every session starts with.
    pub const DEFAULT: GraphId = GraphId(0);
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Owner of graphs and of the active-graph stack.
#[derive(Debug)]
pub struct Session {
    graphs: Vec<Graph>,
    /// Activated scoped graphs, innermost last. Empty means the default
    /// graph is active.
    active: Vec<GraphId>,
    limits: Limits,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with default limits.
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    /// Create a session with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            graphs: vec![Graph::with_limits(&limits)],
            active: Vec::new(),
            limits,
        }
    }

    /// Limits this session was created with.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Create a new, empty scoped graph. It is not activated.
    pub fn new_graph(&mut self) -> GraphId {
        let id = GraphId(self.graphs.len());
        self.graphs.push(Graph::with_limits(&self.limits));
        debug!(graph = %id, "created graph");
        id
    }

    /// Get a graph by handle.
    pub fn graph(&self, id: GraphId) -> Option<&Graph> {
        self.graphs.get(id.0)
    }

    /// The default graph.
    pub fn default_graph(&self) -> &Graph {
        &self.graphs[GraphId::DEFAULT.0]
    }

    /// Handle of the graph new nodes currently register into.
    pub fn active_graph_id(&self) -> GraphId {
        self.active.last().copied().unwrap_or(GraphId::DEFAULT)
    }

    /// The graph new nodes currently register into.
    pub fn active_graph(&self) -> &Graph {
        &self.graphs[self.active_graph_id().0]
    }

    /// Make `graph` active until the returned guard is dropped.
    ///
    /// Guards nest: dropping one restores whichever graph was active
    /// immediately before it was created.
    pub fn activate(&mut self, graph: GraphId) -> Result<ScopeGuard<'_>, BuildError> {
        self.push_active(graph)?;
        Ok(ScopeGuard {
            session: self,
            graph,
        })
    }

    /// Run `f` with `graph` active.
    ///
    /// The previous graph is restored when `f` returns or unwinds.
    pub fn scoped<T>(
        &mut self,
        graph: GraphId,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T, BuildError> {
        let mut guard = self.activate(graph)?;
        Ok(f(&mut *guard))
    }

    pub(crate) fn push_active(&mut self, graph: GraphId) -> Result<(), BuildError> {
        if graph.0 >= self.graphs.len() {
            return Err(BuildError::UnknownGraph(graph));
        }
        self.active.push(graph);
        debug!(graph = %graph, depth = self.active.len(), "activated graph");
        Ok(())
    }

    /// Pop `graph` off the active stack.
    ///
    /// The stack is left untouched unless `graph` is on top, so a release
    /// that does not match the latest activation cannot unbalance it.
    pub(crate) fn pop_active(&mut self, graph: GraphId) {
        if self.active.last() != Some(&graph) {
            warn!(graph = %graph, active = %self.active_graph_id(), "released a scope that is not active");
            return;
        }
        self.active.pop();
        debug!(graph = %graph, restored = %self.active_graph_id(), "deactivated graph");
    }

    /// Number of scoped activations currently open.
    pub fn scope_depth(&self) -> usize {
        self.active.len()
    }

    /// Register a node of `kind` in the active graph.
    pub fn node(&mut self, kind: GateKind, deps: &[NodeId]) -> Result<NodeId, BuildError> {
        let node = Node::new(kind, deps.to_vec())?;
        let active = self.active_graph_id();
        self.graphs[active.0].insert(node)
    }

    pub fn const_true(&mut self) -> Result<NodeId, BuildError> {
        self.node(GateKind::ConstTrue, &[])
    }

    pub fn const_false(&mut self) -> Result<NodeId, BuildError> {
        self.node(GateKind::ConstFalse, &[])
    }

    pub fn variable(&mut self) -> Result<NodeId, BuildError> {
        self.node(GateKind::Variable, &[])
    }

    pub fn and(&mut self, deps: &[NodeId]) -> Result<NodeId, BuildError> {
        self.node(GateKind::And, deps)
    }

    pub fn or(&mut self, deps: &[NodeId]) -> Result<NodeId, BuildError> {
        self.node(GateKind::Or, deps)
    }

    pub fn nand(&mut self, deps: &[NodeId]) -> Result<NodeId, BuildError> {
        self.node(GateKind::Nand, deps)
    }

    pub fn nor(&mut self, deps: &[NodeId]) -> Result<NodeId, BuildError> {
        self.node(GateKind::Nor, deps)
    }

    pub fn xor(&mut self, deps: &[NodeId]) -> Result<NodeId, BuildError> {
        self.node(GateKind::Xor, deps)
    }

    pub fn xnor(&mut self, deps: &[NodeId]) -> Result<NodeId, BuildError> {
        self.node(GateKind::Xnor, deps)
    }

    pub fn not(&mut self, dep: NodeId) -> Result<NodeId, BuildError> {
        self.node(GateKind::Not, &[dep])
    }

    /// Evaluate `root` against the active graph.
    pub fn evaluate(&self, root: NodeId, assignment: &Assignment) -> Result<bool, EvalError> {
        Evaluator::with_limits(self.limits).evaluate(self.active_graph(), root, assignment)
    }

    /// Evaluate `root` against the active graph, caching shared nodes.
    pub fn evaluate_memoized(
        &self,
        root: NodeId,
        assignment: &Assignment,
    ) -> Result<bool, EvalError> {
        Evaluator::with_limits(self.limits)
            .memoized()
            .evaluate(self.active_graph(), root, assignment)
    }

    /// Evaluate `root` against the active graph and print and/or return
    /// the result.
    pub fn partial_eval(
        &self,
        root: NodeId,
        assignment: &Assignment,
        options: PartialEvalOptions,
    ) -> Result<Option<bool>, EvalError> {
        let evaluator = Evaluator::with_limits(self.limits);
        eval::partial_eval(&evaluator, self.active_graph(), root, assignment, options)
    }

    /// Truth table of `root` over every variable of the active graph.
    pub fn truth_table(&self, root: NodeId) -> Result<TruthTable, EvalError> {
        TruthTable::build(self.active_graph(), root, &self.limits)
    }
}

/// Keeps a graph active; restores the previous one on drop.
///
/// Derefs to the [`Session`], so nodes can be registered and nested scopes
/// opened through the guard.
#[derive(Debug)]
pub struct ScopeGuard<'s> {
    session: &'s mut Session,
    graph: GraphId,
}

impl ScopeGuard<'_> {
    /// The graph this guard keeps active.
    pub fn graph_id(&self) -> GraphId {
        self.graph
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.session.pop_active(self.graph);
    }
}
