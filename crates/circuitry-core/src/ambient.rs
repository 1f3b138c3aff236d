//! Thread-local session for building circuits without passing a session.
//!
//! Every function here operates on one [`Session`] per thread. Nodes register
//! into that session's active graph; [`scoped`] switches the active graph for
//! the duration of a closure.
//!
//! ```
//! use circuitry_core::ambient;
//!
//! let a = ambient::variable().unwrap();
//! let b = ambient::variable().unwrap();
//! let and = ambient::and(&[a, b]).unwrap();
//!
//! let value = ambient::evaluate(and, &[(a, true), (b, false)].into()).unwrap();
//! assert!(!value);
//! ```
//!
//! Closures passed to [`with_session`] must not call back into this module.

use std::cell::RefCell;

use crate::assignment::Assignment;
use crate::error::{BuildError, EvalError};
use crate::eval::PartialEvalOptions;
use crate::limits::Limits;
use crate::node::{GateKind, NodeId};
use crate::session::{GraphId, Session};
use crate::table::TruthTable;

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::new());
}

/// Run `f` with this thread's session.
pub fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> T {
    SESSION.with(|session| f(&mut session.borrow_mut()))
}

/// Replace this thread's session with a fresh one.
///
/// # Errors
///
/// Returns [`BuildError::ScopeActive`] when called from inside [`scoped`];
/// the current session is kept.
pub fn reset(limits: Limits) -> Result<(), BuildError> {
    with_session(|session| {
        if session.scope_depth() > 0 {
            return Err(BuildError::ScopeActive(session.active_graph_id()));
        }
        *session = Session::with_limits(limits);
        Ok(())
    })
}

/// Create a new scoped graph in this thread's session.
pub fn new_graph() -> GraphId {
    with_session(Session::new_graph)
}

/// Handle of the graph new nodes currently register into.
pub fn active_graph_id() -> GraphId {
    with_session(|session| session.active_graph_id())
}

/// Pops the thread's active stack on drop, including during unwinding.
struct AmbientScope(GraphId);

impl Drop for AmbientScope {
    fn drop(&mut self) {
        with_session(|session| session.pop_active(self.0));
    }
}

/// Run `f` with `graph` active in this thread's session.
///
/// The session is not borrowed while `f` runs, so `f` may freely use the
/// other functions of this module, including nested `scoped` calls.
pub fn scoped<T>(graph: GraphId, f: impl FnOnce() -> T) -> Result<T, BuildError> {
    with_session(|session| session.push_active(graph))?;
    let _scope = AmbientScope(graph);
    Ok(f())
}

pub fn node(kind: GateKind, deps: &[NodeId]) -> Result<NodeId, BuildError> {
    with_session(|session| session.node(kind, deps))
}

pub fn const_true() -> Result<NodeId, BuildError> {
    node(GateKind::ConstTrue, &[])
}

pub fn const_false() -> Result<NodeId, BuildError> {
    node(GateKind::ConstFalse, &[])
}

pub fn variable() -> Result<NodeId, BuildError> {
    node(GateKind::Variable, &[])
}

pub fn and(deps: &[NodeId]) -> Result<NodeId, BuildError> {
    node(GateKind::And, deps)
}

pub fn or(deps: &[NodeId]) -> Result<NodeId, BuildError> {
    node(GateKind::Or, deps)
}

pub fn nand(deps: &[NodeId]) -> Result<NodeId, BuildError> {
    node(GateKind::Nand, deps)
}

pub fn nor(deps: &[NodeId]) -> Result<NodeId, BuildError> {
    node(GateKind::Nor, deps)
}

pub fn xor(deps: &[NodeId]) -> Result<NodeId, BuildError> {
    node(GateKind::Xor, deps)
}

pub fn xnor(deps: &[NodeId]) -> Result<NodeId, BuildError> {
    node(GateKind::Xnor, deps)
}

pub fn not(dep: NodeId) -> Result<NodeId, BuildError> {
    node(GateKind::Not, &[dep])
}

/// Evaluate `root` against the active graph.
pub fn evaluate(root: NodeId, assignment: &Assignment) -> Result<bool, EvalError> {
    with_session(|session| session.evaluate(root, assignment))
}

/// Evaluate `root` against the active graph and print and/or return the
/// result.
pub fn partial_eval(
    root: NodeId,
    assignment: &Assignment,
    options: PartialEvalOptions,
) -> Result<Option<bool>, EvalError> {
    with_session(|session| session.partial_eval(root, assignment, options))
}

/// Truth table of `root` over every variable of the active graph.
pub fn truth_table(root: NodeId) -> Result<TruthTable, EvalError> {
    with_session(|session| session.truth_table(root))
}
