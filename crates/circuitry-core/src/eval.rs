//! Evaluator for circuitry graphs.

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::assignment::Assignment;
use crate::error::EvalError;
use crate::graph::Graph;
use crate::limits::Limits;
use crate::node::{Fold, NodeId};

/// Evaluate `root` in `graph` with default limits and no memoization.
///
/// # Errors
///
/// Returns an error if:
/// - `root` or a dependency is not registered in `graph`
/// - A reachable variable has no value in `assignment`
/// - Resolution loops back on itself or descends past the depth limit
pub fn evaluate(graph: &Graph, root: NodeId, assignment: &Assignment) -> Result<bool, EvalError> {
    Evaluator::new().evaluate(graph, root, assignment)
}

/// Configured evaluator.
///
/// By default every path to a node resolves it again, so a node shared by
/// several parents is evaluated once per path. [`Evaluator::memoized`]
/// caches each node's value for the duration of one call instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    limits: Limits,
    memoize: bool,
}

impl Evaluator {
    /// Create an evaluator with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an evaluator with custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            memoize: false,
        }
    }

    /// Cache node values within a single evaluation.
    pub fn memoized(self) -> Self {
        Self {
            memoize: true,
            ..self
        }
    }

    /// Evaluate `root` in `graph` under `assignment`.
    pub fn evaluate(
        &self,
        graph: &Graph,
        root: NodeId,
        assignment: &Assignment,
    ) -> Result<bool, EvalError> {
        let mut walk = Walk {
            graph,
            assignment,
            max_depth: self.limits.max_depth,
            on_path: HashSet::new(),
            memo: self.memoize.then(HashMap::new),
        };
        let value = walk.run(root)?;
        debug!(root = %root, value, memoized = self.memoize, "evaluated");
        Ok(value)
    }
}

/// State of one evaluation call.
struct Walk<'g, 'a> {
    graph: &'g Graph,
    assignment: &'a Assignment,
    max_depth: usize,
    /// Gates currently being resolved.
    on_path: HashSet<NodeId>,
    memo: Option<HashMap<NodeId, bool>>,
}

/// A gate whose dependencies are still being pulled.
struct Frame<'g> {
    id: NodeId,
    deps: std::slice::Iter<'g, NodeId>,
    fold: Fold,
}

/// Outcome of entering a node.
enum Step<'g> {
    /// Resolved without descending.
    Value(bool),
    /// A gate that needs its dependencies.
    Frame(Frame<'g>),
}

impl<'g> Walk<'g, '_> {
    /// Resolve `root` depth-first on an explicit stack of open gates.
    ///
    /// Dependencies are pulled in order and only while the gate's result is
    /// still undecided, so evaluation order matches a plain recursive
    /// descent while the native stack stays flat.
    fn run(&mut self, root: NodeId) -> Result<bool, EvalError> {
        let mut frame = match self.enter(root, 0)? {
            Step::Value(value) => return Ok(value),
            Step::Frame(frame) => frame,
        };
        let mut parents: Vec<Frame<'g>> = Vec::new();

        loop {
            let next = if frame.fold.is_decided() {
                None
            } else {
                frame.deps.next().copied()
            };

            match next {
                Some(dep) => match self.enter(dep, parents.len() + 1)? {
                    Step::Value(value) => frame.fold.push(value),
                    Step::Frame(child) => parents.push(std::mem::replace(&mut frame, child)),
                },
                None => {
                    let value = self.leave(&frame);
                    match parents.pop() {
                        Some(parent) => {
                            frame = parent;
                            frame.fold.push(value);
                        }
                        None => return Ok(value),
                    }
                }
            }
        }
    }

    fn enter(&mut self, id: NodeId, depth: usize) -> Result<Step<'g>, EvalError> {
        if depth > self.max_depth {
            return Err(EvalError::DepthExceeded(self.max_depth));
        }
        if let Some(&value) = self.memo.as_ref().and_then(|memo| memo.get(&id)) {
            return Ok(Step::Value(value));
        }

        let graph = self.graph;
        let node = graph.get(id).ok_or(EvalError::NotFound(id))?;
        trace!(node = %id, kind = %node.kind(), depth, "resolving");

        let Some(fold) = Fold::new(node.kind()) else {
            let value = self
                .assignment
                .get(id)
                .ok_or(EvalError::MissingAssignment(id))?;
            return Ok(Step::Value(value));
        };
        if fold.is_decided() {
            return Ok(Step::Value(fold.finish()));
        }
        if !self.on_path.insert(id) {
            return Err(EvalError::Cycle(id));
        }

        Ok(Step::Frame(Frame {
            id,
            deps: node.dependencies().iter(),
            fold,
        }))
    }

    fn leave(&mut self, frame: &Frame<'_>) -> bool {
        let value = frame.fold.finish();
        self.on_path.remove(&frame.id);
        if let Some(memo) = self.memo.as_mut() {
            memo.insert(frame.id, value);
        }
        value
    }
}

/// How [`partial_eval`] reports its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialEvalOptions {
    /// Print the result to stdout.
    pub print_result: bool,
    /// Hand the result back to the caller.
    pub return_result: bool,
}

impl Default for PartialEvalOptions {
    fn default() -> Self {
        Self::returning()
    }
}

impl PartialEvalOptions {
    /// Print only.
    pub fn print() -> Self {
        Self {
            print_result: true,
            return_result: false,
        }
    }

    /// Return only.
    pub fn returning() -> Self {
        Self {
            print_result: false,
            return_result: true,
        }
    }
}

/// Evaluate `root` and print and/or return the result.
///
/// Returns `Ok(None)` when `options.return_result` is off.
pub fn partial_eval(
    evaluator: &Evaluator,
    graph: &Graph,
    root: NodeId,
    assignment: &Assignment,
    options: PartialEvalOptions,
) -> Result<Option<bool>, EvalError> {
    let value = evaluator.evaluate(graph, root, assignment)?;
    if options.print_result {
        println!("{value}");
    }
    Ok(options.return_result.then_some(value))
}
