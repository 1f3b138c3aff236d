//! circuitry: combinational boolean circuits as dependency graphs.
//!
//! # Overview
//!
//! A circuit is a set of nodes registered in a [`Graph`]. Each node is a
//! constant, an externally assigned variable, or a gate (AND, OR, NAND, NOR,
//! XOR, XNOR, NOT) over previously registered nodes. Key properties:
//!
//! - **Closed node set**: the ten [`GateKind`]s, dispatched by `match`
//! - **Eager validation**: arity and dependency membership are checked when
//!   a node is registered, never during evaluation
//! - **DAG by construction**: dependencies must already exist
//! - **Scoped graphs**: a [`Session`] keeps a stack of active graphs, and
//!   activation is released on every exit path
//!
//! # Example
//!
//! ```
//! use circuitry_core::{Assignment, Session};
//!
//! let mut session = Session::new();
//!
//! // output = v1 XOR v2 XOR v3
//! let v1 = session.variable().unwrap();
//! let v2 = session.variable().unwrap();
//! let v3 = session.variable().unwrap();
//! let x = session.xor(&[v1, v2, v3]).unwrap();
//!
//! let inputs: Assignment = [(v1, true), (v2, false), (v3, false)].into();
//! assert_eq!(session.evaluate(x, &inputs), Ok(true));
//! ```
//!
//! # Scoped graphs
//!
//! Nodes built while a scoped graph is active belong to that graph only:
//!
//! ```
//! use circuitry_core::{Assignment, EvalError, Session};
//!
//! let mut session = Session::new();
//! let scoped = session.new_graph();
//!
//! let node = session.scoped(scoped, |s| s.const_true()).unwrap().unwrap();
//!
//! // Back on the default graph.
//! let none = Assignment::new();
//! assert_eq!(session.evaluate(node, &none), Err(EvalError::NotFound(node)));
//!
//! let value = session.scoped(scoped, |s| s.evaluate(node, &none)).unwrap();
//! assert_eq!(value, Ok(true));
//! ```

pub mod ambient;
pub mod assignment;
pub mod error;
pub mod eval;
pub mod graph;
pub mod limits;
pub mod node;
pub mod session;
pub mod table;

pub use assignment::{Assignment, Truthy};
pub use error::{BuildError, EvalError};
pub use eval::{evaluate, partial_eval, Evaluator, PartialEvalOptions};
pub use graph::Graph;
pub use limits::Limits;
pub use node::{Arity, Fold, GateKind, Node, NodeId};
pub use session::{GraphId, ScopeGuard, Session};
pub use table::{Row, TruthTable};
