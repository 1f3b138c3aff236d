//! Node vocabulary for circuitry graphs.
//!
//! This module defines the closed set of logic elements a circuit is built
//! from. Every element is either a leaf (a constant or an externally
//! assigned variable) or a gate that folds the values of its dependencies.

use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::BuildError;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identity of a node.
///
/// Identities are allocated from a single counter, so two nodes never share
/// an id even when they live in different graphs. A node registered in one
/// graph is therefore never confused with an identically-shaped node in
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh, never-before-seen identity.
    ///
    /// The counter is 64 bits wide; it cannot wrap within any realistic
    /// process lifetime.
    pub(crate) fn fresh() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value of this identity.
    pub fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// The kind of a node, without its dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateKind {
    // === Leaves ===
    /// Constant true.
    ConstTrue,
    /// Constant false.
    ConstFalse,
    /// Externally assigned input.
    Variable,

    // === N-ary gates ===
    /// Logical AND: A ∧ B ∧ ...
    And,
    /// Logical OR: A ∨ B ∨ ...
    Or,
    /// Logical NAND: ¬(A ∧ B ∧ ...)
    Nand,
    /// Logical NOR: ¬(A ∨ B ∨ ...)
    Nor,
    /// Odd parity: A ⊕ B ⊕ ...
    Xor,
    /// Even parity: ¬(A ⊕ B ⊕ ...)
    Xnor,

    // === Unary ===
    /// Logical NOT: ¬A
    Not,
}

/// Number of dependencies a kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many.
    Fixed(usize),
    /// Any number, including zero.
    Variadic,
}

impl Arity {
    /// Check whether `count` dependencies satisfy this arity.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Fixed(n) => n == count,
            Arity::Variadic => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Fixed(n) => write!(f, "exactly {n}"),
            Arity::Variadic => f.write_str("any number of"),
        }
    }
}

impl GateKind {
    /// All kinds, in declaration order.
    pub const ALL: [GateKind; 10] = [
        GateKind::ConstTrue,
        GateKind::ConstFalse,
        GateKind::Variable,
        GateKind::And,
        GateKind::Or,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
        GateKind::Not,
    ];

    /// How many dependencies this kind takes.
    pub fn arity(self) -> Arity {
        match self {
            GateKind::ConstTrue | GateKind::ConstFalse | GateKind::Variable => Arity::Fixed(0),
            GateKind::Not => Arity::Fixed(1),
            GateKind::And
            | GateKind::Or
            | GateKind::Nand
            | GateKind::Nor
            | GateKind::Xor
            | GateKind::Xnor => Arity::Variadic,
        }
    }

    /// Check if this kind is a leaf (takes no dependencies).
    pub fn is_leaf(self) -> bool {
        matches!(
            self,
            GateKind::ConstTrue | GateKind::ConstFalse | GateKind::Variable
        )
    }

    /// Combine dependency values, stopping at the first error.
    ///
    /// Values are pulled lazily. AND-like and OR-like kinds stop pulling as
    /// soon as the result is decided, so a later value is never produced
    /// once an earlier one settles the outcome. Parity kinds pull every
    /// value.
    ///
    /// Returns `Ok(None)` for [`GateKind::Variable`], whose value never
    /// comes from dependencies. Arity is not checked here.
    pub fn try_fold<E, I>(self, values: I) -> Result<Option<bool>, E>
    where
        I: IntoIterator<Item = Result<bool, E>>,
    {
        let Some(mut fold) = Fold::new(self) else {
            return Ok(None);
        };
        let mut values = values.into_iter();
        while !fold.is_decided() {
            match values.next() {
                Some(value) => fold.push(value?),
                None => break,
            }
        }
        Ok(Some(fold.finish()))
    }

    /// Combine already-resolved dependency values.
    ///
    /// ```
    /// use circuitry_core::GateKind;
    ///
    /// assert_eq!(GateKind::Xor.fold([true, true, true]), Some(true));
    /// assert_eq!(GateKind::Nand.fold([]), Some(false));
    /// assert_eq!(GateKind::Variable.fold([]), None);
    /// ```
    pub fn fold<I>(self, values: I) -> Option<bool>
    where
        I: IntoIterator<Item = bool>,
    {
        match self.try_fold(values.into_iter().map(Ok::<bool, Infallible>)) {
            Ok(folded) => folded,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateKind::ConstTrue => "TRUE",
            GateKind::ConstFalse => "FALSE",
            GateKind::Variable => "VAR",
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
            GateKind::Not => "NOT",
        };
        f.write_str(name)
    }
}

/// How a [`Fold`] accumulates values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FoldOp {
    /// Result fixed at creation (constants).
    Fixed,
    /// Conjunction; decided by the first `false`.
    All,
    /// Disjunction; decided by the first `true`.
    Any,
    /// Odd parity; never decided early.
    Parity,
}

/// Incremental combination of one node's dependency values.
///
/// Values are pushed one at a time. Once [`Fold::is_decided`] reports
/// `true`, further values cannot change the result and need not be
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fold {
    op: FoldOp,
    acc: bool,
    negate: bool,
    decided: bool,
}

impl Fold {
    /// Start folding for `kind`.
    ///
    /// Returns `None` for [`GateKind::Variable`]: its value comes from the
    /// assignment, not from dependencies.
    pub fn new(kind: GateKind) -> Option<Self> {
        let (op, acc, negate) = match kind {
            GateKind::Variable => return None,
            GateKind::ConstTrue => (FoldOp::Fixed, true, false),
            GateKind::ConstFalse => (FoldOp::Fixed, false, false),
            GateKind::And => (FoldOp::All, true, false),
            GateKind::Nand | GateKind::Not => (FoldOp::All, true, true),
            GateKind::Or => (FoldOp::Any, false, false),
            GateKind::Nor => (FoldOp::Any, false, true),
            GateKind::Xor => (FoldOp::Parity, false, false),
            GateKind::Xnor => (FoldOp::Parity, false, true),
        };
        Some(Self {
            op,
            acc,
            negate,
            decided: op == FoldOp::Fixed,
        })
    }

    /// Add one dependency value.
    pub fn push(&mut self, value: bool) {
        match self.op {
            FoldOp::Fixed => {}
            FoldOp::All if !value => {
                self.acc = false;
                self.decided = true;
            }
            FoldOp::Any if value => {
                self.acc = true;
                self.decided = true;
            }
            FoldOp::All | FoldOp::Any => {}
            FoldOp::Parity => self.acc ^= value,
        }
    }

    /// Check if the result can no longer change.
    pub fn is_decided(&self) -> bool {
        self.decided
    }

    /// The folded value.
    pub fn finish(self) -> bool {
        self.acc ^ self.negate
    }
}

/// A logic element together with its ordered dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    ConstTrue,
    ConstFalse,
    Variable,
    And(Vec<NodeId>),
    Or(Vec<NodeId>),
    Nand(Vec<NodeId>),
    Nor(Vec<NodeId>),
    Xor(Vec<NodeId>),
    Xnor(Vec<NodeId>),
    Not(NodeId),
}

impl Node {
    /// Create a node, checking the dependency count against the kind.
    pub fn new(kind: GateKind, deps: Vec<NodeId>) -> Result<Self, BuildError> {
        let expected = kind.arity();
        if !expected.accepts(deps.len()) {
            return Err(BuildError::Arity {
                kind,
                expected,
                found: deps.len(),
            });
        }

        let node = match kind {
            GateKind::ConstTrue => Node::ConstTrue,
            GateKind::ConstFalse => Node::ConstFalse,
            GateKind::Variable => Node::Variable,
            GateKind::And => Node::And(deps),
            GateKind::Or => Node::Or(deps),
            GateKind::Nand => Node::Nand(deps),
            GateKind::Nor => Node::Nor(deps),
            GateKind::Xor => Node::Xor(deps),
            GateKind::Xnor => Node::Xnor(deps),
            GateKind::Not => Node::Not(deps[0]),
        };
        Ok(node)
    }

    /// The kind of this node.
    pub fn kind(&self) -> GateKind {
        match self {
            Node::ConstTrue => GateKind::ConstTrue,
            Node::ConstFalse => GateKind::ConstFalse,
            Node::Variable => GateKind::Variable,
            Node::And(_) => GateKind::And,
            Node::Or(_) => GateKind::Or,
            Node::Nand(_) => GateKind::Nand,
            Node::Nor(_) => GateKind::Nor,
            Node::Xor(_) => GateKind::Xor,
            Node::Xnor(_) => GateKind::Xnor,
            Node::Not(_) => GateKind::Not,
        }
    }

    /// Dependencies in the order they were supplied.
    pub fn dependencies(&self) -> &[NodeId] {
        match self {
            Node::ConstTrue | Node::ConstFalse | Node::Variable => &[],
            Node::And(deps)
            | Node::Or(deps)
            | Node::Nand(deps)
            | Node::Nor(deps)
            | Node::Xor(deps)
            | Node::Xnor(deps) => deps,
            Node::Not(dep) => std::slice::from_ref(dep),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAIRS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

    fn fold2(kind: GateKind, a: bool, b: bool) -> bool {
        kind.fold([a, b]).unwrap()
    }

    #[test]
    fn test_two_input_truth_tables() {
        for (a, b) in PAIRS {
            assert_eq!(fold2(GateKind::And, a, b), a && b);
            assert_eq!(fold2(GateKind::Or, a, b), a || b);
            assert_eq!(fold2(GateKind::Nand, a, b), !(a && b));
            assert_eq!(fold2(GateKind::Nor, a, b), !(a || b));
            assert_eq!(fold2(GateKind::Xor, a, b), a ^ b);
            assert_eq!(fold2(GateKind::Xnor, a, b), a == b);
        }
    }

    #[test]
    fn test_empty_fold_identities() {
        assert_eq!(GateKind::And.fold([]), Some(true));
        assert_eq!(GateKind::Or.fold([]), Some(false));
        assert_eq!(GateKind::Nand.fold([]), Some(false));
        assert_eq!(GateKind::Nor.fold([]), Some(true));
        assert_eq!(GateKind::Xor.fold([]), Some(false));
        assert_eq!(GateKind::Xnor.fold([]), Some(true));
    }

    #[test]
    fn test_leaf_folds() {
        assert_eq!(GateKind::ConstTrue.fold([]), Some(true));
        assert_eq!(GateKind::ConstFalse.fold([]), Some(false));
        assert_eq!(GateKind::Variable.fold([]), None);
    }

    #[test]
    fn test_not_fold() {
        assert_eq!(GateKind::Not.fold([true]), Some(false));
        assert_eq!(GateKind::Not.fold([false]), Some(true));
    }

    #[test]
    fn test_and_stops_at_first_false() {
        let values = [Ok(false), Err("not pulled")];
        assert_eq!(GateKind::And.try_fold(values), Ok(Some(false)));

        let values = [Ok(true), Err("pulled")];
        assert_eq!(GateKind::Or.try_fold(values), Ok(Some(true)));
    }

    #[test]
    fn test_parity_pulls_everything() {
        let values = [Ok(true), Err("pulled")];
        assert_eq!(GateKind::Xor.try_fold(values), Err("pulled"));
    }

    #[test]
    fn test_fold_decides_early() {
        let mut and = Fold::new(GateKind::And).unwrap();
        and.push(true);
        assert!(!and.is_decided());
        and.push(false);
        assert!(and.is_decided());
        and.push(true);
        assert!(!and.finish());

        let mut nor = Fold::new(GateKind::Nor).unwrap();
        nor.push(true);
        assert!(nor.is_decided());
        assert!(!nor.finish());

        let mut xnor = Fold::new(GateKind::Xnor).unwrap();
        xnor.push(true);
        xnor.push(true);
        assert!(!xnor.is_decided());
        assert!(xnor.finish());
    }

    #[test]
    fn test_fold_constants_and_variable() {
        let t = Fold::new(GateKind::ConstTrue).unwrap();
        assert!(t.is_decided());
        assert!(t.finish());
        assert!(!Fold::new(GateKind::ConstFalse).unwrap().finish());
        assert_eq!(Fold::new(GateKind::Variable), None);
    }

    #[test]
    fn test_arity() {
        assert_eq!(GateKind::Not.arity(), Arity::Fixed(1));
        assert_eq!(GateKind::Variable.arity(), Arity::Fixed(0));
        assert_eq!(GateKind::Xnor.arity(), Arity::Variadic);
        assert!(Arity::Variadic.accepts(0));
        assert!(!Arity::Fixed(1).accepts(2));
    }

    #[test]
    fn test_not_rejects_wrong_arity() {
        let a = NodeId::fresh();
        let b = NodeId::fresh();

        assert_eq!(
            Node::new(GateKind::Not, vec![]),
            Err(BuildError::Arity {
                kind: GateKind::Not,
                expected: Arity::Fixed(1),
                found: 0,
            })
        );
        assert!(Node::new(GateKind::Not, vec![a, b]).is_err());
        assert_eq!(Node::new(GateKind::Not, vec![a]), Ok(Node::Not(a)));
    }

    #[test]
    fn test_leaves_reject_dependencies() {
        let a = NodeId::fresh();
        for kind in [GateKind::ConstTrue, GateKind::ConstFalse, GateKind::Variable] {
            assert!(Node::new(kind, vec![a]).is_err(), "{kind} accepted a dependency");
        }
    }

    #[test]
    fn test_dependencies_keep_order() {
        let ids: Vec<NodeId> = (0..4).map(|_| NodeId::fresh()).collect();
        let node = Node::new(GateKind::Xor, ids.clone()).unwrap();
        assert_eq!(node.kind(), GateKind::Xor);
        assert_eq!(node.dependencies(), ids.as_slice());
        assert_eq!(Node::Not(ids[2]).dependencies(), &[ids[2]]);
    }

    #[test]
    fn test_kind_roundtrip_through_node() {
        let dep = NodeId::fresh();
        for kind in GateKind::ALL {
            let deps = match kind.arity() {
                Arity::Fixed(n) => vec![dep; n],
                Arity::Variadic => vec![dep, dep],
            };
            assert_eq!(Node::new(kind, deps).unwrap().kind(), kind);
        }
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = NodeId::fresh();
        let b = NodeId::fresh();
        assert_ne!(a, b);
        assert!(b > a);
        assert_eq!(format!("{a}"), format!("n{}", a.index()));
    }
}
