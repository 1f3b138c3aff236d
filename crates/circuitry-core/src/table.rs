//! Full truth tables over a graph's variables.

use std::fmt;

use crate::assignment::Assignment;
use crate::error::EvalError;
use crate::eval::Evaluator;
use crate::graph::Graph;
use crate::limits::Limits;
use crate::node::NodeId;

/// One assignment of every variable and the root's value under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Variable values, in the table's variable order.
    pub inputs: Vec<bool>,
    /// Value of the root.
    pub output: bool,
}

/// The root's value under every assignment of the graph's variables.
///
/// Variables are ordered as registered; the first is the most significant
/// bit, so rows are sorted by their rendered input bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    root: NodeId,
    variables: Vec<NodeId>,
    rows: Vec<Row>,
}

impl TruthTable {
    /// Enumerate all `2^n` assignments of `graph`'s `n` variables.
    ///
    /// Every registered variable takes part, including ones `root` never
    /// reaches; such columns simply do not influence the output.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not in `graph`, if the graph has more
    /// than `limits.max_variables` variables, or if evaluation fails.
    pub fn build(graph: &Graph, root: NodeId, limits: &Limits) -> Result<Self, EvalError> {
        if !graph.contains(root) {
            return Err(EvalError::NotFound(root));
        }

        let variables = graph.variables().to_vec();
        let count = variables.len();
        let max = limits.max_variables.min(usize::BITS as usize - 1);
        if count > max {
            return Err(EvalError::TooManyVariables { count, max });
        }

        let evaluator = Evaluator::with_limits(*limits).memoized();
        let mut rows = Vec::with_capacity(1 << count);
        for bits in 0..(1usize << count) {
            let inputs: Vec<bool> = (0..count)
                .map(|i| (bits >> (count - 1 - i)) & 1 == 1)
                .collect();
            let assignment: Assignment = variables.iter().copied().zip(inputs.iter()).collect();
            let output = evaluator.evaluate(graph, root, &assignment)?;
            rows.push(Row { inputs, output });
        }

        Ok(Self {
            root,
            variables,
            rows,
        })
    }

    /// The evaluated root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Column order.
    pub fn variables(&self) -> &[NodeId] {
        &self.variables
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of assignments for which the root is true.
    pub fn count_true(&self) -> usize {
        self.rows.iter().filter(|row| row.output).count()
    }

    /// Check if the root is true under every assignment.
    pub fn is_tautology(&self) -> bool {
        self.count_true() == self.rows.len()
    }

    /// Check if the root is false under every assignment.
    pub fn is_contradiction(&self) -> bool {
        self.count_true() == 0
    }
}

impl fmt::Display for TruthTable {
    /// One `bits|output` line per row, e.g. `01|1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for &input in &row.inputs {
                write!(f, "{}", u8::from(input))?;
            }
            writeln!(f, "|{}", u8::from(row.output))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{GateKind, Node};

    #[test]
    fn test_and_table() {
        let mut graph = Graph::new();
        let a = graph.insert(Node::Variable).unwrap();
        let b = graph.insert(Node::Variable).unwrap();
        let and = graph
            .insert(Node::new(GateKind::And, vec![a, b]).unwrap())
            .unwrap();

        let table = TruthTable::build(&graph, and, &Limits::default()).unwrap();
        assert_eq!(table.variables(), &[a, b]);
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.to_string(), "00|0\n01|0\n10|0\n11|1\n");
        assert_eq!(table.count_true(), 1);
    }

    #[test]
    fn test_first_variable_is_most_significant() {
        let mut graph = Graph::new();
        let a = graph.insert(Node::Variable).unwrap();
        let _b = graph.insert(Node::Variable).unwrap();
        let not_a = graph.insert(Node::Not(a)).unwrap();

        let table = TruthTable::build(&graph, not_a, &Limits::default()).unwrap();
        assert_eq!(table.to_string(), "00|1\n01|1\n10|0\n11|0\n");
    }

    #[test]
    fn test_no_variables() {
        let mut graph = Graph::new();
        let nor = graph.insert(Node::Nor(vec![])).unwrap();

        let table = TruthTable::build(&graph, nor, &Limits::default()).unwrap();
        assert_eq!(table.rows(), &[Row { inputs: vec![], output: true }]);
        assert_eq!(table.to_string(), "|1\n");
        assert!(table.is_tautology());
    }

    #[test]
    fn test_tautology_and_contradiction() {
        let mut graph = Graph::new();
        let a = graph.insert(Node::Variable).unwrap();
        let not_a = graph.insert(Node::Not(a)).unwrap();
        let either = graph.insert(Node::Or(vec![a, not_a])).unwrap();
        let both = graph.insert(Node::And(vec![a, not_a])).unwrap();

        let limits = Limits::default();
        assert!(TruthTable::build(&graph, either, &limits).unwrap().is_tautology());
        assert!(TruthTable::build(&graph, both, &limits).unwrap().is_contradiction());
    }

    #[test]
    fn test_too_many_variables() {
        let mut graph = Graph::new();
        for _ in 0..3 {
            graph.insert(Node::Variable).unwrap();
        }
        let t = graph.insert(Node::ConstTrue).unwrap();

        let result = TruthTable::build(&graph, t, &Limits::new(64, 8, 2));
        assert_eq!(result, Err(EvalError::TooManyVariables { count: 3, max: 2 }));
    }

    #[test]
    fn test_root_not_found() {
        let mut other = Graph::new();
        let foreign = other.insert(Node::ConstTrue).unwrap();

        let result = TruthTable::build(&Graph::new(), foreign, &Limits::default());
        assert_eq!(result, Err(EvalError::NotFound(foreign)));
    }
}
