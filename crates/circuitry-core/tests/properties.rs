//! Property tests for gate semantics.

use circuitry_core::{Assignment, GateKind, NodeId, Session};
use proptest::prelude::*;

/// Register one variable per value and assign them.
fn variables(session: &mut Session, values: &[bool]) -> (Vec<NodeId>, Assignment) {
    let vars: Vec<NodeId> = values
        .iter()
        .map(|_| session.variable().expect("variable registers"))
        .collect();
    let assignment = vars.iter().copied().zip(values.iter().copied()).collect();
    (vars, assignment)
}

fn eval_gate(kind: GateKind, values: &[bool]) -> bool {
    let mut session = Session::new();
    let (vars, assignment) = variables(&mut session, values);
    let gate = session.node(kind, &vars).expect("gate registers");
    session
        .evaluate(gate, &assignment)
        .expect("all variables assigned")
}

proptest! {
    #[test]
    fn property_xor_is_odd_parity(values in proptest::collection::vec(any::<bool>(), 0..12)) {
        let odd = values.iter().filter(|&&v| v).count() % 2 == 1;
        prop_assert_eq!(eval_gate(GateKind::Xor, &values), odd);
    }

    #[test]
    fn property_xnor_negates_xor(values in proptest::collection::vec(any::<bool>(), 0..12)) {
        prop_assert_eq!(
            eval_gate(GateKind::Xnor, &values),
            !eval_gate(GateKind::Xor, &values)
        );
    }

    #[test]
    fn property_and_or_match_iterators(values in proptest::collection::vec(any::<bool>(), 0..12)) {
        prop_assert_eq!(eval_gate(GateKind::And, &values), values.iter().all(|&v| v));
        prop_assert_eq!(eval_gate(GateKind::Or, &values), values.iter().any(|&v| v));
        prop_assert_eq!(eval_gate(GateKind::Nand, &values), !values.iter().all(|&v| v));
        prop_assert_eq!(eval_gate(GateKind::Nor, &values), !values.iter().any(|&v| v));
    }

    #[test]
    fn property_not_negates(value in any::<bool>()) {
        prop_assert_eq!(eval_gate(GateKind::Not, &[value]), !value);
    }

    #[test]
    fn property_memoized_matches_plain(
        values in proptest::collection::vec(any::<bool>(), 1..6),
        layers in 1usize..8,
    ) {
        let mut session = Session::new();
        let (vars, assignment) = variables(&mut session, &values);
        let mut layer = vars;
        for depth in 0..layers {
            let kind = [GateKind::Xor, GateKind::Nand, GateKind::Or, GateKind::Xnor][depth % 4];
            let a = session.node(kind, &layer).expect("gate registers");
            let b = session.not(a).expect("gate registers");
            layer = vec![a, b, layer[0]];
        }
        let root = session.and(&layer).expect("gate registers");

        prop_assert_eq!(
            session.evaluate(root, &assignment),
            session.evaluate_memoized(root, &assignment)
        );
    }
}
