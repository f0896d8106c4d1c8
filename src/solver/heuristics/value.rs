//! Heuristics for ordering the values of the variable being branched on.

use crate::solver::{csp::Csp, engine::VariableId, value::DomainValue};

/// A trait for strategies that determine the order in which a variable's
/// current-domain values are tried.
///
/// The ordering is advisory only: it never prunes a domain, it just decides
/// which branch the driver explores first.
pub trait ValueOrderingHeuristic<V: DomainValue> {
    /// Returns the variable's current-domain values in the order they should
    /// be tried.
    fn order_values(&self, csp: &Csp<V>, variable: VariableId) -> Vec<V>;
}

/// Returns values in their current-domain order, unchanged.
pub struct IdentityValueHeuristic;

impl<V: DomainValue> ValueOrderingHeuristic<V> for IdentityValueHeuristic {
    fn order_values(&self, csp: &Csp<V>, variable: VariableId) -> Vec<V> {
        csp.variable(variable).current_domain()
    }
}

/// Least Constraining Value (LCV): tries first the value that eliminates the
/// fewest (other-variable, other-value) pairs across the constraints
/// touching the branching variable.
///
/// Each candidate's cost is the number of pairs that currently have support
/// but would lose it were the candidate chosen, summed over the touching
/// constraints. A candidate with no support at all under some constraint is
/// effectively inconsistent; it gets an infinite cost and sorts last, so the
/// driver discovers the dead end only after the viable values are spent.
pub struct LeastConstrainingValue;

const INFINITE_COST: u64 = u64::MAX;

impl<V: DomainValue> ValueOrderingHeuristic<V> for LeastConstrainingValue {
    fn order_values(&self, csp: &Csp<V>, variable: VariableId) -> Vec<V> {
        let vars = csp.variables();
        let mut scored: Vec<(V, u64)> = Vec::new();

        'candidates: for value in csp.variable(variable).current_domain() {
            let mut eliminated: u64 = 0;
            for &cid in csp.constraints_with(variable) {
                let constraint = csp.constraint(cid);
                if !constraint.has_support(vars, variable, &value) {
                    scored.push((value, INFINITE_COST));
                    continue 'candidates;
                }
                for other in constraint.unassigned_vars(vars) {
                    if other == variable {
                        continue;
                    }
                    for other_value in csp.variable(other).current_domain() {
                        if constraint.has_support(vars, other, &other_value)
                            && !constraint.has_support_assuming(
                                vars,
                                other,
                                &other_value,
                                variable,
                                &value,
                            )
                        {
                            eliminated += 1;
                        }
                    }
                }
            }
            scored.push((value, eliminated));
        }

        // Stable sort: equal costs keep the current-domain order.
        scored.sort_by_key(|(_, cost)| *cost);
        scored.into_iter().map(|(value, _)| value).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::value::StandardValue;

    fn int(i: i64) -> StandardValue {
        StandardValue::Int(i)
    }

    #[test]
    fn identity_returns_the_current_domain_order() {
        let mut csp = Csp::new("identity");
        let a = csp
            .add_variable("a", vec![int(2), int(0), int(1)])
            .unwrap();
        csp.variable_mut(a).prune_value(&int(0)).unwrap();

        let order = IdentityValueHeuristic.order_values(&csp, a);
        assert_eq!(order, vec![int(2), int(1)]);
    }

    #[test]
    fn lcv_sorts_by_eliminated_pairs_ascending() {
        // Table over (a, b): {(0,1), (1,0), (1,2)}.
        // Choosing a=0 strips b of 0 and 2 (two eliminations); choosing a=1
        // strips b of 1 only.
        let mut csp = Csp::new("lcv");
        let a = csp.add_variable("a", vec![int(0), int(1)]).unwrap();
        let b = csp
            .add_variable("b", vec![int(0), int(1), int(2)])
            .unwrap();
        csp.add_constraint(
            "table",
            vec![a, b],
            vec![
                vec![int(0), int(1)],
                vec![int(1), int(0)],
                vec![int(1), int(2)],
            ],
        )
        .unwrap();

        let order = LeastConstrainingValue.order_values(&csp, a);
        assert_eq!(order, vec![int(1), int(0)]);
    }

    #[test]
    fn unsupported_values_sort_last() {
        // a=2 appears in no tuple, so it is effectively inconsistent.
        let mut csp = Csp::new("lcv-dead");
        let a = csp
            .add_variable("a", vec![int(2), int(0), int(1)])
            .unwrap();
        let b = csp
            .add_variable("b", vec![int(0), int(1), int(2)])
            .unwrap();
        csp.add_constraint(
            "table",
            vec![a, b],
            vec![
                vec![int(0), int(1)],
                vec![int(1), int(0)],
                vec![int(1), int(2)],
            ],
        )
        .unwrap();

        let order = LeastConstrainingValue.order_values(&csp, a);
        assert_eq!(order, vec![int(1), int(0), int(2)]);
    }

    #[test]
    fn lcv_never_prunes() {
        let mut csp = Csp::new("advisory");
        let a = csp.add_variable("a", vec![int(0), int(1)]).unwrap();
        let b = csp.add_variable("b", vec![int(0), int(1)]).unwrap();
        csp.add_constraint("table", vec![a, b], vec![vec![int(0), int(1)]])
            .unwrap();

        let before = csp.clone();
        let _ = LeastConstrainingValue.order_values(&csp, a);
        assert_eq!(csp, before);
    }

    #[test]
    fn lcv_matches_brute_force_elimination_counts() {
        // Triangle with uneven domains; cross-check the cost of each value
        // of `a` against a direct count over the same definition.
        let mut csp = Csp::new("cross-check");
        let domain: Vec<_> = (0..3).map(int).collect();
        let a = csp.add_variable("a", domain.clone()).unwrap();
        let b = csp.add_variable("b", domain.clone()).unwrap();
        let c = csp.add_variable("c", vec![int(0), int(1)]).unwrap();
        let tuples = |ka: i64, kb: i64| {
            let mut out = Vec::new();
            for x in 0..ka {
                for y in 0..kb {
                    if x != y {
                        out.push(vec![int(x), int(y)]);
                    }
                }
            }
            out
        };
        csp.add_constraint("a != b", vec![a, b], tuples(3, 3))
            .unwrap();
        csp.add_constraint("a != c", vec![a, c], tuples(3, 2))
            .unwrap();
        csp.add_constraint("b != c", vec![b, c], tuples(3, 2))
            .unwrap();

        let mut expected: Vec<(StandardValue, u64)> = Vec::new();
        for value in csp.variable(a).current_domain() {
            let mut count = 0u64;
            for &cid in csp.constraints_with(a) {
                let constraint = csp.constraint(cid);
                for other in constraint.unassigned_vars(csp.variables()) {
                    if other == a {
                        continue;
                    }
                    for w in csp.variable(other).current_domain() {
                        let supported = constraint.has_support(csp.variables(), other, &w);
                        let survives = constraint.has_support_assuming(
                            csp.variables(),
                            other,
                            &w,
                            a,
                            &value,
                        );
                        if supported && !survives {
                            count += 1;
                        }
                    }
                }
            }
            expected.push((value, count));
        }
        expected.sort_by_key(|(_, count)| *count);
        let expected_order: Vec<_> = expected.into_iter().map(|(v, _)| v).collect();

        assert_eq!(
            LeastConstrainingValue.order_values(&csp, a),
            expected_order
        );
    }
}
