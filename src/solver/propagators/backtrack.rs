use tracing::debug;

use crate::{
    error::Result,
    solver::{
        csp::Csp,
        engine::VariableId,
        propagator::{Propagation, Propagator},
        value::DomainValue,
    },
};

/// The plain backtracking check: no pruning at all.
///
/// After an assignment it evaluates only those constraints over the assigned
/// variable whose scope is now fully assigned, and reports the branch dead on
/// the first violation. The preprocessing pass is a no-op. Weakest and
/// cheapest of the propagators.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackPropagator;

impl<V: DomainValue> Propagator<V> for BacktrackPropagator {
    fn label(&self) -> &'static str {
        "bt"
    }

    fn propagate(
        &self,
        csp: &mut Csp<V>,
        just_assigned: Option<VariableId>,
    ) -> Result<Propagation<V>> {
        let Some(variable) = just_assigned else {
            return Ok(Propagation::consistent(Vec::new()));
        };

        for &cid in csp.constraints_with(variable) {
            let constraint = csp.constraint(cid);
            if let Some(tuple) = constraint.assigned_tuple(csp.variables()) {
                if !constraint.check(&tuple) {
                    debug!(constraint = constraint.name(), "fully assigned constraint violated");
                    return Ok(Propagation::inconsistent(Vec::new()));
                }
            }
        }
        Ok(Propagation::consistent(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::{csp::Csp, value::StandardValue};

    fn int(i: i64) -> StandardValue {
        StandardValue::Int(i)
    }

    fn pair_not_equal() -> Csp<StandardValue> {
        let mut csp = Csp::new("pair");
        let a = csp.add_variable("a", vec![int(0), int(1)]).unwrap();
        let b = csp.add_variable("b", vec![int(0), int(1)]).unwrap();
        csp.add_constraint(
            "a != b",
            vec![a, b],
            vec![vec![int(0), int(1)], vec![int(1), int(0)]],
        )
        .unwrap();
        csp
    }

    #[test]
    fn preprocessing_pass_is_a_no_op() {
        let mut csp = pair_not_equal();
        let before = csp.clone();
        let result = BacktrackPropagator.propagate(&mut csp, None).unwrap();

        assert!(result.consistent);
        assert!(result.pruned.is_empty());
        assert_eq!(csp, before);
    }

    #[test]
    fn ignores_constraints_with_unassigned_variables() {
        let mut csp = pair_not_equal();
        csp.variable_mut(0).assign(int(0)).unwrap();

        let result = BacktrackPropagator.propagate(&mut csp, Some(0)).unwrap();
        assert!(result.consistent);
        assert!(result.pruned.is_empty());
    }

    #[test]
    fn rejects_a_violated_fully_assigned_constraint() {
        let mut csp = pair_not_equal();
        csp.variable_mut(0).assign(int(0)).unwrap();
        csp.variable_mut(1).assign(int(0)).unwrap();

        let result = BacktrackPropagator.propagate(&mut csp, Some(1)).unwrap();
        assert!(!result.consistent);
        assert!(result.pruned.is_empty());
    }

    #[test]
    fn accepts_a_satisfied_fully_assigned_constraint() {
        let mut csp = pair_not_equal();
        csp.variable_mut(0).assign(int(0)).unwrap();
        csp.variable_mut(1).assign(int(1)).unwrap();

        let result = BacktrackPropagator.propagate(&mut csp, Some(1)).unwrap();
        assert!(result.consistent);
    }
}
