use tracing::{debug, trace};

use crate::{
    error::Result,
    solver::{
        csp::Csp,
        engine::VariableId,
        propagator::{Propagation, Propagator},
        value::DomainValue,
        work_list::WorkList,
    },
};

/// Generalised arc consistency.
///
/// Maintains a work queue of constraints to re-check, seeded with every
/// constraint (preprocessing) or with the constraints touching the
/// just-assigned variable. Each popped constraint is scanned across its
/// entire scope for (variable, value) pairs without support; every prune
/// re-enqueues the constraints touching the pruned variable, so the pruning
/// wavefront propagates transitively until the queue drains or a domain wipes
/// out. At a consistent fixpoint no value anywhere lacks support in any
/// constraint, which is strictly stronger than forward checking's one-hop
/// guarantee.
#[derive(Debug, Clone, Copy, Default)]
pub struct GacPropagator;

impl<V: DomainValue> Propagator<V> for GacPropagator {
    fn label(&self) -> &'static str {
        "gac"
    }

    fn propagate(
        &self,
        csp: &mut Csp<V>,
        just_assigned: Option<VariableId>,
    ) -> Result<Propagation<V>> {
        let mut worklist = WorkList::new();
        match just_assigned {
            Some(variable) => {
                for &cid in csp.constraints_with(variable) {
                    worklist.push_back(cid);
                }
            }
            None => {
                for cid in 0..csp.constraints().len() {
                    worklist.push_back(cid);
                }
            }
        }

        let mut pruned = Vec::new();
        while let Some(cid) = worklist.pop_front() {
            trace!(constraint = csp.constraint(cid).name(), "revising");
            let scope = csp.constraint(cid).scope().to_vec();
            for vid in scope {
                for value in csp.variable(vid).current_domain() {
                    if csp.has_support(cid, vid, &value) {
                        continue;
                    }
                    if csp.variable(vid).assigned_value() == Some(&value) {
                        // The assigned value itself is unextendable, so the
                        // branch is dead; the raw store is left for the
                        // driver's unassign to restore.
                        debug!(
                            variable = csp.variable(vid).name(),
                            constraint = csp.constraint(cid).name(),
                            "assigned value lost all support"
                        );
                        return Ok(Propagation::inconsistent(pruned));
                    }
                    csp.prune(vid, &value)?;
                    pruned.push((vid, value));
                    if csp.variable(vid).current_domain_size() == 0 {
                        debug!(
                            variable = csp.variable(vid).name(),
                            constraint = csp.constraint(cid).name(),
                            "domain wiped out"
                        );
                        return Ok(Propagation::inconsistent(pruned));
                    }
                    // Re-check everything touching the pruned variable,
                    // including the constraint being scanned: pairs examined
                    // earlier in this scan may have leaned on the pruned value.
                    for &other in csp.constraints_with(vid) {
                        worklist.push_back(other);
                    }
                }
            }
        }
        Ok(Propagation::consistent(pruned))
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

    fn not_equal_tuples(k: i64) -> Vec<Vec<StandardValue>> {
        let mut tuples = Vec::new();
        for a in 0..k {
            for b in 0..k {
                if a != b {
                    tuples.push(vec![int(a), int(b)]);
                }
            }
        }
        tuples
    }

    fn assert_arc_consistent(csp: &Csp<StandardValue>) {
        for vid in csp.unassigned_variables() {
            for value in csp.variable(vid).current_domain() {
                for &cid in csp.constraints_with(vid) {
                    assert!(
                        csp.has_support(cid, vid, &value),
                        "{}={:?} lacks support in {}",
                        csp.variable(vid).name(),
                        value,
                        csp.constraint(cid).name()
                    );
                }
            }
        }
    }

    #[test]
    fn pruning_wavefront_propagates_transitively() {
        // a is a singleton; a != b forces b, then b != c forces c, two hops
        // away from the seed.
        let mut csp = Csp::new("chain");
        let a = csp.add_variable("a", vec![int(0)]).unwrap();
        let b = csp.add_variable("b", vec![int(0), int(1)]).unwrap();
        let c = csp.add_variable("c", vec![int(0), int(1)]).unwrap();
        csp.add_constraint("a != b", vec![a, b], vec![vec![int(0), int(1)]])
            .unwrap();
        csp.add_constraint("b != c", vec![b, c], not_equal_tuples(2))
            .unwrap();

        let result = GacPropagator.propagate(&mut csp, None).unwrap();
        assert!(result.consistent);
        assert_eq!(csp.variable(b).current_domain(), vec![int(1)]);
        assert_eq!(csp.variable(c).current_domain(), vec![int(0)]);
        assert_arc_consistent(&csp);
    }

    // Inequality tuples over possibly uneven domain sizes.
    fn not_equal_tuples_sized(ka: i64, kb: i64) -> Vec<Vec<StandardValue>> {
        let mut tuples = Vec::new();
        for a in 0..ka {
            for b in 0..kb {
                if a != b {
                    tuples.push(vec![int(a), int(b)]);
                }
            }
        }
        tuples
    }

    #[test]
    fn fixpoint_is_arc_consistent() {
        let mut csp = Csp::new("mixed");
        let a = csp.add_variable("a", vec![int(0), int(1), int(2)]).unwrap();
        let b = csp.add_variable("b", vec![int(0), int(1)]).unwrap();
        let c = csp.add_variable("c", vec![int(0), int(1)]).unwrap();
        csp.add_constraint("a != b", vec![a, b], not_equal_tuples_sized(3, 2))
            .unwrap();
        csp.add_constraint("b != c", vec![b, c], not_equal_tuples_sized(2, 2))
            .unwrap();
        csp.add_constraint("a != c", vec![a, c], not_equal_tuples_sized(3, 2))
            .unwrap();

        let result = GacPropagator.propagate(&mut csp, None).unwrap();
        assert!(result.consistent);
        assert_arc_consistent(&csp);
    }

    #[test]
    fn detects_wipe_out_during_preprocessing() {
        let mut csp = Csp::new("dead");
        let a = csp.add_variable("a", vec![int(5)]).unwrap();
        let b = csp.add_variable("b", vec![int(5)]).unwrap();
        csp.add_constraint("a != b", vec![a, b], vec![]).unwrap();

        let result = GacPropagator.propagate(&mut csp, None).unwrap();
        assert!(!result.consistent);
    }

    #[test]
    fn unsupported_assigned_value_kills_the_branch_without_raw_prunes() {
        let mut csp = Csp::new("pinned");
        let a = csp.add_variable("a", vec![int(0), int(1)]).unwrap();
        let b = csp.add_variable("b", vec![int(0), int(1)]).unwrap();
        // Only satisfying tuple is (1, 0), so a=0 can never be extended.
        csp.add_constraint("table", vec![a, b], vec![vec![int(1), int(0)]])
            .unwrap();

        csp.variable_mut(a).assign(int(0)).unwrap();
        let result = GacPropagator.propagate(&mut csp, Some(a)).unwrap();

        assert!(!result.consistent);
        for (vid, value) in &result.pruned {
            assert_ne!((*vid, value.clone()), (a, int(0)));
        }
    }

    #[test]
    fn prunes_after_an_assignment_reach_beyond_direct_neighbours() {
        let mut csp = Csp::new("chain3");
        let domain: Vec<_> = (0..2).map(int).collect();
        let a = csp.add_variable("a", domain.clone()).unwrap();
        let b = csp.add_variable("b", domain.clone()).unwrap();
        let c = csp.add_variable("c", domain).unwrap();
        csp.add_constraint("a != b", vec![a, b], not_equal_tuples(2))
            .unwrap();
        csp.add_constraint("b != c", vec![b, c], not_equal_tuples(2))
            .unwrap();

        csp.variable_mut(a).assign(int(0)).unwrap();
        let result = GacPropagator.propagate(&mut csp, Some(a)).unwrap();

        assert!(result.consistent);
        assert_eq!(csp.variable(b).current_domain(), vec![int(1)]);
        assert_eq!(csp.variable(c).current_domain(), vec![int(0)]);
    }
}
