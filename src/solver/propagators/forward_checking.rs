use tracing::debug;

use crate::{
    error::Result,
    solver::{
        csp::Csp,
        engine::{ConstraintId, VariableId},
        propagator::{Propagation, Propagator},
        value::DomainValue,
    },
};

/// Forward checking: one-hop pruning around the just-assigned variable.
///
/// For every constraint touching the assigned variable, every value of every
/// unassigned scope variable that has lost support under that single
/// constraint is pruned. There is no propagation wavefront: constraints not
/// touching the assigned variable are never examined. The preprocessing pass
/// (no assignment yet) performs the same single sweep over all constraints,
/// which catches problems that are already dead before the first branch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardChecking;

impl<V: DomainValue> Propagator<V> for ForwardChecking {
    fn label(&self) -> &'static str {
        "fc"
    }

    fn propagate(
        &self,
        csp: &mut Csp<V>,
        just_assigned: Option<VariableId>,
    ) -> Result<Propagation<V>> {
        let targets: Vec<ConstraintId> = match just_assigned {
            Some(variable) => csp.constraints_with(variable).to_vec(),
            None => (0..csp.constraints().len()).collect(),
        };

        let mut pruned = Vec::new();
        for cid in targets {
            for vid in csp.constraint(cid).unassigned_vars(csp.variables()) {
                for value in csp.variable(vid).current_domain() {
                    if csp.has_support(cid, vid, &value) {
                        continue;
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
                }
            }
        }
        Ok(Propagation::consistent(pruned))
    }
}
