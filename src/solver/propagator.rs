use crate::{
    error::Result,
    solver::{csp::Csp, engine::VariableId, value::DomainValue},
};

/// The outcome of one propagation call.
///
/// `pruned` lists every (variable, value) pair removed from a current domain
/// during the call, in removal order; the search driver replays it in reverse
/// to undo the call exactly. When `consistent` is false some domain was wiped
/// out — `pruned` still contains everything removed up to and including the
/// wipe-out, all of which the caller must restore.
#[derive(Debug, Clone, PartialEq)]
pub struct Propagation<V: DomainValue> {
    pub consistent: bool,
    pub pruned: Vec<(VariableId, V)>,
}

impl<V: DomainValue> Propagation<V> {
    pub fn consistent(pruned: Vec<(VariableId, V)>) -> Self {
        Self {
            consistent: true,
            pruned,
        }
    }

    pub fn inconsistent(pruned: Vec<(VariableId, V)>) -> Self {
        Self {
            consistent: false,
            pruned,
        }
    }
}

/// A pluggable constraint-propagation strategy.
///
/// Called by the search driver once before any assignment (`just_assigned`
/// is `None`; a preprocessing pass) and then after every tentative
/// assignment. An inconsistent result is the expected "this branch is dead"
/// signal, not an error; `Err` is reserved for contract violations.
pub trait Propagator<V: DomainValue> {
    /// Short name used in logs and reports.
    fn label(&self) -> &'static str;

    fn propagate(
        &self,
        csp: &mut Csp<V>,
        just_assigned: Option<VariableId>,
    ) -> Result<Propagation<V>>;
}
