//! Standard heuristics for selecting which variable to branch on next.

use std::cell::RefCell;
use std::cmp::Reverse;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::solver::{csp::Csp, engine::VariableId, value::DomainValue};

/// A trait for variable-selection heuristics.
///
/// Implementors define a strategy for choosing which unassigned variable the
/// solver should branch on next. A good heuristic can dramatically improve
/// solver performance. The driver never calls a heuristic while every
/// variable is assigned, so `None` only ever means "nothing left to pick".
pub trait VariableSelectionHeuristic<V: DomainValue> {
    /// Selects the next variable to be assigned.
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId>;
}

/// Selects the first unassigned variable in the model's insertion order.
///
/// This provides a basic, deterministic way to select variables.
pub struct SelectFirstHeuristic;

impl<V: DomainValue> VariableSelectionHeuristic<V> for SelectFirstHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        csp.unassigned_variables().first().copied()
    }
}

/// Selects an unassigned variable uniformly at random.
///
/// Useful for randomized restarts and for breaking pathological orderings.
/// The default constructor draws from the thread RNG; [`RandomVariableHeuristic::seeded`]
/// gives a reproducible sequence for tests and benchmarks.
pub struct RandomVariableHeuristic {
    rng: Option<RefCell<ChaCha8Rng>>,
}

impl RandomVariableHeuristic {
    pub fn new() -> Self {
        Self { rng: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(RefCell::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }
}

impl Default for RandomVariableHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: DomainValue> VariableSelectionHeuristic<V> for RandomVariableHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        use rand::seq::IteratorRandom;

        let unassigned = csp.unassigned_variables();
        match &self.rng {
            Some(rng) => unassigned.into_iter().choose(&mut *rng.borrow_mut()),
            None => unassigned.into_iter().choose(&mut rand::thread_rng()),
        }
    }
}

/// Minimum Remaining Values (MRV): the variable with the smallest current
/// domain.
///
/// A "fail-first" strategy that tackles the most constrained variable early.
/// Ties go to the first-encountered variable in insertion order — stable but
/// order-dependent, by design rather than by any deeper rule.
pub struct MinimumRemainingValuesHeuristic;

impl<V: DomainValue> VariableSelectionHeuristic<V> for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        csp.unassigned_variables()
            .into_iter()
            .min_by_key(|&vid| csp.variable(vid).current_domain_size())
    }
}

/// The dynamic degree of a variable: the sum, over constraints touching it,
/// of how many of that constraint's scope variables are still unassigned.
/// Measures entanglement with the live part of the problem, not the static
/// constraint graph.
fn dynamic_degree<V: DomainValue>(csp: &Csp<V>, variable: VariableId) -> usize {
    csp.constraints_with(variable)
        .iter()
        .map(|&cid| csp.constraint(cid).num_unassigned(csp.variables()))
        .sum()
}

/// The degree heuristic (DH): the unassigned variable with the highest
/// dynamic degree. Ties go to the first-encountered variable.
pub struct DegreeHeuristic;

impl<V: DomainValue> VariableSelectionHeuristic<V> for DegreeHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        let mut best: Option<(VariableId, usize)> = None;
        for vid in csp.unassigned_variables() {
            let degree = dynamic_degree(csp, vid);
            if best.is_none() || degree > best.map_or(0, |(_, d)| d) {
                best = Some((vid, degree));
            }
        }
        best.map(|(vid, _)| vid)
    }
}

/// MRV with the degree heuristic as tie-break: a strict two-level
/// lexicographic ordering. Domain size dominates; the dynamic degree only
/// decides exact MRV ties.
pub struct MrvDegreeHeuristic;

impl<V: DomainValue> VariableSelectionHeuristic<V> for MrvDegreeHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        csp.unassigned_variables().into_iter().min_by_key(|&vid| {
            (
                csp.variable(vid).current_domain_size(),
                Reverse(dynamic_degree(csp, vid)),
            )
        })
    }
}
