use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    error::Result,
    solver::{
        csp::Csp,
        heuristics::{value::ValueOrderingHeuristic, variable::VariableSelectionHeuristic},
        propagator::Propagator,
        value::DomainValue,
    },
};

pub type VariableId = usize;
pub type ConstraintId = usize;

/// The result of a complete search run.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<V: DomainValue> {
    /// A full assignment satisfying every constraint.
    Solved(HashMap<VariableId, V>),
    /// The whole tree was explored without finding a solution.
    Exhausted,
    /// The abort flag was raised; the model was restored to its pre-search
    /// state.
    Aborted,
}

impl<V: DomainValue> SearchOutcome<V> {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn assignment(&self) -> Option<&HashMap<VariableId, V>> {
        match self {
            SearchOutcome::Solved(assignment) => Some(assignment),
            _ => None,
        }
    }
}

/// Counters accumulated over one [`SolverEngine::solve`] call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    pub nodes_visited: u64,
    pub backtracks: u64,
    pub propagations: u64,
    pub prunings: u64,
    pub wipeouts: u64,
    pub solve_time_micros: u64,
}

enum Status {
    Solved,
    DeadEnd,
    Aborted,
}

/// The backtracking search driver.
///
/// The engine owns its three plug-in strategies — a [`Propagator`], a
/// variable-selection heuristic, and a value-ordering heuristic — chosen at
/// construction time. One engine can solve any number of models.
///
/// The driver guarantees the undo invariant: after returning from any branch
/// the domains are exactly as they were on entry, except along the path
/// retained in a `Solved` result. Failed or aborted searches leave the model
/// byte-for-byte as it was before `solve` was called.
pub struct SolverEngine<V: DomainValue> {
    propagator: Box<dyn Propagator<V>>,
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    abort: Option<Arc<AtomicBool>>,
}

impl<V: DomainValue> SolverEngine<V> {
    pub fn new(
        propagator: Box<dyn Propagator<V>>,
        variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    ) -> Self {
        Self {
            propagator,
            variable_heuristic,
            value_heuristic,
            abort: None,
        }
    }

    /// Installs a cooperative cancellation flag, polled between node
    /// expansions. Raising it makes the search unwind with the same undo
    /// sequence as a failure, so the model is never left partially pruned.
    pub fn with_abort_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }

    /// Runs the search to completion.
    ///
    /// Returns `Solved` with the full assignment, `Exhausted` when no
    /// solution exists, or `Aborted` if the abort flag was raised. Errors are
    /// reserved for contract violations, never for dead branches.
    pub fn solve(&self, csp: &mut Csp<V>) -> Result<(SearchOutcome<V>, SearchStats)> {
        let start = Instant::now();
        let mut stats = SearchStats::default();
        debug!(
            model = csp.name(),
            propagator = self.propagator.label(),
            "starting search"
        );

        // Preprocessing pass, with no assignment yet.
        stats.propagations += 1;
        let preprocess = self.propagator.propagate(csp, None)?;
        stats.prunings += preprocess.pruned.len() as u64;

        let outcome = if !preprocess.consistent {
            stats.wipeouts += 1;
            Self::restore(csp, &preprocess.pruned)?;
            debug!("exhausted during preprocessing");
            SearchOutcome::Exhausted
        } else {
            match self.search(csp, 0, &mut stats)? {
                Status::Solved => SearchOutcome::Solved(csp.assignment()),
                Status::DeadEnd => {
                    Self::restore(csp, &preprocess.pruned)?;
                    SearchOutcome::Exhausted
                }
                Status::Aborted => {
                    Self::restore(csp, &preprocess.pruned)?;
                    SearchOutcome::Aborted
                }
            }
        };

        stats.solve_time_micros = start.elapsed().as_micros() as u64;
        debug!(
            nodes = stats.nodes_visited,
            backtracks = stats.backtracks,
            solved = outcome.is_solved(),
            "search finished"
        );
        Ok((outcome, stats))
    }

    fn search(&self, csp: &mut Csp<V>, depth: usize, stats: &mut SearchStats) -> Result<Status> {
        if let Some(flag) = &self.abort {
            if flag.load(Ordering::Relaxed) {
                debug!(depth, "search aborted");
                return Ok(Status::Aborted);
            }
        }
        stats.nodes_visited += 1;

        if csp.unassigned_variables().is_empty() {
            return Ok(Status::Solved);
        }
        let Some(variable) = self.variable_heuristic.select_variable(csp) else {
            return Ok(Status::Solved);
        };

        for value in self.value_heuristic.order_values(csp, variable) {
            trace!(
                depth,
                variable = csp.variable(variable).name(),
                value = ?value,
                "branching"
            );
            csp.variable_mut(variable).assign(value)?;

            stats.propagations += 1;
            let propagation = self.propagator.propagate(csp, Some(variable))?;
            stats.prunings += propagation.pruned.len() as u64;

            if propagation.consistent {
                match self.search(csp, depth + 1, stats)? {
                    Status::Solved => return Ok(Status::Solved),
                    Status::Aborted => {
                        Self::restore(csp, &propagation.pruned)?;
                        csp.variable_mut(variable).unassign();
                        return Ok(Status::Aborted);
                    }
                    Status::DeadEnd => {}
                }
            } else {
                stats.wipeouts += 1;
            }

            // Undo exactly this level's effects before the next value.
            Self::restore(csp, &propagation.pruned)?;
            csp.variable_mut(variable).unassign();
            stats.backtracks += 1;
        }

        Ok(Status::DeadEnd)
    }

    /// Replays a prune log in reverse, reinserting values LIFO.
    fn restore(csp: &mut Csp<V>, pruned: &[(VariableId, V)]) -> Result<()> {
        for (vid, value) in pruned.iter().rev() {
            csp.restore(*vid, value)?;
        }
        Ok(())
    }
}
