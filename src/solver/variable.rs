use std::collections::HashMap;

use crate::{
    error::{Result, SolverError},
    solver::value::DomainValue,
};

/// A single problem variable: an immutable full domain plus a mutable
/// current domain and an optional assignment.
///
/// The current domain is stored as membership flags parallel to the full
/// domain, so pruning and restoring never disturb the relative order of the
/// surviving values. While the variable is assigned, the flags are left
/// untouched: the assignment conceptually restricts the domain to a single
/// value for constraint checking, and [`Variable::unassign`] brings the full
/// current domain straight back.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable<V: DomainValue> {
    name: String,
    full_domain: Vec<V>,
    live: Vec<bool>,
    live_count: usize,
    positions: HashMap<V, usize>,
    assigned: Option<V>,
}

impl<V: DomainValue> Variable<V> {
    /// Creates a variable over the given ordered domain of distinct values.
    pub fn new(name: impl Into<String>, domain: Vec<V>) -> Result<Self> {
        let name = name.into();
        let mut positions = HashMap::with_capacity(domain.len());
        for (i, value) in domain.iter().enumerate() {
            if positions.insert(value.clone(), i).is_some() {
                return Err(SolverError::DuplicateDomainValue(name).into());
            }
        }
        let live = vec![true; domain.len()];
        let live_count = domain.len();
        Ok(Self {
            name,
            full_domain: domain,
            live,
            live_count,
            positions,
            assigned: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The immutable domain the variable was created with.
    pub fn full_domain(&self) -> &[V] {
        &self.full_domain
    }

    /// The ordered sequence of currently legal values.
    ///
    /// While assigned this is the assigned singleton; otherwise it is the
    /// unpruned subsequence of the full domain. An empty result signals a
    /// domain wipe-out.
    pub fn current_domain(&self) -> Vec<V> {
        if let Some(value) = &self.assigned {
            return vec![value.clone()];
        }
        self.full_domain
            .iter()
            .zip(&self.live)
            .filter(|(_, &alive)| alive)
            .map(|(value, _)| value.clone())
            .collect()
    }

    /// The number of currently legal values, without materialising them.
    pub fn current_domain_size(&self) -> usize {
        if self.assigned.is_some() {
            1
        } else {
            self.live_count
        }
    }

    /// Whether `value` is currently legal for constraint checking.
    ///
    /// An assigned variable admits exactly its assigned value, whatever the
    /// underlying membership flags say.
    pub fn in_current_domain(&self, value: &V) -> bool {
        if let Some(assigned) = &self.assigned {
            return assigned == value;
        }
        self.positions
            .get(value)
            .is_some_and(|&i| self.live[i])
    }

    /// Removes `value` from the underlying current domain.
    pub fn prune_value(&mut self, value: &V) -> Result<()> {
        match self.positions.get(value) {
            Some(&i) if self.live[i] => {
                self.live[i] = false;
                self.live_count -= 1;
                Ok(())
            }
            _ => Err(SolverError::InvalidPrune {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into()),
        }
    }

    /// Reinserts a previously pruned `value`.
    ///
    /// Callers are expected to restore in exact reverse order of pruning
    /// (LIFO), which makes order preservation trivial: the membership flag
    /// flips back and the full-domain order carries the rest.
    pub fn restore_value(&mut self, value: &V) -> Result<()> {
        match self.positions.get(value) {
            Some(&i) if !self.live[i] => {
                self.live[i] = true;
                self.live_count += 1;
                Ok(())
            }
            _ => Err(SolverError::InvalidRestore {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into()),
        }
    }

    /// Fixes the variable to `value` for the duration of a search branch.
    pub fn assign(&mut self, value: V) -> Result<()> {
        if self.assigned.is_some() {
            return Err(SolverError::AlreadyAssigned(self.name.clone()).into());
        }
        if !self.in_current_domain(&value) {
            return Err(SolverError::NotInDomain {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        }
        self.assigned = Some(value);
        Ok(())
    }

    /// Clears the assignment, exposing the preserved current domain again.
    pub fn unassign(&mut self) {
        self.assigned = None;
    }

    pub fn assigned_value(&self) -> Option<&V> {
        self.assigned.as_ref()
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }
}
