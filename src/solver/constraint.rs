use std::collections::{HashMap, HashSet};

use crate::{
    error::{Result, SolverError},
    solver::{engine::VariableId, value::DomainValue, variable::Variable},
};

/// A constraint given extensionally as its table of satisfying tuples.
///
/// The scope is an ordered sequence of variables; each satisfying tuple
/// supplies one value per scope position, in scope order. At construction the
/// table is indexed by (scope position, value) so that support queries scan a
/// pre-bucketed list of candidate tuples instead of the full table. The table
/// itself never changes after construction; only the variables it references
/// mutate their domains, which is why support must be re-validated against
/// current domains on every query.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint<V: DomainValue> {
    name: String,
    scope: Vec<VariableId>,
    tuples: Vec<Vec<V>>,
    tuple_set: HashSet<Vec<V>>,
    supports: Vec<HashMap<V, Vec<usize>>>,
}

impl<V: DomainValue> TableConstraint<V> {
    /// Builds the constraint and its support index.
    ///
    /// Duplicate tuples are collapsed. Fails if any tuple's arity differs
    /// from the scope's. Scope membership and full-domain checks are the
    /// model's responsibility, since only the model knows the variables.
    pub fn new(
        name: impl Into<String>,
        scope: Vec<VariableId>,
        satisfying_tuples: impl IntoIterator<Item = Vec<V>>,
    ) -> Result<Self> {
        let name = name.into();
        let mut tuples = Vec::new();
        let mut tuple_set = HashSet::new();
        for tuple in satisfying_tuples {
            if tuple.len() != scope.len() {
                return Err(SolverError::ArityMismatch {
                    constraint: name,
                    expected: scope.len(),
                    found: tuple.len(),
                }
                .into());
            }
            if tuple_set.insert(tuple.clone()) {
                tuples.push(tuple);
            }
        }

        let mut supports: Vec<HashMap<V, Vec<usize>>> = vec![HashMap::new(); scope.len()];
        for (index, tuple) in tuples.iter().enumerate() {
            for (position, value) in tuple.iter().enumerate() {
                supports[position]
                    .entry(value.clone())
                    .or_default()
                    .push(index);
            }
        }

        Ok(Self {
            name,
            scope,
            tuples,
            tuple_set,
            supports,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered variable scope; tuple positions follow this order.
    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    pub fn satisfying_tuples(&self) -> &[Vec<V>] {
        &self.tuples
    }

    fn position(&self, variable: VariableId) -> Option<usize> {
        self.scope.iter().position(|&v| v == variable)
    }

    /// Whether `tuple` (one value per scope position) satisfies the constraint.
    pub fn check(&self, tuple: &[V]) -> bool {
        self.tuple_set.contains(tuple)
    }

    /// Whether every positional value in `tuple` is currently legal for its
    /// scope variable. Assigned variables admit only their assigned value.
    pub fn tuple_is_valid(&self, vars: &[Variable<V>], tuple: &[V]) -> bool {
        self.scope
            .iter()
            .zip(tuple)
            .all(|(&vid, value)| vars[vid].in_current_domain(value))
    }

    /// Whether `variable = value` can still be extended to a satisfying
    /// assignment of this constraint under the current domains.
    ///
    /// The support bucket for (variable, value) is static; legality is not,
    /// so every candidate tuple is re-validated against current domains.
    pub fn has_support(&self, vars: &[Variable<V>], variable: VariableId, value: &V) -> bool {
        let Some(position) = self.position(variable) else {
            return false;
        };
        let Some(bucket) = self.supports[position].get(value) else {
            return false;
        };
        bucket
            .iter()
            .any(|&index| self.tuple_is_valid(vars, &self.tuples[index]))
    }

    /// Like [`TableConstraint::has_support`], but with `fixed_var` treated as
    /// if it were assigned `fixed_value`. Used by value-ordering heuristics
    /// to ask "would this pair survive the hypothetical assignment?" without
    /// touching any domain.
    pub fn has_support_assuming(
        &self,
        vars: &[Variable<V>],
        variable: VariableId,
        value: &V,
        fixed_var: VariableId,
        fixed_value: &V,
    ) -> bool {
        let Some(position) = self.position(variable) else {
            return false;
        };
        let Some(bucket) = self.supports[position].get(value) else {
            return false;
        };
        bucket.iter().any(|&index| {
            self.scope
                .iter()
                .zip(&self.tuples[index])
                .all(|(&vid, tuple_value)| {
                    if vid == fixed_var {
                        tuple_value == fixed_value
                    } else {
                        vars[vid].in_current_domain(tuple_value)
                    }
                })
        })
    }

    /// The number of scope variables without an assignment.
    pub fn num_unassigned(&self, vars: &[Variable<V>]) -> usize {
        self.scope
            .iter()
            .filter(|&&vid| !vars[vid].is_assigned())
            .count()
    }

    pub fn unassigned_vars(&self, vars: &[Variable<V>]) -> Vec<VariableId> {
        self.scope
            .iter()
            .copied()
            .filter(|&vid| !vars[vid].is_assigned())
            .collect()
    }

    pub fn assigned_vars(&self, vars: &[Variable<V>]) -> Vec<VariableId> {
        self.scope
            .iter()
            .copied()
            .filter(|&vid| vars[vid].is_assigned())
            .collect()
    }

    /// The scope's assigned values in scope order, or `None` while any scope
    /// variable is still unassigned.
    pub fn assigned_tuple(&self, vars: &[Variable<V>]) -> Option<Vec<V>> {
        self.scope
            .iter()
            .map(|&vid| vars[vid].assigned_value().cloned())
            .collect()
    }
}
