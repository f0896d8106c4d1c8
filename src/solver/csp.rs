use std::collections::{HashMap, HashSet};

use crate::{
    error::{Result, SolverError},
    solver::{
        constraint::TableConstraint,
        engine::{ConstraintId, VariableId},
        value::DomainValue,
        variable::Variable,
    },
};

/// A constraint satisfaction problem: the variables, the constraints over
/// them, and a variable-to-constraints adjacency index.
///
/// The model exclusively owns its variables and constraints; constraints
/// refer to variables by [`VariableId`]. Structure is fixed once a search
/// begins — the search mutates only domains and assignments, so the derived
/// indexes stay valid for the model's whole lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Csp<V: DomainValue> {
    name: String,
    variables: Vec<Variable<V>>,
    constraints: Vec<TableConstraint<V>>,
    variable_ids: HashMap<String, VariableId>,
    constraint_names: HashSet<String>,
    constraints_of: Vec<Vec<ConstraintId>>,
}

impl<V: DomainValue> Csp<V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            variable_ids: HashMap::new(),
            constraint_names: HashSet::new(),
            constraints_of: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a variable with the given ordered domain of distinct values.
    pub fn add_variable(&mut self, name: impl Into<String>, domain: Vec<V>) -> Result<VariableId> {
        let name = name.into();
        if self.variable_ids.contains_key(&name) {
            return Err(SolverError::DuplicateVariableName(name).into());
        }
        let id = self.variables.len();
        self.variables.push(Variable::new(name.clone(), domain)?);
        self.variable_ids.insert(name, id);
        self.constraints_of.push(Vec::new());
        Ok(id)
    }

    /// Adds a table constraint over `scope`, validating that every scope
    /// variable belongs to the model and that every tuple matches the scope's
    /// arity with values drawn from the full domains.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        scope: Vec<VariableId>,
        satisfying_tuples: Vec<Vec<V>>,
    ) -> Result<ConstraintId> {
        let name = name.into();
        if self.constraint_names.contains(&name) {
            return Err(SolverError::DuplicateConstraintName(name).into());
        }
        for &vid in &scope {
            if vid >= self.variables.len() {
                return Err(SolverError::ScopeVariableNotInModel {
                    constraint: name,
                    variable: vid,
                }
                .into());
            }
        }
        for tuple in &satisfying_tuples {
            if tuple.len() != scope.len() {
                return Err(SolverError::ArityMismatch {
                    constraint: name,
                    expected: scope.len(),
                    found: tuple.len(),
                }
                .into());
            }
            for (&vid, value) in scope.iter().zip(tuple) {
                if !self.variables[vid].full_domain().contains(value) {
                    return Err(SolverError::TupleValueOutsideDomain {
                        constraint: name,
                        variable: self.variables[vid].name().to_string(),
                        value: format!("{value:?}"),
                    }
                    .into());
                }
            }
        }

        let id = self.constraints.len();
        let constraint = TableConstraint::new(name.clone(), scope, satisfying_tuples)?;
        for &vid in constraint.scope() {
            if !self.constraints_of[vid].contains(&id) {
                self.constraints_of[vid].push(id);
            }
        }
        self.constraints.push(constraint);
        self.constraint_names.insert(name);
        Ok(id)
    }

    pub fn variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    pub fn constraints(&self) -> &[TableConstraint<V>] {
        &self.constraints
    }

    pub fn variable(&self, id: VariableId) -> &Variable<V> {
        &self.variables[id]
    }

    pub fn variable_mut(&mut self, id: VariableId) -> &mut Variable<V> {
        &mut self.variables[id]
    }

    pub fn constraint(&self, id: ConstraintId) -> &TableConstraint<V> {
        &self.constraints[id]
    }

    /// Looks a variable up by its unique name.
    pub fn variable_named(&self, name: &str) -> Option<VariableId> {
        self.variable_ids.get(name).copied()
    }

    /// All currently unassigned variables, in insertion order.
    pub fn unassigned_variables(&self) -> Vec<VariableId> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, var)| !var.is_assigned())
            .map(|(id, _)| id)
            .collect()
    }

    /// All constraints whose scope contains `variable`.
    pub fn constraints_with(&self, variable: VariableId) -> &[ConstraintId] {
        &self.constraints_of[variable]
    }

    /// Support query delegating to the constraint with the model's variables.
    pub fn has_support(&self, constraint: ConstraintId, variable: VariableId, value: &V) -> bool {
        self.constraints[constraint].has_support(&self.variables, variable, value)
    }

    pub fn prune(&mut self, variable: VariableId, value: &V) -> Result<()> {
        self.variables[variable].prune_value(value)
    }

    pub fn restore(&mut self, variable: VariableId, value: &V) -> Result<()> {
        self.variables[variable].restore_value(value)
    }

    /// The current partial assignment as a map. Complete exactly when
    /// [`Csp::unassigned_variables`] is empty.
    pub fn assignment(&self) -> HashMap<VariableId, V> {
        self.variables
            .iter()
            .enumerate()
            .filter_map(|(id, var)| var.assigned_value().cloned().map(|value| (id, value)))
            .collect()
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

    fn pair_model() -> Csp<StandardValue> {
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
    fn duplicate_variable_name_is_rejected() {
        let mut csp = pair_model();
        let err = csp.add_variable("a", vec![int(0)]).unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::DuplicateVariableName(name) if name == "a"
        ));
    }

    #[test]
    fn duplicate_constraint_name_is_rejected() {
        let mut csp = pair_model();
        assert!(csp
            .add_constraint("a != b", vec![0, 1], vec![vec![int(0), int(1)]])
            .is_err());
    }

    #[test]
    fn scope_must_reference_model_variables() {
        let mut csp = pair_model();
        assert!(csp
            .add_constraint("dangling", vec![0, 7], vec![vec![int(0), int(1)]])
            .is_err());
    }

    #[test]
    fn tuple_values_must_come_from_full_domains() {
        let mut csp = pair_model();
        assert!(csp
            .add_constraint("outside", vec![0, 1], vec![vec![int(0), int(5)]])
            .is_err());
    }

    #[test]
    fn adjacency_and_lookup_queries() {
        let mut csp = pair_model();
        let c = csp.add_variable("c", vec![int(0), int(1)]).unwrap();
        csp.add_constraint(
            "b != c",
            vec![1, c],
            vec![vec![int(0), int(1)], vec![int(1), int(0)]],
        )
        .unwrap();

        assert_eq!(csp.constraints_with(0), &[0]);
        assert_eq!(csp.constraints_with(1), &[0, 1]);
        assert_eq!(csp.variable_named("b"), Some(1));
        assert_eq!(csp.variable_named("z"), None);
    }

    #[test]
    fn unassigned_variables_track_assignments_in_insertion_order() {
        let mut csp = pair_model();
        assert_eq!(csp.unassigned_variables(), vec![0, 1]);

        csp.variable_mut(0).assign(int(0)).unwrap();
        assert_eq!(csp.unassigned_variables(), vec![1]);
        let expected: HashMap<VariableId, StandardValue> = [(0, int(0))].into_iter().collect();
        assert_eq!(csp.assignment(), expected);

        csp.variable_mut(0).unassign();
        assert_eq!(csp.unassigned_variables(), vec![0, 1]);
    }
}
