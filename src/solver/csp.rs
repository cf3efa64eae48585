use crate::{
    error::{Result, SolverError},
    solver::{
        constraint::TableConstraint,
        engine::{ConstraintId, VariableId},
        value::ValueEquality,
        variable::{Variable, VariableStore},
    },
};

/// One constraint satisfaction problem: the variables, the constraints, and
/// the lookup indices the search needs.
///
/// A `Csp` is built once through [`Csp::add_variable`] /
/// [`Csp::add_constraint`] and is structurally frozen afterwards; during
/// search it is only mutated through variable assignment and domain
/// pruning/restoration.
#[derive(Debug, Clone)]
pub struct Csp<V: ValueEquality> {
    name: String,
    vars: VariableStore<V>,
    constraints: Vec<TableConstraint<V>>,
    cons_with_var: Vec<Vec<ConstraintId>>,
}

impl<V: ValueEquality> Csp<V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: VariableStore::default(),
            constraints: Vec::new(),
            cons_with_var: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a variable over an ordered, duplicate-free domain and returns its
    /// id.
    pub fn add_variable(&mut self, name: impl Into<String>, domain: Vec<V>) -> Result<VariableId> {
        let id = self.vars.push(Variable::new(name, domain)?);
        self.cons_with_var.push(Vec::new());
        Ok(id)
    }

    /// Adds a constraint. Every variable in its scope must already exist.
    pub fn add_constraint(&mut self, constraint: TableConstraint<V>) -> Result<ConstraintId> {
        let id = self.constraints.len();
        for &var in constraint.scope() {
            if var as usize >= self.vars.len() {
                return Err(SolverError::UnknownVariable(var).into());
            }
            let registered = &mut self.cons_with_var[var as usize];
            if !registered.contains(&id) {
                registered.push(id);
            }
        }
        self.constraints.push(constraint);
        Ok(id)
    }

    pub fn vars(&self) -> &VariableStore<V> {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut VariableStore<V> {
        &mut self.vars
    }

    pub fn constraints(&self) -> &[TableConstraint<V>] {
        &self.constraints
    }

    pub fn constraint_ids(&self) -> impl Iterator<Item = ConstraintId> {
        0..self.constraints.len()
    }

    /// Ids of all constraints whose scope contains `var`, in insertion order.
    pub fn constraint_ids_with_var(&self, var: VariableId) -> &[ConstraintId] {
        &self.cons_with_var[var as usize]
    }

    /// Ids of all currently unassigned variables, in declaration order.
    pub fn unassigned_vars(&self) -> Vec<VariableId> {
        self.vars.unassigned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Csp;
    use crate::solver::{
        constraint::TableConstraint,
        value::StandardValue::{self, Int},
    };

    #[test]
    fn construction_wires_the_indices() {
        let mut csp: Csp<StandardValue> = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1), Int(2)]).unwrap();
        let b = csp.add_variable("b", vec![Int(1), Int(2)]).unwrap();
        let c = csp.add_variable("c", vec![Int(1), Int(2)]).unwrap();

        let mut ab = TableConstraint::new("ab", vec![a, b]);
        ab.add_satisfying_tuples(vec![vec![Int(1), Int(2)]]).unwrap();
        let ab = csp.add_constraint(ab).unwrap();

        let mut bc = TableConstraint::new("bc", vec![b, c]);
        bc.add_satisfying_tuples(vec![vec![Int(2), Int(1)]]).unwrap();
        let bc = csp.add_constraint(bc).unwrap();

        assert_eq!(csp.constraint_ids_with_var(a), &[ab]);
        assert_eq!(csp.constraint_ids_with_var(b), &[ab, bc]);
        assert_eq!(csp.constraint_ids_with_var(c), &[bc]);
        assert_eq!(csp.unassigned_vars(), vec![a, b, c]);
    }

    #[test]
    fn constraints_over_unknown_variables_are_rejected() {
        let mut csp: Csp<StandardValue> = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1)]).unwrap();
        let stray = TableConstraint::new("stray", vec![a, 7]);
        assert!(csp.add_constraint(stray).is_err());
    }
}
