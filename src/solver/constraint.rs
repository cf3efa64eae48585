use std::collections::{HashMap, HashSet};

use crate::{
    error::{Result, SolverError},
    solver::{engine::VariableId, value::ValueEquality, variable::VariableStore},
};

/// A constraint given extensionally: an ordered scope of variables and the
/// explicit set of value tuples (aligned to scope order) that satisfy it.
///
/// The relation is held twice: as a hash set, so [`TableConstraint::check`]
/// is a membership test rather than a scan, and as a per-(scope position,
/// value) support index, so [`TableConstraint::has_support`] only walks the
/// tuples that actually bind the queried value. `has_support` is the hot path
/// of both propagation and value ordering; everything here is shaped around
/// keeping it cheap.
///
/// Constraints refer to variables by id and never own them; queries that need
/// domain state take the [`VariableStore`] explicitly.
#[derive(Debug, Clone)]
pub struct TableConstraint<V: ValueEquality> {
    name: String,
    scope: Vec<VariableId>,
    tuples: Vec<Vec<V>>,
    relation: HashSet<Vec<V>>,
    /// For each scope position, value → indices into `tuples`.
    supports: Vec<HashMap<V, Vec<usize>>>,
}

impl<V: ValueEquality> TableConstraint<V> {
    /// Creates a constraint over `scope` with an empty relation. The scope is
    /// fixed; the relation is supplied afterwards with
    /// [`TableConstraint::add_satisfying_tuples`].
    pub fn new(name: impl Into<String>, scope: Vec<VariableId>) -> Self {
        let supports = scope.iter().map(|_| HashMap::new()).collect();
        Self {
            name: name.into(),
            scope,
            tuples: Vec::new(),
            relation: HashSet::new(),
            supports,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> &[VariableId] {
        &self.scope
    }

    pub fn arity(&self) -> usize {
        self.scope.len()
    }

    /// Adds satisfying tuples to the relation. Every tuple must match the
    /// scope's arity; duplicates are ignored.
    pub fn add_satisfying_tuples(&mut self, tuples: impl IntoIterator<Item = Vec<V>>) -> Result<()> {
        for tuple in tuples {
            if tuple.len() != self.scope.len() {
                return Err(SolverError::TupleArityMismatch {
                    constraint: self.name.clone(),
                    expected: self.scope.len(),
                    found: tuple.len(),
                }
                .into());
            }
            if !self.relation.insert(tuple.clone()) {
                continue;
            }
            let tuple_index = self.tuples.len();
            for (pos, value) in tuple.iter().enumerate() {
                self.supports[pos]
                    .entry(value.clone())
                    .or_default()
                    .push(tuple_index);
            }
            self.tuples.push(tuple);
        }
        Ok(())
    }

    /// Tests one value per scope position, in scope order, for membership in
    /// the relation.
    pub fn check(&self, values: &[V]) -> Result<bool> {
        if values.len() != self.scope.len() {
            return Err(SolverError::TupleArityMismatch {
                constraint: self.name.clone(),
                expected: self.scope.len(),
                found: values.len(),
            }
            .into());
        }
        Ok(self.relation.contains(values))
    }

    /// Number of scope variables that are currently unassigned.
    pub fn n_unassigned(&self, vars: &VariableStore<V>) -> usize {
        self.scope
            .iter()
            .filter(|&&id| !vars[id].is_assigned())
            .count()
    }

    /// The currently unassigned scope variables, in scope order.
    pub fn unassigned_vars(&self, vars: &VariableStore<V>) -> Vec<VariableId> {
        self.scope
            .iter()
            .copied()
            .filter(|&id| !vars[id].is_assigned())
            .collect()
    }

    /// The scope's assigned values in scope order, or `None` while any scope
    /// variable is still unassigned.
    pub fn assigned_tuple(&self, vars: &VariableStore<V>) -> Option<Vec<V>> {
        self.scope
            .iter()
            .map(|&id| vars[id].get_assigned_value().cloned())
            .collect()
    }

    /// Does `var = value` still have a supporting tuple?
    ///
    /// A tuple supports the pair when every entry lies in the owning
    /// variable's *current* domain, which for an assigned variable means
    /// matching its assigned value. Only tuples binding `var` to `value` are
    /// examined, via the support index.
    pub fn has_support(&self, vars: &VariableStore<V>, var: VariableId, value: &V) -> bool {
        let Some(pos) = self.scope.iter().position(|&id| id == var) else {
            return false;
        };
        let Some(candidates) = self.supports[pos].get(value) else {
            return false;
        };
        candidates
            .iter()
            .any(|&i| self.tuple_is_valid(vars, &self.tuples[i]))
    }

    fn tuple_is_valid(&self, vars: &VariableStore<V>, tuple: &[V]) -> bool {
        self.scope
            .iter()
            .zip(tuple)
            .all(|(&id, value)| vars[id].in_cur_domain(value))
    }
}

#[cfg(test)]
mod tests {
    use super::TableConstraint;
    use crate::solver::{
        value::StandardValue::{self, Int},
        variable::{Variable, VariableStore},
    };

    fn store(domains: &[&[i64]]) -> VariableStore<StandardValue> {
        let mut vars = VariableStore::default();
        for (i, d) in domains.iter().enumerate() {
            let domain = d.iter().copied().map(Int).collect();
            vars.push(Variable::new(format!("v{i}"), domain).unwrap());
        }
        vars
    }

    fn not_equal(scope: &[u32], domain: &[i64]) -> TableConstraint<StandardValue> {
        let mut c = TableConstraint::new("ne", scope.to_vec());
        let tuples = domain.iter().flat_map(|&a| {
            domain
                .iter()
                .filter(move |&&b| a != b)
                .map(move |&b| vec![Int(a), Int(b)])
        });
        c.add_satisfying_tuples(tuples).unwrap();
        c
    }

    #[test]
    fn check_is_relation_membership() {
        let c = not_equal(&[0, 1], &[1, 2]);
        assert!(c.check(&[Int(1), Int(2)]).unwrap());
        assert!(!c.check(&[Int(1), Int(1)]).unwrap());
        assert!(c.check(&[Int(1)]).is_err());
    }

    #[test]
    fn tuple_arity_is_enforced() {
        let mut c = TableConstraint::new("c", vec![0, 1]);
        assert!(c.add_satisfying_tuples(vec![vec![Int(1)]]).is_err());
    }

    #[test]
    fn has_support_consults_live_domains() {
        let mut vars = store(&[&[1, 2], &[1, 2]]);
        let c = not_equal(&[0, 1], &[1, 2]);

        assert!(c.has_support(&vars, 0, &Int(1)));

        // Once 2 is gone from v1, v0 = 1 has no partner left.
        vars[1].prune_value(&Int(2)).unwrap();
        assert!(!c.has_support(&vars, 0, &Int(1)));
        assert!(c.has_support(&vars, 0, &Int(2)));

        vars[1].restore_value(&Int(2)).unwrap();
        assert!(c.has_support(&vars, 0, &Int(1)));
    }

    #[test]
    fn has_support_respects_assignments() {
        let mut vars = store(&[&[1, 2], &[1, 2]]);
        let c = not_equal(&[0, 1], &[1, 2]);

        vars[1].assign(&Int(1)).unwrap();
        assert!(!c.has_support(&vars, 0, &Int(1)));
        assert!(c.has_support(&vars, 0, &Int(2)));
    }

    #[test]
    fn unassigned_scope_queries() {
        let mut vars = store(&[&[1, 2], &[1, 2]]);
        let c = not_equal(&[0, 1], &[1, 2]);

        assert_eq!(c.n_unassigned(&vars), 2);
        vars[0].assign(&Int(1)).unwrap();
        assert_eq!(c.n_unassigned(&vars), 1);
        assert_eq!(c.unassigned_vars(&vars), vec![1]);
    }
}
