use std::collections::HashMap;

use crate::{
    error::{Result, SolverError},
    solver::{engine::VariableId, value::ValueEquality},
};

/// A decision variable: a fixed original domain plus the mutable state the
/// search operates on.
///
/// The original domain is an ordered, duplicate-free sequence fixed at
/// construction. The *current* domain is the subset of it that is still
/// possible; propagators shrink it with [`Variable::prune_value`] and the
/// engine grows it back with [`Variable::restore_value`]. Assignment is an
/// independent mechanism: [`Variable::assign`] does not prune the other
/// values, and [`Variable::unassign`] does not restore anything. While a
/// variable is assigned, its current domain reports the singleton containing
/// the assigned value, whatever the underlying flags say.
#[derive(Debug, Clone)]
pub struct Variable<V: ValueEquality> {
    name: String,
    dom: Vec<V>,
    index: HashMap<V, usize>,
    live: Vec<bool>,
    live_count: usize,
    assigned: Option<usize>,
}

impl<V: ValueEquality> Variable<V> {
    /// Creates a variable over an ordered, duplicate-free domain.
    pub fn new(name: impl Into<String>, domain: Vec<V>) -> Result<Self> {
        let name = name.into();
        let mut index = HashMap::with_capacity(domain.len());
        for (i, value) in domain.iter().enumerate() {
            if index.insert(value.clone(), i).is_some() {
                return Err(SolverError::DuplicateDomainValue {
                    variable: name,
                    value: format!("{value:?}"),
                }
                .into());
            }
        }
        let live = vec![true; domain.len()];
        let live_count = domain.len();
        Ok(Self {
            name,
            dom: domain,
            index,
            live,
            live_count,
            assigned: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The immutable domain the variable was constructed with.
    pub fn original_domain(&self) -> &[V] {
        &self.dom
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned.is_some()
    }

    pub fn get_assigned_value(&self) -> Option<&V> {
        self.assigned.map(|i| &self.dom[i])
    }

    /// Instantiates the variable. The value must be in the current domain.
    pub fn assign(&mut self, value: &V) -> Result<()> {
        if let Some(i) = self.assigned {
            return Err(SolverError::AlreadyAssigned {
                variable: self.name.clone(),
                value: format!("{:?} (holds {:?})", value, self.dom[i]),
            }
            .into());
        }
        let Some(&i) = self.index.get(value) else {
            return Err(SolverError::AssignOutsideDomain {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        };
        if !self.live[i] {
            return Err(SolverError::AssignOutsideDomain {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        }
        self.assigned = Some(i);
        Ok(())
    }

    /// Clears the assignment. Pruned values stay pruned.
    pub fn unassign(&mut self) {
        self.assigned = None;
    }

    /// Membership test against the current domain. For an assigned variable
    /// only the assigned value is a member.
    pub fn in_cur_domain(&self, value: &V) -> bool {
        if let Some(i) = self.assigned {
            return self.dom[i] == *value;
        }
        match self.index.get(value) {
            Some(&i) => self.live[i],
            None => false,
        }
    }

    /// The current domain, in original-domain order. For an assigned variable
    /// this is the singleton of the assigned value.
    pub fn cur_domain(&self) -> Vec<V> {
        if let Some(i) = self.assigned {
            return vec![self.dom[i].clone()];
        }
        self.dom
            .iter()
            .zip(&self.live)
            .filter(|(_, &alive)| alive)
            .map(|(v, _)| v.clone())
            .collect()
    }

    pub fn cur_domain_size(&self) -> usize {
        if self.assigned.is_some() {
            return 1;
        }
        self.live_count
    }

    /// Removes a value from the current domain. Pruning a value twice is a
    /// contract violation: propagators must track what they have pruned.
    pub fn prune_value(&mut self, value: &V) -> Result<()> {
        let Some(&i) = self.index.get(value) else {
            return Err(SolverError::UnknownValue {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        };
        if !self.live[i] {
            return Err(SolverError::DoublePrune {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        }
        self.live[i] = false;
        self.live_count -= 1;
        Ok(())
    }

    /// Undoes exactly one earlier [`Variable::prune_value`] of the same value.
    pub fn restore_value(&mut self, value: &V) -> Result<()> {
        let Some(&i) = self.index.get(value) else {
            return Err(SolverError::UnknownValue {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        };
        if self.live[i] {
            return Err(SolverError::RestoreUnpruned {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        }
        self.live[i] = true;
        self.live_count += 1;
        Ok(())
    }
}

/// All variables of one problem, addressed by [`VariableId`].
#[derive(Debug, Clone)]
pub struct VariableStore<V: ValueEquality> {
    vars: Vec<Variable<V>>,
}

impl<V: ValueEquality> Default for VariableStore<V> {
    fn default() -> Self {
        Self { vars: Vec::new() }
    }
}

impl<V: ValueEquality> VariableStore<V> {
    pub(crate) fn push(&mut self, var: Variable<V>) -> VariableId {
        let id = self.vars.len() as VariableId;
        self.vars.push(var);
        id
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = VariableId> {
        0..self.vars.len() as VariableId
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &Variable<V>)> {
        self.vars
            .iter()
            .enumerate()
            .map(|(i, v)| (i as VariableId, v))
    }

    /// Ids of all variables that are not yet assigned, in declaration order.
    pub fn unassigned(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.iter()
            .filter(|(_, v)| !v.is_assigned())
            .map(|(id, _)| id)
    }

    /// `true` once every variable is assigned.
    pub fn all_assigned(&self) -> bool {
        self.vars.iter().all(Variable::is_assigned)
    }
}

impl<V: ValueEquality> std::ops::Index<VariableId> for VariableStore<V> {
    type Output = Variable<V>;

    fn index(&self, id: VariableId) -> &Self::Output {
        &self.vars[id as usize]
    }
}

impl<V: ValueEquality> std::ops::IndexMut<VariableId> for VariableStore<V> {
    fn index_mut(&mut self, id: VariableId) -> &mut Self::Output {
        &mut self.vars[id as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::Variable;
    use crate::solver::value::StandardValue;

    fn ints(values: &[i64]) -> Vec<StandardValue> {
        values.iter().copied().map(StandardValue::Int).collect()
    }

    #[test]
    fn duplicate_domain_values_are_rejected() {
        let result = Variable::new("x", ints(&[1, 2, 1]));
        assert!(result.is_err());
    }

    #[test]
    fn assignment_reports_a_singleton_domain() {
        let mut var = Variable::new("x", ints(&[1, 2, 3])).unwrap();
        var.assign(&StandardValue::Int(2)).unwrap();
        assert_eq!(var.cur_domain(), ints(&[2]));
        assert_eq!(var.cur_domain_size(), 1);
        assert!(var.in_cur_domain(&StandardValue::Int(2)));
        assert!(!var.in_cur_domain(&StandardValue::Int(1)));
        var.unassign();
        assert_eq!(var.cur_domain(), ints(&[1, 2, 3]));
    }

    #[test]
    fn prune_and_restore_round_trip() {
        let mut var = Variable::new("x", ints(&[1, 2, 3])).unwrap();
        var.prune_value(&StandardValue::Int(2)).unwrap();
        assert_eq!(var.cur_domain(), ints(&[1, 3]));
        assert_eq!(var.cur_domain_size(), 2);
        var.restore_value(&StandardValue::Int(2)).unwrap();
        assert_eq!(var.cur_domain(), ints(&[1, 2, 3]));
        assert_eq!(var.cur_domain_size(), 3);
    }

    #[test]
    fn pruning_is_independent_of_assignment() {
        let mut var = Variable::new("x", ints(&[1, 2])).unwrap();
        var.assign(&StandardValue::Int(1)).unwrap();
        // Pruning the assigned value does not change what the variable reports
        // while it stays assigned.
        var.prune_value(&StandardValue::Int(1)).unwrap();
        assert_eq!(var.cur_domain(), ints(&[1]));
        assert_eq!(var.cur_domain_size(), 1);
        var.unassign();
        assert_eq!(var.cur_domain(), ints(&[2]));
        var.restore_value(&StandardValue::Int(1)).unwrap();
        assert_eq!(var.cur_domain(), ints(&[1, 2]));
    }

    #[test]
    fn contract_violations_fail_fast() {
        let mut var = Variable::new("x", ints(&[1, 2])).unwrap();

        assert!(var.assign(&StandardValue::Int(9)).is_err());
        assert!(var.restore_value(&StandardValue::Int(1)).is_err());

        var.prune_value(&StandardValue::Int(1)).unwrap();
        assert!(var.prune_value(&StandardValue::Int(1)).is_err());
        assert!(var.assign(&StandardValue::Int(1)).is_err());

        var.assign(&StandardValue::Int(2)).unwrap();
        assert!(var.assign(&StandardValue::Int(2)).is_err());
    }
}
