use crate::solver::{csp::Csp, engine::VariableId, value::ValueEquality};

/// One variable's value in a complete assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<V: ValueEquality> {
    pub variable: VariableId,
    pub name: String,
    pub value: V,
}

/// A complete satisfying assignment, extracted from the solved problem.
///
/// The solved [`Csp`] itself also keeps its assignments (readable through
/// `get_assigned_value`); a `Solution` is the detached copy callers can hold
/// on to after the search state has been reused or dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<V: ValueEquality> {
    assignments: Vec<Assignment<V>>,
}

impl<V: ValueEquality> Solution<V> {
    pub(crate) fn from_csp(csp: &Csp<V>) -> Self {
        let assignments = csp
            .vars()
            .iter()
            .filter_map(|(id, var)| {
                var.get_assigned_value().map(|value| Assignment {
                    variable: id,
                    name: var.name().to_owned(),
                    value: value.clone(),
                })
            })
            .collect();
        Self { assignments }
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment<V>> {
        self.assignments.iter()
    }

    /// The value assigned to a variable id.
    pub fn value(&self, variable: VariableId) -> Option<&V> {
        self.assignments
            .iter()
            .find(|a| a.variable == variable)
            .map(|a| &a.value)
    }

    /// The value assigned to a variable, looked up by name.
    pub fn value_of(&self, name: &str) -> Option<&V> {
        self.assignments
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.value)
    }
}
