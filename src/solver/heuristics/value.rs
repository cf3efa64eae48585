use crate::{
    error::Result,
    solver::{csp::Csp, engine::VariableId, value::ValueEquality},
};

/// A trait for strategies that determine the order of values to try for a
/// variable.
///
/// The method takes the problem mutably because ordering may tentatively
/// assign the variable to evaluate each candidate; implementations must leave
/// the problem exactly as they found it.
pub trait ValueOrderingHeuristic<V: ValueEquality> {
    /// Returns the values of `var`'s current domain in the order the search
    /// should try them.
    fn order_values(&self, csp: &mut Csp<V>, var: VariableId) -> Result<Vec<V>>;
}

/// A simple heuristic that returns values in their natural domain order.
pub struct IdentityValueHeuristic;

impl<V: ValueEquality> ValueOrderingHeuristic<V> for IdentityValueHeuristic {
    fn order_values(&self, csp: &mut Csp<V>, var: VariableId) -> Result<Vec<V>> {
        Ok(csp.vars()[var].cur_domain())
    }
}

/// Least-constraining value: order values by how much room they leave the
/// variable's neighbours.
///
/// Each candidate is tentatively assigned, then every (constraint containing
/// the variable) × (unassigned scope variable) × (value in its current
/// domain) combination still having support is counted, and the candidate is
/// unassigned again. Values are tried in descending order of that count:
/// more surviving support means less constraining. The count is an
/// O(domain × constraints × neighbour domains) estimate, which is why the
/// engine asks for the ordering once per branch expansion, not per value
/// tried.
pub struct LeastConstrainingValueHeuristic;

impl<V: ValueEquality> ValueOrderingHeuristic<V> for LeastConstrainingValueHeuristic {
    fn order_values(&self, csp: &mut Csp<V>, var: VariableId) -> Result<Vec<V>> {
        let mut scored: Vec<(usize, V)> = Vec::new();
        for value in csp.vars()[var].cur_domain() {
            csp.vars_mut()[var].assign(&value)?;
            let mut surviving = 0usize;
            for &cid in csp.constraint_ids_with_var(var) {
                let constraint = &csp.constraints()[cid];
                for other in constraint.unassigned_vars(csp.vars()) {
                    for candidate in csp.vars()[other].cur_domain() {
                        if constraint.has_support(csp.vars(), other, &candidate) {
                            surviving += 1;
                        }
                    }
                }
            }
            csp.vars_mut()[var].unassign();
            scored.push((surviving, value));
        }
        // Stable: ties keep their domain order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(scored.into_iter().map(|(_, value)| value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{IdentityValueHeuristic, LeastConstrainingValueHeuristic, ValueOrderingHeuristic};
    use crate::solver::{
        csp::Csp,
        test_fixtures::not_equal_pair,
        value::StandardValue::{self, Int},
    };

    #[test]
    fn identity_returns_the_current_domain_in_order() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(3), Int(1), Int(2)]).unwrap();
        csp.vars_mut()[a].prune_value(&Int(1)).unwrap();

        let order = IdentityValueHeuristic.order_values(&mut csp, a).unwrap();
        assert_eq!(order, vec![Int(3), Int(2)]);
    }

    #[test]
    fn lcv_tries_the_least_constraining_value_first() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1), Int(2)]).unwrap();
        let b = csp.add_variable("b", vec![Int(1)]).unwrap();
        csp.add_constraint(not_equal_pair("ab", a, b, &[1, 2])).unwrap();

        // a = 1 starves b entirely; a = 2 leaves b = 1 alive.
        let order = LeastConstrainingValueHeuristic
            .order_values(&mut csp, a)
            .unwrap();
        assert_eq!(order, vec![Int(2), Int(1)]);
    }

    #[test]
    fn lcv_is_a_permutation_of_the_current_domain() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1), Int(2), Int(3)]).unwrap();
        let b = csp.add_variable("b", vec![Int(1), Int(2), Int(3)]).unwrap();
        csp.add_constraint(not_equal_pair("ab", a, b, &[1, 2, 3])).unwrap();

        let order = LeastConstrainingValueHeuristic
            .order_values(&mut csp, a)
            .unwrap();
        let mut sorted: Vec<StandardValue> = order.clone();
        sorted.sort();
        assert_eq!(sorted, csp.vars()[a].cur_domain());
    }

    #[test]
    fn lcv_leaves_the_problem_untouched() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1), Int(2)]).unwrap();
        let b = csp.add_variable("b", vec![Int(1), Int(2)]).unwrap();
        csp.add_constraint(not_equal_pair("ab", a, b, &[1, 2])).unwrap();

        LeastConstrainingValueHeuristic
            .order_values(&mut csp, a)
            .unwrap();
        assert!(!csp.vars()[a].is_assigned());
        assert_eq!(csp.vars()[a].cur_domain(), vec![Int(1), Int(2)]);
        assert_eq!(csp.vars()[b].cur_domain(), vec![Int(1), Int(2)]);
    }
}
