use tracing::debug;

use crate::{
    error::Result,
    solver::{
        csp::Csp,
        engine::{ConstraintId, VariableId},
        propagators::{Propagation, Propagator},
        value::ValueEquality,
    },
};

/// Forward checking: propagation restricted to constraints with exactly one
/// unassigned scope variable.
///
/// For each such constraint, every value of the one open variable that no
/// relation tuple supports (given the other, assigned, scope variables) is
/// pruned. A domain wipeout aborts the call immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardChecking;

impl<V: ValueEquality> Propagator<V> for ForwardChecking {
    fn name(&self) -> &'static str {
        "forward checking"
    }

    fn propagate(&self, csp: &mut Csp<V>, trigger: Option<VariableId>) -> Result<Propagation<V>> {
        let candidates: Vec<ConstraintId> = match trigger {
            Some(var) => csp.constraint_ids_with_var(var).to_vec(),
            None => csp.constraint_ids().collect(),
        };

        let mut pruned: Vec<(VariableId, V)> = Vec::new();
        for cid in candidates {
            let open = csp.constraints()[cid].unassigned_vars(csp.vars());
            let &[var] = open.as_slice() else {
                continue;
            };
            for value in csp.vars()[var].cur_domain() {
                if csp.constraints()[cid].has_support(csp.vars(), var, &value) {
                    continue;
                }
                csp.vars_mut()[var].prune_value(&value)?;
                pruned.push((var, value));
            }
            if csp.vars()[var].cur_domain_size() == 0 {
                debug!(
                    variable = csp.vars()[var].name(),
                    constraint = csp.constraints()[cid].name(),
                    "domain wipeout"
                );
                return Ok(Propagation::dead_end(pruned));
            }
        }
        Ok(Propagation::consistent(pruned))
    }
}

#[cfg(test)]
mod tests {
    use super::ForwardChecking;
    use crate::solver::{
        csp::Csp,
        propagators::Propagator,
        test_fixtures::{distinct_pairs, not_equal_pair},
        value::StandardValue::Int,
    };

    #[test]
    fn prunes_unsupported_values_of_the_open_variable() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1), Int(2)]).unwrap();
        let b = csp.add_variable("b", vec![Int(1), Int(2)]).unwrap();
        csp.add_constraint(not_equal_pair("ab", a, b, &[1, 2])).unwrap();

        csp.vars_mut()[a].assign(&Int(1)).unwrap();
        let result = ForwardChecking.propagate(&mut csp, Some(a)).unwrap();

        assert!(result.is_consistent());
        assert_eq!(result.pruned, vec![(b, Int(1))]);
        assert_eq!(csp.vars()[b].cur_domain(), vec![Int(2)]);
    }

    #[test]
    fn reports_a_wipeout_with_everything_pruned_so_far() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1)]).unwrap();
        let b = csp.add_variable("b", vec![Int(1)]).unwrap();
        csp.add_constraint(not_equal_pair("ab", a, b, &[1])).unwrap();

        csp.vars_mut()[a].assign(&Int(1)).unwrap();
        let result = ForwardChecking.propagate(&mut csp, Some(a)).unwrap();

        assert!(!result.is_consistent());
        assert_eq!(result.pruned, vec![(b, Int(1))]);
    }

    #[test]
    fn constraints_with_two_open_variables_are_skipped() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1), Int(2)]).unwrap();
        let b = csp.add_variable("b", vec![Int(1), Int(2)]).unwrap();
        csp.add_constraint(not_equal_pair("ab", a, b, &[1, 2])).unwrap();

        let result = ForwardChecking.propagate(&mut csp, None).unwrap();
        assert!(result.is_consistent());
        assert!(result.pruned.is_empty());
    }

    #[test]
    fn the_pre_search_call_checks_unary_residuals_everywhere() {
        // A unary constraint has one open variable before anything is
        // assigned, so the pre-search sweep already forward-checks it.
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1), Int(2)]).unwrap();
        let mut only_two = crate::solver::constraint::TableConstraint::new("a=2", vec![a]);
        only_two.add_satisfying_tuples(vec![vec![Int(2)]]).unwrap();
        csp.add_constraint(only_two).unwrap();

        let result = ForwardChecking.propagate(&mut csp, None).unwrap();
        assert!(result.is_consistent());
        assert_eq!(result.pruned, vec![(a, Int(1))]);
        assert_eq!(csp.vars()[a].cur_domain(), vec![Int(2)]);
    }

    #[test]
    fn pruned_pairs_are_unique_across_constraints() {
        let mut csp = Csp::new("test");
        let a = csp.add_variable("a", vec![Int(1), Int(2), Int(3)]).unwrap();
        let b = csp.add_variable("b", vec![Int(1), Int(2), Int(3)]).unwrap();
        // Two constraints over the same pair, both unary-residual after the
        // assignment, both unsupporting b = 1.
        csp.add_constraint(not_equal_pair("ab", a, b, &[1, 2, 3])).unwrap();
        let mut ordered = crate::solver::constraint::TableConstraint::new("a<b", vec![a, b]);
        ordered
            .add_satisfying_tuples(distinct_pairs(&[1, 2, 3]).filter(|t| t[0] < t[1]))
            .unwrap();
        csp.add_constraint(ordered).unwrap();

        csp.vars_mut()[a].assign(&Int(1)).unwrap();
        let result = ForwardChecking.propagate(&mut csp, Some(a)).unwrap();

        assert!(result.is_consistent());
        let mut seen = std::collections::HashSet::new();
        assert!(result.pruned.iter().all(|p| seen.insert(p.clone())));
        assert_eq!(result.pruned, vec![(b, Int(1))]);
    }
}
