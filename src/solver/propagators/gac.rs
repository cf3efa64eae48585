use std::collections::HashSet;

use tracing::{debug, trace};

use crate::{
    error::Result,
    solver::{
        csp::Csp,
        engine::VariableId,
        propagators::{Propagation, Propagator},
        value::ValueEquality,
        work_list::WorkList,
    },
};

/// Generalised arc consistency, enforced to a fixpoint over a constraint
/// worklist.
///
/// The worklist starts with every constraint (pre-search) or with the
/// constraints containing the newly assigned variable. Popping a constraint
/// re-checks support for every value of every scope variable; each pruning
/// re-enqueues the constraints of the shrunk variable, since support
/// established against its old domain may no longer hold. The call ends at an
/// empty worklist (every constraint arc-consistent) or aborts on the first
/// domain wipeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralisedArcConsistency;

impl<V: ValueEquality> Propagator<V> for GeneralisedArcConsistency {
    fn name(&self) -> &'static str {
        "generalised arc consistency"
    }

    fn propagate(&self, csp: &mut Csp<V>, trigger: Option<VariableId>) -> Result<Propagation<V>> {
        let mut work_list = WorkList::new();
        match trigger {
            Some(var) => {
                for &cid in csp.constraint_ids_with_var(var) {
                    work_list.push_back(cid);
                }
            }
            None => {
                for cid in csp.constraint_ids() {
                    work_list.push_back(cid);
                }
            }
        }

        let mut pruned: Vec<(VariableId, V)> = Vec::new();
        // An assigned variable keeps reporting its singleton domain after its
        // value is pruned, so the same unsupported pair can resurface before
        // the fixpoint; the seen-set keeps the report (and the prune) unique.
        let mut seen: HashSet<(VariableId, V)> = HashSet::new();

        while let Some(cid) = work_list.pop_front() {
            let scope = csp.constraints()[cid].scope().to_vec();
            for var in scope {
                for value in csp.vars()[var].cur_domain() {
                    if csp.constraints()[cid].has_support(csp.vars(), var, &value) {
                        continue;
                    }
                    if !seen.insert((var, value.clone())) {
                        continue;
                    }
                    csp.vars_mut()[var].prune_value(&value)?;
                    pruned.push((var, value));
                    if csp.vars()[var].cur_domain_size() == 0 {
                        debug!(
                            variable = csp.vars()[var].name(),
                            constraint = csp.constraints()[cid].name(),
                            "domain wipeout"
                        );
                        return Ok(Propagation::dead_end(pruned));
                    }
                    for &other in csp.constraint_ids_with_var(var) {
                        work_list.push_back(other);
                    }
                }
            }
        }

        trace!(pruned = pruned.len(), "arc consistency fixpoint reached");
        Ok(Propagation::consistent(pruned))
    }
}
