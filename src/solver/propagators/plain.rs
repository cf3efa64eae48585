use tracing::debug;

use crate::{
    error::Result,
    solver::{
        csp::Csp,
        engine::VariableId,
        propagators::{Propagation, Propagator},
        value::ValueEquality,
    },
};

/// No propagation at all: only rejects branches where a fully instantiated
/// constraint is violated.
///
/// The pre-search call does nothing. After an assignment, every constraint
/// containing the newly assigned variable whose scope is now fully assigned
/// has its tuple checked against the relation. Never prunes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBacktracking;

impl<V: ValueEquality> Propagator<V> for PlainBacktracking {
    fn name(&self) -> &'static str {
        "plain backtracking"
    }

    fn propagate(&self, csp: &mut Csp<V>, trigger: Option<VariableId>) -> Result<Propagation<V>> {
        let Some(var) = trigger else {
            return Ok(Propagation::consistent(Vec::new()));
        };
        for &cid in csp.constraint_ids_with_var(var) {
            let constraint = &csp.constraints()[cid];
            let Some(values) = constraint.assigned_tuple(csp.vars()) else {
                continue;
            };
            if !constraint.check(&values)? {
                debug!(constraint = constraint.name(), "full assignment violates constraint");
                return Ok(Propagation::dead_end(Vec::new()));
            }
        }
        Ok(Propagation::consistent(Vec::new()))
    }
}
