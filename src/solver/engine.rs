use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    error::Result,
    solver::{
        csp::Csp,
        heuristics::{
            value::{IdentityValueHeuristic, ValueOrderingHeuristic},
            variable::{DeclarationOrderHeuristic, VariableSelectionHeuristic},
        },
        propagators::{Propagation, Propagator},
        solution::Solution,
        value::ValueEquality,
    },
};

pub type VariableId = u32;
pub type ConstraintId = usize;

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Search nodes expanded (variable selections; the root propagation is
    /// not a node).
    pub nodes_visited: u64,
    /// Abandoned (variable, value) branches.
    pub backtracks: u64,
    /// Propagator invocations, including the root call.
    pub propagator_calls: u64,
    /// Propagator calls that reported a dead end.
    pub dead_ends: u64,
    /// Total values pruned across all propagator calls.
    pub values_pruned: u64,
}

/// Depth-first backtracking search over a [`Csp`].
///
/// The engine holds one strategy per role (consistency propagation,
/// variable selection, value ordering) for the duration of a search run.
/// After every assignment it invokes the propagator with the just-assigned
/// variable; when a branch is abandoned it restores exactly the values that
/// propagator call pruned (in reverse) and unassigns. This pairing is the
/// backbone of the solver: sibling branches must never observe leftover
/// prunings from an abandoned branch.
pub struct BacktrackingSearch<V: ValueEquality> {
    propagator: Box<dyn Propagator<V>>,
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
}

impl<V: ValueEquality> BacktrackingSearch<V> {
    pub fn new(
        propagator: Box<dyn Propagator<V>>,
        variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    ) -> Self {
        Self {
            propagator,
            variable_heuristic,
            value_heuristic,
        }
    }

    /// A search with the given propagator, declaration-order variable
    /// selection, and natural value order.
    pub fn with_defaults(propagator: Box<dyn Propagator<V>>) -> Self {
        Self::new(
            propagator,
            Box::new(DeclarationOrderHeuristic),
            Box::new(IdentityValueHeuristic),
        )
    }

    /// Runs the search to the first solution.
    ///
    /// Returns `Ok((None, stats))` when the problem is unsatisfiable; in that
    /// case the problem is restored to its pre-search state. On success the
    /// problem is left fully assigned, so `get_assigned_value` agrees with
    /// the returned [`Solution`].
    pub fn solve(&self, csp: &mut Csp<V>) -> Result<(Option<Solution<V>>, SearchStats)> {
        let mut stats = SearchStats::default();
        debug!(problem = csp.name(), propagator = self.propagator.name(), "search started");

        let root = self.propagate(csp, None, &mut stats)?;
        if !root.is_consistent() {
            debug!("root propagation refuted the problem");
            Self::undo(csp, &root.pruned)?;
            return Ok((None, stats));
        }

        if self.search(csp, &mut stats)? {
            debug!(nodes = stats.nodes_visited, "solution found");
            Ok((Some(Solution::from_csp(csp)), stats))
        } else {
            debug!(nodes = stats.nodes_visited, "search space exhausted");
            Self::undo(csp, &root.pruned)?;
            Ok((None, stats))
        }
    }

    fn search(&self, csp: &mut Csp<V>, stats: &mut SearchStats) -> Result<bool> {
        let Some(var) = self.variable_heuristic.select_variable(csp) else {
            // Every variable is assigned and every propagator call along the
            // way accepted: a complete consistent assignment.
            return Ok(true);
        };
        stats.nodes_visited += 1;

        let values = self.value_heuristic.order_values(csp, var)?;
        trace!(
            variable = csp.vars()[var].name(),
            candidates = values.len(),
            "expanding"
        );
        for value in values {
            csp.vars_mut()[var].assign(&value)?;
            let propagation = self.propagate(csp, Some(var), stats)?;
            if propagation.is_consistent() && self.search(csp, stats)? {
                return Ok(true);
            }
            Self::undo(csp, &propagation.pruned)?;
            csp.vars_mut()[var].unassign();
            stats.backtracks += 1;
        }
        Ok(false)
    }

    fn propagate(
        &self,
        csp: &mut Csp<V>,
        trigger: Option<VariableId>,
        stats: &mut SearchStats,
    ) -> Result<Propagation<V>> {
        let propagation = self.propagator.propagate(csp, trigger)?;
        stats.propagator_calls += 1;
        stats.values_pruned += propagation.pruned.len() as u64;
        if !propagation.is_consistent() {
            stats.dead_ends += 1;
        }
        Ok(propagation)
    }

    fn undo(csp: &mut Csp<V>, pruned: &[(VariableId, V)]) -> Result<()> {
        for (var, value) in pruned.iter().rev() {
            csp.vars_mut()[*var].restore_value(value)?;
        }
        Ok(())
    }
}
