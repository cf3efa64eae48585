//! Consistency propagation strategies.
//!
//! A propagator is invoked by the search engine once before the first
//! assignment (`trigger = None`) and then after every assignment
//! (`trigger = Some(var)`). It examines the problem, may prune values from
//! current domains, and reports whether the current branch can still lead to
//! a solution together with everything it pruned. The engine owns the undo
//! side of the bargain: if the branch is abandoned, it restores exactly the
//! reported prunings.

pub mod forward_checking;
pub mod gac;
pub mod plain;

pub use forward_checking::ForwardChecking;
pub use gac::GeneralisedArcConsistency;
pub use plain::PlainBacktracking;

use crate::{
    error::Result,
    solver::{csp::Csp, engine::VariableId, value::ValueEquality},
};

/// Verdict of one propagator call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationStatus {
    /// The branch may still contain a solution.
    Consistent,
    /// Some constraint can no longer be satisfied on this branch.
    DeadEnd,
}

/// What one propagator call did: its verdict plus every (variable, value)
/// pair it pruned, each reported exactly once.
///
/// Restoring the pruned pairs (in reverse) returns every touched variable's
/// current domain to its pre-call state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation<V: ValueEquality> {
    pub status: PropagationStatus,
    pub pruned: Vec<(VariableId, V)>,
}

impl<V: ValueEquality> Propagation<V> {
    pub fn consistent(pruned: Vec<(VariableId, V)>) -> Self {
        Self {
            status: PropagationStatus::Consistent,
            pruned,
        }
    }

    pub fn dead_end(pruned: Vec<(VariableId, V)>) -> Self {
        Self {
            status: PropagationStatus::DeadEnd,
            pruned,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.status == PropagationStatus::Consistent
    }
}

/// A consistency-enforcement strategy, chosen per search run.
pub trait Propagator<V: ValueEquality>: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Examines the problem after `trigger` was assigned (or before any
    /// assignment, when `trigger` is `None`), pruning values that can no
    /// longer appear in a solution on this branch.
    ///
    /// Implementations must never prune a value twice nor report a pair
    /// twice; `Err` is reserved for broken contracts, a dead end is an
    /// ordinary [`PropagationStatus::DeadEnd`].
    fn propagate(&self, csp: &mut Csp<V>, trigger: Option<VariableId>) -> Result<Propagation<V>>;
}
