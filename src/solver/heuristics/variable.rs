//! Defines a collection of standard heuristics for selecting which variable
//! to branch on next during the search process.

use std::cell::RefCell;

use rand::seq::IteratorRandom;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::solver::{csp::Csp, engine::VariableId, value::ValueEquality};

/// A trait for variable-selection heuristics.
///
/// Implementors of this trait define a strategy for choosing which unassigned
/// variable the solver should branch on next. A good heuristic can
/// dramatically improve solver performance.
pub trait VariableSelectionHeuristic<V: ValueEquality> {
    /// Selects the next variable to be assigned.
    ///
    /// Returns `None` once every variable is assigned.
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId>;
}

/// A simple heuristic that selects the first unassigned variable in
/// declaration order.
///
/// This provides a basic, deterministic way to select variables.
pub struct DeclarationOrderHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for DeclarationOrderHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        csp.vars().unassigned().next()
    }
}

/// A heuristic that selects the variable with the Minimum Remaining Values
/// (MRV) in its current domain.
///
/// This is a "fail-first" strategy that prioritizes the most constrained
/// variable. Tackling the most difficult variable early tends to prune the
/// search space faster. Ties go to the lower variable id so the choice is
/// deterministic.
pub struct MinimumRemainingValuesHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        csp.vars()
            .unassigned()
            .min_by_key(|&id| (csp.vars()[id].cur_domain_size(), id))
    }
}

/// The degree heuristic: selects the unassigned variable involved with the
/// largest number of (constraint, other unassigned variable) pairs.
///
/// Only variables sharing at least one constraint with another unassigned
/// variable qualify; when none does (every remaining variable is isolated),
/// the choice falls back to declaration order. Ties go to the lower id.
pub struct DegreeHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for DegreeHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        let mut best: Option<(usize, VariableId)> = None;
        for id in csp.vars().unassigned() {
            let degree: usize = csp
                .constraint_ids_with_var(id)
                .iter()
                .map(|&cid| {
                    csp.constraints()[cid]
                        .unassigned_vars(csp.vars())
                        .iter()
                        .filter(|&&other| other != id)
                        .count()
                })
                .sum();
            if degree == 0 {
                continue;
            }
            // Ids ascend, so keeping the incumbent on equal degree breaks
            // ties towards the lower id.
            if best.map_or(true, |(d, _)| degree > d) {
                best = Some((degree, id));
            }
        }
        best.map(|(_, id)| id)
            .or_else(|| csp.vars().unassigned().next())
    }
}

/// A heuristic that selects an unassigned variable at random.
///
/// This is particularly useful under restart policies layered on top of the
/// search. By default it draws from the thread-local generator;
/// [`RandomVariableHeuristic::with_seed`] pins the sequence for reproducible
/// runs.
#[derive(Debug, Default)]
pub struct RandomVariableHeuristic {
    rng: Option<RefCell<ChaCha8Rng>>,
}

impl RandomVariableHeuristic {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Some(RefCell::new(ChaCha8Rng::seed_from_u64(seed))),
        }
    }
}

impl<V: ValueEquality> VariableSelectionHeuristic<V> for RandomVariableHeuristic {
    fn select_variable(&self, csp: &Csp<V>) -> Option<VariableId> {
        let unassigned = csp.vars().unassigned();
        match &self.rng {
            Some(rng) => unassigned.choose(&mut *rng.borrow_mut()),
            None => unassigned.choose(&mut rand::thread_rng()),
        }
    }
}
