//! Tabula is a generic backtracking solver for constraint satisfaction
//! problems given in extensional (table) form.
//!
//! A problem is a set of variables with finite domains plus a set of
//! constraints, each an ordered scope of variables and the explicit set of
//! value tuples that satisfy it. The solver searches depth-first for an
//! assignment satisfying every constraint, and every piece of the search is a
//! strategy you pick per run:
//!
//! - **Propagators** ([`PlainBacktracking`], [`ForwardChecking`],
//!   [`GeneralisedArcConsistency`]): how much consistency to enforce after
//!   each assignment. Stronger propagation prunes more of the search space
//!   per node; it never changes which problems are satisfiable.
//! - **Variable selection** (declaration order, minimum remaining values,
//!   degree, random): which variable to branch on next.
//! - **Value ordering** (natural order, least constraining value): which
//!   value to try first.
//!
//! [`PlainBacktracking`]: crate::solver::propagators::PlainBacktracking
//! [`ForwardChecking`]: crate::solver::propagators::ForwardChecking
//! [`GeneralisedArcConsistency`]: crate::solver::propagators::GeneralisedArcConsistency
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving `a != b` where `a` can be `1` or `2` and `b` can only be `1`: the
//! solver must deduce that `a` is `2`.
//!
//! ```
//! use tabula::solver::constraint::TableConstraint;
//! use tabula::solver::csp::Csp;
//! use tabula::solver::engine::BacktrackingSearch;
//! use tabula::solver::propagators::GeneralisedArcConsistency;
//! use tabula::solver::value::StandardValue;
//!
//! let mut csp = Csp::new("a-differs-from-b");
//! let a = csp
//!     .add_variable("a", vec![StandardValue::Int(1), StandardValue::Int(2)])
//!     .unwrap();
//! let b = csp.add_variable("b", vec![StandardValue::Int(1)]).unwrap();
//!
//! let mut not_equal = TableConstraint::new("a != b", vec![a, b]);
//! not_equal
//!     .add_satisfying_tuples(vec![
//!         vec![StandardValue::Int(1), StandardValue::Int(2)],
//!         vec![StandardValue::Int(2), StandardValue::Int(1)],
//!     ])
//!     .unwrap();
//! csp.add_constraint(not_equal).unwrap();
//!
//! let solver = BacktrackingSearch::with_defaults(Box::new(GeneralisedArcConsistency));
//! let (solution, _stats) = solver.solve(&mut csp).unwrap();
//! let solution = solution.expect("a != b is satisfiable here");
//!
//! assert_eq!(solution.value_of("a"), Some(&StandardValue::Int(2)));
//! assert_eq!(solution.value_of("b"), Some(&StandardValue::Int(1)));
//! ```
//!
pub mod error;
pub mod solver;
