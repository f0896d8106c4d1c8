//! Ligo is a generic, table-driven constraint satisfaction problem (CSP)
//! solver.
//!
//! A problem is a set of named variables with finite discrete domains plus a
//! set of constraints, each given extensionally as the table of value-tuples
//! that satisfy it. The engine finds an assignment of every variable
//! satisfying every constraint by backtracking search, with pluggable
//! strategies at the three seams that matter:
//!
//! - **Propagation** ([`solver::propagator::Propagator`]): the plain
//!   backtracking check, forward checking, or generalised arc consistency —
//!   increasing pruning power at increasing per-call cost.
//! - **Variable selection** ([`solver::heuristics::variable`]): insertion
//!   order, random, minimum-remaining-values, degree, or MRV with a degree
//!   tie-break.
//! - **Value ordering** ([`solver::heuristics::value`]): domain order or
//!   least-constraining-value.
//!
//! Domains are mutated in place during the search and restored exactly on
//! backtrack from a LIFO prune log, so a failed search leaves the model
//! byte-for-byte as it was built.
//!
//! # Example: a simple 2-variable problem
//!
//! Solving `a != b` where `a` can be `1` or `2` and `b` can only be `1`; the
//! solver must deduce that `a` is `2`.
//!
//! ```
//! use ligo::solver::csp::Csp;
//! use ligo::solver::engine::{SearchOutcome, SolverEngine};
//! use ligo::solver::heuristics::{
//!     value::IdentityValueHeuristic, variable::SelectFirstHeuristic,
//! };
//! use ligo::solver::propagators::GacPropagator;
//! use ligo::solver::value::StandardValue;
//!
//! let one = StandardValue::Int(1);
//! let two = StandardValue::Int(2);
//!
//! let mut csp = Csp::new("demo");
//! let a = csp.add_variable("a", vec![one.clone(), two.clone()]).unwrap();
//! let b = csp.add_variable("b", vec![one.clone()]).unwrap();
//! // a != b, as an explicit satisfying-tuple table.
//! csp.add_constraint("a != b", vec![a, b], vec![vec![two.clone(), one.clone()]])
//!     .unwrap();
//!
//! let engine = SolverEngine::new(
//!     Box::new(GacPropagator),
//!     Box::new(SelectFirstHeuristic),
//!     Box::new(IdentityValueHeuristic),
//! );
//! let (outcome, _stats) = engine.solve(&mut csp).unwrap();
//!
//! match outcome {
//!     SearchOutcome::Solved(assignment) => assert_eq!(assignment[&a], two),
//!     _ => panic!("expected a solution"),
//! }
//! ```
pub mod error;
pub mod problems;
pub mod solver;
