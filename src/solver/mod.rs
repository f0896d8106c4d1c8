//! The generic solver core: the data model (variables, table constraints,
//! the CSP itself), the pluggable propagation and ordering strategies, and
//! the backtracking search driver that orchestrates them.

pub mod constraint;
pub mod csp;
pub mod engine;
pub mod heuristics;
pub mod propagator;
pub mod propagators;
pub mod stats;
pub mod value;
pub mod variable;
pub mod work_list;
