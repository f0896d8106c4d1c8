//! The built-in propagation strategies: the plain backtracking check,
//! forward checking, and generalised arc consistency, in increasing order of
//! pruning power and per-call cost.

pub mod backtrack;
pub mod forward_checking;
pub mod gac;

pub use backtrack::BacktrackPropagator;
pub use forward_checking::ForwardChecking;
pub use gac::GacPropagator;
