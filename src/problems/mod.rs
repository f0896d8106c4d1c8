//! Problem frontends that encode concrete puzzles as table-constraint
//! models for the generic solver.

pub mod k_colouring;
