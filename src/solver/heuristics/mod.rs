//! Pluggable variable-selection and value-ordering heuristics.

pub mod value;
pub mod variable;
