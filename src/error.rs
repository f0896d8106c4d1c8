use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Contract violations and invalid problem input.
///
/// Search outcomes (domain wipe-out, branch exhaustion) are *not* errors and
/// never appear here; they travel as plain results through the propagator and
/// engine APIs.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("duplicate variable name: {0}")]
    DuplicateVariableName(String),

    #[error("duplicate constraint name: {0}")]
    DuplicateConstraintName(String),

    #[error("variable {0} has duplicate values in its domain")]
    DuplicateDomainValue(String),

    #[error("constraint {constraint}: tuple has arity {found}, scope has arity {expected}")]
    ArityMismatch {
        constraint: String,
        expected: usize,
        found: usize,
    },

    #[error("constraint {constraint}: tuple value {value} is outside the full domain of {variable}")]
    TupleValueOutsideDomain {
        constraint: String,
        variable: String,
        value: String,
    },

    #[error("constraint {constraint}: scope variable id {variable} is not part of the model")]
    ScopeVariableNotInModel { constraint: String, variable: usize },

    #[error("cannot assign {value} to {variable}: not in its current domain")]
    NotInDomain { variable: String, value: String },

    #[error("variable {0} is already assigned")]
    AlreadyAssigned(String),

    #[error("cannot prune {value} from {variable}: not present in its current domain")]
    InvalidPrune { variable: String, value: String },

    #[error("cannot restore {value} to {variable}: already present in its current domain")]
    InvalidRestore { variable: String, value: String },

    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The underlying [`SolverError`], without the captured backtrace.
    pub fn inner(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
