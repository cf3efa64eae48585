use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Contract violations raised by the solver core.
///
/// None of these mean a problem is unsatisfiable; unsatisfiability is an
/// ordinary outcome, reported through return values. A `SolverError` means a
/// propagator, heuristic, or model builder broke an API contract.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("variable `{variable}`: cannot assign {value}, not in the current domain")]
    AssignOutsideDomain { variable: String, value: String },

    #[error("variable `{variable}`: already assigned, cannot assign {value}")]
    AlreadyAssigned { variable: String, value: String },

    #[error("variable `{variable}`: value {value} is not in the original domain")]
    UnknownValue { variable: String, value: String },

    #[error("variable `{variable}`: value {value} is already pruned")]
    DoublePrune { variable: String, value: String },

    #[error("variable `{variable}`: value {value} is not pruned, nothing to restore")]
    RestoreUnpruned { variable: String, value: String },

    #[error("variable `{variable}`: domain contains duplicate value {value}")]
    DuplicateDomainValue { variable: String, value: String },

    #[error(
        "constraint `{constraint}`: tuple of arity {found} does not match scope arity {expected}"
    )]
    TupleArityMismatch {
        constraint: String,
        expected: usize,
        found: usize,
    },

    #[error("unknown variable id {0}")]
    UnknownVariable(u32),

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
