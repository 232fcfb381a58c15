//! Expression evaluation errors.

use crate::ids::VariableId;

/// Errors raised when evaluating an expression against current variable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    /// A referenced variable has no value assigned.
    MissingValue(VariableId),
    /// The evaluated result is NaN or infinite.
    NonFinite,
}

impl EvalError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            EvalError::MissingValue(_) => "EVAL_MISSING_VALUE",
            EvalError::NonFinite => "EVAL_NON_FINITE",
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::MissingValue(id) => write!(
                f,
                "[{}] Variable {} has no value assigned",
                self.code(),
                id.inner()
            ),
            EvalError::NonFinite => {
                write!(f, "[{}] Expression evaluated to a non-finite value", self.code())
            }
        }
    }
}

impl std::error::Error for EvalError {}
