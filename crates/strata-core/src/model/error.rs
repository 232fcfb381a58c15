//! Model error types.

use strata_expr::{BlockId, ConstraintId, ExpressionId, GreyBoxId, ObjectiveId, VariableId};

/// Errors that can occur during model construction and mutation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelError {
    /// Invalid block ID
    InvalidBlockId(BlockId),
    /// Invalid variable ID
    InvalidVariableId(VariableId),
    /// Invalid variable bounds
    InvalidVariableBounds { lower: f64, upper: f64 },
    /// Invalid constraint ID
    InvalidConstraintId(ConstraintId),
    /// Invalid constraint bounds
    InvalidConstraintBounds { lower: f64, upper: f64 },
    /// Invalid objective ID
    InvalidObjectiveId(ObjectiveId),
    /// Invalid expression ID
    InvalidExpressionId(ExpressionId),
    /// Invalid grey-box ID
    InvalidGreyBoxId(GreyBoxId),
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidBlockId(_) => "BLOCK_INVALID_ID",
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::InvalidConstraintBounds { .. } => "CONSTRAINT_INVALID_BOUNDS",
            ModelError::InvalidObjectiveId(_) => "OBJECTIVE_INVALID_ID",
            ModelError::InvalidExpressionId(_) => "EXPRESSION_INVALID_ID",
            ModelError::InvalidGreyBoxId(_) => "GREYBOX_INVALID_ID",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidBlockId(id) => {
                write!(f, "[{}] Block ID {} does not exist", self.code(), id.inner())
            }
            ModelError::InvalidVariableId(id) => write!(
                f,
                "[{}] Variable ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidConstraintId(id) => write!(
                f,
                "[{}] Constraint ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidConstraintBounds { lower, upper } => write!(
                f,
                "[{}] Constraint bounds invalid: lower ({}) > upper ({})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidObjectiveId(id) => write!(
                f,
                "[{}] Objective ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidExpressionId(id) => write!(
                f,
                "[{}] Expression ID {} does not exist",
                self.code(),
                id.inner()
            ),
            ModelError::InvalidGreyBoxId(id) => write!(
                f,
                "[{}] Grey-box ID {} does not exist",
                self.code(),
                id.inner()
            ),
        }
    }
}

impl std::error::Error for ModelError {}
