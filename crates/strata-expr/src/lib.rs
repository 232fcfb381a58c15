pub mod expr;
pub mod ids;

pub use expr::{EvalError, Expr};
pub use ids::{BlockId, ConstraintId, ExpressionId, GreyBoxId, ObjectiveId, VariableId};
