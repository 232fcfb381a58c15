//! Hierarchical algebraic model container and structural statistics engine.
//!
//! A [`Model`] is an arena of blocks, variables, constraints, objectives,
//! auxiliary expressions, and opaque grey-box nodes. The [`stats`] module is
//! the query surface: pure, read-only classifiers and metrics computed fresh
//! on every call.

pub mod greybox;
pub mod model;
pub mod stats;
pub mod types;

pub use greybox::{ExternalGreyBoxModel, GreyBox};
pub use model::{Block, Model, ModelError};
pub use types::{Constraint, Objective, Sense, Variable};
