//! Expression types for model bodies.
//!
//! - `core`  — Expr: polynomial terms + constant, with fallible evaluation
//! - `error` — Evaluation errors

pub mod core;
pub mod error;

pub use core::Expr;
pub use error::EvalError;
