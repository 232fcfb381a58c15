//! Core expression type: polynomial terms + constant.
//!
//! Terms are stored in separate Vecs per degree:
//! - linear:   (VarId, f64)
//! - bilinear: (VarId, VarId, f64)
//!
//! Expressions are values: building and evaluating them never touches
//! the owning model. Evaluation is fallible because variables may have
//! no value assigned at query time.

use crate::expr::error::EvalError;
use crate::ids::VariableId;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    constant: f64,
    linear: Vec<(VariableId, f64)>,
    bilinear: Vec<(VariableId, VariableId, f64)>,
}

impl Expr {
    // ── Constructors ────────────────────────────────────────

    /// Empty expression (all zeros).
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Just a constant, no variable terms.
    pub fn constant(constant: f64) -> Self {
        Self {
            constant,
            ..Default::default()
        }
    }

    /// Single variable with coefficient 1.0.
    pub fn var(var_id: VariableId) -> Self {
        Self {
            linear: vec![(var_id, 1.0)],
            ..Default::default()
        }
    }

    /// Single linear term: coeff * var.
    pub fn term(var_id: VariableId, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            linear: vec![(var_id, coeff)],
            ..Default::default()
        }
    }

    /// Single bilinear term: coeff * a * b.
    pub fn bilinear(a: VariableId, b: VariableId, coeff: f64) -> Self {
        if coeff == 0.0 {
            return Self::default();
        }
        Self {
            bilinear: vec![(a, b, coeff)],
            ..Default::default()
        }
    }

    /// Expression from linear terms and constant.
    pub fn from_linear(linear: Vec<(VariableId, f64)>, constant: f64) -> Self {
        Self {
            constant,
            linear,
            ..Default::default()
        }
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant_term(&self) -> f64 {
        self.constant
    }

    pub fn linear_terms(&self) -> &[(VariableId, f64)] {
        &self.linear
    }

    pub fn bilinear_terms(&self) -> &[(VariableId, VariableId, f64)] {
        &self.bilinear
    }

    /// Max degree of any term (0 = constant only).
    pub fn degree(&self) -> usize {
        if !self.bilinear.is_empty() {
            2
        } else {
            usize::from(!self.linear.is_empty())
        }
    }

    /// Deduplicated set of variables referenced anywhere in the expression.
    pub fn variables(&self) -> BTreeSet<VariableId> {
        let mut ids = BTreeSet::new();
        for (var_id, _) in &self.linear {
            ids.insert(*var_id);
        }
        for (a, b, _) in &self.bilinear {
            ids.insert(*a);
            ids.insert(*b);
        }
        ids
    }

    // ── Operations ──────────────────────────────────────────

    /// Scale all terms and constant by a factor.
    pub fn scale(&self, by: f64) -> Self {
        Self {
            constant: self.constant * by,
            linear: self
                .linear
                .iter()
                .map(|(v, c)| (*v, *c * by))
                .filter(|(_, c)| *c != 0.0)
                .collect(),
            bilinear: self
                .bilinear
                .iter()
                .map(|(a, b, c)| (*a, *b, *c * by))
                .filter(|(_, _, c)| *c != 0.0)
                .collect(),
        }
    }

    /// Add another expression (merges all degree terms + constants).
    pub fn add(&self, other: &Expr) -> Self {
        let mut linear = Vec::with_capacity(self.linear.len() + other.linear.len());
        linear.extend_from_slice(&self.linear);
        linear.extend_from_slice(&other.linear);

        let mut bilinear = Vec::with_capacity(self.bilinear.len() + other.bilinear.len());
        bilinear.extend_from_slice(&self.bilinear);
        bilinear.extend_from_slice(&other.bilinear);

        Self {
            constant: self.constant + other.constant,
            linear,
            bilinear,
        }
    }

    /// Add a constant offset.
    pub fn add_constant(&self, value: f64) -> Self {
        Self {
            constant: self.constant + value,
            linear: self.linear.clone(),
            bilinear: self.bilinear.clone(),
        }
    }

    /// Evaluate the expression against current variable values.
    ///
    /// `value_of` returns the current value of a variable, or `None` when
    /// the variable has no value assigned. Fails with
    /// [`EvalError::MissingValue`] on the first valueless variable and with
    /// [`EvalError::NonFinite`] when the result is NaN or infinite.
    pub fn eval<F>(&self, value_of: F) -> Result<f64, EvalError>
    where
        F: Fn(VariableId) -> Option<f64>,
    {
        let mut total = self.constant;
        for (var_id, coeff) in &self.linear {
            let value = value_of(*var_id).ok_or(EvalError::MissingValue(*var_id))?;
            total += coeff * value;
        }
        for (a, b, coeff) in &self.bilinear {
            let left = value_of(*a).ok_or(EvalError::MissingValue(*a))?;
            let right = value_of(*b).ok_or(EvalError::MissingValue(*b))?;
            total += coeff * left * right;
        }
        if total.is_finite() {
            Ok(total)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

// ── Operator overloads ──────────────────────────────────────

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Self::Output {
        Expr::add(&self, &rhs)
    }
}

impl std::ops::Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Self::Output {
        Expr::add(&self, &rhs.scale(-1.0))
    }
}

impl std::ops::Mul<f64> for Expr {
    type Output = Expr;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Self::Output {
        self.scale(-1.0)
    }
}
