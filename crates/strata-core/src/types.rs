use strata_expr::Expr;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// A decision variable with optional value and independently optional bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub value: Option<f64>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub fixed: bool,
}

impl Variable {
    /// Create an unbounded, unfixed variable with no value.
    pub fn free() -> Self {
        Self {
            value: None,
            lower: None,
            upper: None,
            fixed: false,
        }
    }

    /// Create an unfixed variable with the given bounds.
    pub fn bounded(lower: f64, upper: f64) -> Self {
        Self {
            value: None,
            lower: Some(lower),
            upper: Some(upper),
            fixed: false,
        }
    }

    /// Create a fixed variable holding the given value.
    pub fn fixed_at(value: f64) -> Self {
        Self {
            value: Some(value),
            lower: None,
            upper: None,
            fixed: true,
        }
    }

    /// Copy with a value assigned.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::free()
    }
}

/// A constraint: body expression with independently optional numeric bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub body: Expr,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub active: bool,
}

impl Constraint {
    /// Equality constraint: body == rhs.
    pub fn equality(body: Expr, rhs: f64) -> Self {
        Self {
            body,
            lower: Some(rhs),
            upper: Some(rhs),
            active: true,
        }
    }

    /// Upper-bounded inequality: body <= upper.
    pub fn less_equal(body: Expr, upper: f64) -> Self {
        Self {
            body,
            lower: None,
            upper: Some(upper),
            active: true,
        }
    }

    /// Lower-bounded inequality: body >= lower.
    pub fn greater_equal(body: Expr, lower: f64) -> Self {
        Self {
            body,
            lower: Some(lower),
            upper: None,
            active: true,
        }
    }

    /// Range constraint: lower <= body <= upper.
    pub fn ranged(body: Expr, lower: f64, upper: f64) -> Self {
        Self {
            body,
            lower: Some(lower),
            upper: Some(upper),
            active: true,
        }
    }

    /// True iff both bounds are present and numerically equal.
    pub fn is_equality(&self) -> bool {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => lower == upper,
            _ => false,
        }
    }

    /// True iff at least one bound is absent. A constraint with neither
    /// bound is degenerate but still classified as an inequality.
    pub fn is_inequality(&self) -> bool {
        self.lower.is_none() || self.upper.is_none()
    }
}

/// An objective: expression with a sense and an activation flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    pub expr: Expr,
    pub sense: Sense,
    pub active: bool,
}

impl Objective {
    pub fn minimize(expr: Expr) -> Self {
        Self {
            expr,
            sense: Sense::Minimize,
            active: true,
        }
    }

    pub fn maximize(expr: Expr) -> Self {
        Self {
            expr,
            sense: Sense::Maximize,
            active: true,
        }
    }
}
