//! Derived numeric metrics: degrees of freedom, constraint residuals,
//! bound proximity, and structural consistency checks.
//!
//! This is the only place where constraint bodies are evaluated. Evaluation
//! failures are recovered locally: an unevaluable constraint is treated
//! conservatively as potentially violated, never surfaced as an error.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use strata_expr::{BlockId, ConstraintId, VariableId};

use crate::model::Model;
use crate::stats::blocks::activated_blocks_set;
use crate::stats::constraints::{
    activated_constraints_generator, number_activated_equalities,
};
use crate::stats::variables::{
    number_unfixed_variables_in_activated_equalities, variables_in_activated_constraints_set,
};

/// Default residual threshold for [`large_residuals_set`].
pub const DEFAULT_RESIDUAL_TOL: f64 = 1e-5;

/// Degrees of freedom: unfixed variables in activated equality constraints
/// minus activated equality constraints, both including grey-box
/// contributions. Negative means over-constrained; no clamping.
pub fn degrees_of_freedom(model: &Model, root: BlockId) -> i64 {
    number_unfixed_variables_in_activated_equalities(model, root) as i64
        - number_activated_equalities(model, root) as i64
}

fn constraint_residual(model: &Model, id: ConstraintId) -> Option<f64> {
    let constraint = model.constraint(id);
    let body = constraint
        .body
        .eval(|var_id| model.variable_value(var_id))
        .ok()?;
    let lower_violation = constraint.lower.map_or(0.0, |lower| lower - body);
    let upper_violation = constraint.upper.map_or(0.0, |upper| body - upper);
    Some(lower_violation.max(upper_violation))
}

/// Activated constraints whose residual exceeds `tol`, plus every activated
/// constraint whose body cannot be evaluated (conservatively assumed
/// violated).
pub fn large_residuals_set(model: &Model, root: BlockId, tol: f64) -> BTreeSet<ConstraintId> {
    large_residual_values(model, root, tol).into_keys().collect()
}

/// Residual values for the constraints [`large_residuals_set`] reports.
/// Unevaluable constraints map to `None`.
pub fn large_residual_values(
    model: &Model,
    root: BlockId,
    tol: f64,
) -> BTreeMap<ConstraintId, Option<f64>> {
    let started = Instant::now();
    let mut residuals = BTreeMap::new();
    let mut scanned = 0usize;
    for constraint_id in activated_constraints_generator(model, root) {
        scanned += 1;
        match constraint_residual(model, constraint_id) {
            Some(residual) => {
                if residual > tol {
                    residuals.insert(constraint_id, Some(residual));
                }
            }
            None => {
                residuals.insert(constraint_id, None);
            }
        }
    }
    tracing::debug!(
        component = "stats",
        operation = "large_residuals",
        status = "success",
        constraints_scanned = scanned,
        flagged = residuals.len(),
        tol,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Scanned activated constraints for large residuals"
    );
    residuals
}

/// Number of activated constraints with a residual above `tol`.
pub fn number_large_residuals(model: &Model, root: BlockId, tol: f64) -> usize {
    large_residuals_set(model, root, tol).len()
}

/// Options for the near-bound variable scan.
///
/// The effective tolerance per variable is
/// `max(abs_tol, magnitude * rel_tol)` where magnitude is `upper - lower`
/// when both bounds exist, the absolute value of the single bound when only
/// one exists, and 0 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct NearBoundOptions {
    /// Absolute tolerance (default 1e-4).
    pub abs_tol: f64,
    /// Relative tolerance against the variable's magnitude (default 1e-4).
    pub rel_tol: f64,
    /// Skip the lower-bound check.
    pub skip_lb: bool,
    /// Skip the upper-bound check.
    pub skip_ub: bool,
    /// Deprecated single tolerance. When set, overrides both `abs_tol` and
    /// `rel_tol` and emits a deprecation warning.
    pub legacy_tol: Option<f64>,
}

impl Default for NearBoundOptions {
    fn default() -> Self {
        Self {
            abs_tol: 1e-4,
            rel_tol: 1e-4,
            skip_lb: false,
            skip_ub: false,
            legacy_tol: None,
        }
    }
}

impl NearBoundOptions {
    fn resolve(&self) -> (f64, f64) {
        match self.legacy_tol {
            Some(tol) => {
                tracing::warn!(
                    component = "stats",
                    operation = "variables_near_bounds",
                    status = "deprecated",
                    legacy_tol = tol,
                    "legacy_tol is deprecated; set abs_tol and rel_tol instead"
                );
                (tol, tol)
            }
            None => (self.abs_tol, self.rel_tol),
        }
    }
}

/// Activated variables whose value lies within tolerance of a bound.
/// Variables with no value are silently excluded.
pub fn variables_near_bounds_set(
    model: &Model,
    root: BlockId,
    options: &NearBoundOptions,
) -> BTreeSet<VariableId> {
    let (abs_tol, rel_tol) = options.resolve();
    let mut set = BTreeSet::new();

    for var_id in crate::stats::variables::variables_set(model, root) {
        let variable = model.variable(var_id);
        let Some(value) = variable.value else {
            continue;
        };

        let magnitude = match (variable.lower, variable.upper) {
            (Some(lower), Some(upper)) => upper - lower,
            (None, Some(upper)) => upper.abs(),
            (Some(lower), None) => lower.abs(),
            (None, None) => 0.0,
        };
        let tol = abs_tol.max(magnitude * rel_tol);

        let near_upper = variable
            .upper
            .is_some_and(|upper| !options.skip_ub && upper - value <= tol);
        let near_lower = variable
            .lower
            .is_some_and(|lower| !options.skip_lb && value - lower <= tol);
        if near_upper || near_lower {
            set.insert(var_id);
        }
    }
    set
}

/// Number of variables near a bound.
pub fn number_variables_near_bounds(
    model: &Model,
    root: BlockId,
    options: &NearBoundOptions,
) -> usize {
    variables_near_bounds_set(model, root, options).len()
}

/// Variables referenced by an activated constraint whose owning block is
/// not itself activated. Catches modeling errors where a constraint was
/// individually reactivated while its parent block stayed deactivated.
pub fn active_variables_in_deactivated_blocks_set(
    model: &Model,
    root: BlockId,
) -> BTreeSet<VariableId> {
    let block_set = activated_blocks_set(model, root);
    variables_in_activated_constraints_set(model, root)
        .into_iter()
        .filter(|var_id| {
            model
                .variable_parent(*var_id)
                .map(|parent| !block_set.contains(&parent))
                .unwrap_or(false)
        })
        .collect()
}

/// Number of activated-constraint variables stranded in deactivated blocks.
pub fn number_active_variables_in_deactivated_blocks(model: &Model, root: BlockId) -> usize {
    active_variables_in_deactivated_blocks_set(model, root).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::types::Variable;
    use strata_expr::Expr;

    #[test]
    fn dof_counts_unfixed_equality_variables() {
        let mut model = Model::new();
        let root = model.root();
        let a = model.add_variable(root, Variable::free()).unwrap();
        let b = model.add_variable(root, Variable::free()).unwrap();
        let fixed = model.add_variable(root, Variable::fixed_at(1.0)).unwrap();
        model
            .add_equality(root, Expr::var(a).add(&Expr::var(fixed)), 2.0)
            .unwrap();
        model
            .add_equality(root, Expr::var(a).add(&Expr::var(b)), 3.0)
            .unwrap();
        // Two unfixed variables in equalities, two equalities.
        assert_eq!(degrees_of_freedom(&model, root), 0);

        model.unfix_variable(fixed).unwrap();
        assert_eq!(degrees_of_freedom(&model, root), 1);
    }

    #[test]
    fn dof_can_go_negative() {
        let mut model = Model::new();
        let root = model.root();
        let v = model.add_variable(root, Variable::free()).unwrap();
        model.add_equality(root, Expr::var(v), 1.0).unwrap();
        model.add_equality(root, Expr::term(v, 2.0), 2.0).unwrap();
        assert_eq!(degrees_of_freedom(&model, root), -1);
    }

    #[test]
    fn residual_flags_violated_equality() {
        let mut model = Model::new();
        let root = model.root();
        let v = model
            .add_variable(root, Variable::free().with_value(5.00002))
            .unwrap();
        let c = model.add_equality(root, Expr::var(v), 5.0).unwrap();

        // residual = max(5 - 5.00002, 5.00002 - 5) = 2e-5
        let flagged = large_residuals_set(&model, root, 1e-5);
        assert_eq!(flagged, BTreeSet::from([c]));
        assert!(large_residuals_set(&model, root, 1e-4).is_empty());

        let values = large_residual_values(&model, root, 1e-5);
        let residual = values[&c].unwrap();
        assert!((residual - 2e-5).abs() < 1e-12);
    }

    #[test]
    fn unevaluable_constraint_is_conservatively_flagged() {
        let mut model = Model::new();
        let root = model.root();
        let v = model.add_variable(root, Variable::free()).unwrap();
        let c = model.add_equality(root, Expr::var(v), 0.0).unwrap();

        let values = large_residual_values(&model, root, DEFAULT_RESIDUAL_TOL);
        assert_eq!(values.get(&c), Some(&None));
        assert!(large_residuals_set(&model, root, DEFAULT_RESIDUAL_TOL).contains(&c));
    }

    #[test]
    fn satisfied_one_sided_constraint_is_not_flagged() {
        let mut model = Model::new();
        let root = model.root();
        let v = model
            .add_variable(root, Variable::free().with_value(3.0))
            .unwrap();
        model.add_less_equal(root, Expr::var(v), 10.0).unwrap();
        assert!(large_residuals_set(&model, root, DEFAULT_RESIDUAL_TOL).is_empty());
    }

    #[test]
    fn near_bound_uses_relative_magnitude() {
        let mut model = Model::new();
        let root = model.root();
        let v = model
            .add_variable(root, Variable::bounded(0.0, 10.0).with_value(9.9999))
            .unwrap();

        // magnitude 10, tol = max(1e-4, 10 * 1e-4) = 1e-3; distance 1e-4.
        let near = variables_near_bounds_set(&model, root, &NearBoundOptions::default());
        assert_eq!(near, BTreeSet::from([v]));

        let strict = NearBoundOptions {
            rel_tol: 1e-6,
            abs_tol: 1e-6,
            ..Default::default()
        };
        assert!(variables_near_bounds_set(&model, root, &strict).is_empty());
    }

    #[test]
    fn near_bound_skip_flags() {
        let mut model = Model::new();
        let root = model.root();
        model
            .add_variable(root, Variable::bounded(0.0, 10.0).with_value(0.00001))
            .unwrap();

        let skip_lower = NearBoundOptions {
            skip_lb: true,
            ..Default::default()
        };
        assert!(variables_near_bounds_set(&model, root, &skip_lower).is_empty());
        assert_eq!(
            number_variables_near_bounds(&model, root, &NearBoundOptions::default()),
            1
        );
    }

    #[test]
    fn near_bound_excludes_valueless_variables() {
        let mut model = Model::new();
        let root = model.root();
        model.add_variable(root, Variable::bounded(0.0, 1.0)).unwrap();
        assert!(
            variables_near_bounds_set(&model, root, &NearBoundOptions::default()).is_empty()
        );
    }

    #[test]
    fn legacy_tol_overrides_both_tolerances() {
        let mut model = Model::new();
        let root = model.root();
        let v = model
            .add_variable(root, Variable::bounded(0.0, 10.0).with_value(9.5))
            .unwrap();

        let legacy = NearBoundOptions {
            legacy_tol: Some(1.0),
            ..Default::default()
        };
        assert_eq!(
            variables_near_bounds_set(&model, root, &legacy),
            BTreeSet::from([v])
        );
    }

    #[test]
    fn stranded_variable_detection() {
        let mut model = Model::new();
        let root = model.root();
        let child = model.add_block(root).unwrap();
        let stranded = model.add_variable(child, Variable::free()).unwrap();
        // Constraint lives on the root and references the child's variable.
        model.add_equality(root, Expr::var(stranded), 1.0).unwrap();
        model.deactivate_block(child).unwrap();

        assert_eq!(
            active_variables_in_deactivated_blocks_set(&model, root),
            BTreeSet::from([stranded])
        );
        assert_eq!(number_active_variables_in_deactivated_blocks(&model, root), 1);
    }
}
