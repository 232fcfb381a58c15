//! Constraint classifiers: activation, equality, and inequality splits.
//!
//! The "total" streams cover every constraint local to the root or held by
//! an activated sub-block, regardless of the constraint's own flag; the
//! "activated" streams additionally require the constraint flag. Grey-box
//! nodes contribute implicit equalities to the counts without appearing in
//! the constraint streams themselves.

use std::collections::BTreeSet;

use strata_expr::{BlockId, ConstraintId};

use crate::model::Model;
use crate::stats::greybox::{
    number_activated_greybox_equalities, number_deactivated_greybox_equalities,
};
use crate::stats::walk::component_blocks;

/// Every constraint in `root` and its activated sub-blocks, regardless of
/// the constraint's own activation flag.
pub fn constraints_in_activated_blocks(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    component_blocks(model, root)
        .flat_map(move |block_id| model.block(block_id).constraints().iter().copied())
}

/// Constraints that are activated: flagged active and reachable through
/// activated blocks.
pub fn activated_constraints_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    constraints_in_activated_blocks(model, root).filter(move |id| model.constraint(*id).active)
}

/// Constraints that sit in activated blocks but are themselves deactivated.
pub fn deactivated_constraints_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    constraints_in_activated_blocks(model, root).filter(move |id| !model.constraint(*id).active)
}

/// Set of all constraints in activated blocks.
pub fn total_constraints_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    constraints_in_activated_blocks(model, root).collect()
}

/// Total constraint count, including grey-box implicit equalities.
pub fn number_total_constraints(model: &Model, root: BlockId) -> usize {
    total_constraints_set(model, root).len() + number_activated_greybox_equalities(model, root)
}

/// Set of activated constraints.
pub fn activated_constraints_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    activated_constraints_generator(model, root).collect()
}

/// Number of activated constraints (standard constraints only; grey-box
/// contributions are counted by the equality classifiers).
pub fn number_activated_constraints(model: &Model, root: BlockId) -> usize {
    activated_constraints_set(model, root).len()
}

/// Set of deactivated constraints.
pub fn deactivated_constraints_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    deactivated_constraints_generator(model, root).collect()
}

/// Number of deactivated constraints, including equalities held by
/// deactivated grey-box nodes.
pub fn number_deactivated_constraints(model: &Model, root: BlockId) -> usize {
    deactivated_constraints_set(model, root).len()
        + number_deactivated_greybox_equalities(model, root)
}

// ── Equality constraints ────────────────────────────────────

/// All equality constraints in activated blocks, regardless of their own
/// activation flag.
pub fn total_equalities_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    constraints_in_activated_blocks(model, root)
        .filter(move |id| model.constraint(*id).is_equality())
}

/// Set of all equality constraints.
pub fn total_equalities_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    total_equalities_generator(model, root).collect()
}

/// Total equality count, including activated grey-box equalities.
pub fn number_total_equalities(model: &Model, root: BlockId) -> usize {
    total_equalities_set(model, root).len() + number_activated_greybox_equalities(model, root)
}

/// Activated equality constraints.
pub fn activated_equalities_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    activated_constraints_generator(model, root)
        .filter(move |id| model.constraint(*id).is_equality())
}

/// Set of activated equality constraints.
pub fn activated_equalities_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    activated_equalities_generator(model, root).collect()
}

/// Number of activated equalities, including grey-box contributions.
pub fn number_activated_equalities(model: &Model, root: BlockId) -> usize {
    activated_equalities_set(model, root).len() + number_activated_greybox_equalities(model, root)
}

/// Equality constraints in activated blocks that are themselves deactivated.
pub fn deactivated_equalities_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    total_equalities_generator(model, root).filter(move |id| !model.constraint(*id).active)
}

/// Set of deactivated equality constraints.
pub fn deactivated_equalities_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    deactivated_equalities_generator(model, root).collect()
}

/// Number of deactivated equalities, including equalities held by
/// deactivated grey-box nodes.
pub fn number_deactivated_equalities(model: &Model, root: BlockId) -> usize {
    deactivated_equalities_set(model, root).len()
        + number_deactivated_greybox_equalities(model, root)
}

// ── Inequality constraints ──────────────────────────────────

/// All inequality constraints in activated blocks, regardless of their own
/// activation flag. A constraint missing at least one bound is an
/// inequality, including the degenerate no-bound case.
pub fn total_inequalities_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    constraints_in_activated_blocks(model, root)
        .filter(move |id| model.constraint(*id).is_inequality())
}

/// Set of all inequality constraints.
pub fn total_inequalities_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    total_inequalities_generator(model, root).collect()
}

/// Total inequality count. Grey-box nodes never contribute inequalities.
pub fn number_total_inequalities(model: &Model, root: BlockId) -> usize {
    total_inequalities_set(model, root).len()
}

/// Activated inequality constraints.
pub fn activated_inequalities_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    activated_constraints_generator(model, root)
        .filter(move |id| model.constraint(*id).is_inequality())
}

/// Set of activated inequality constraints.
pub fn activated_inequalities_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    activated_inequalities_generator(model, root).collect()
}

/// Number of activated inequalities.
pub fn number_activated_inequalities(model: &Model, root: BlockId) -> usize {
    activated_inequalities_set(model, root).len()
}

/// Inequality constraints in activated blocks that are themselves
/// deactivated.
pub fn deactivated_inequalities_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ConstraintId> + '_ {
    total_inequalities_generator(model, root).filter(move |id| !model.constraint(*id).active)
}

/// Set of deactivated inequality constraints.
pub fn deactivated_inequalities_set(model: &Model, root: BlockId) -> BTreeSet<ConstraintId> {
    deactivated_inequalities_generator(model, root).collect()
}

/// Number of deactivated inequalities.
pub fn number_deactivated_inequalities(model: &Model, root: BlockId) -> usize {
    deactivated_inequalities_set(model, root).len()
}
