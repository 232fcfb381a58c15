//! Grey-box adapter: locates opaque sub-models and derives their fixed
//! contributions.
//!
//! Grey-box nodes are not expression trees the walker can descend into.
//! Each activated node contributes `|outputs| + n_equality_constraints()`
//! implicit equalities and zero inequalities, and its input/output
//! variables join every variable classification unconditionally because
//! they never appear in ordinary constraint bodies.

use std::collections::BTreeSet;

use strata_expr::{BlockId, GreyBoxId, VariableId};

use crate::model::Model;
use crate::stats::walk::component_blocks;

/// All grey-box nodes in `root` and its activated sub-blocks.
pub fn greybox_block_set(model: &Model, root: BlockId) -> BTreeSet<GreyBoxId> {
    let mut set = BTreeSet::new();
    for block_id in component_blocks(model, root) {
        set.extend(model.block(block_id).greyboxes().iter().copied());
    }
    set
}

/// Number of grey-box nodes.
pub fn number_greybox_blocks(model: &Model, root: BlockId) -> usize {
    greybox_block_set(model, root).len()
}

/// Grey-box nodes that are themselves flagged active.
pub fn activated_greybox_block_set(model: &Model, root: BlockId) -> BTreeSet<GreyBoxId> {
    greybox_block_set(model, root)
        .into_iter()
        .filter(|id| model.greybox(*id).active)
        .collect()
}

/// Number of activated grey-box nodes.
pub fn number_activated_greybox_blocks(model: &Model, root: BlockId) -> usize {
    activated_greybox_block_set(model, root).len()
}

/// Grey-box nodes that are not activated: total minus activated, the same
/// complement rule used for blocks.
pub fn deactivated_greybox_block_set(model: &Model, root: BlockId) -> BTreeSet<GreyBoxId> {
    greybox_block_set(model, root)
        .difference(&activated_greybox_block_set(model, root))
        .copied()
        .collect()
}

/// Number of deactivated grey-box nodes.
pub fn number_deactivated_greybox_blocks(model: &Model, root: BlockId) -> usize {
    deactivated_greybox_block_set(model, root).len()
}

/// Implicit equality constraints contributed by activated grey-box nodes.
///
/// A grey-box model is always treated as zero-DOF: each output is one
/// implicit equality `output == f(inputs)`, on top of the external model's
/// internal equality count, whether or not it optimizes internally.
pub fn number_activated_greybox_equalities(model: &Model, root: BlockId) -> usize {
    activated_greybox_block_set(model, root)
        .iter()
        .map(|id| model.greybox(*id).equality_contribution())
        .sum()
}

/// Implicit equality constraints held by deactivated grey-box nodes.
pub fn number_deactivated_greybox_equalities(model: &Model, root: BlockId) -> usize {
    deactivated_greybox_block_set(model, root)
        .iter()
        .map(|id| model.greybox(*id).equality_contribution())
        .sum()
}

/// Input and output variables of every activated grey-box node.
///
/// This is the single source the general variable classifiers union in;
/// it is never recomputed with different rules elsewhere.
pub fn greybox_variables(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    let mut set = BTreeSet::new();
    for id in activated_greybox_block_set(model, root) {
        set.extend(model.greybox(id).variables());
    }
    set
}

/// Number of grey-box input/output variables.
pub fn number_greybox_variables(model: &Model, root: BlockId) -> usize {
    greybox_variables(model, root).len()
}

/// Grey-box variables that are not fixed.
pub fn unfixed_greybox_variables(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    greybox_variables(model, root)
        .into_iter()
        .filter(|id| !model.variable(*id).fixed)
        .collect()
}

/// Number of unfixed grey-box variables.
pub fn number_unfixed_greybox_variables(model: &Model, root: BlockId) -> usize {
    unfixed_greybox_variables(model, root).len()
}
