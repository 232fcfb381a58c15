//! Objective and auxiliary-expression classifiers.

use std::collections::BTreeSet;

use strata_expr::{BlockId, ExpressionId, ObjectiveId};

use crate::model::Model;
use crate::stats::walk::component_blocks;

/// Every objective in `root` and its activated sub-blocks, regardless of
/// the objective's own activation flag.
pub fn total_objectives_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ObjectiveId> + '_ {
    component_blocks(model, root)
        .flat_map(move |block_id| model.block(block_id).objectives().iter().copied())
}

/// Set of all objectives.
pub fn total_objectives_set(model: &Model, root: BlockId) -> BTreeSet<ObjectiveId> {
    total_objectives_generator(model, root).collect()
}

/// Number of objectives.
pub fn number_total_objectives(model: &Model, root: BlockId) -> usize {
    total_objectives_set(model, root).len()
}

/// Activated objectives.
pub fn activated_objectives_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ObjectiveId> + '_ {
    total_objectives_generator(model, root).filter(move |id| model.objective(*id).active)
}

/// Set of activated objectives.
pub fn activated_objectives_set(model: &Model, root: BlockId) -> BTreeSet<ObjectiveId> {
    activated_objectives_generator(model, root).collect()
}

/// Number of activated objectives.
pub fn number_activated_objectives(model: &Model, root: BlockId) -> usize {
    activated_objectives_set(model, root).len()
}

/// Objectives in activated blocks that are themselves deactivated.
pub fn deactivated_objectives_generator(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = ObjectiveId> + '_ {
    total_objectives_generator(model, root).filter(move |id| !model.objective(*id).active)
}

/// Set of deactivated objectives.
pub fn deactivated_objectives_set(model: &Model, root: BlockId) -> BTreeSet<ObjectiveId> {
    deactivated_objectives_generator(model, root).collect()
}

/// Number of deactivated objectives.
pub fn number_deactivated_objectives(model: &Model, root: BlockId) -> usize {
    deactivated_objectives_set(model, root).len()
}

/// Auxiliary expressions in `root` and its activated sub-blocks.
/// Expressions have no activation semantics of their own.
pub fn expressions_set(model: &Model, root: BlockId) -> BTreeSet<ExpressionId> {
    component_blocks(model, root)
        .flat_map(|block_id| model.block(block_id).expressions().iter().copied())
        .collect()
}

/// Number of auxiliary expressions.
pub fn number_expressions(model: &Model, root: BlockId) -> usize {
    expressions_set(model, root).len()
}
