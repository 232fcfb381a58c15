//! Block classifiers.

use std::collections::BTreeSet;

use strata_expr::BlockId;

use crate::model::Model;
use crate::stats::walk::{sub_blocks, Traversal};

/// All blocks beneath `root`, plus `root` itself.
pub fn total_blocks_set(model: &Model, root: BlockId) -> BTreeSet<BlockId> {
    let mut set: BTreeSet<BlockId> = sub_blocks(model, root, Traversal::Total).collect();
    set.insert(root);
    set
}

/// Number of blocks in the model, including `root`.
pub fn number_total_blocks(model: &Model, root: BlockId) -> usize {
    total_blocks_set(model, root).len()
}

/// All blocks reachable from `root` through an unbroken active path.
/// `root` is included only if it is itself active.
pub fn activated_blocks_set(model: &Model, root: BlockId) -> BTreeSet<BlockId> {
    let mut set = BTreeSet::new();
    if model.block(root).active {
        set.insert(root);
        set.extend(sub_blocks(model, root, Traversal::Activated));
    }
    set
}

/// Number of activated blocks, including `root` if active.
pub fn number_activated_blocks(model: &Model, root: BlockId) -> usize {
    activated_blocks_set(model, root).len()
}

/// All blocks that are not activated.
///
/// Always computed as total minus activated: activation is path-dependent,
/// so a direct "inactive" predicate walk cannot recover blocks that are
/// self-active but sit beneath an inactive ancestor.
pub fn deactivated_blocks_set(model: &Model, root: BlockId) -> BTreeSet<BlockId> {
    total_blocks_set(model, root)
        .difference(&activated_blocks_set(model, root))
        .copied()
        .collect()
}

/// Number of deactivated blocks.
pub fn number_deactivated_blocks(model: &Model, root: BlockId) -> usize {
    number_total_blocks(model, root) - number_activated_blocks(model, root)
}
