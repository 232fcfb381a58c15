//! Block-tree traversal primitives.
//!
//! "Activated" is a path property: a block several levels deep is activated
//! only if every ancestor block between it and the root is active, and it is
//! active itself. The walker therefore carries an explicit traversal mode
//! instead of a post-hoc predicate filter. The root's own flag is never
//! consulted here; callers that need to gate on it do so themselves.

use strata_expr::BlockId;

use crate::model::Model;

/// Traversal mode for descending the block tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Descend into and yield every sub-block regardless of activation.
    Total,
    /// Descend into and yield only sub-blocks on an unbroken active path.
    Activated,
}

/// Lazy iterator over the strict descendants of a block.
///
/// Yields blocks in depth-first order. Order is stable for a fixed model but
/// carries no semantic meaning; every consumer deduplicates into identity
/// sets before counting.
pub struct SubBlocks<'a> {
    model: &'a Model,
    stack: Vec<BlockId>,
    mode: Traversal,
}

impl<'a> Iterator for SubBlocks<'a> {
    type Item = BlockId;

    fn next(&mut self) -> Option<BlockId> {
        let id = self.stack.pop()?;
        for child in self.model.block(id).sub_blocks() {
            if self.eligible(*child) {
                self.stack.push(*child);
            }
        }
        Some(id)
    }
}

impl<'a> SubBlocks<'a> {
    fn eligible(&self, id: BlockId) -> bool {
        match self.mode {
            Traversal::Total => true,
            Traversal::Activated => self.model.block(id).active,
        }
    }
}

/// Iterate the strict descendants of `root` under the given traversal mode.
///
/// `root` itself is never yielded and its own `active` flag is ignored.
pub fn sub_blocks(model: &Model, root: BlockId, mode: Traversal) -> SubBlocks<'_> {
    let mut walker = SubBlocks {
        model,
        stack: Vec::new(),
        mode,
    };
    for child in model.block(root).sub_blocks() {
        if walker.eligible(*child) {
            walker.stack.push(*child);
        }
    }
    walker
}

/// Block stream underlying every "components of activated blocks" query:
/// the root first (regardless of its own flag), then every sub-block on an
/// active path.
pub fn component_blocks(
    model: &Model,
    root: BlockId,
) -> impl Iterator<Item = BlockId> + '_ {
    std::iter::once(root).chain(sub_blocks(model, root, Traversal::Activated))
}
