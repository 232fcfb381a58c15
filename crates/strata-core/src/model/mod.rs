//! Model module: the hierarchical component arena.
//!
//! # Module Organization
//!
//! - [`error`]: Model error types
//! - [`builder`]: Methods for adding blocks, variables, constraints,
//!   objectives, expressions, and grey-box nodes
//! - [`metadata`]: Component naming and metadata
//!
//! Components are owned by arena maps keyed by typed IDs; a [`Block`] holds
//! the IDs of its children. IDs are the stable identity every statistics
//! query deduplicates on. The statistics engine in [`crate::stats`] only
//! reads this structure; all mutation happens through the methods here.

mod builder;
mod error;
mod metadata;

use std::collections::BTreeMap;

use strata_expr::{
    BlockId, ConstraintId, Expr, ExpressionId, GreyBoxId, ObjectiveId, VariableId,
};

use crate::greybox::GreyBox;
use crate::types::{Constraint, Objective, Variable};

pub use error::ModelError;

/// A container node: an activation flag plus typed child-ID lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub active: bool,
    pub(crate) blocks: Vec<BlockId>,
    pub(crate) variables: Vec<VariableId>,
    pub(crate) constraints: Vec<ConstraintId>,
    pub(crate) objectives: Vec<ObjectiveId>,
    pub(crate) expressions: Vec<ExpressionId>,
    pub(crate) greyboxes: Vec<GreyBoxId>,
}

impl Block {
    pub(crate) fn new_active() -> Self {
        Self {
            active: true,
            ..Default::default()
        }
    }

    pub fn sub_blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    pub fn objectives(&self) -> &[ObjectiveId] {
        &self.objectives
    }

    pub fn expressions(&self) -> &[ExpressionId] {
        &self.expressions
    }

    pub fn greyboxes(&self) -> &[GreyBoxId] {
        &self.greyboxes
    }
}

/// A hierarchical algebraic model.
///
/// Created with one active root block. Construction and mutation go through
/// the builder methods; the statistics engine never writes back.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) blocks: BTreeMap<BlockId, Block>,
    pub(crate) variables: BTreeMap<VariableId, Variable>,
    pub(crate) constraints: BTreeMap<ConstraintId, Constraint>,
    pub(crate) objectives: BTreeMap<ObjectiveId, Objective>,
    pub(crate) expressions: BTreeMap<ExpressionId, Expr>,
    pub(crate) greyboxes: BTreeMap<GreyBoxId, GreyBox>,
    // Owning block per variable, for the stranded-variable check.
    pub(crate) variable_parent: BTreeMap<VariableId, BlockId>,
    root: BlockId,
    next_block_id: u32,
    next_variable_id: u32,
    next_constraint_id: u32,
    next_objective_id: u32,
    next_expression_id: u32,
    next_greybox_id: u32,
    // Lazy-allocated metadata storage
    pub(crate) block_names: Option<BTreeMap<BlockId, String>>,
    pub(crate) variable_names: Option<BTreeMap<VariableId, String>>,
    pub(crate) constraint_names: Option<BTreeMap<ConstraintId, String>>,
    pub(crate) variable_metadata: Option<BTreeMap<VariableId, serde_json::Value>>,
    pub(crate) constraint_metadata: Option<BTreeMap<ConstraintId, serde_json::Value>>,
}

impl Model {
    /// Create a new model with a single active root block.
    pub fn new() -> Self {
        let root = BlockId::new(0);
        let mut blocks = BTreeMap::new();
        blocks.insert(root, Block::new_active());
        Self {
            blocks,
            variables: BTreeMap::new(),
            constraints: BTreeMap::new(),
            objectives: BTreeMap::new(),
            expressions: BTreeMap::new(),
            greyboxes: BTreeMap::new(),
            variable_parent: BTreeMap::new(),
            root,
            next_block_id: 1,
            next_variable_id: 0,
            next_constraint_id: 0,
            next_objective_id: 0,
            next_expression_id: 0,
            next_greybox_id: 0,
            block_names: None,
            variable_names: None,
            constraint_names: None,
            variable_metadata: None,
            constraint_metadata: None,
        }
    }

    /// The root block.
    pub fn root(&self) -> BlockId {
        self.root
    }

    // ── Fallible component access ───────────────────────────

    pub fn get_block(&self, id: BlockId) -> Result<&Block, ModelError> {
        self.blocks.get(&id).ok_or(ModelError::InvalidBlockId(id))
    }

    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(&id)
            .ok_or(ModelError::InvalidVariableId(id))
    }

    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(&id)
            .ok_or(ModelError::InvalidConstraintId(id))
    }

    pub fn get_objective(&self, id: ObjectiveId) -> Result<&Objective, ModelError> {
        self.objectives
            .get(&id)
            .ok_or(ModelError::InvalidObjectiveId(id))
    }

    pub fn get_expression(&self, id: ExpressionId) -> Result<&Expr, ModelError> {
        self.expressions
            .get(&id)
            .ok_or(ModelError::InvalidExpressionId(id))
    }

    pub fn get_greybox(&self, id: GreyBoxId) -> Result<&GreyBox, ModelError> {
        self.greyboxes
            .get(&id)
            .ok_or(ModelError::InvalidGreyBoxId(id))
    }

    // ── Infallible access for traversal ─────────────────────
    // A bad ID here is a programmer error (stale handle or wrong model),
    // so these fail fast instead of absorbing it.

    /// # Panics
    /// Panics if the block ID does not exist in this model.
    pub fn block(&self, id: BlockId) -> &Block {
        match self.blocks.get(&id) {
            Some(block) => block,
            None => panic!("block ID {} does not exist in this model", id.inner()),
        }
    }

    pub(crate) fn variable(&self, id: VariableId) -> &Variable {
        match self.variables.get(&id) {
            Some(variable) => variable,
            None => panic!("variable ID {} does not exist in this model", id.inner()),
        }
    }

    pub(crate) fn constraint(&self, id: ConstraintId) -> &Constraint {
        match self.constraints.get(&id) {
            Some(constraint) => constraint,
            None => panic!("constraint ID {} does not exist in this model", id.inner()),
        }
    }

    pub(crate) fn objective(&self, id: ObjectiveId) -> &Objective {
        match self.objectives.get(&id) {
            Some(objective) => objective,
            None => panic!("objective ID {} does not exist in this model", id.inner()),
        }
    }

    pub(crate) fn greybox(&self, id: GreyBoxId) -> &GreyBox {
        match self.greyboxes.get(&id) {
            Some(greybox) => greybox,
            None => panic!("grey-box ID {} does not exist in this model", id.inner()),
        }
    }

    // ── Read helpers used by the statistics engine ──────────

    /// Current value of a variable, if assigned.
    pub fn variable_value(&self, id: VariableId) -> Option<f64> {
        self.variables.get(&id).and_then(|v| v.value)
    }

    /// Owning block of a variable.
    pub fn variable_parent(&self, id: VariableId) -> Result<BlockId, ModelError> {
        self.variable_parent
            .get(&id)
            .copied()
            .ok_or(ModelError::InvalidVariableId(id))
    }

    pub(crate) fn ensure_block_exists(&self, id: BlockId) -> Result<(), ModelError> {
        if self.blocks.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidBlockId(id))
        }
    }

    pub(crate) fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if self.variables.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    pub(crate) fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        if self.constraints.contains_key(&id) {
            Ok(())
        } else {
            Err(ModelError::InvalidConstraintId(id))
        }
    }

    pub(crate) fn next_block_id(&mut self) -> BlockId {
        let id = BlockId::new(self.next_block_id);
        self.next_block_id += 1;
        id
    }

    pub(crate) fn next_variable_id(&mut self) -> VariableId {
        let id = VariableId::new(self.next_variable_id);
        self.next_variable_id += 1;
        id
    }

    pub(crate) fn next_constraint_id(&mut self) -> ConstraintId {
        let id = ConstraintId::new(self.next_constraint_id);
        self.next_constraint_id += 1;
        id
    }

    pub(crate) fn next_objective_id(&mut self) -> ObjectiveId {
        let id = ObjectiveId::new(self.next_objective_id);
        self.next_objective_id += 1;
        id
    }

    pub(crate) fn next_expression_id(&mut self) -> ExpressionId {
        let id = ExpressionId::new(self.next_expression_id);
        self.next_expression_id += 1;
        id
    }

    pub(crate) fn next_greybox_id(&mut self) -> GreyBoxId {
        let id = GreyBoxId::new(self.next_greybox_id);
        self.next_greybox_id += 1;
        id
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Variable;
    use strata_expr::Expr;

    #[test]
    fn test_new_model_has_active_root() {
        let model = Model::new();
        assert!(model.block(model.root()).active);
        assert!(model.block(model.root()).sub_blocks().is_empty());
    }

    #[test]
    fn test_get_with_invalid_ids_fails() {
        let model = Model::new();
        assert_eq!(
            model.get_block(BlockId::new(99)),
            Err(ModelError::InvalidBlockId(BlockId::new(99)))
        );
        assert_eq!(
            model.get_variable(VariableId::new(99)),
            Err(ModelError::InvalidVariableId(VariableId::new(99)))
        );
        assert_eq!(
            model.get_constraint(ConstraintId::new(99)),
            Err(ModelError::InvalidConstraintId(ConstraintId::new(99)))
        );
    }

    #[test]
    #[should_panic(expected = "block ID 42 does not exist")]
    fn test_traversal_access_panics_on_bad_block() {
        let model = Model::new();
        let _ = model.block(BlockId::new(42));
    }

    #[test]
    fn test_variable_parent_tracking() {
        let mut model = Model::new();
        let root = model.root();
        let child = model.add_block(root).unwrap();
        let v = model.add_variable(child, Variable::free()).unwrap();
        assert_eq!(model.variable_parent(v), Ok(child));
    }

    #[test]
    fn test_variable_value_lookup() {
        let mut model = Model::new();
        let root = model.root();
        let v = model
            .add_variable(root, Variable::free().with_value(2.5))
            .unwrap();
        assert_eq!(model.variable_value(v), Some(2.5));

        let unset = model.add_variable(root, Variable::free()).unwrap();
        assert_eq!(model.variable_value(unset), None);
    }

    #[test]
    fn test_expression_storage() {
        let mut model = Model::new();
        let root = model.root();
        let v = model.add_variable(root, Variable::free()).unwrap();
        let e = model.add_expression(root, Expr::term(v, 2.0)).unwrap();
        assert_eq!(model.get_expression(e).unwrap().linear_terms().len(), 1);
    }
}
