//! Model builder methods for adding blocks, components, and grey-box nodes,
//! and for toggling activation and fixed state.

use strata_expr::{BlockId, ConstraintId, Expr, ExpressionId, GreyBoxId, ObjectiveId, VariableId};

use crate::greybox::GreyBox;
use crate::model::error::ModelError;
use crate::model::{Block, Model};
use crate::types::{Constraint, Objective, Variable};

impl Model {
    /// Add an empty active sub-block under a parent block.
    pub fn add_block(&mut self, parent: BlockId) -> Result<BlockId, ModelError> {
        self.ensure_block_exists(parent)?;
        let id = self.next_block_id();
        self.blocks.insert(id, Block::new_active());
        if let Some(parent_block) = self.blocks.get_mut(&parent) {
            parent_block.blocks.push(id);
        }
        Ok(id)
    }

    /// Add a variable to a block.
    pub fn add_variable(
        &mut self,
        block: BlockId,
        variable: Variable,
    ) -> Result<VariableId, ModelError> {
        self.ensure_block_exists(block)?;
        if let (Some(lower), Some(upper)) = (variable.lower, variable.upper) {
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(ModelError::InvalidVariableBounds { lower, upper });
            }
        }

        let id = self.next_variable_id();
        self.variables.insert(id, variable);
        self.variable_parent.insert(id, block);
        if let Some(owner) = self.blocks.get_mut(&block) {
            owner.variables.push(id);
        }
        Ok(id)
    }

    /// Add a constraint to a block.
    ///
    /// Every variable referenced by the body must already exist.
    pub fn add_constraint(
        &mut self,
        block: BlockId,
        constraint: Constraint,
    ) -> Result<ConstraintId, ModelError> {
        self.ensure_block_exists(block)?;
        if let (Some(lower), Some(upper)) = (constraint.lower, constraint.upper) {
            if lower.is_nan() || upper.is_nan() || lower > upper {
                return Err(ModelError::InvalidConstraintBounds { lower, upper });
            }
        }
        for var_id in constraint.body.variables() {
            self.ensure_variable_exists(var_id)?;
        }

        let id = self.next_constraint_id();
        self.constraints.insert(id, constraint);
        if let Some(owner) = self.blocks.get_mut(&block) {
            owner.constraints.push(id);
        }
        Ok(id)
    }

    /// Add an equality constraint: body == rhs.
    pub fn add_equality(
        &mut self,
        block: BlockId,
        body: Expr,
        rhs: f64,
    ) -> Result<ConstraintId, ModelError> {
        self.add_constraint(block, Constraint::equality(body, rhs))
    }

    /// Add an upper-bounded inequality: body <= upper.
    pub fn add_less_equal(
        &mut self,
        block: BlockId,
        body: Expr,
        upper: f64,
    ) -> Result<ConstraintId, ModelError> {
        self.add_constraint(block, Constraint::less_equal(body, upper))
    }

    /// Add a lower-bounded inequality: body >= lower.
    pub fn add_greater_equal(
        &mut self,
        block: BlockId,
        body: Expr,
        lower: f64,
    ) -> Result<ConstraintId, ModelError> {
        self.add_constraint(block, Constraint::greater_equal(body, lower))
    }

    /// Add an objective to a block.
    pub fn add_objective(
        &mut self,
        block: BlockId,
        objective: Objective,
    ) -> Result<ObjectiveId, ModelError> {
        self.ensure_block_exists(block)?;
        for var_id in objective.expr.variables() {
            self.ensure_variable_exists(var_id)?;
        }

        let id = self.next_objective_id();
        self.objectives.insert(id, objective);
        if let Some(owner) = self.blocks.get_mut(&block) {
            owner.objectives.push(id);
        }
        Ok(id)
    }

    /// Add an auxiliary named expression to a block.
    pub fn add_expression(
        &mut self,
        block: BlockId,
        expr: Expr,
    ) -> Result<ExpressionId, ModelError> {
        self.ensure_block_exists(block)?;
        for var_id in expr.variables() {
            self.ensure_variable_exists(var_id)?;
        }

        let id = self.next_expression_id();
        self.expressions.insert(id, expr);
        if let Some(owner) = self.blocks.get_mut(&block) {
            owner.expressions.push(id);
        }
        Ok(id)
    }

    /// Add a grey-box node to a block.
    ///
    /// Every input/output variable binding must reference an existing
    /// model variable.
    pub fn add_greybox(
        &mut self,
        block: BlockId,
        greybox: GreyBox,
    ) -> Result<GreyBoxId, ModelError> {
        self.ensure_block_exists(block)?;
        for var_id in greybox.variables() {
            self.ensure_variable_exists(var_id)?;
        }

        let id = self.next_greybox_id();
        let n_inputs = greybox.inputs().len();
        let n_outputs = greybox.outputs().len();
        self.greyboxes.insert(id, greybox);
        if let Some(owner) = self.blocks.get_mut(&block) {
            owner.greyboxes.push(id);
        }
        tracing::debug!(
            component = "model",
            operation = "add_greybox",
            status = "success",
            inputs = n_inputs,
            outputs = n_outputs,
            "Added grey-box node"
        );
        Ok(id)
    }

    // ── Activation toggles ──────────────────────────────────

    /// Activate a block.
    pub fn activate_block(&mut self, id: BlockId) -> Result<(), ModelError> {
        self.set_block_active(id, true)
    }

    /// Deactivate a block. Components beneath it remain in place but drop
    /// out of activated-mode traversals.
    pub fn deactivate_block(&mut self, id: BlockId) -> Result<(), ModelError> {
        self.set_block_active(id, false)
    }

    fn set_block_active(&mut self, id: BlockId, active: bool) -> Result<(), ModelError> {
        match self.blocks.get_mut(&id) {
            Some(block) => {
                block.active = active;
                Ok(())
            }
            None => Err(ModelError::InvalidBlockId(id)),
        }
    }

    /// Activate a constraint.
    pub fn activate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.set_constraint_active(id, true)
    }

    /// Deactivate a constraint.
    pub fn deactivate_constraint(&mut self, id: ConstraintId) -> Result<(), ModelError> {
        self.set_constraint_active(id, false)
    }

    fn set_constraint_active(&mut self, id: ConstraintId, active: bool) -> Result<(), ModelError> {
        match self.constraints.get_mut(&id) {
            Some(constraint) => {
                constraint.active = active;
                Ok(())
            }
            None => Err(ModelError::InvalidConstraintId(id)),
        }
    }

    /// Activate an objective.
    pub fn activate_objective(&mut self, id: ObjectiveId) -> Result<(), ModelError> {
        self.set_objective_active(id, true)
    }

    /// Deactivate an objective.
    pub fn deactivate_objective(&mut self, id: ObjectiveId) -> Result<(), ModelError> {
        self.set_objective_active(id, false)
    }

    fn set_objective_active(&mut self, id: ObjectiveId, active: bool) -> Result<(), ModelError> {
        match self.objectives.get_mut(&id) {
            Some(objective) => {
                objective.active = active;
                Ok(())
            }
            None => Err(ModelError::InvalidObjectiveId(id)),
        }
    }

    /// Activate a grey-box node.
    pub fn activate_greybox(&mut self, id: GreyBoxId) -> Result<(), ModelError> {
        self.set_greybox_active(id, true)
    }

    /// Deactivate a grey-box node. Its implicit equalities move to the
    /// deactivated counts and its variables drop out of the grey-box
    /// variable set.
    pub fn deactivate_greybox(&mut self, id: GreyBoxId) -> Result<(), ModelError> {
        self.set_greybox_active(id, false)
    }

    fn set_greybox_active(&mut self, id: GreyBoxId, active: bool) -> Result<(), ModelError> {
        match self.greyboxes.get_mut(&id) {
            Some(greybox) => {
                greybox.active = active;
                Ok(())
            }
            None => Err(ModelError::InvalidGreyBoxId(id)),
        }
    }

    // ── Variable state ──────────────────────────────────────

    /// Fix a variable at its current value.
    pub fn fix_variable(&mut self, id: VariableId) -> Result<(), ModelError> {
        self.set_variable_fixed(id, true)
    }

    /// Fix a variable at the given value.
    pub fn fix_variable_at(&mut self, id: VariableId, value: f64) -> Result<(), ModelError> {
        self.set_variable_value(id, Some(value))?;
        self.set_variable_fixed(id, true)
    }

    /// Release a fixed variable.
    pub fn unfix_variable(&mut self, id: VariableId) -> Result<(), ModelError> {
        self.set_variable_fixed(id, false)
    }

    fn set_variable_fixed(&mut self, id: VariableId, fixed: bool) -> Result<(), ModelError> {
        match self.variables.get_mut(&id) {
            Some(variable) => {
                variable.fixed = fixed;
                Ok(())
            }
            None => Err(ModelError::InvalidVariableId(id)),
        }
    }

    /// Assign or clear a variable's value.
    pub fn set_variable_value(
        &mut self,
        id: VariableId,
        value: Option<f64>,
    ) -> Result<(), ModelError> {
        match self.variables.get_mut(&id) {
            Some(variable) => {
                variable.value = value;
                Ok(())
            }
            None => Err(ModelError::InvalidVariableId(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_expr::Expr;

    #[test]
    fn test_add_block_under_invalid_parent_fails() {
        let mut model = Model::new();
        let result = model.add_block(BlockId::new(17));
        assert_eq!(result, Err(ModelError::InvalidBlockId(BlockId::new(17))));
    }

    #[test]
    fn test_add_variable_validates_bounds() {
        let mut model = Model::new();
        let root = model.root();
        let result = model.add_variable(root, Variable::bounded(5.0, 1.0));
        assert!(matches!(
            result,
            Err(ModelError::InvalidVariableBounds { .. })
        ));
        // One-sided bounds are never rejected.
        let v = Variable {
            value: None,
            lower: Some(3.0),
            upper: None,
            fixed: false,
        };
        assert!(model.add_variable(root, v).is_ok());
    }

    #[test]
    fn test_add_constraint_validates_body_variables() {
        let mut model = Model::new();
        let root = model.root();
        let missing = VariableId::new(99);
        let result = model.add_equality(root, Expr::var(missing), 1.0);
        assert_eq!(result, Err(ModelError::InvalidVariableId(missing)));
    }

    #[test]
    fn test_add_constraint_validates_bounds() {
        let mut model = Model::new();
        let root = model.root();
        let v = model.add_variable(root, Variable::free()).unwrap();
        let result = model.add_constraint(
            root,
            Constraint {
                body: Expr::var(v),
                lower: Some(10.0),
                upper: Some(0.0),
                active: true,
            },
        );
        assert!(matches!(
            result,
            Err(ModelError::InvalidConstraintBounds { .. })
        ));
    }

    #[test]
    fn test_block_activation_toggle() {
        let mut model = Model::new();
        let root = model.root();
        let child = model.add_block(root).unwrap();
        assert!(model.block(child).active);
        model.deactivate_block(child).unwrap();
        assert!(!model.block(child).active);
        model.activate_block(child).unwrap();
        assert!(model.block(child).active);
    }

    #[test]
    fn test_constraint_activation_toggle() {
        let mut model = Model::new();
        let root = model.root();
        let v = model.add_variable(root, Variable::free()).unwrap();
        let c = model.add_equality(root, Expr::var(v), 0.0).unwrap();
        model.deactivate_constraint(c).unwrap();
        assert!(!model.get_constraint(c).unwrap().active);
        model.activate_constraint(c).unwrap();
        assert!(model.get_constraint(c).unwrap().active);
    }

    #[test]
    fn test_fix_variable_at_value() {
        let mut model = Model::new();
        let root = model.root();
        let v = model.add_variable(root, Variable::free()).unwrap();
        model.fix_variable_at(v, 7.0).unwrap();
        let var = model.get_variable(v).unwrap();
        assert!(var.fixed);
        assert_eq!(var.value, Some(7.0));
        model.unfix_variable(v).unwrap();
        assert!(!model.get_variable(v).unwrap().fixed);
    }

    #[test]
    fn test_add_greybox_validates_bindings() {
        use crate::greybox::test_support::FixedEqualities;
        use crate::greybox::GreyBox;
        use std::sync::Arc;

        let mut model = Model::new();
        let root = model.root();
        let gb = GreyBox::new(Arc::new(FixedEqualities(1)))
            .with_input("feed", VariableId::new(12));
        let result = model.add_greybox(root, gb);
        assert_eq!(
            result,
            Err(ModelError::InvalidVariableId(VariableId::new(12)))
        );
    }
}
