//! Shared model fixtures for the statistics integration tests.

use std::sync::Arc;

use strata_expr::{BlockId, ConstraintId, Expr, VariableId};

use crate::greybox::{test_support::FixedEqualities, GreyBox};
use crate::model::Model;
use crate::types::{Objective, Variable};

/// A three-level model with an activated branch, a deactivated branch, and
/// an activated grandchild hidden behind the deactivated branch.
pub struct Nested {
    pub model: Model,
    pub root: BlockId,
    pub sub: BlockId,
    pub off: BlockId,
    pub hidden: BlockId,
    pub v1: VariableId,
    pub v2: VariableId,
    pub v3: VariableId,
    pub v_fixed: VariableId,
    pub w1: VariableId,
    pub w_fixed: VariableId,
    pub u1: VariableId,
    pub g1: VariableId,
    pub root_equality: ConstraintId,
    pub sub_equality: ConstraintId,
    pub off_equality: ConstraintId,
    pub hidden_equality: ConstraintId,
}

pub fn nested() -> Nested {
    let mut model = Model::new();
    let root = model.root();
    model.set_block_name(root, "root".to_string()).unwrap();

    let v1 = model
        .add_variable(root, Variable::free().with_value(1.0))
        .unwrap();
    let v2 = model
        .add_variable(root, Variable::free().with_value(0.0))
        .unwrap();
    let v3 = model
        .add_variable(root, Variable::bounded(0.0, 10.0).with_value(5.0))
        .unwrap();
    let v_fixed = model.add_variable(root, Variable::fixed_at(2.0)).unwrap();

    let root_equality = model
        .add_equality(root, Expr::var(v1).add(&Expr::var(v2)), 1.0)
        .unwrap();
    model.add_less_equal(root, Expr::var(v3), 10.0).unwrap();
    model
        .add_objective(root, Objective::minimize(Expr::var(v1)))
        .unwrap();
    model
        .add_expression(root, Expr::var(v1).add(&Expr::var(v2)))
        .unwrap();

    // Activated branch.
    let sub = model.add_block(root).unwrap();
    let w1 = model
        .add_variable(sub, Variable::free().with_value(1.0))
        .unwrap();
    let w_fixed = model.add_variable(sub, Variable::fixed_at(0.0)).unwrap();
    let sub_equality = model
        .add_equality(sub, Expr::var(w1) - Expr::var(v1), 0.0)
        .unwrap();
    model
        .add_greater_equal(sub, Expr::var(w_fixed), 0.0)
        .unwrap();

    // Deactivated branch.
    let off = model.add_block(root).unwrap();
    let u1 = model.add_variable(off, Variable::free()).unwrap();
    let off_equality = model.add_equality(off, Expr::var(u1), 0.0).unwrap();
    model
        .add_objective(off, Objective::maximize(Expr::var(u1)))
        .unwrap();

    // Activated grandchild behind the deactivated branch. Blocked by path.
    let hidden = model.add_block(off).unwrap();
    let g1 = model.add_variable(hidden, Variable::free()).unwrap();
    let hidden_equality = model.add_equality(hidden, Expr::var(g1), 0.0).unwrap();

    model.deactivate_block(off).unwrap();

    Nested {
        model,
        root,
        sub,
        off,
        hidden,
        v1,
        v2,
        v3,
        v_fixed,
        w1,
        w_fixed,
        u1,
        g1,
        root_equality,
        sub_equality,
        off_equality,
        hidden_equality,
    }
}

/// A flat model with one grey-box node binding three inputs (one fixed)
/// and two outputs, backed by an external model with three internal
/// equality constraints.
pub struct WithGreyBox {
    pub model: Model,
    pub root: BlockId,
    pub inputs: [VariableId; 3],
    pub outputs: [VariableId; 2],
    pub free_var: VariableId,
    pub greybox: strata_expr::GreyBoxId,
}

pub fn with_greybox() -> WithGreyBox {
    let mut model = Model::new();
    let root = model.root();

    let inputs = [
        model.add_variable(root, Variable::fixed_at(300.0)).unwrap(),
        model
            .add_variable(root, Variable::free().with_value(1.5))
            .unwrap(),
        model.add_variable(root, Variable::free()).unwrap(),
    ];
    let outputs = [
        model.add_variable(root, Variable::free()).unwrap(),
        model.add_variable(root, Variable::free()).unwrap(),
    ];
    let free_var = model.add_variable(root, Variable::free()).unwrap();
    model.add_equality(root, Expr::var(free_var), 1.0).unwrap();

    let greybox = model
        .add_greybox(
            root,
            GreyBox::new(Arc::new(FixedEqualities(3)))
                .with_input("temperature", inputs[0])
                .with_input("flow_in", inputs[1])
                .with_input("pressure", inputs[2])
                .with_output("flow_out", outputs[0])
                .with_output("duty", outputs[1]),
        )
        .unwrap();

    WithGreyBox {
        model,
        root,
        inputs,
        outputs,
        free_var,
        greybox,
    }
}
