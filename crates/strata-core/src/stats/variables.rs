//! Variable classifiers.
//!
//! Variable results are always identity sets, never raw streams: a variable
//! referenced from several constraint bodies must count once. Grey-box
//! input/output variables join every classification through
//! [`greybox_variables`] because they never appear in constraint bodies.

use std::collections::BTreeSet;

use strata_expr::{BlockId, VariableId};

use crate::model::Model;
use crate::stats::constraints::{
    activated_constraints_generator, activated_equalities_generator,
    activated_inequalities_generator,
};
use crate::stats::greybox::greybox_variables;
use crate::stats::walk::component_blocks;

/// Variables declared in `root` and its activated sub-blocks, before the
/// grey-box union. Internal building block for the public sets.
fn declared_variables(model: &Model, root: BlockId) -> impl Iterator<Item = VariableId> + '_ {
    component_blocks(model, root)
        .flat_map(move |block_id| model.block(block_id).variables().iter().copied())
}

/// All variables in the model: declared variables plus grey-box
/// input/output variables.
pub fn variables_set(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    let mut set: BTreeSet<VariableId> = declared_variables(model, root).collect();
    set.extend(greybox_variables(model, root));
    set
}

/// Number of variables.
pub fn number_variables(model: &Model, root: BlockId) -> usize {
    variables_set(model, root).len()
}

/// Fixed variables (grey-box variables included).
pub fn fixed_variables_set(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    variables_set(model, root)
        .into_iter()
        .filter(|id| model.variable(*id).fixed)
        .collect()
}

/// Number of fixed variables.
pub fn number_fixed_variables(model: &Model, root: BlockId) -> usize {
    fixed_variables_set(model, root).len()
}

/// Unfixed variables (grey-box variables included).
pub fn unfixed_variables_set(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    variables_set(model, root)
        .into_iter()
        .filter(|id| !model.variable(*id).fixed)
        .collect()
}

/// Number of unfixed variables.
pub fn number_unfixed_variables(model: &Model, root: BlockId) -> usize {
    unfixed_variables_set(model, root).len()
}

// ── Variables referenced by constraints ─────────────────────

/// Variables referenced in any activated constraint's body, plus all
/// grey-box variables (always considered used).
pub fn variables_in_activated_constraints_set(
    model: &Model,
    root: BlockId,
) -> BTreeSet<VariableId> {
    let mut set = BTreeSet::new();
    for constraint_id in activated_constraints_generator(model, root) {
        set.extend(model.constraint(constraint_id).body.variables());
    }
    set.extend(greybox_variables(model, root));
    set
}

/// Number of variables in activated constraints.
pub fn number_variables_in_activated_constraints(model: &Model, root: BlockId) -> usize {
    variables_in_activated_constraints_set(model, root).len()
}

/// Variables that appear in no activated constraint.
pub fn variables_not_in_activated_constraints_set(
    model: &Model,
    root: BlockId,
) -> BTreeSet<VariableId> {
    variables_set(model, root)
        .difference(&variables_in_activated_constraints_set(model, root))
        .copied()
        .collect()
}

/// Number of variables in no activated constraint.
pub fn number_variables_not_in_activated_constraints(model: &Model, root: BlockId) -> usize {
    variables_not_in_activated_constraints_set(model, root).len()
}

/// Variables referenced in activated equality constraints, plus all
/// grey-box variables.
pub fn variables_in_activated_equalities_set(
    model: &Model,
    root: BlockId,
) -> BTreeSet<VariableId> {
    let mut set = BTreeSet::new();
    for constraint_id in activated_equalities_generator(model, root) {
        set.extend(model.constraint(constraint_id).body.variables());
    }
    set.extend(greybox_variables(model, root));
    set
}

/// Number of variables in activated equalities.
pub fn number_variables_in_activated_equalities(model: &Model, root: BlockId) -> usize {
    variables_in_activated_equalities_set(model, root).len()
}

/// Variables referenced in activated inequality constraints. Grey-box
/// variables are not added here: grey boxes contribute equalities only.
pub fn variables_in_activated_inequalities_set(
    model: &Model,
    root: BlockId,
) -> BTreeSet<VariableId> {
    let mut set = BTreeSet::new();
    for constraint_id in activated_inequalities_generator(model, root) {
        set.extend(model.constraint(constraint_id).body.variables());
    }
    set
}

/// Number of variables in activated inequalities.
pub fn number_variables_in_activated_inequalities(model: &Model, root: BlockId) -> usize {
    variables_in_activated_inequalities_set(model, root).len()
}

/// Variables that appear only in inequality constraints.
pub fn variables_only_in_inequalities(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    variables_in_activated_inequalities_set(model, root)
        .difference(&variables_in_activated_equalities_set(model, root))
        .copied()
        .collect()
}

/// Number of variables only in inequalities.
pub fn number_variables_only_in_inequalities(model: &Model, root: BlockId) -> usize {
    variables_only_in_inequalities(model, root).len()
}

// ── Fixed/unfixed splits over constraint membership ─────────

/// Fixed variables appearing in activated equalities.
pub fn fixed_variables_in_activated_equalities_set(
    model: &Model,
    root: BlockId,
) -> BTreeSet<VariableId> {
    variables_in_activated_equalities_set(model, root)
        .into_iter()
        .filter(|id| model.variable(*id).fixed)
        .collect()
}

/// Number of fixed variables in activated equalities.
pub fn number_fixed_variables_in_activated_equalities(model: &Model, root: BlockId) -> usize {
    fixed_variables_in_activated_equalities_set(model, root).len()
}

/// Unfixed variables appearing in activated equalities. The positive term
/// of the degrees-of-freedom metric.
pub fn unfixed_variables_in_activated_equalities_set(
    model: &Model,
    root: BlockId,
) -> BTreeSet<VariableId> {
    variables_in_activated_equalities_set(model, root)
        .into_iter()
        .filter(|id| !model.variable(*id).fixed)
        .collect()
}

/// Number of unfixed variables in activated equalities.
pub fn number_unfixed_variables_in_activated_equalities(model: &Model, root: BlockId) -> usize {
    unfixed_variables_in_activated_equalities_set(model, root).len()
}

/// Fixed variables appearing only in inequalities.
pub fn fixed_variables_only_in_inequalities(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    variables_only_in_inequalities(model, root)
        .into_iter()
        .filter(|id| model.variable(*id).fixed)
        .collect()
}

/// Number of fixed variables only in inequalities.
pub fn number_fixed_variables_only_in_inequalities(model: &Model, root: BlockId) -> usize {
    fixed_variables_only_in_inequalities(model, root).len()
}

// ── Unused variables ────────────────────────────────────────

/// Variables that appear in no activated constraint.
pub fn unused_variables_set(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    variables_not_in_activated_constraints_set(model, root)
}

/// Number of unused variables.
pub fn number_unused_variables(model: &Model, root: BlockId) -> usize {
    unused_variables_set(model, root).len()
}

/// Fixed variables that appear in no activated constraint.
pub fn fixed_unused_variables_set(model: &Model, root: BlockId) -> BTreeSet<VariableId> {
    unused_variables_set(model, root)
        .into_iter()
        .filter(|id| model.variable(*id).fixed)
        .collect()
}

/// Number of fixed unused variables.
pub fn number_fixed_unused_variables(model: &Model, root: BlockId) -> usize {
    fixed_unused_variables_set(model, root).len()
}

/// Variables in activated equalities that carry no value. Useful for
/// spotting models that cannot be evaluated yet.
pub fn variables_with_none_value_in_activated_equalities_set(
    model: &Model,
    root: BlockId,
) -> BTreeSet<VariableId> {
    variables_in_activated_equalities_set(model, root)
        .into_iter()
        .filter(|id| model.variable(*id).value.is_none())
        .collect()
}

/// Number of valueless variables in activated equalities.
pub fn number_variables_with_none_value_in_activated_equalities(
    model: &Model,
    root: BlockId,
) -> usize {
    variables_with_none_value_in_activated_equalities_set(model, root).len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::types::Variable;
    use strata_expr::Expr;

    #[test]
    fn usage_is_derived_from_constraint_bodies() {
        let mut model = Model::new();
        let root = model.root();
        let used = model.add_variable(root, Variable::free()).unwrap();
        let unused = model.add_variable(root, Variable::free()).unwrap();
        model.add_equality(root, Expr::var(used), 1.0).unwrap();

        assert_eq!(number_variables(&model, root), 2);
        let in_constraints = variables_in_activated_constraints_set(&model, root);
        assert!(in_constraints.contains(&used));
        assert!(!in_constraints.contains(&unused));
        assert_eq!(unused_variables_set(&model, root), BTreeSet::from([unused]));
    }

    #[test]
    fn duplicated_references_count_once() {
        let mut model = Model::new();
        let root = model.root();
        let v = model.add_variable(root, Variable::free()).unwrap();
        // v appears in two constraints and twice within one body.
        let body = Expr::term(v, 1.0).add(&Expr::term(v, 2.0));
        model.add_equality(root, body, 1.0).unwrap();
        model.add_less_equal(root, Expr::var(v), 4.0).unwrap();

        assert_eq!(number_variables_in_activated_constraints(&model, root), 1);
    }

    #[test]
    fn only_in_inequalities_is_a_difference() {
        let mut model = Model::new();
        let root = model.root();
        let both = model.add_variable(root, Variable::free()).unwrap();
        let ineq_only = model.add_variable(root, Variable::free()).unwrap();
        model.add_equality(root, Expr::var(both), 1.0).unwrap();
        model
            .add_less_equal(root, Expr::var(both).add(&Expr::var(ineq_only)), 5.0)
            .unwrap();

        assert_eq!(
            variables_only_in_inequalities(&model, root),
            BTreeSet::from([ineq_only])
        );
    }

    #[test]
    fn fixed_split_covers_the_variable_set() {
        let mut model = Model::new();
        let root = model.root();
        let a = model.add_variable(root, Variable::free()).unwrap();
        let b = model.add_variable(root, Variable::fixed_at(2.0)).unwrap();
        let fixed = fixed_variables_set(&model, root);
        let unfixed = unfixed_variables_set(&model, root);
        assert_eq!(fixed, BTreeSet::from([b]));
        assert_eq!(unfixed, BTreeSet::from([a]));
        assert_eq!(
            number_fixed_variables(&model, root) + number_unfixed_variables(&model, root),
            number_variables(&model, root)
        );
    }

    #[test]
    fn deactivating_a_constraint_frees_its_variables() {
        let mut model = Model::new();
        let root = model.root();
        let v = model.add_variable(root, Variable::free()).unwrap();
        let c = model.add_equality(root, Expr::var(v), 1.0).unwrap();
        assert_eq!(number_unused_variables(&model, root), 0);
        model.deactivate_constraint(c).unwrap();
        assert_eq!(number_unused_variables(&model, root), 1);
    }

    #[test]
    fn none_value_detection_in_equalities() {
        let mut model = Model::new();
        let root = model.root();
        let valued = model
            .add_variable(root, Variable::free().with_value(1.0))
            .unwrap();
        let valueless = model.add_variable(root, Variable::free()).unwrap();
        model
            .add_equality(root, Expr::var(valued).add(&Expr::var(valueless)), 3.0)
            .unwrap();
        assert_eq!(
            variables_with_none_value_in_activated_equalities_set(&model, root),
            BTreeSet::from([valueless])
        );
    }
}
