//! Structural statistics over a block subtree.
//!
//! Every query takes the model and a root block and classifies the
//! components of that subtree by activation, kind, and usage. Set-valued
//! queries return ordered identifier sets so results are deterministic;
//! each has a `number_*` counterpart. Queries never mutate the model and
//! never fail: deactivated subtrees are simply skipped, and components
//! referencing unset variable values are handled per query.

pub mod analysis;
pub mod blocks;
pub mod constraints;
pub mod greybox;
pub mod objectives;
pub mod report;
pub mod variables;
pub mod walk;

pub use analysis::{
    active_variables_in_deactivated_blocks_set, degrees_of_freedom, large_residual_values,
    large_residuals_set, number_active_variables_in_deactivated_blocks, number_large_residuals,
    number_variables_near_bounds, variables_near_bounds_set, NearBoundOptions,
    DEFAULT_RESIDUAL_TOL,
};
pub use blocks::{
    activated_blocks_set, deactivated_blocks_set, number_activated_blocks,
    number_deactivated_blocks, number_total_blocks, total_blocks_set,
};
pub use constraints::{
    activated_constraints_set, activated_equalities_set, activated_inequalities_set,
    deactivated_constraints_set, deactivated_equalities_set, deactivated_inequalities_set,
    number_activated_constraints, number_activated_equalities, number_activated_inequalities,
    number_deactivated_constraints, number_deactivated_equalities,
    number_deactivated_inequalities, number_total_constraints, number_total_equalities,
    number_total_inequalities, total_constraints_set, total_equalities_set,
    total_inequalities_set,
};
pub use greybox::{
    activated_greybox_block_set, deactivated_greybox_block_set, greybox_block_set,
    greybox_variables, number_activated_greybox_blocks, number_activated_greybox_equalities,
    number_deactivated_greybox_blocks, number_deactivated_greybox_equalities,
    number_greybox_blocks, number_greybox_variables, number_unfixed_greybox_variables,
    unfixed_greybox_variables,
};
pub use objectives::{
    activated_objectives_set, deactivated_objectives_set, expressions_set,
    number_activated_objectives, number_deactivated_objectives, number_expressions,
    number_total_objectives, total_objectives_set,
};
pub use report::{print_statistics, report_statistics};
pub use variables::{
    fixed_unused_variables_set, fixed_variables_in_activated_equalities_set,
    fixed_variables_only_in_inequalities, fixed_variables_set, number_fixed_unused_variables,
    number_fixed_variables, number_fixed_variables_in_activated_equalities,
    number_fixed_variables_only_in_inequalities, number_unfixed_variables,
    number_unfixed_variables_in_activated_equalities, number_unused_variables, number_variables,
    number_variables_in_activated_constraints, number_variables_in_activated_equalities,
    number_variables_in_activated_inequalities, number_variables_not_in_activated_constraints,
    number_variables_only_in_inequalities,
    number_variables_with_none_value_in_activated_equalities, unfixed_variables_in_activated_equalities_set,
    unfixed_variables_set, unused_variables_set, variables_in_activated_constraints_set,
    variables_in_activated_equalities_set, variables_in_activated_inequalities_set,
    variables_not_in_activated_constraints_set, variables_only_in_inequalities, variables_set,
    variables_with_none_value_in_activated_equalities_set,
};
pub use walk::{component_blocks, sub_blocks, Traversal};

#[cfg(test)]
mod tests {
    mod support;

    mod greybox_scenarios;
    mod partitions;
    mod reporting;
}
