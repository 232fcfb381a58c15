//! Human-readable summary of the structural statistics for a block.

use std::io::{self, Write};
use std::time::Instant;

use strata_expr::BlockId;

use crate::model::Model;
use crate::stats::analysis::degrees_of_freedom;
use crate::stats::blocks::{number_deactivated_blocks, number_total_blocks};
use crate::stats::constraints::{
    number_deactivated_equalities, number_deactivated_inequalities, number_total_constraints,
    number_total_equalities, number_total_inequalities,
};
use crate::stats::greybox::{
    number_activated_greybox_blocks, number_activated_greybox_equalities,
    number_greybox_variables, number_unfixed_greybox_variables,
};
use crate::stats::objectives::{
    number_deactivated_objectives, number_expressions, number_total_objectives,
};
use crate::stats::variables::{
    number_fixed_unused_variables, number_fixed_variables,
    number_fixed_variables_only_in_inequalities, number_unused_variables, number_variables,
    number_variables_only_in_inequalities,
};

const RULE: &str =
    "========================================================================";

/// Writes a formatted statistics report for the subtree rooted at `root`.
///
/// Every figure in the report is produced by the corresponding counting
/// function in this module tree, so the report always agrees with the
/// programmatic API. The grey-box section is omitted when the subtree
/// contains no activated grey-box blocks.
pub fn report_statistics<W: Write>(model: &Model, root: BlockId, out: &mut W) -> io::Result<()> {
    let started = Instant::now();

    writeln!(out, "{RULE}")?;
    match model.get_block_name(root) {
        Some(name) => writeln!(out, "Model Statistics  -  {name}")?,
        None => writeln!(out, "Model Statistics")?,
    }
    writeln!(out)?;
    writeln!(out, "Degrees of Freedom: {}", degrees_of_freedom(model, root))?;
    writeln!(out)?;

    writeln!(out, "Total No. Variables: {}", number_variables(model, root))?;
    writeln!(
        out,
        "    No. Fixed Variables: {}",
        number_fixed_variables(model, root)
    )?;
    writeln!(
        out,
        "    No. Unused Variables: {} (Fixed: {})",
        number_unused_variables(model, root),
        number_fixed_unused_variables(model, root)
    )?;
    writeln!(
        out,
        "    No. Variables only in Inequalities: {} (Fixed: {})",
        number_variables_only_in_inequalities(model, root),
        number_fixed_variables_only_in_inequalities(model, root)
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "Total No. Constraints: {}",
        number_total_constraints(model, root)
    )?;
    writeln!(
        out,
        "    No. Equality Constraints: {} (Deactivated: {})",
        number_total_equalities(model, root),
        number_deactivated_equalities(model, root)
    )?;
    writeln!(
        out,
        "    No. Inequality Constraints: {} (Deactivated: {})",
        number_total_inequalities(model, root),
        number_deactivated_inequalities(model, root)
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "No. Objectives: {} (Deactivated: {})",
        number_total_objectives(model, root),
        number_deactivated_objectives(model, root)
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "No. Blocks: {} (Deactivated: {})",
        number_total_blocks(model, root),
        number_deactivated_blocks(model, root)
    )?;
    writeln!(out, "No. Expressions: {}", number_expressions(model, root))?;

    let activated_greybox = number_activated_greybox_blocks(model, root);
    if activated_greybox != 0 {
        let greybox_vars = number_greybox_variables(model, root);
        let unfixed_greybox_vars = number_unfixed_greybox_variables(model, root);
        writeln!(out)?;
        writeln!(out, "No. Activated Grey Box Blocks: {activated_greybox}")?;
        writeln!(
            out,
            "No. Grey Box Variables: {greybox_vars} (Fixed: {})",
            greybox_vars - unfixed_greybox_vars
        )?;
        writeln!(
            out,
            "No. Grey Box Equality Constraints: {}",
            number_activated_greybox_equalities(model, root)
        )?;
    }
    writeln!(out, "{RULE}")?;

    tracing::debug!(
        component = "stats",
        operation = "report_statistics",
        status = "success",
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Rendered model statistics report"
    );
    Ok(())
}

/// Prints the statistics report to stdout.
pub fn print_statistics(model: &Model, root: BlockId) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    report_statistics(model, root, &mut handle)
}
