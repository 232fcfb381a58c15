//! Opaque external sub-models ("grey boxes").
//!
//! A grey-box node exposes only named input/output variable maps and an
//! internal equality-constraint count. Its internals are not expression
//! trees the statistics walker can descend into: every classification that
//! involves grey boxes goes through the fixed contribution formula below.

use std::collections::BTreeMap;
use std::sync::Arc;

use strata_expr::VariableId;

/// Handle to the external model backing a grey-box node.
///
/// The external model is treated as zero-DOF: every output is a
/// deterministic function of the inputs, regardless of whether the model
/// performs internal optimization.
pub trait ExternalGreyBoxModel: std::fmt::Debug + Send + Sync {
    /// Number of equality constraints internal to the external model.
    fn n_equality_constraints(&self) -> usize;
}

/// A grey-box node: named input/output maps over ordinary model variables
/// plus a handle to the opaque external model.
#[derive(Debug, Clone)]
pub struct GreyBox {
    pub active: bool,
    inputs: BTreeMap<String, VariableId>,
    outputs: BTreeMap<String, VariableId>,
    external: Arc<dyn ExternalGreyBoxModel>,
}

impl GreyBox {
    pub fn new(external: Arc<dyn ExternalGreyBoxModel>) -> Self {
        Self {
            active: true,
            inputs: BTreeMap::new(),
            outputs: BTreeMap::new(),
            external,
        }
    }

    /// Register a named input variable. Replaces any previous binding.
    pub fn with_input(mut self, name: impl Into<String>, var_id: VariableId) -> Self {
        self.inputs.insert(name.into(), var_id);
        self
    }

    /// Register a named output variable. Replaces any previous binding.
    pub fn with_output(mut self, name: impl Into<String>, var_id: VariableId) -> Self {
        self.outputs.insert(name.into(), var_id);
        self
    }

    pub fn inputs(&self) -> &BTreeMap<String, VariableId> {
        &self.inputs
    }

    pub fn outputs(&self) -> &BTreeMap<String, VariableId> {
        &self.outputs
    }

    pub fn external(&self) -> &dyn ExternalGreyBoxModel {
        self.external.as_ref()
    }

    /// Implicit equality constraints contributed by this node: one per
    /// output slot plus the external model's internal equality count.
    pub fn equality_contribution(&self) -> usize {
        self.outputs.len() + self.external.n_equality_constraints()
    }

    /// All input and output variables, deduplicated by identity.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.inputs.values().chain(self.outputs.values()).copied()
    }
}
