//! Easy mode: one call from pipeline string to result.

use std::process::Child;

use crate::builder::PipelineBuilder;
use crate::cmd::RunConfig;
use crate::error::PipeError;
use crate::expand::VariableResolver;
use crate::pipeline::Outcome;

/// Run `spec` with real processes and warnings routed through `tracing`.
pub fn sh<V: VariableResolver + ?Sized>(spec: &str, vars: &V) -> Result<Outcome<Child>, PipeError> {
    PipelineBuilder::new().build(spec, vars)
}

/// Like [`sh`], with a working directory and/or environment override.
pub fn sh_in<V: VariableResolver + ?Sized>(spec: &str, vars: &V, config: RunConfig) -> Result<Outcome<Child>, PipeError> {
    PipelineBuilder::new().config(config).build(spec, vars)
}
