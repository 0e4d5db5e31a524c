//! pipewright::prelude - grab-and-go imports

pub use crate::builder::PipelineBuilder;
pub use crate::cmd::RunConfig;
pub use crate::diag::{Collect, Diagnostic, DiagnosticSink, LogSink, StderrSink};
pub use crate::error::PipeError;
pub use crate::exec::{ChildProcess, ExitCode, Spawner};
pub use crate::expand::{expand, Bindings, Env, Value, VariableResolver};
pub use crate::pipeline::{Outcome, Pipeline};
#[cfg(feature = "exec")]
pub use crate::easy::{sh, sh_in};
#[cfg(feature = "exec")]
pub use crate::exec::StdSpawner;
