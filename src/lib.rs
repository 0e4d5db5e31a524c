//! pipewright: shell-free subprocess pipelines from `cmd $var | cmd` strings.

pub mod error;
pub mod expand;
pub mod parse;
pub mod diag;
pub mod cmd;
pub mod render;
pub mod exec;
pub mod pipeline;
pub mod builder;
pub mod prelude;
#[cfg(feature = "exec")]
pub mod easy;
pub mod macros;

pub use builder::PipelineBuilder;
pub use error::PipeError;
pub use expand::{expand, Bindings, Value};
pub use pipeline::{Outcome, Pipeline};
