//! Turning a pipeline string into running processes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::cmd::{CommandSpec, PipelineSpec, RunConfig};
use crate::diag::{DiagnosticSink, LogSink};
use crate::error::PipeError;
use crate::exec::{ChildProcess, Spawner};
use crate::expand::{expand, VariableResolver};
use crate::parse::parse;
use crate::pipeline::{Outcome, Pipeline};

pub struct PipelineBuilder<S, D = LogSink> {
    spawner: S,
    sink: D,
    config: RunConfig,
}

#[cfg(feature = "exec")]
impl PipelineBuilder<crate::exec::StdSpawner, LogSink> {
    pub fn new() -> Self {
        Self::with_spawner(crate::exec::StdSpawner)
    }
}

#[cfg(feature = "exec")]
impl Default for PipelineBuilder<crate::exec::StdSpawner, LogSink> {
    fn default() -> Self { Self::new() }
}

impl<S: Spawner> PipelineBuilder<S, LogSink> {
    pub fn with_spawner(spawner: S) -> Self {
        Self { spawner, sink: LogSink, config: RunConfig::default() }
    }
}

impl<S: Spawner, D: DiagnosticSink> PipelineBuilder<S, D> {
    pub fn with_sink<D2: DiagnosticSink>(self, sink: D2) -> PipelineBuilder<S, D2> {
        PipelineBuilder { spawner: self.spawner, sink, config: self.config }
    }

    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn cwd<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.config.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, env: BTreeMap<String, String>) -> Self {
        self.config.env = Some(env);
        self
    }

    pub fn spawner(&self) -> &S { &self.spawner }
    pub fn sink(&self) -> &D { &self.sink }

    /// Parse and expand `spec` without spawning anything.
    ///
    /// Diagnostics are reported to the sink. Fails only when a command
    /// expands to no words at all.
    pub fn plan<V: VariableResolver + ?Sized>(&self, spec: &str, vars: &V) -> Result<PipelineSpec, PipeError> {
        let layout = parse(spec);
        for d in &layout.diagnostics {
            self.sink.report(d);
        }
        let mut plan = PipelineSpec { head_open: layout.head_open, tail_open: layout.tail_open, commands: Vec::new() };
        for seg in &layout.segments {
            let argv = expand(seg.words.as_slice(), vars);
            plan.push(CommandSpec::from_argv(argv, seg.index, &self.config)?);
        }
        Ok(plan)
    }

    /// Spawn the pipeline described by `spec`.
    ///
    /// With an open head or tail this returns [`Outcome::Streaming`] right
    /// after spawning. Otherwise it waits for every process in order and
    /// returns the last one's exit code.
    pub fn build<V: VariableResolver + ?Sized>(&self, spec: &str, vars: &V) -> Result<Outcome<S::Child>, PipeError> {
        let plan = self.plan(spec, vars)?;
        let mut pipeline = self.spawn(&plan)?;
        if plan.is_streaming() {
            return Ok(Outcome::Streaming(pipeline));
        }
        pipeline.wait().map(Outcome::Exited)
    }

    /// Spawn an already planned pipeline and hand back its handle.
    pub fn spawn(&self, plan: &PipelineSpec) -> Result<Pipeline<S::Child>, PipeError> {
        if plan.is_empty() {
            return Err(PipeError::NoCommands);
        }
        tracing::debug!(pipeline = %plan, "spawning");
        let mut procs: Vec<S::Child> = Vec::with_capacity(plan.len());
        let mut caller_stdin = None;
        let mut upstream = None;
        for (i, cmd) in plan.commands.iter().enumerate() {
            let input = plan.input_for(i, upstream.take());
            let output = plan.output_for(i);
            tracing::trace!(index = i, ?output, "wiring {}", cmd);
            let mut child = match self.spawner.spawn(cmd, input, output) {
                Ok(child) => child,
                Err(e) => {
                    reap_after_failure(procs);
                    return Err(PipeError::spawn(&cmd.program, e));
                }
            };
            tracing::debug!(pid = child.id(), segment = cmd.segment, "spawned {}", cmd);
            if i == 0 && plan.head_open {
                caller_stdin = child.take_stdin();
            }
            upstream = child.take_stdout();
            procs.push(child);
        }
        let caller_stdout = if plan.tail_open { upstream } else { None };
        Ok(Pipeline::new(procs, caller_stdin, caller_stdout))
    }
}

/// Kill and reap processes spawned before a later spawn failed.
fn reap_after_failure<C: ChildProcess>(procs: Vec<C>) {
    for mut child in procs {
        let pid = child.id();
        if let Err(e) = child.kill() {
            tracing::debug!(pid, error = %e, "kill after spawn failure");
        }
        if let Err(e) = child.wait() {
            tracing::debug!(pid, error = %e, "reap after spawn failure");
        }
    }
}
