//! Command modeling and stream wiring.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::PipeError;

/// Settings applied to every process of a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    pub cwd: Option<PathBuf>,
    /// Replaces the whole child environment when set.
    pub env: Option<BTreeMap<String, String>>,
}

impl RunConfig {
    pub fn new() -> Self { Self::default() }

    pub fn cwd<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Option<BTreeMap<String, String>>,
    /// Raw segment this command came from.
    pub segment: usize,
}

impl CommandSpec {
    pub fn from_argv(argv: Vec<String>, segment: usize, cfg: &RunConfig) -> Result<Self, PipeError> {
        let mut it = argv.into_iter();
        let program = it.next().ok_or(PipeError::EmptyCommand { segment })?;
        Ok(CommandSpec {
            program,
            args: it.collect(),
            cwd: cfg.cwd.clone(),
            env: cfg.env.clone(),
            segment,
        })
    }

    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str)).collect()
    }
}

/// Where a process reads its standard input from.
#[derive(Debug)]
pub enum Input<R> {
    Inherit,
    /// Fresh pipe; the write end goes to the caller.
    Pipe,
    /// The previous process's output.
    From(R),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Inherit,
    Pipe,
}

/// A fully expanded pipeline, ready to spawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSpec {
    pub head_open: bool,
    pub tail_open: bool,
    pub commands: Vec<CommandSpec>,
}

impl PipelineSpec {
    pub fn new() -> Self { Self::default() }
    pub fn push(&mut self, cmd: CommandSpec) { self.commands.push(cmd); }
    pub fn len(&self) -> usize { self.commands.len() }
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }
    pub fn is_streaming(&self) -> bool { self.head_open || self.tail_open }

    /// Input wiring for command `i`, given the previous command's output.
    pub fn input_for<R>(&self, i: usize, upstream: Option<R>) -> Input<R> {
        match upstream {
            Some(r) if i > 0 => Input::From(r),
            _ if i == 0 && self.head_open => Input::Pipe,
            _ => Input::Inherit,
        }
    }

    /// Output wiring for command `i`: piped when something downstream reads it.
    pub fn output_for(&self, i: usize) -> Output {
        if i + 1 < self.commands.len() || self.tail_open { Output::Pipe } else { Output::Inherit }
    }
}
