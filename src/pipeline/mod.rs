//! Live pipeline handle for streaming mode.

use std::fmt;

use crate::error::PipeError;
use crate::exec::{ChildProcess, ExitCode};

/// A running chain of processes with optional caller-facing ends.
///
/// `stdin` is present only for head-open pipelines and `stdout` only for
/// tail-open ones. Dropping (or taking and dropping) the stdin handle is how
/// the caller signals end of input.
///
/// Call [`wait`](Pipeline::wait) before dropping the handle. Dropping it
/// closes both caller ends and reaps whatever has already exited, but a
/// process still running at that point is left to run unreaped.
pub struct Pipeline<C: ChildProcess> {
    procs: Vec<C>,
    stdin: Option<C::Stdin>,
    stdout: Option<C::Stdout>,
    status: Option<ExitCode>,
    /// Every process has been waited on.
    reaped: bool,
}

impl<C: ChildProcess> Pipeline<C> {
    pub fn new(procs: Vec<C>, stdin: Option<C::Stdin>, stdout: Option<C::Stdout>) -> Self {
        Self { procs, stdin, stdout, status: None, reaped: false }
    }

    pub fn stdin(&mut self) -> Option<&mut C::Stdin> { self.stdin.as_mut() }
    pub fn stdout(&mut self) -> Option<&mut C::Stdout> { self.stdout.as_mut() }
    pub fn take_stdin(&mut self) -> Option<C::Stdin> { self.stdin.take() }
    pub fn take_stdout(&mut self) -> Option<C::Stdout> { self.stdout.take() }

    pub fn len(&self) -> usize { self.procs.len() }
    pub fn is_empty(&self) -> bool { self.procs.is_empty() }
    pub fn pids(&self) -> Vec<u32> { self.procs.iter().map(|p| p.id()).collect() }

    /// Wait for every process, left to right, and return the last one's status.
    ///
    /// Any caller stdin still held is closed first so the head sees EOF.
    /// A failed wait does not stop the others from being reaped; the first
    /// error is returned once all have been tried. After a full reap, later
    /// calls return the status already observed.
    pub fn wait(&mut self) -> Result<ExitCode, PipeError> {
        if let (true, Some(status)) = (self.reaped, self.status) {
            return Ok(status);
        }
        drop(self.stdin.take());
        let mut last = None;
        let mut first_err = None;
        for (i, proc) in self.procs.iter_mut().enumerate() {
            match proc.wait() {
                Ok(status) => {
                    tracing::trace!(index = i, pid = proc.id(), ?status, "reaped");
                    last = Some(status);
                }
                Err(e) => {
                    tracing::debug!(index = i, pid = proc.id(), error = %e, "wait failed");
                    last = None;
                    if first_err.is_none() {
                        first_err = Some(e);
                    }
                }
            }
        }
        if let Some(e) = first_err {
            return Err(PipeError::Wait(e));
        }
        let status = last.ok_or(PipeError::NoCommands)?;
        self.status = Some(status);
        self.reaped = true;
        Ok(status)
    }

    /// `wait()` and report whether the last process succeeded.
    pub fn ok(&mut self) -> Result<bool, PipeError> {
        Ok(self.wait()?.success())
    }

    /// Last process's status, or `None` if it has not been observed to exit.
    pub fn returncode(&self) -> Option<ExitCode> { self.status }

    /// Non-blocking check on the last process.
    ///
    /// Only the tail is looked at; upstream processes are still reaped by
    /// `wait`.
    pub fn poll(&mut self) -> Result<Option<ExitCode>, PipeError> {
        if self.status.is_some() {
            return Ok(self.status);
        }
        let Some(tail) = self.procs.last_mut() else { return Ok(None) };
        let status = tail.try_wait().map_err(PipeError::Wait)?;
        if status.is_some() {
            self.status = status;
        }
        Ok(status)
    }
}

impl<C: ChildProcess> Drop for Pipeline<C> {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        drop(self.stdin.take());
        drop(self.stdout.take());
        for proc in self.procs.iter_mut() {
            match proc.try_wait() {
                Ok(Some(_)) => {}
                Ok(None) => tracing::debug!(pid = proc.id(), "pipeline dropped while process still running"),
                Err(e) => tracing::debug!(pid = proc.id(), error = %e, "try_wait on drop"),
            }
        }
    }
}

impl<C: ChildProcess> fmt::Debug for Pipeline<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("pids", &self.pids())
            .field("stdin", &self.stdin.is_some())
            .field("stdout", &self.stdout.is_some())
            .field("status", &self.status)
            .finish()
    }
}

/// What `build` hands back: an exit code when it blocked, a handle otherwise.
#[derive(Debug)]
pub enum Outcome<C: ChildProcess> {
    Exited(ExitCode),
    Streaming(Pipeline<C>),
}

impl<C: ChildProcess> Outcome<C> {
    pub fn exit_code(&self) -> Option<ExitCode> {
        match self {
            Outcome::Exited(code) => Some(*code),
            Outcome::Streaming(_) => None,
        }
    }

    pub fn into_pipeline(self) -> Option<Pipeline<C>> {
        match self {
            Outcome::Streaming(p) => Some(p),
            Outcome::Exited(_) => None,
        }
    }
}
