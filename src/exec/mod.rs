//! Process creation interfaces.

use std::io::{self, Read, Write};

use crate::cmd::{CommandSpec, Input, Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    Error(i32),
    Signal(i32),
}

impl ExitCode {
    pub fn success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitCode::Success => Some(0),
            ExitCode::Error(code) => Some(*code),
            ExitCode::Signal(_) => None,
        }
    }

    pub fn from_code(code: i32) -> Self {
        if code == 0 { ExitCode::Success } else { ExitCode::Error(code) }
    }
}

impl From<std::process::ExitStatus> for ExitCode {
    fn from(status: std::process::ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitCode::from_code(code);
        }
        signal_status(status)
    }
}

#[cfg(unix)]
fn signal_status(status: std::process::ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(sig) => ExitCode::Signal(sig),
        None => ExitCode::Error(1),
    }
}

#[cfg(not(unix))]
fn signal_status(_status: std::process::ExitStatus) -> ExitCode {
    ExitCode::Error(1)
}

/// A spawned child as seen by the pipeline.
///
/// `wait` may be called again after the child has been reaped and must
/// return the same status.
pub trait ChildProcess {
    type Stdin: Write;
    type Stdout: Read;

    fn id(&self) -> u32;
    fn take_stdin(&mut self) -> Option<Self::Stdin>;
    fn take_stdout(&mut self) -> Option<Self::Stdout>;
    fn wait(&mut self) -> io::Result<ExitCode>;
    /// `Ok(None)` while the child is still running.
    fn try_wait(&mut self) -> io::Result<Option<ExitCode>>;
    fn kill(&mut self) -> io::Result<()>;
}

pub trait Spawner {
    type Child: ChildProcess;

    fn spawn(
        &self,
        cmd: &CommandSpec,
        stdin: Input<<Self::Child as ChildProcess>::Stdout>,
        stdout: Output,
    ) -> io::Result<Self::Child>;
}

impl<S: Spawner + ?Sized> Spawner for &S {
    type Child = S::Child;

    fn spawn(
        &self,
        cmd: &CommandSpec,
        stdin: Input<<Self::Child as ChildProcess>::Stdout>,
        stdout: Output,
    ) -> io::Result<Self::Child> {
        (**self).spawn(cmd, stdin, stdout)
    }
}

#[cfg(feature = "exec")]
pub use std_impl::StdSpawner;

#[cfg(feature = "exec")]
mod std_impl {
    use super::*;
    use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

    /// Spawns real processes with `std::process::Command`. No shell involved.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StdSpawner;

    impl Spawner for StdSpawner {
        type Child = Child;

        fn spawn(&self, cmd: &CommandSpec, stdin: Input<ChildStdout>, stdout: Output) -> io::Result<Child> {
            let mut c = Command::new(&cmd.program);
            c.args(&cmd.args);
            if let Some(dir) = &cmd.cwd {
                c.current_dir(dir);
            }
            if let Some(env) = &cmd.env {
                c.env_clear().envs(env);
            }
            c.stdin(match stdin {
                Input::Inherit => Stdio::inherit(),
                Input::Pipe => Stdio::piped(),
                Input::From(upstream) => Stdio::from(upstream),
            });
            c.stdout(match stdout {
                Output::Inherit => Stdio::inherit(),
                Output::Pipe => Stdio::piped(),
            });
            c.spawn()
        }
    }

    impl ChildProcess for Child {
        type Stdin = ChildStdin;
        type Stdout = ChildStdout;

        fn id(&self) -> u32 { Child::id(self) }
        fn take_stdin(&mut self) -> Option<ChildStdin> { self.stdin.take() }
        fn take_stdout(&mut self) -> Option<ChildStdout> { self.stdout.take() }
        fn wait(&mut self) -> io::Result<ExitCode> { Child::wait(self).map(ExitCode::from) }
        fn try_wait(&mut self) -> io::Result<Option<ExitCode>> {
            Child::try_wait(self).map(|s| s.map(ExitCode::from))
        }
        fn kill(&mut self) -> io::Result<()> { Child::kill(self) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_helpers() {
        assert!(ExitCode::from_code(0).success());
        assert_eq!(ExitCode::from_code(3), ExitCode::Error(3));
        assert_eq!(ExitCode::Error(3).code(), Some(3));
        assert_eq!(ExitCode::Signal(9).code(), None);
        assert!(!ExitCode::Signal(9).success());
    }

    #[cfg(all(unix, feature = "exec"))]
    mod std_spawner {
        use super::super::*;
        use crate::cmd::RunConfig;
        use std::io::Read;

        fn cmd(argv: &[&str], cfg: &RunConfig) -> CommandSpec {
            CommandSpec::from_argv(argv.iter().map(|s| s.to_string()).collect(), 0, cfg).unwrap()
        }

        #[test]
        fn runs_and_reports_exit_code() {
            let cfg = RunConfig::default();
            let mut ok = StdSpawner.spawn(&cmd(&["true"], &cfg), Input::Inherit, Output::Inherit).unwrap();
            assert_eq!(ChildProcess::wait(&mut ok).unwrap(), ExitCode::Success);
            let mut bad = StdSpawner.spawn(&cmd(&["false"], &cfg), Input::Inherit, Output::Inherit).unwrap();
            assert_eq!(ChildProcess::wait(&mut bad).unwrap(), ExitCode::Error(1));
        }

        #[test]
        fn wait_twice_is_stable() {
            let cfg = RunConfig::default();
            let mut c = StdSpawner.spawn(&cmd(&["false"], &cfg), Input::Inherit, Output::Inherit).unwrap();
            let first = ChildProcess::wait(&mut c).unwrap();
            let second = ChildProcess::wait(&mut c).unwrap();
            assert_eq!(first, second);
        }

        #[test]
        fn env_override_replaces_environment() {
            let cfg = RunConfig::new().env([("ONLY", "me")]);
            let mut c = StdSpawner.spawn(&cmd(&["/usr/bin/env"], &cfg), Input::Inherit, Output::Pipe).unwrap();
            let mut out = String::new();
            c.take_stdout().unwrap().read_to_string(&mut out).unwrap();
            ChildProcess::wait(&mut c).unwrap();
            assert_eq!(out, "ONLY=me\n");
        }

        #[test]
        fn killed_child_reports_signal() {
            let cfg = RunConfig::default();
            let mut c = StdSpawner.spawn(&cmd(&["sleep", "30"], &cfg), Input::Inherit, Output::Inherit).unwrap();
            assert_eq!(ChildProcess::try_wait(&mut c).unwrap(), None);
            ChildProcess::kill(&mut c).unwrap();
            assert_eq!(ChildProcess::wait(&mut c).unwrap(), ExitCode::Signal(9));
        }
    }
}
