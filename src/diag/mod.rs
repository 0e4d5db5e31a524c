//! Non-fatal diagnostics raised while reading a pipeline.

use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An empty segment between two commands, e.g. the middle of `a || b`.
    ConsecutivePipe { segment: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ConsecutivePipe { segment } => write!(
                f,
                "consecutive pipes (||) are treated as a single one (empty segment {})",
                segment
            ),
        }
    }
}

pub trait DiagnosticSink {
    fn report(&self, diag: &Diagnostic);
}

impl<D: DiagnosticSink + ?Sized> DiagnosticSink for &D {
    fn report(&self, diag: &Diagnostic) { (**self).report(diag) }
}

/// Routes diagnostics through `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;
impl DiagnosticSink for LogSink {
    fn report(&self, diag: &Diagnostic) {
        tracing::warn!(diagnostic = ?diag, "{}", diag);
    }
}

/// Writes `WARNING: ...` lines straight to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;
impl DiagnosticSink for StderrSink {
    fn report(&self, diag: &Diagnostic) { eprintln!("WARNING: {}", diag); }
}

/// Keeps every reported diagnostic.
#[derive(Debug, Default)]
pub struct Collect { seen: RefCell<Vec<Diagnostic>> }

impl Collect {
    pub fn new() -> Self { Self::default() }
    pub fn diagnostics(&self) -> Vec<Diagnostic> { self.seen.borrow().clone() }
    pub fn len(&self) -> usize { self.seen.borrow().len() }
    pub fn is_empty(&self) -> bool { self.seen.borrow().is_empty() }
}

impl DiagnosticSink for Collect {
    fn report(&self, diag: &Diagnostic) { self.seen.borrow_mut().push(diag.clone()); }
}
