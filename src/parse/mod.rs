//! Splitting a pipeline string into command segments.

use crate::diag::Diagnostic;

pub const PIPE: char = '|';

/// One non-empty command segment, before expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Position among the raw `|`-separated parts.
    pub index: usize,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Leading empty segment: the caller feeds the first process.
    pub head_open: bool,
    /// Trailing empty segment: the caller reads the last process.
    pub tail_open: bool,
    pub segments: Vec<Segment>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Layout {
    pub fn is_streaming(&self) -> bool { self.head_open || self.tail_open }
}

/// Parse `spec` into segments and open-end markers.
///
/// Words are whitespace separated; there is no quoting. An empty first
/// segment opens the head, an empty last segment opens the tail (a lone
/// empty segment opens both), and an empty segment anywhere else is dropped
/// with a [`Diagnostic::ConsecutivePipe`].
pub fn parse(spec: &str) -> Layout {
    let raw: Vec<&str> = spec.split(PIPE).collect();
    let last = raw.len() - 1;
    let mut out = Layout::default();
    for (index, part) in raw.iter().enumerate() {
        let words: Vec<String> = part.split_whitespace().map(String::from).collect();
        if words.is_empty() {
            if index == 0 { out.head_open = true; }
            if index == last { out.tail_open = true; }
            if index != 0 && index != last {
                out.diagnostics.push(Diagnostic::ConsecutivePipe { segment: index });
            }
            continue;
        }
        out.segments.push(Segment { index, words });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(l: &Layout) -> Vec<Vec<&str>> {
        l.segments.iter().map(|s| s.words.iter().map(String::as_str).collect()).collect()
    }

    #[test]
    fn single_command() {
        let l = parse("echo $msg");
        assert!(!l.is_streaming());
        assert_eq!(words(&l), vec![vec!["echo", "$msg"]]);
        assert_eq!(l.segments[0].index, 0);
    }

    #[test]
    fn plain_pipeline() {
        let l = parse("grep x file | sort |  head -n 1");
        assert_eq!(words(&l), vec![vec!["grep", "x", "file"], vec!["sort"], vec!["head", "-n", "1"]]);
        assert!(l.diagnostics.is_empty());
    }

    #[test]
    fn open_head_and_tail() {
        let l = parse("| sort | ");
        assert!(l.head_open);
        assert!(l.tail_open);
        assert_eq!(words(&l), vec![vec!["sort"]]);
        assert_eq!(l.segments[0].index, 1);
    }

    #[test]
    fn open_head_only() {
        let l = parse("|cat");
        assert!(l.head_open);
        assert!(!l.tail_open);
    }

    #[test]
    fn open_tail_only() {
        let l = parse("cat |");
        assert!(!l.head_open);
        assert!(l.tail_open);
    }

    #[test]
    fn double_pipe_is_dropped_with_one_diagnostic() {
        let l = parse("a || b");
        assert_eq!(words(&l), vec![vec!["a"], vec!["b"]]);
        assert_eq!(l.diagnostics, vec![Diagnostic::ConsecutivePipe { segment: 1 }]);
        assert!(!l.is_streaming());
    }

    #[test]
    fn triple_pipe_reports_twice() {
        let l = parse("a ||| b");
        assert_eq!(l.diagnostics.len(), 2);
        assert_eq!(l.segments.len(), 2);
    }

    #[test]
    fn empty_string_opens_both_ends() {
        let l = parse("");
        assert!(l.head_open && l.tail_open);
        assert!(l.segments.is_empty());
        assert!(l.diagnostics.is_empty());
    }

    #[test]
    fn lone_pipe_opens_both_ends() {
        let l = parse(" | ");
        assert!(l.head_open && l.tail_open);
        assert!(l.segments.is_empty());
    }

    #[test]
    fn tabs_and_newlines_split_words() {
        let l = parse("echo\ta\nb");
        assert_eq!(words(&l), vec![vec!["echo", "a", "b"]]);
    }
}
