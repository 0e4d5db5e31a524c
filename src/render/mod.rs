//! Human-readable rendering of planned pipelines.
//!
//! The output is POSIX-quoted so a logged plan can be pasted into a shell,
//! but nothing here is ever handed to one.

use std::fmt;

use crate::cmd::{CommandSpec, PipelineSpec};

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_word(&self.program))?;
        for a in &self.args {
            write!(f, " {}", quote_word(a))?;
        }
        Ok(())
    }
}

impl fmt::Display for PipelineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.commands.iter().map(|c| c.to_string()).collect();
        let body = parts.join(" | ");
        match (self.head_open, self.tail_open, body.is_empty()) {
            (true, true, true) => f.write_str("|"),
            (head, tail, _) => {
                if head { f.write_str("| ")?; }
                f.write_str(&body)?;
                if tail { f.write_str(" |")?; }
                Ok(())
            }
        }
    }
}

/// Quote `s` for a POSIX shell unless it is made only of safe characters.
pub fn quote_word(s: &str) -> String {
    if !s.is_empty() && is_simple_word(s) { s.to_string() } else { quote_sh(s) }
}

fn is_simple_word(s: &str) -> bool {
    s.chars().all(|c| matches!(c,
        'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' | '.' | '/' | ':' | '+' | '%' | '@' | '=' | ','))
}

fn quote_sh(s: &str) -> String {
    if s.is_empty() { return "''".to_string(); }
    let escaped = s.replace('\'', "'\"'\"'");
    format!("'{}'", escaped)
}
