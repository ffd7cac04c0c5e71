//! Per-file, per-check dispatch state.

use crate::tree::Node;
use crate::types::{Location, Severity, Suggestion, Violation};
use std::path::Path;

/// Transient state handed to every callback of one check for one file.
///
/// The dispatch engine creates a fresh session for each check at the start
/// of each file and drops it when the file is done, so nothing a check keeps
/// in its `state` can survive into the next file.
pub struct DispatchSession<'f, S> {
    state: S,
    file: &'f Path,
    code: &'static str,
    rule: &'static str,
    severity: Severity,
    violations: Vec<Violation>,
}

impl<'f, S: Default> DispatchSession<'f, S> {
    pub(crate) fn new(
        file: &'f Path,
        code: &'static str,
        rule: &'static str,
        severity: Severity,
    ) -> Self {
        Self {
            state: S::default(),
            file,
            code,
            rule,
            severity,
            violations: Vec::new(),
        }
    }
}

impl<S> DispatchSession<'_, S> {
    /// The check's own per-file state.
    pub fn state(&mut self) -> &mut S {
        &mut self.state
    }

    /// File being dispatched.
    #[must_use]
    pub fn file(&self) -> &Path {
        self.file
    }

    /// Violations raised so far in this file.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Reports a violation at `node`'s position.
    pub fn log(&mut self, node: Node<'_>, key: &str, args: &[&str]) {
        self.log_at(node.line(), Some(node.column()), key, args);
    }

    /// Reports a violation for a whole line.
    pub fn log_line(&mut self, line: usize, key: &str, args: &[&str]) {
        self.log_at(line, None, key, args);
    }

    /// Reports a violation at an explicit position.
    pub fn log_at(&mut self, line: usize, column: Option<usize>, key: &str, args: &[&str]) {
        self.push(line, column, key, args, None);
    }

    /// Reports a violation at `node` with a fix suggestion.
    pub fn log_with_help(&mut self, node: Node<'_>, key: &str, args: &[&str], help: &str) {
        self.push(
            node.line(),
            Some(node.column()),
            key,
            args,
            Some(Suggestion::new(help)),
        );
    }

    fn push(
        &mut self,
        line: usize,
        column: Option<usize>,
        key: &str,
        args: &[&str],
        suggestion: Option<Suggestion>,
    ) {
        let location = Location {
            file: self.file.to_path_buf(),
            line,
            column,
        };
        let mut violation = Violation::new(
            self.code,
            self.rule,
            self.severity,
            location,
            key,
            args.iter().map(|a| (*a).to_string()).collect(),
        );
        violation.suggestion = suggestion;
        self.violations.push(violation);
    }

    pub(crate) fn take_violations(&mut self) -> Vec<Violation> {
        std::mem::take(&mut self.violations)
    }
}
