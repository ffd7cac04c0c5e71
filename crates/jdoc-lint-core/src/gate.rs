//! Tolerance gate: per-tree dispatch decision and structural diagnostics.

use crate::check::Capability;
use crate::grammar::ParseError;
use crate::messages;
use crate::tree::CommentTree;
use crate::types::{Location, Severity, Violation};
use std::path::Path;

/// Code attached to diagnostics raised by the comment parser itself.
pub const PARSER_CODE: &str = "JD000";

/// Rule name attached to diagnostics raised by the comment parser itself.
pub const PARSER_RULE: &str = "javadoc-parser";

/// Returns true if a check with `capability` may be dispatched over `tree`.
#[must_use]
pub fn permits(capability: Capability, tree: &CommentTree) -> bool {
    tree.is_tight() || capability == Capability::Tolerant
}

/// Converts a tree's recoverable issues into violations, in detection order.
///
/// These are emitted once per tree regardless of which checks are registered.
#[must_use]
pub fn structural_violations(tree: &CommentTree) -> Vec<Violation> {
    tree.diagnostics()
        .iter()
        .map(|issue| {
            let location = Location {
                file: tree.file().to_path_buf(),
                line: issue.line(),
                column: issue.column(),
            };
            Violation::new(
                PARSER_CODE,
                PARSER_RULE,
                Severity::Error,
                location,
                issue.key(),
                issue.args(),
            )
        })
        .collect()
}

/// Converts a hard parse failure into the file-level violation.
#[must_use]
pub fn parse_failure(file: &Path, error: &ParseError) -> Violation {
    Violation::new(
        PARSER_CODE,
        PARSER_RULE,
        Severity::Error,
        Location::line(file, error.line),
        messages::PARSE_RULE_ERROR,
        vec![
            error.column.to_string(),
            error.message.clone(),
            error.rule.name().to_string(),
        ],
    )
}
