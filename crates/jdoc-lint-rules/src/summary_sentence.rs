//! Check requiring a first sentence that ends with a period.
//!
//! Comments consisting only of `{@inheritDoc}` are skipped. The check needs
//! well-formed markup to find the sentence boundary, so it declares the
//! strict capability and does not run on comments with unclosed tags.

use jdoc_lint_core::metadata;
use jdoc_lint_core::{Capability, DispatchSession, JavadocCheck, Node, NodeKind, Severity};

/// Check code for summary-sentence.
pub const CODE: &str = "JD004";

/// Check name for summary-sentence.
pub const NAME: &str = "summary-sentence";

/// Reports missing or unterminated summaries.
#[derive(Debug, Clone)]
pub struct SummarySentence {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for SummarySentence {
    fn default() -> Self {
        Self::new()
    }
}

impl SummarySentence {
    /// Creates a new check with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl JavadocCheck for SummarySentence {
    type State = ();
    const DEFAULT_KINDS: &'static [NodeKind] = &[NodeKind::Javadoc];
    const CAPABILITY: Capability = Capability::Strict;

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a summary sentence ending with a period"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn visit(&self, session: &mut DispatchSession<'_, ()>, root: Node<'_>) {
        if inherits_doc(root) {
            return;
        }
        let meta = metadata::extract(root.tree());
        if meta.description.is_empty() {
            session.log_line(root.line(), "summary.javaDoc.missing", &[]);
        } else if !meta.summary.ends_with('.') {
            session.log_line(root.line(), "summary.first.sentence", &[]);
        }
    }
}

fn inherits_doc(root: Node<'_>) -> bool {
    root.children()
        .take_while(|c| c.kind() != NodeKind::JavadocTag)
        .filter(|c| c.kind() == NodeKind::JavadocInlineTag)
        .any(|tag| tag.find_first(NodeKind::InheritDocLiteral).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdoc_lint_core::{DispatchEngine, SourceFile, Violation};

    fn check_code(code: &str) -> Vec<Violation> {
        let engine = DispatchEngine::builder()
            .check(SummarySentence::new())
            .build()
            .expect("check should register");
        engine
            .process_file(&SourceFile::new("Test.java", code))
            .violations
            .into_iter()
            .filter(|v| v.code == CODE)
            .collect()
    }

    #[test]
    fn test_accepts_terminated_summary() {
        assert!(check_code("/** Returns the size. More detail */\nint size();\n").is_empty());
    }

    #[test]
    fn test_detects_missing_period() {
        let violations =
            check_code("class A {\n  /**\n   * Returns the size\n   */\n  int size();\n}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 3);
        assert_eq!(
            violations[0].message,
            "First sentence of Javadoc is missing an ending period."
        );
    }

    #[test]
    fn test_detects_missing_summary() {
        let violations = check_code("/**\n * @return the size\n */\nint size();\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].key, "summary.javaDoc.missing");
    }

    #[test]
    fn test_skips_inherit_doc() {
        assert!(check_code("/** {@inheritDoc} */\nint size();\n").is_empty());
    }

    #[test]
    fn test_skips_non_tight_comments() {
        assert!(check_code("/** Returns <b>the size */\nint size();\n").is_empty());
    }
}
