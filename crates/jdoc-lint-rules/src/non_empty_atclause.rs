//! Check requiring block tags to carry a description.
//!
//! # Detected Patterns
//!
//! ```java
//! /**
//!  * @param count
//!  * @return
//!  */
//! ```
//!
//! Which tags are checked is controlled by `javadoc_tokens`; the defaults
//! cover `@param`, `@return`, `@throws`, `@exception` and `@deprecated`.

use jdoc_lint_core::{DispatchSession, JavadocCheck, Node, NodeKind, Severity};

/// Check code for non-empty-atclause-description.
pub const CODE: &str = "JD002";

/// Check name for non-empty-atclause-description.
pub const NAME: &str = "non-empty-atclause-description";

/// Reports block tags whose description is empty.
#[derive(Debug, Clone)]
pub struct NonEmptyAtclauseDescription {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NonEmptyAtclauseDescription {
    fn default() -> Self {
        Self::new()
    }
}

impl NonEmptyAtclauseDescription {
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

impl JavadocCheck for NonEmptyAtclauseDescription {
    type State = ();
    const DEFAULT_KINDS: &'static [NodeKind] = &[
        NodeKind::ParamLiteral,
        NodeKind::ReturnLiteral,
        NodeKind::ThrowsLiteral,
        NodeKind::ExceptionLiteral,
        NodeKind::DeprecatedLiteral,
    ];
    const ACCEPTABLE_KINDS: &'static [NodeKind] = &[
        NodeKind::ParamLiteral,
        NodeKind::ReturnLiteral,
        NodeKind::ThrowsLiteral,
        NodeKind::ExceptionLiteral,
        NodeKind::DeprecatedLiteral,
        NodeKind::SinceLiteral,
        NodeKind::VersionLiteral,
        NodeKind::SeeLiteral,
        NodeKind::SerialLiteral,
        NodeKind::SerialDataLiteral,
        NodeKind::SerialFieldLiteral,
        NodeKind::AuthorLiteral,
    ];
    const REQUIRED_KINDS: &'static [NodeKind] = &[];

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a non-empty description on block tags"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn visit(&self, session: &mut DispatchSession<'_, ()>, literal: Node<'_>) {
        let Some(tag) = literal.parent() else {
            return;
        };
        let empty = tag
            .find_first(NodeKind::Description)
            .map_or(true, |d| d.text().trim().is_empty());
        if empty {
            session.log_line(tag.line(), "non.empty.atclause", &[]);
        }
    }
}
