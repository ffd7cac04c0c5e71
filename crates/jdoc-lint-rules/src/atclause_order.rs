//! Check enforcing the order of block tags.
//!
//! Each comment is checked on its own: a tag is reported when it appears
//! after a tag that the configured order puts later. Tags missing from the
//! order are ignored.
//!
//! # Configuration
//!
//! ```toml
//! [rules.atclause-order]
//! tag_order = ["@param", "@return", "@throws", "@deprecated"]
//! ```

use jdoc_lint_core::{DispatchSession, JavadocCheck, Node, NodeKind, RuleConfig, Severity};

/// Check code for atclause-order.
pub const CODE: &str = "JD003";

/// Check name for atclause-order.
pub const NAME: &str = "atclause-order";

/// Default block tag order.
pub const DEFAULT_ORDER: &[&str] = &[
    "@author",
    "@version",
    "@param",
    "@return",
    "@throws",
    "@exception",
    "@see",
    "@since",
    "@serial",
    "@serialField",
    "@serialData",
    "@deprecated",
];

/// Reports block tags that are out of order.
#[derive(Debug, Clone)]
pub struct AtclauseOrder {
    /// Custom severity.
    pub severity: Severity,
    /// Expected tag order, `@` included.
    pub tag_order: Vec<String>,
}

impl Default for AtclauseOrder {
    fn default() -> Self {
        Self::new()
    }
}

impl AtclauseOrder {
    /// Creates a new check with the default order.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            tag_order: DEFAULT_ORDER.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Creates a check from its `[rules.atclause-order]` table.
    #[must_use]
    pub fn from_config(config: Option<&RuleConfig>) -> Self {
        let check = Self::new();
        match config.map(|c| c.get_str_array("tag_order")) {
            Some(order) if !order.is_empty() => check.tag_order(order),
            _ => check,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the expected order.
    #[must_use]
    pub fn tag_order<I, S>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_order = order.into_iter().map(Into::into).collect();
        tracing::debug!(order = ?self.tag_order, "atclause-order configured");
        self
    }

    fn rendered_order(&self) -> String {
        format!("[{}]", self.tag_order.join(", "))
    }
}

/// Highest order index seen so far in the current comment.
#[derive(Debug, Default)]
pub struct OrderState {
    furthest: Option<usize>,
}

impl JavadocCheck for AtclauseOrder {
    type State = OrderState;
    const DEFAULT_KINDS: &'static [NodeKind] = &[NodeKind::JavadocTag];

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires block tags to follow the configured order"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn begin_tree(&self, session: &mut DispatchSession<'_, OrderState>, _root: Node<'_>) {
        session.state().furthest = None;
    }

    fn visit(&self, session: &mut DispatchSession<'_, OrderState>, tag: Node<'_>) {
        let Some(literal) = tag.first_child() else {
            return;
        };
        let Some(index) = self.tag_order.iter().position(|t| t == literal.text()) else {
            return;
        };

        let furthest = session.state().furthest;
        match furthest {
            Some(furthest) if index < furthest => {
                let order = self.rendered_order();
                session.log_line(tag.line(), "at.clause.order", &[order.as_str()]);
            }
            _ => session.state().furthest = Some(index),
        }
    }
}
