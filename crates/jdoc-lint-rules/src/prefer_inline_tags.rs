//! Check preferring Javadoc inline tags over equivalent HTML.
//!
//! # Rationale
//!
//! `{@code ...}`, `{@link ...}` and `{@literal ...}` are understood by the
//! documentation tool; their HTML spellings are not and render as plain markup.
//!
//! # Detected Patterns
//!
//! - `<code>...</code>` elements
//! - `<a href="#member">` anchors pointing into the same document
//! - `&lt;` and `&gt;` entities in text
//!
//! Content of `<pre>` blocks is ignored, and entities inside `{@code}` or
//! `{@literal}` are left alone.
//!
//! # Good Patterns
//!
//! ```java
//! /** Returns {@code true} if {@link #size()} is {@literal <} 1. */
//! ```

use jdoc_lint_core::{DispatchSession, JavadocCheck, Node, NodeKind, Severity};

/// Check code for prefer-inline-tags.
pub const CODE: &str = "JD001";

/// Check name for prefer-inline-tags.
pub const NAME: &str = "prefer-inline-tags";

const MSG_KEY: &str = "prefer.javadoc.inline.tag";

/// Reports HTML that has an inline tag equivalent.
#[derive(Debug, Clone)]
pub struct PreferInlineTags {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for PreferInlineTags {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferInlineTags {
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

    fn check_element(session: &mut DispatchSession<'_, ()>, element: Node<'_>) {
        match element_name(element).map(str::to_ascii_lowercase).as_deref() {
            Some("code") => session.log_with_help(
                element,
                MSG_KEY,
                &["{@code ...}", "<code>"],
                "replace <code>...</code> with {@code ...}",
            ),
            Some("a") if href(element).is_some_and(|h| h.starts_with("\"#")) => {
                session.log_with_help(
                    element,
                    MSG_KEY,
                    &["{@link ...}", "<a href=\"#...\">"],
                    "link the member with {@link #member}",
                );
            }
            _ => {}
        }
    }

    fn check_entities(session: &mut DispatchSession<'_, ()>, text: Node<'_>) {
        for (entity, replacement) in [("&lt;", "{@literal <}"), ("&gt;", "{@literal >}")] {
            for (index, _) in text.text().match_indices(entity) {
                let offset = text.text()[..index].chars().count();
                session.log_at(
                    text.line(),
                    Some(text.column() + offset),
                    MSG_KEY,
                    &[replacement, entity],
                );
            }
        }
    }
}

impl JavadocCheck for PreferInlineTags {
    type State = ();
    const DEFAULT_KINDS: &'static [NodeKind] = &[NodeKind::HtmlElement, NodeKind::Text];

    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Prefers {@code}, {@link} and {@literal} over equivalent HTML"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn visit(&self, session: &mut DispatchSession<'_, ()>, node: Node<'_>) {
        if inside_pre(node) {
            return;
        }
        if node.kind() == NodeKind::HtmlElement {
            Self::check_element(session, node);
        } else if !inside_code_or_literal(node) {
            Self::check_entities(session, node);
        }
    }
}

fn ancestors(node: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    std::iter::successors(node.parent(), |n| n.parent())
}

/// Tag name of an `HTML_ELEMENT`, taken from its start tag.
fn element_name(element: Node<'_>) -> Option<&str> {
    element
        .find_first(NodeKind::HtmlElementStart)?
        .find_first(NodeKind::HtmlTagName)
        .map(Node::text)
}

/// Raw `href` value of an element, quotes included.
fn href(element: Node<'_>) -> Option<&str> {
    element
        .find_first(NodeKind::HtmlElementStart)?
        .children()
        .filter(|c| c.kind() == NodeKind::Attribute)
        .find(|attr| {
            attr.find_first(NodeKind::AttrName)
                .is_some_and(|name| name.text().eq_ignore_ascii_case("href"))
        })?
        .find_first(NodeKind::AttrValue)
        .map(Node::text)
}

fn inside_pre(node: Node<'_>) -> bool {
    ancestors(node).any(|a| {
        a.kind() == NodeKind::HtmlElement
            && element_name(a).is_some_and(|name| name.eq_ignore_ascii_case("pre"))
    })
}

fn inside_code_or_literal(node: Node<'_>) -> bool {
    node.ancestor(NodeKind::JavadocInlineTag)
        .and_then(|tag| tag.child(1))
        .is_some_and(|literal| {
            matches!(
                literal.kind(),
                NodeKind::CodeLiteral | NodeKind::LiteralLiteral
            )
        })
}
