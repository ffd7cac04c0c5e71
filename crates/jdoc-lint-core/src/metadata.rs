//! Structured metadata read back from a parsed comment.
//!
//! Extraction is an ordinary read-only walk, so it works on any tree the
//! dispatch engine returned, whether or not checks already ran over it.

use crate::kind::NodeKind;
use crate::tree::{CommentTree, Node};
use serde::Serialize;

/// Summary, description and block tags of one comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocMetadata {
    /// First sentence of the description, or the `{@summary}` content.
    pub summary: String,
    /// Main description with surrounding whitespace trimmed.
    pub description: String,
    /// Block tags in source order.
    pub tags: Vec<BlockTag>,
}

/// One `@tag` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockTag {
    /// Tag name without `@`.
    pub name: String,
    /// Literal kind (`CUSTOM_NAME` for unknown tags).
    pub kind: NodeKind,
    /// Parameter name or reference, if the tag takes one.
    pub argument: Option<String>,
    /// Tag description with whitespace collapsed.
    pub description: String,
    /// Line of the `@`.
    pub line: usize,
    /// Column of the `@`.
    pub column: usize,
}

impl DocMetadata {
    /// Returns the first tag named `name`.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&BlockTag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Returns the `@param` tags in order.
    pub fn params(&self) -> impl Iterator<Item = &BlockTag> {
        self.tags.iter().filter(|t| t.kind == NodeKind::ParamLiteral)
    }
}

/// Extracts metadata from `tree`.
#[must_use]
pub fn extract(tree: &CommentTree) -> DocMetadata {
    let root = tree.root();
    let mut description = String::new();
    let mut tags = Vec::new();

    for child in root.children() {
        if child.kind() == NodeKind::JavadocTag {
            tags.push(block_tag(child));
        } else if tags.is_empty() {
            description.push_str(child.text());
        }
    }

    let summary = root
        .children()
        .take_while(|c| c.kind() != NodeKind::JavadocTag)
        .find_map(summary_tag)
        .unwrap_or_else(|| first_sentence(&description));

    DocMetadata {
        summary,
        description: description.trim().to_string(),
        tags,
    }
}

fn block_tag(tag: Node<'_>) -> BlockTag {
    let literal = tag.first_child();
    let name = literal
        .map(|l| l.text().trim_start_matches('@').to_string())
        .unwrap_or_default();
    let argument = tag
        .children()
        .find(|c| matches!(c.kind(), NodeKind::ParameterName | NodeKind::Reference))
        .map(|c| c.text().to_string());
    let description = tag
        .find_first(NodeKind::Description)
        .map(|d| collapse(d.text()))
        .unwrap_or_default();

    BlockTag {
        name,
        kind: literal.map_or(NodeKind::CustomName, Node::kind),
        argument,
        description,
        line: tag.line(),
        column: tag.column(),
    }
}

/// Content of a `{@summary ...}` inline tag.
fn summary_tag(node: Node<'_>) -> Option<String> {
    if node.kind() != NodeKind::JavadocInlineTag {
        return None;
    }
    let literal = node.child(1)?;
    if literal.text() != "@summary" {
        return None;
    }
    let content: String = node
        .children()
        .skip(2)
        .filter(|c| c.kind() != NodeKind::JavadocInlineTagEnd)
        .map(Node::text)
        .collect();
    Some(collapse(&content))
}

/// Text up to and including the first period followed by whitespace or the
/// end of the description.
fn first_sentence(text: &str) -> String {
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '.' && chars.peek().map_or(true, |&(_, next)| next.is_whitespace()) {
            return collapse(&text[..=i]);
        }
    }
    collapse(text)
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar;
    use crate::scanner::DocComment;
    use std::path::Path;

    fn meta(raw: &str) -> DocMetadata {
        let tree = grammar::parse(&DocComment::block(raw, 1, 1), Path::new("A.java")).unwrap();
        extract(&tree)
    }

    #[test]
    fn splits_summary_description_and_tags() {
        let m = meta(
            "/**\n * Adds two numbers. Returns the sum.\n *\n * @param a first\n * @param b second\n *     operand\n * @return the sum\n */",
        );
        assert_eq!(m.summary, "Adds two numbers.");
        assert_eq!(m.description, "Adds two numbers. Returns the sum.");
        assert_eq!(m.tags.len(), 3);

        let params: Vec<_> = m.params().collect();
        assert_eq!(params[0].argument.as_deref(), Some("a"));
        assert_eq!(params[0].description, "first");
        assert_eq!(params[1].description, "second operand");
        assert_eq!((params[0].line, params[0].column), (4, 4));

        let ret = m.tag("return").unwrap();
        assert_eq!(ret.kind, NodeKind::ReturnLiteral);
        assert_eq!(ret.argument, None);
        assert_eq!(ret.description, "the sum");
    }

    #[test]
    fn period_inside_word_does_not_end_sentence() {
        let m = meta("/** Uses java.util.List heavily. More. */");
        assert_eq!(m.summary, "Uses java.util.List heavily.");
    }

    #[test]
    fn summary_tag_wins_over_first_sentence() {
        let m = meta("/** {@summary Short form} Longer text. */");
        assert_eq!(m.summary, "Short form");
    }

    #[test]
    fn custom_tags_keep_their_name() {
        let m = meta("/**\n * Text.\n * @apiNote careful\n */");
        let tag = m.tag("apiNote").unwrap();
        assert_eq!(tag.kind, NodeKind::CustomName);
        assert_eq!(tag.description, "careful");
    }
}
