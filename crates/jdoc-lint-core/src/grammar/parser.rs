use super::cursor::{Cursor, Pos};
use super::html;
use crate::kind::NodeKind;
use crate::scanner::DocComment;
use crate::tree::{CommentSpan, CommentTree, StructuralIssue, TreeBuilder};
use std::path::Path;

/// Depth of the builder stack when only the root is open.
const ROOT_DEPTH: usize = 1;

/// A syntax error that prevents building any tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} while parsing {rule}")]
pub struct ParseError {
    /// File line of the offending input.
    pub line: usize,
    /// File column of the offending input.
    pub column: usize,
    /// Character offset into the normalized comment body.
    pub offset: usize,
    /// Grammar rule that failed.
    pub rule: NodeKind,
    /// Offending input as shown to users.
    pub found: String,
    /// Alternatives the grammar would have accepted.
    pub expected: Vec<String>,
    /// Detail message naming the offending input.
    pub message: String,
}

impl ParseError {
    fn mismatched(
        at: Pos,
        offset: usize,
        rule: NodeKind,
        found: String,
        expected: &[&str],
    ) -> Self {
        let alternatives = match expected {
            [single] => (*single).to_string(),
            many => format!("{{{}}}", many.join(", ")),
        };
        Self {
            line: at.line,
            column: at.column,
            offset,
            rule,
            message: format!("mismatched input '{found}' expecting {alternatives}"),
            found,
            expected: expected.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    fn extraneous(at: Pos, offset: usize, rule: NodeKind, found: String) -> Self {
        Self {
            line: at.line,
            column: at.column,
            offset,
            rule,
            message: format!("extraneous input '{found}' without matching start tag"),
            found,
            expected: Vec::new(),
        }
    }
}

/// An HTML element waiting for its closing tag.
struct OpenElement {
    name: String,
    line: usize,
    column: usize,
    /// Builder depth with this element open.
    depth: usize,
}

impl OpenElement {
    /// Issue for an element whose end tag never appeared, whether it was
    /// left open or closed implicitly by a sibling or an ancestor's end tag.
    fn unclosed(&self) -> StructuralIssue {
        StructuralIssue::UnclosedTag {
            name: self.name.clone(),
            line: self.line,
            column: self.column,
        }
    }
}

/// Pieces of an HTML tag, buffered until the tag's shape is known.
enum Part {
    Leaf(NodeKind, String, Pos),
    Attribute(Vec<(NodeKind, String, Pos)>, Pos),
}

pub(crate) struct Parser<'c> {
    comment: &'c DocComment,
    cur: Cursor,
    tree: TreeBuilder,
    issues: Vec<StructuralIssue>,
    html: Vec<OpenElement>,
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn is_html_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':')
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '$')
}

impl<'c> Parser<'c> {
    pub(crate) fn new(comment: &'c DocComment) -> Self {
        let body = comment.body();
        let origin = body.first().map_or(
            Pos {
                line: comment.line,
                column: comment.column,
            },
            |first| Pos {
                line: first.line,
                column: first.column,
            },
        );
        Self {
            comment,
            cur: Cursor::new(&body, origin),
            tree: TreeBuilder::new(origin.line, origin.column),
            issues: Vec::new(),
            html: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, file: &Path) -> Result<CommentTree, ParseError> {
        self.line_start()?;
        while let Some(c) = self.cur.peek() {
            self.ensure_description();
            if c == '\n' {
                self.newline();
                self.line_start()?;
            } else if self.at_inline_tag() {
                self.inline_tag()?;
            } else if self.at_start_tag() {
                self.start_tag()?;
            } else if self.at_end_tag() {
                self.end_tag()?;
            } else {
                self.text();
            }
        }
        self.close_section();

        let span = CommentSpan {
            style: self.comment.style,
            line: self.comment.line,
            column: self.comment.column,
            end_line: self.comment.end_line(),
        };
        Ok(self.tree.finish(file.to_path_buf(), span, self.issues))
    }

    fn error(&self, rule: NodeKind, expected: &[&str]) -> ParseError {
        let found = match self.cur.peek() {
            None => "<EOF>".to_string(),
            Some('\n') => "<NEWLINE>".to_string(),
            Some(c) => c.to_string(),
        };
        ParseError::mismatched(self.cur.position(), self.cur.offset(), rule, found, expected)
    }

    fn at_inline_tag(&self) -> bool {
        self.cur.peek() == Some('{') && self.cur.peek_at(1) == Some('@')
    }

    fn at_start_tag(&self) -> bool {
        self.cur.peek() == Some('<') && self.cur.peek_at(1).is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn at_end_tag(&self) -> bool {
        self.cur.peek() == Some('<')
            && self.cur.peek_at(1) == Some('/')
            && self.cur.peek_at(2).is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn leaf(&mut self, kind: NodeKind, text: impl Into<String>, at: Pos) {
        self.tree.leaf(kind, text, at.line, at.column);
    }

    fn open(&mut self, kind: NodeKind, at: Pos) {
        self.tree.open(kind, at.line, at.column);
    }

    fn newline(&mut self) {
        let at = self.cur.position();
        self.cur.bump();
        self.leaf(NodeKind::Newline, "\n", at);
    }

    fn blanks(&mut self) {
        let at = self.cur.position();
        let ws = self.cur.eat_blanks();
        if !ws.is_empty() {
            self.leaf(NodeKind::Ws, ws, at);
        }
    }

    /// Handles the start of a body line: either a new block tag section or
    /// leading whitespace of ordinary content.
    fn line_start(&mut self) -> Result<(), ParseError> {
        let blanks = self.cur.blanks_ahead();
        let starts_tag = self.cur.peek_at(blanks) == Some('@')
            && self
                .cur
                .peek_at(blanks + 1)
                .is_some_and(|c| c.is_ascii_alphabetic());

        if starts_tag {
            self.close_section();
            self.blanks();
            return self.block_tag();
        }
        if blanks > 0 {
            self.ensure_description();
            self.blanks();
        }
        Ok(())
    }

    /// Opens the description of the current block tag on first content.
    fn ensure_description(&mut self) {
        if self.tree.current_kind() == Some(NodeKind::JavadocTag) {
            let at = self.cur.position();
            self.open(NodeKind::Description, at);
        }
    }

    /// Ends the current section, reporting HTML elements left open.
    fn close_section(&mut self) {
        for open in std::mem::take(&mut self.html) {
            self.issues.push(open.unclosed());
        }
        self.tree.close_to(ROOT_DEPTH);
    }

    fn text(&mut self) {
        let at = self.cur.position();
        let mut text = String::new();
        if let Some(c) = self.cur.bump() {
            text.push(c);
        }
        while let Some(c) = self.cur.peek() {
            if c == '\n' || self.at_inline_tag() || self.at_start_tag() || self.at_end_tag() {
                break;
            }
            text.push(c);
            self.cur.bump();
        }
        self.leaf(NodeKind::Text, text, at);
    }

    fn block_tag(&mut self) -> Result<(), ParseError> {
        let start = self.cur.position();
        self.open(NodeKind::JavadocTag, start);
        self.cur.bump();
        let name = self.cur.eat_while(is_tag_name_char);
        let literal = NodeKind::block_tag(&name);
        self.leaf(literal, format!("@{name}"), start);

        match literal {
            NodeKind::ParamLiteral => {
                self.argument_gap(&["PARAMETER_NAME"])?;
                self.parameter_name()?;
            }
            NodeKind::ThrowsLiteral | NodeKind::ExceptionLiteral => {
                self.argument_gap(&["REFERENCE"])?;
                self.reference(NodeKind::JavadocTag, &["REFERENCE"])?;
            }
            NodeKind::SeeLiteral => {
                self.argument_gap(&["REFERENCE", "STRING", "HTML_ELEMENT"])?;
                if !matches!(self.cur.peek(), Some('"' | '<')) {
                    self.reference(NodeKind::JavadocTag, &["REFERENCE", "STRING", "HTML_ELEMENT"])?;
                }
            }
            _ => {}
        }
        self.blanks();
        Ok(())
    }

    /// Requires whitespace followed by an argument on the same line.
    fn argument_gap(&mut self, expected: &[&str]) -> Result<(), ParseError> {
        let at = self.cur.position();
        let ws = self.cur.eat_blanks();
        match self.cur.peek() {
            Some(c) if c != '\n' && !ws.is_empty() => {
                self.leaf(NodeKind::Ws, ws, at);
                Ok(())
            }
            _ => Err(self.error(NodeKind::JavadocTag, expected)),
        }
    }

    fn parameter_name(&mut self) -> Result<(), ParseError> {
        let at = self.cur.position();
        let name = if self.cur.peek() == Some('<') {
            self.cur.bump();
            let inner = self.cur.eat_while(is_identifier_char);
            if inner.is_empty() || self.cur.peek() != Some('>') {
                return Err(self.error(NodeKind::JavadocTag, &["'>'"]));
            }
            self.cur.bump();
            format!("<{inner}>")
        } else {
            self.cur.eat_while(is_identifier_char)
        };
        if name.is_empty() {
            return Err(self.error(NodeKind::JavadocTag, &["PARAMETER_NAME"]));
        }
        self.leaf(NodeKind::ParameterName, name, at);
        Ok(())
    }

    /// Parses `pkg.Class#member(args)`.
    fn reference(&mut self, rule: NodeKind, expected: &[&str]) -> Result<(), ParseError> {
        let at = self.cur.position();
        let mut text = self
            .cur
            .eat_while(|c| !c.is_whitespace() && c != '}' && c != '(');
        if self.cur.peek() == Some('(') {
            text.push_str(&self.cur.eat_while(|c| c != ')' && c != '\n' && c != '}'));
            if self.cur.peek() != Some(')') {
                return Err(self.error(NodeKind::Reference, &["')'"]));
            }
            self.cur.bump();
            text.push(')');
        }
        if text.is_empty() {
            return Err(self.error(rule, expected));
        }
        self.leaf(NodeKind::Reference, text, at);
        Ok(())
    }

    fn inline_tag(&mut self) -> Result<(), ParseError> {
        let start = self.cur.position();
        self.open(NodeKind::JavadocInlineTag, start);
        self.cur.bump();
        self.leaf(NodeKind::JavadocInlineTagStart, "{", start);

        let at = self.cur.position();
        self.cur.bump();
        let name = self.cur.eat_while(is_tag_name_char);
        let literal = NodeKind::inline_tag(&name);
        self.leaf(literal, format!("@{name}"), at);

        match literal {
            NodeKind::LinkLiteral | NodeKind::LinkplainLiteral => {
                let gap = self.cur.blanks_ahead();
                self.blanks();
                if gap == 0 || matches!(self.cur.peek(), None | Some('}' | '\n')) {
                    return Err(self.error(NodeKind::Reference, &["REFERENCE"]));
                }
                self.reference(NodeKind::Reference, &["REFERENCE"])?;
                self.blanks();
                if !matches!(self.cur.peek(), None | Some('}')) {
                    let at = self.cur.position();
                    self.open(NodeKind::Description, at);
                    self.inline_content()?;
                    self.tree.close();
                }
            }
            NodeKind::ValueLiteral => {
                self.blanks();
                if !matches!(self.cur.peek(), None | Some('}' | '\n')) {
                    self.reference(NodeKind::Reference, &["REFERENCE"])?;
                    self.blanks();
                }
            }
            _ => self.blanks(),
        }
        self.inline_content()?;

        let end = self.cur.position();
        self.cur.bump();
        self.leaf(NodeKind::JavadocInlineTagEnd, "}", end);
        self.tree.close();
        Ok(())
    }

    /// Consumes inline tag content up to the closing brace, keeping nested
    /// braces balanced. Stops before the brace.
    fn inline_content(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        let mut text = String::new();
        let mut text_at = self.cur.position();
        loop {
            match self.cur.peek() {
                None => {
                    self.flush_text(&mut text, text_at);
                    return Err(self.error(
                        NodeKind::JavadocInlineTag,
                        &["JAVADOC_INLINE_TAG_END"],
                    ));
                }
                Some('}') if depth == 0 => {
                    self.flush_text(&mut text, text_at);
                    return Ok(());
                }
                Some('\n') => {
                    self.flush_text(&mut text, text_at);
                    self.newline();
                    self.blanks();
                }
                Some(c) => {
                    if text.is_empty() {
                        text_at = self.cur.position();
                    }
                    match c {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    text.push(c);
                    self.cur.bump();
                }
            }
        }
    }

    fn flush_text(&mut self, text: &mut String, at: Pos) {
        if !text.is_empty() {
            let text = std::mem::take(text);
            self.leaf(NodeKind::Text, text, at);
        }
    }

    fn start_tag(&mut self) -> Result<(), ParseError> {
        let start = self.cur.position();
        let mut parts = Vec::new();
        self.cur.bump();
        parts.push(Part::Leaf(NodeKind::Open, "<".into(), start));

        let name_at = self.cur.position();
        let name = self.cur.eat_while(is_html_name_char);
        parts.push(Part::Leaf(NodeKind::HtmlTagName, name.clone(), name_at));

        let self_closing = loop {
            self.tag_whitespace(&mut parts);
            let at = self.cur.position();
            match (self.cur.peek(), self.cur.peek_at(1)) {
                (Some('>'), _) => {
                    self.cur.bump();
                    parts.push(Part::Leaf(NodeKind::Close, ">".into(), at));
                    break false;
                }
                (Some('/'), Some('>')) => {
                    self.cur.bump();
                    self.cur.bump();
                    parts.push(Part::Leaf(NodeKind::SlashClose, "/>".into(), at));
                    break true;
                }
                (Some(c), _) if is_html_name_char(c) => parts.push(self.attribute()?),
                _ => {
                    return Err(self.error(
                        NodeKind::HtmlElementStart,
                        &["CLOSE", "SLASH_CLOSE", "ATTRIBUTE"],
                    ))
                }
            }
        };

        if self_closing || html::is_void(&name) {
            self.open(NodeKind::VoidElement, start);
            self.emit(parts);
            self.tree.close();
            return Ok(());
        }

        while let Some(top) = self.html.last() {
            if !html::implicitly_closes(&top.name, &name) {
                break;
            }
            let depth = top.depth;
            self.issues.push(top.unclosed());
            self.html.pop();
            self.tree.close_to(depth - 1);
        }

        self.open(NodeKind::HtmlElement, start);
        self.open(NodeKind::HtmlElementStart, start);
        self.emit(parts);
        self.tree.close();
        self.html.push(OpenElement {
            name,
            line: start.line,
            column: start.column,
            depth: self.tree.depth(),
        });
        Ok(())
    }

    /// Whitespace and line breaks between the parts of a tag.
    fn tag_whitespace(&mut self, parts: &mut Vec<Part>) {
        loop {
            let at = self.cur.position();
            let ws = self.cur.eat_blanks();
            if !ws.is_empty() {
                parts.push(Part::Leaf(NodeKind::Ws, ws, at));
            }
            if self.cur.peek() != Some('\n') {
                return;
            }
            let at = self.cur.position();
            self.cur.bump();
            parts.push(Part::Leaf(NodeKind::Newline, "\n".into(), at));
        }
    }

    fn attribute(&mut self) -> Result<Part, ParseError> {
        let at = self.cur.position();
        let mut pieces = Vec::new();
        let name = self.cur.eat_while(is_html_name_char);
        pieces.push((NodeKind::AttrName, name, at));

        let gap = self.cur.blanks_ahead();
        if self.cur.peek_at(gap) != Some('=') {
            return Ok(Part::Attribute(pieces, at));
        }

        for kind in [NodeKind::Ws, NodeKind::Equals, NodeKind::Ws] {
            let piece_at = self.cur.position();
            let text = if kind == NodeKind::Equals {
                self.cur.bump();
                "=".to_string()
            } else {
                self.cur.eat_blanks()
            };
            if !text.is_empty() {
                pieces.push((kind, text, piece_at));
            }
        }

        let value_at = self.cur.position();
        let value = match self.cur.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.cur.bump();
                let inner = self.cur.eat_while(|c| c != quote && c != '\n');
                if self.cur.peek() != Some(quote) {
                    return Err(self.error(NodeKind::HtmlElementStart, &["ATTR_VALUE"]));
                }
                self.cur.bump();
                format!("{quote}{inner}{quote}")
            }
            _ => self.cur.eat_while(|c| !c.is_whitespace() && c != '>'),
        };
        if value.is_empty() {
            return Err(self.error(NodeKind::HtmlElementStart, &["ATTR_VALUE"]));
        }
        pieces.push((NodeKind::AttrValue, value, value_at));
        Ok(Part::Attribute(pieces, at))
    }

    fn emit(&mut self, parts: Vec<Part>) {
        for part in parts {
            match part {
                Part::Leaf(kind, text, at) => self.leaf(kind, text, at),
                Part::Attribute(pieces, at) => {
                    self.open(NodeKind::Attribute, at);
                    for (kind, text, piece_at) in pieces {
                        self.leaf(kind, text, piece_at);
                    }
                    self.tree.close();
                }
            }
        }
    }

    fn end_tag(&mut self) -> Result<(), ParseError> {
        let start = self.cur.position();
        let start_offset = self.cur.offset();
        let mut parts = vec![Part::Leaf(NodeKind::Open, "<".into(), start)];
        self.cur.bump();
        let slash_at = self.cur.position();
        self.cur.bump();
        parts.push(Part::Leaf(NodeKind::Slash, "/".into(), slash_at));

        let name_at = self.cur.position();
        let name = self.cur.eat_while(is_html_name_char);
        parts.push(Part::Leaf(NodeKind::HtmlTagName, name.clone(), name_at));
        self.tag_whitespace(&mut parts);
        if self.cur.peek() != Some('>') {
            return Err(self.error(NodeKind::HtmlElementEnd, &["CLOSE"]));
        }
        let close_at = self.cur.position();
        self.cur.bump();
        parts.push(Part::Leaf(NodeKind::Close, ">".into(), close_at));

        let matching = self
            .html
            .iter()
            .rposition(|open| open.name.eq_ignore_ascii_case(&name));

        match matching {
            Some(index) => {
                let skipped = self.html[index + 1..].iter().map(OpenElement::unclosed);
                self.issues.extend(skipped);
                let depth = self.html[index].depth;
                self.html.truncate(index);
                self.tree.close_to(depth);
                self.open(NodeKind::HtmlElementEnd, start);
                self.emit(parts);
                self.tree.close();
                self.tree.close();
                Ok(())
            }
            None if html::is_void(&name) => {
                self.issues.push(StructuralIssue::MalformedVoidElement {
                    name,
                    line: start.line,
                    column: start.column,
                });
                self.open(NodeKind::HtmlElementEnd, start);
                self.emit(parts);
                self.tree.close();
                Ok(())
            }
            None => Err(ParseError::extraneous(
                start,
                start_offset,
                NodeKind::HtmlElement,
                format!("</{name}>"),
            )),
        }
    }
}
