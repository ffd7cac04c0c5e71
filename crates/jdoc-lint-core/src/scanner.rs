//! Documentation comment detection and position normalization.
//!
//! The scanner walks Java-like source text and extracts every documentation
//! comment together with its anchor position in the file. Two styles are
//! recognized:
//!
//! - block style: `/** ... */`, optionally with leading asterisks on each line;
//! - line-run style: consecutive lines starting with `///`.
//!
//! Both styles normalize to the same [`BodyLine`] sequence so that identical
//! documentation content yields identical trees, differing only in positions.
//! Ordinary comments (`//`, `/* */`, `/**/`, `/*** banner ***/`, `////`) and
//! comment markers inside string, text block or char literals are ignored.

use serde::{Deserialize, Serialize};

/// Style of the enclosing documentation comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentStyle {
    /// `/** ... */`
    Block,
    /// A run of `///` lines.
    LineRun,
}

/// A documentation comment found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    /// Comment style.
    pub style: CommentStyle,
    /// Line of the opening marker (1-indexed).
    pub line: usize,
    /// Column of the opening marker (1-indexed, in characters).
    pub column: usize,
    /// Raw comment text, markers included.
    pub raw: String,
}

/// One line of a normalized comment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLine<'a> {
    /// Line content after decoration, trailing whitespace removed.
    pub text: &'a str,
    /// File line (1-indexed).
    pub line: usize,
    /// File column of the first character of `text` (1-indexed).
    pub column: usize,
}

impl DocComment {
    /// Creates a block style comment anchored at `line`:`column`.
    #[must_use]
    pub fn block(raw: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            style: CommentStyle::Block,
            line,
            column,
            raw: raw.into(),
        }
    }

    /// Creates a line-run style comment anchored at `line`:`column`.
    #[must_use]
    pub fn line_run(raw: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            style: CommentStyle::LineRun,
            line,
            column,
            raw: raw.into(),
        }
    }

    /// Last file line covered by this comment.
    #[must_use]
    pub fn end_line(&self) -> usize {
        self.line + self.raw.matches('\n').count()
    }

    /// Returns the comment body with decoration removed.
    ///
    /// Leading and trailing blank lines are dropped; every remaining line keeps
    /// its absolute file position.
    #[must_use]
    pub fn body(&self) -> Vec<BodyLine<'_>> {
        let mut lines = match self.style {
            CommentStyle::Block => self.block_body(),
            CommentStyle::LineRun => self.line_run_body(),
        };

        while lines.first().is_some_and(|l| l.text.trim().is_empty()) {
            lines.remove(0);
        }
        while lines.last().is_some_and(|l| l.text.trim().is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Returns the normalized body text, lines joined by `\n`.
    #[must_use]
    pub fn normalized_text(&self) -> String {
        self.body()
            .iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn block_body(&self) -> Vec<BodyLine<'_>> {
        let inner = self
            .raw
            .strip_prefix("/**")
            .map(|rest| rest.strip_suffix("*/").unwrap_or(rest))
            .unwrap_or("");

        inner
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                if i == 0 {
                    return BodyLine {
                        text: line.trim_end(),
                        line: self.line,
                        column: self.column + 3,
                    };
                }
                let trimmed = line.trim_start_matches([' ', '\t']);
                let text = trimmed.strip_prefix('*').unwrap_or(trimmed);
                let skipped = line.len() - text.len();
                BodyLine {
                    text: text.trim_end(),
                    line: self.line + i,
                    column: line[..skipped].chars().count() + 1,
                }
            })
            .collect()
    }

    fn line_run_body(&self) -> Vec<BodyLine<'_>> {
        self.raw
            .split('\n')
            .enumerate()
            .map(|(i, line)| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                let trimmed = line.trim_start_matches([' ', '\t']);
                let text = trimmed.strip_prefix("///").unwrap_or(trimmed);
                let skipped = line.len() - text.len();
                let base = if i == 0 { self.column } else { 1 };
                BodyLine {
                    text: text.trim_end(),
                    line: self.line + i,
                    column: base + line[..skipped].chars().count(),
                }
            })
            .collect()
    }
}

/// Returns true if a raw `/* ... */` comment is a documentation block.
///
/// `/**/` and banner comments starting with three or more asterisks are
/// ordinary comments.
#[must_use]
pub fn is_doc_block(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    raw.starts_with("/**") && bytes.len() > 4 && bytes[3] != b'*' && bytes[3] != b'/'
}

/// Scans source text and returns all documentation comments in file order.
#[must_use]
pub fn scan_doc_comments(src: &str) -> Vec<DocComment> {
    Scanner::new(src).run()
}

/// Counts documentation comments in source text.
#[must_use]
pub fn count_doc_comments(src: &str) -> usize {
    scan_doc_comments(src).len()
}

/// A run of `///` lines being accumulated.
struct LineRun {
    start: usize,
    end: usize,
    line: usize,
    column: usize,
    last_line: usize,
}

struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
    comments: Vec<DocComment>,
    run: Option<LineRun>,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
            comments: Vec::new(),
            run: None,
        }
    }

    fn run(mut self) -> Vec<DocComment> {
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\n' => self.newline(),
                b'"' if self.src[self.pos..].starts_with("\"\"\"") => self.skip_text_block(),
                b'"' => self.skip_quoted(b'"'),
                b'\'' => self.skip_quoted(b'\''),
                b'/' if self.peek(1) == Some(b'/') => self.line_comment(),
                b'/' if self.peek(1) == Some(b'*') => self.block_comment(),
                _ => self.pos += 1,
            }
        }
        self.flush_run();
        self.comments
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn newline(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.line_start = self.pos;
    }

    fn column(&self) -> usize {
        self.src[self.line_start..self.pos].chars().count() + 1
    }

    fn skip_quoted(&mut self, quote: u8) {
        self.pos += 1;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'\n' => return,
                b if b == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn skip_text_block(&mut self) {
        self.pos += 3;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'\n' => self.newline(),
                b'"' if self.src[self.pos..].starts_with("\"\"\"") => {
                    self.pos += 3;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        let end = self.src[start..].find('\n').map_or(self.src.len(), |i| start + i);
        let text = &self.src[start..end];
        let only_indent_before = self.src[self.line_start..start]
            .chars()
            .all(|c| c == ' ' || c == '\t');

        if only_indent_before && text.starts_with("///") && !text.starts_with("////") {
            let line = self.line;
            let extends = self.run.as_ref().is_some_and(|r| r.last_line + 1 == line);
            if extends {
                if let Some(run) = self.run.as_mut() {
                    run.end = end;
                    run.last_line = line;
                }
            } else {
                self.flush_run();
                self.run = Some(LineRun {
                    start,
                    end,
                    line,
                    column: self.column(),
                    last_line: line,
                });
            }
        }
        self.pos = end;
    }

    fn block_comment(&mut self) {
        let start = self.pos;
        let (line, column) = (self.line, self.column());
        let end = self.src[start + 2..]
            .find("*/")
            .map_or(self.src.len(), |i| start + 2 + i + 2);
        let raw = &self.src[start..end];

        if raw.ends_with("*/") && is_doc_block(raw) {
            self.flush_run();
            self.comments.push(DocComment::block(raw, line, column));
        }

        while self.pos < end {
            if self.bytes[self.pos] == b'\n' {
                self.newline();
            } else {
                self.pos += 1;
            }
        }
    }

    fn flush_run(&mut self) {
        if let Some(run) = self.run.take() {
            let raw = &self.src[run.start..run.end];
            self.comments
                .push(DocComment::line_run(raw, run.line, run.column));
        }
    }
}
