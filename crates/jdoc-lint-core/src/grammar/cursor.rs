//! Character cursor over a normalized comment body.

use crate::scanner::BodyLine;

/// Absolute file position of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pos {
    pub(crate) line: usize,
    pub(crate) column: usize,
}

/// Flattens body lines into one character stream, each character tagged
/// with its file position. Lines are joined by `'\n'`.
pub(crate) struct Cursor {
    chars: Vec<(char, Pos)>,
    pos: usize,
    end: Pos,
}

impl Cursor {
    pub(crate) fn new(body: &[BodyLine<'_>], origin: Pos) -> Self {
        let mut chars = Vec::new();
        let mut end = origin;
        for (i, line) in body.iter().enumerate() {
            if i > 0 {
                chars.push(('\n', end));
            }
            let mut column = line.column;
            for c in line.text.chars() {
                chars.push((
                    c,
                    Pos {
                        line: line.line,
                        column,
                    },
                ));
                column += 1;
            }
            end = Pos {
                line: line.line,
                column,
            };
        }
        Self { chars, pos: 0, end }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    pub(crate) fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).map(|(c, _)| *c)
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Character offset from the start of the body.
    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    /// Position of the next character, or just past the last one at EOF.
    pub(crate) fn position(&self) -> Pos {
        self.chars.get(self.pos).map_or(self.end, |(_, p)| *p)
    }

    /// Consumes characters while `pred` holds.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            out.push(c);
            self.pos += 1;
        }
        out
    }

    /// Consumes spaces and tabs.
    pub(crate) fn eat_blanks(&mut self) -> String {
        self.eat_while(|c| c == ' ' || c == '\t')
    }

    /// Counts spaces and tabs ahead without consuming them.
    pub(crate) fn blanks_ahead(&self) -> usize {
        self.chars[self.pos..]
            .iter()
            .take_while(|(c, _)| *c == ' ' || *c == '\t')
            .count()
    }
}
