//! Grammar front end: comment body to [`CommentTree`].
//!
//! The grammar is a small recursive-descent parser over the normalized body
//! produced by the scanner. Recoverable markup problems (unclosed tags,
//! closed void elements) are recorded on the tree and mark it non-tight;
//! anything else the grammar cannot make sense of is a hard [`ParseError`]
//! and no tree is produced.

mod cursor;
mod html;
mod parser;

use crate::scanner::DocComment;
use crate::tree::CommentTree;
use std::path::Path;

pub use parser::ParseError;

/// Parses one documentation comment.
///
/// # Errors
///
/// Returns a [`ParseError`] when the body contains a construct no tree can be
/// built for: a block tag missing its argument, an unterminated inline tag
/// or HTML tag, a malformed reference, or a stray closing tag.
pub fn parse(comment: &DocComment, file: &Path) -> Result<CommentTree, ParseError> {
    parser::Parser::new(comment).run(file)
}

#[cfg(test)]
mod tests;
