//! # jdoc-lint-core
//!
//! Core framework for linting Javadoc-style documentation comments.
//!
//! This crate provides the comment tree model and the machinery that drives
//! pluggable checks over it:
//!
//! - [`scanner`] finds `/** ... */` blocks and `///` runs in source text
//! - [`grammar`] parses a comment body into a position-addressed [`CommentTree`]
//! - [`JavadocCheck`] declares the [`NodeKind`]s a rule understands
//! - [`CheckDescriptor`] validates those declarations at registration
//! - [`DispatchEngine`] walks each tree and calls every subscribed check
//! - [`Analyzer`] discovers files and runs the engine over them in parallel
//!
//! ## Example
//!
//! ```ignore
//! use jdoc_lint_core::{Analyzer, Severity};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .check(MyCheck)
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! if result.has_violations_at(Severity::Error) {
//!     eprintln!("{}", result.format_test_report(Severity::Error));
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod check;
mod config;
mod context;
mod descriptor;
mod dispatch;
mod kind;
mod session;
mod tree;
mod types;

pub mod gate;
pub mod grammar;
pub mod messages;
pub mod metadata;
pub mod scanner;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use check::{Capability, CheckBox, JavadocCheck, Registered};
pub use config::{AnalyzerConfig, Config, ConfigError, NameList, RuleConfig};
pub use context::SourceFile;
pub use descriptor::{CheckDescriptor, ContractError};
pub use dispatch::{DispatchEngine, DispatchEngineBuilder, FileReport};
pub use grammar::ParseError;
pub use kind::{KindSet, NodeKind, UnknownKind};
pub use metadata::{BlockTag, DocMetadata};
pub use scanner::{CommentStyle, DocComment};
pub use session::DispatchSession;
pub use tree::{
    CommentSpan, CommentTree, Node, NodeId, Preorder, StructuralIssue, Tightness, WalkEvent,
};
pub use types::{LintResult, Location, Severity, SeverityCounts, Suggestion, Violation};
