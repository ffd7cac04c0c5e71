//! # jdoc-lint-rules
//!
//! Built-in checks for jdoc-lint.
//!
//! ## Available Checks
//!
//! | Code | Name | Capability | Description |
//! |------|------|------------|-------------|
//! | JD001 | `prefer-inline-tags` | tolerant | Prefers inline tags over equivalent HTML |
//! | JD002 | `non-empty-atclause-description` | tolerant | Requires descriptions on block tags |
//! | JD003 | `atclause-order` | tolerant | Requires block tags in the configured order |
//! | JD004 | `summary-sentence` | strict | Requires a summary sentence ending with a period |
//!
//! ## Usage
//!
//! ```ignore
//! use jdoc_lint_core::Analyzer;
//! use jdoc_lint_rules::{AtclauseOrder, PreferInlineTags};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .check(PreferInlineTags::new())
//!     .check(AtclauseOrder::new())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atclause_order;
pub mod non_empty_atclause;
pub mod prefer_inline_tags;
mod presets;
pub mod summary_sentence;

pub use atclause_order::{AtclauseOrder, OrderState};
pub use non_empty_atclause::NonEmptyAtclauseDescription;
pub use prefer_inline_tags::PreferInlineTags;
pub use presets::{
    all_checks, check_by_name, minimal_checks, recommended_checks, strict_checks, Preset,
};
pub use summary_sentence::SummarySentence;

/// Re-export core types for convenience.
pub use jdoc_lint_core::{CheckBox, JavadocCheck, Severity, Violation};
