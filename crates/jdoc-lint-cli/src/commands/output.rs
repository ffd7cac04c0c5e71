//! Shared output formatting for lint results.

use anyhow::Result;
use jdoc_lint_core::{LintResult, Severity, Violation};

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => {
            for violation in &result.violations {
                println!("{violation}");
            }
        }
    }
    Ok(())
}

fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => RED,
        Severity::Warning => YELLOW,
        Severity::Info => BLUE,
    }
}

fn render_violation(out: &mut String, violation: &Violation) {
    use std::fmt::Write;

    let _ = writeln!(
        out,
        "{} {} at {}",
        violation.code, violation.rule, violation.location
    );
    let _ = writeln!(
        out,
        "  {}{}{}: {}",
        severity_color(violation.severity),
        violation.severity,
        RESET,
        violation.message
    );
    if let Some(suggestion) = &violation.suggestion {
        let _ = writeln!(out, "  = help: {}", suggestion.message);
    }
    out.push('\n');
}

fn render_text(result: &LintResult) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    for violation in &result.violations {
        render_violation(&mut out, violation);
    }

    let counts = result.counts();
    let color = if counts.errors > 0 {
        RED
    } else if counts.warnings > 0 {
        YELLOW
    } else {
        GREEN
    };
    let _ = writeln!(
        out,
        "{color}Found {counts} in {} comment(s) across {} file(s){RESET}",
        result.comments_found, result.files_checked
    );
    if result.parse_failures > 0 {
        let _ = writeln!(
            out,
            "{} comment(s) could not be parsed",
            result.parse_failures
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdoc_lint_core::Location;

    fn result_with(violation: Violation) -> LintResult {
        LintResult {
            violations: vec![violation],
            files_checked: 1,
            comments_found: 2,
            parse_failures: 1,
        }
    }

    #[test]
    fn text_uses_line_only_location_when_column_unknown() {
        let violation = Violation::new(
            "JD000",
            "javadoc-parser",
            Severity::Error,
            Location::line("A.java", 3),
            "javadoc.parse.rule.error",
            vec!["x".into()],
        );
        let text = render_text(&result_with(violation));
        assert!(text.contains("JD000 javadoc-parser at A.java:3\n"));
        assert!(text.contains("Found 1 error(s), 0 warning(s), 0 info(s) in 2 comment(s)"));
        assert!(text.contains("1 comment(s) could not be parsed"));
    }
}
