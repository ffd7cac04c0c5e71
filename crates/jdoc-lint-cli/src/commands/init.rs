//! Init command implementation.

use anyhow::{bail, Context, Result};
use jdoc_lint_rules::all_checks;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

const HEADER: &str = r#"# jdoc-lint configuration

# Checks to run when --rules is not given: "recommended", "strict" or "minimal"
preset = "recommended"

# Lowest severity that makes `jdoc-lint check` exit with status 1
fail_on = "error"

[analyzer]
# Glob patterns to exclude from analysis
exclude = [
    "**/target/**",
    "**/build/**",
    "**/generated/**",
]

# File extensions to scan
extensions = ["java"]

# Respect .gitignore files
respect_gitignore = true

# Per-check settings. Besides `enabled` and `severity`, every check accepts
#   javadoc_tokens = ["HTML_ELEMENT", ...]   (see `jdoc-lint list-rules --kinds`)
#   violate_on_non_tight_html = true         (skip comments with broken markup)
"#;

#[derive(Serialize)]
struct RulesSection {
    rules: BTreeMap<&'static str, RuleEntry>,
}

#[derive(Serialize)]
struct RuleEntry {
    enabled: bool,
    severity: String,
}

/// Renders the default configuration, with one table per built-in check.
fn default_config() -> Result<String> {
    let rules = all_checks()
        .into_iter()
        .map(|check| {
            let entry = RuleEntry {
                enabled: true,
                severity: check.default_severity().to_string(),
            };
            (check.name(), entry)
        })
        .collect();
    let tables = toml::to_string(&RulesSection { rules })
        .context("Failed to render default rule tables")?;
    Ok(format!("{HEADER}\n{tables}"))
}

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new("jdoc-lint.toml"), force)?;

    println!("Created jdoc-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit jdoc-lint.toml to configure checks");
    println!("  2. Run: jdoc-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }
    std::fs::write(config_path, default_config()?)?;
    Ok(())
}
