//! Check command implementation.

use anyhow::{anyhow, Context, Result};
use jdoc_lint_core::{Analyzer, AnalyzerError, CheckBox, Config, Severity};
use jdoc_lint_rules::{check_by_name, Preset};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `jdoc-lint check`.
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated check names or codes.
    pub rules: Option<String>,
    /// Preset name, overriding the config file's `preset`.
    pub preset: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = load_config(source)?;
    let checks = select_checks(options, &config)?;
    let fail_on = config.fail_on.unwrap_or(Severity::Error);

    let mut builder = Analyzer::builder().root(path).config(config);
    for pattern in &options.exclude {
        builder = builder.exclude(pattern.clone());
    }
    for check in checks {
        builder = builder.check_box(check);
    }

    let analyzer = match builder.build() {
        Ok(analyzer) => analyzer,
        Err(AnalyzerError::Contract(error)) => {
            eprintln!("{:?}", miette::Report::new(error));
            std::process::exit(2);
        }
        Err(other) => return Err(other).context("Failed to build analyzer"),
    };

    tracing::info!(
        "Analyzing {} with {} check(s)",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format)?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// `--rules` wins over `--preset`, which wins over the config's `preset`.
fn select_checks(options: &CheckOptions, config: &Config) -> Result<Vec<CheckBox>> {
    if let Some(filter) = &options.rules {
        let mut checks = Vec::new();
        for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match check_by_name(name, config) {
                Some(check) => checks.push(check),
                None => tracing::warn!("Unknown rule: {}", name),
            }
        }
        return Ok(checks);
    }

    let preset = match options.preset.as_deref().or(config.preset.as_deref()) {
        Some(name) => name.parse::<Preset>().map_err(|e| anyhow!(e))?,
        None => Preset::Recommended,
    };
    Ok(preset.checks(config))
}
