//! Batch analyzer: discovers source files and runs the dispatch engine.

use crate::check::{CheckBox, JavadocCheck};
use crate::config::Config;
use crate::context::SourceFile;
use crate::descriptor::ContractError;
use crate::dispatch::{DispatchEngine, FileReport};
use crate::types::LintResult;

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A check failed contract validation.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// Directory traversal error.
    #[error("Failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    /// The worker pool could not be created.
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    checks: Vec<CheckBox>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a check.
    #[must_use]
    pub fn check<C: JavadocCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(CheckBox::new(check));
        self
    }

    /// Adds a boxed check.
    #[must_use]
    pub fn check_box(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds an include glob pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer, registering every enabled check.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be resolved, a glob
    /// pattern is invalid, or a check breaks its kind contract.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let mut include_patterns = self.include_patterns;
        include_patterns.extend(config.analyzer.include.iter().cloned());

        let compile = |patterns: &[String]| {
            patterns
                .iter()
                .map(|p| glob::Pattern::new(p))
                .collect::<Result<Vec<_>, _>>()
        };
        let exclude = compile(&exclude_patterns)?;
        let include = compile(&include_patterns)?;

        let engine = DispatchEngine::builder()
            .checks(self.checks)
            .config(config.clone())
            .build()?;

        Ok(Analyzer {
            root,
            engine,
            exclude,
            include,
            config,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
#[derive(Debug)]
pub struct Analyzer {
    root: PathBuf,
    engine: DispatchEngine,
    exclude: Vec<glob::Pattern>,
    include: Vec<glob::Pattern>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the dispatch engine.
    #[must_use]
    pub fn engine(&self) -> &DispatchEngine {
        &self.engine
    }

    /// Returns the number of registered checks.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.engine.checks().len()
    }

    /// Discovers and analyzes every matching file under the root.
    ///
    /// # Errors
    ///
    /// Returns an error if directory traversal fails or the worker pool
    /// cannot be started. Unreadable files are skipped with a warning.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let reports = self.run_parallel(|| {
            files
                .par_iter()
                .filter_map(|path| match self.analyze_file(path) {
                    Ok(report) => Some(report),
                    Err(e) => {
                        warn!("Skipping {}: {}", path.display(), e);
                        None
                    }
                })
                .collect::<Vec<_>>()
        })?;

        Ok(Self::collect(reports))
    }

    /// Analyzes in-memory sources.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool cannot be started.
    pub fn analyze_sources(&self, sources: &[SourceFile]) -> Result<LintResult, AnalyzerError> {
        let reports = self.run_parallel(|| {
            sources
                .par_iter()
                .map(|source| self.engine.process_file(source))
                .collect::<Vec<_>>()
        })?;
        Ok(Self::collect(reports))
    }

    /// Reads and analyzes one file, reporting its path relative to the root.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn analyze_file(&self, path: &Path) -> Result<FileReport, AnalyzerError> {
        debug!("Analyzing: {}", path.display());
        let source = SourceFile::read(path)?.relative_to(&self.root);
        Ok(self.engine.process_file(&source))
    }

    /// Lists files to analyze, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if directory traversal fails.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || !self.has_known_extension(path) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }
            if !self.include.is_empty() && !self.matches_any(&self.include, path) {
                continue;
            }
            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn has_known_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.config.analyzer.extensions.iter().any(|e| e == ext))
    }

    fn should_exclude(&self, path: &Path) -> bool {
        self.matches_any(&self.exclude, path)
    }

    fn matches_any(&self, patterns: &[glob::Pattern], path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        patterns
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(path))
    }

    fn run_parallel<T, F>(&self, job: F) -> Result<T, AnalyzerError>
    where
        T: Send,
        F: FnOnce() -> T + Send,
    {
        match self.config.analyzer.parallelism {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?;
                Ok(pool.install(job))
            }
            None => Ok(job()),
        }
    }

    fn collect(mut reports: Vec<FileReport>) -> LintResult {
        reports.sort_by(|a, b| a.path.cmp(&b.path));

        let mut result = LintResult::new();
        for report in reports {
            result.extend(report.into());
        }

        info!(
            "Analysis complete: {} violations in {} files ({} comments, {} parse failures)",
            result.violations.len(),
            result.files_checked,
            result.comments_found,
            result.parse_failures
        );
        result
    }
}
