//! Dispatch engine: drives registered checks over every comment of a file.

use crate::check::{BoundCheck, CheckBox, JavadocCheck, Registered};
use crate::config::Config;
use crate::context::SourceFile;
use crate::descriptor::ContractError;
use crate::gate;
use crate::grammar;
use crate::scanner;
use crate::tree::{CommentTree, WalkEvent};
use crate::types::{LintResult, Violation};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Everything the engine produced for one file.
#[derive(Debug)]
pub struct FileReport {
    /// File the report belongs to.
    pub path: PathBuf,
    /// Structural diagnostics, parse failures and check violations, ordered
    /// by line then column.
    pub violations: Vec<Violation>,
    /// Trees of every comment that parsed, in file order.
    pub trees: Vec<CommentTree>,
    /// Number of documentation comments in the file.
    pub comments_found: usize,
    /// Number of comments rejected by the grammar.
    pub parse_failures: usize,
}

impl From<FileReport> for LintResult {
    fn from(report: FileReport) -> Self {
        Self {
            violations: report.violations,
            files_checked: 1,
            comments_found: report.comments_found,
            parse_failures: report.parse_failures,
        }
    }
}

/// Builder for a [`DispatchEngine`].
#[derive(Default)]
pub struct DispatchEngineBuilder {
    checks: Vec<CheckBox>,
    config: Option<Config>,
}

impl DispatchEngineBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check.
    #[must_use]
    pub fn check<C: JavadocCheck + 'static>(self, check: C) -> Self {
        self.check_box(CheckBox::new(check))
    }

    /// Adds a boxed check.
    #[must_use]
    pub fn check_box(mut self, check: CheckBox) -> Self {
        self.checks.push(check);
        self
    }

    /// Adds several boxed checks, keeping their order.
    #[must_use]
    pub fn checks<I: IntoIterator<Item = CheckBox>>(mut self, checks: I) -> Self {
        self.checks.extend(checks);
        self
    }

    /// Sets the configuration consulted at registration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Registers every enabled check.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContractError`]; no engine is built in that case.
    pub fn build(self) -> Result<DispatchEngine, ContractError> {
        let config = self.config.unwrap_or_default();
        let mut registered = Vec::with_capacity(self.checks.len());

        for check in self.checks {
            if !config.is_rule_enabled(check.name()) {
                debug!("Skipping disabled check: {}", check.name());
                continue;
            }
            let rule_config = config.rule(check.name());
            registered.push(check.register(rule_config)?);
        }

        Ok(DispatchEngine { checks: registered })
    }
}

/// Runs registered checks over documentation comments.
///
/// The engine is immutable once built and can be shared between threads.
/// Every call to [`DispatchEngine::process_file`] binds a fresh session per
/// check, so nothing carries over from one file to the next.
#[derive(Debug)]
pub struct DispatchEngine {
    checks: Vec<Registered>,
}

impl DispatchEngine {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> DispatchEngineBuilder {
        DispatchEngineBuilder::new()
    }

    /// Registered checks in registration order.
    #[must_use]
    pub fn checks(&self) -> &[Registered] {
        &self.checks
    }

    /// Scans, parses and dispatches every documentation comment of `file`.
    #[must_use]
    pub fn process_file(&self, file: &SourceFile) -> FileReport {
        let comments = scanner::scan_doc_comments(&file.content);
        debug!(
            "Dispatching {} comment(s) in {}",
            comments.len(),
            file.path.display()
        );

        let mut sessions: Vec<Box<dyn BoundCheck + '_>> =
            self.checks.iter().map(|c| c.bind(&file.path)).collect();
        let mut violations = Vec::new();
        let mut trees = Vec::with_capacity(comments.len());
        let mut parse_failures = 0;

        for comment in &comments {
            match grammar::parse(comment, &file.path) {
                Ok(tree) => {
                    violations.extend(gate::structural_violations(&tree));
                    self.walk(&tree, &mut sessions);
                    for session in &mut sessions {
                        violations.extend(session.take_violations());
                    }
                    trees.push(tree);
                }
                Err(error) => {
                    warn!(
                        "{}:{}: skipping comment: {}",
                        file.path.display(),
                        error.line,
                        error
                    );
                    parse_failures += 1;
                    violations.push(gate::parse_failure(&file.path, &error));
                }
            }
        }

        violations.sort_by_key(|v| (v.location.line, v.location.column));

        FileReport {
            path: file.path.clone(),
            violations,
            trees,
            comments_found: comments.len(),
            parse_failures,
        }
    }

    /// Processes files one after another.
    #[must_use]
    pub fn process_batch(&self, files: &[SourceFile]) -> Vec<FileReport> {
        files.iter().map(|file| self.process_file(file)).collect()
    }

    fn walk(&self, tree: &CommentTree, sessions: &mut [Box<dyn BoundCheck + '_>]) {
        let active: Vec<usize> = self
            .checks
            .iter()
            .enumerate()
            .filter(|(_, check)| {
                let descriptor = check.descriptor();
                !descriptor.subscribed().is_empty()
                    && gate::permits(descriptor.capability(), tree)
            })
            .map(|(i, _)| i)
            .collect();
        if active.is_empty() {
            return;
        }

        let root = tree.root();
        for &i in &active {
            sessions[i].begin_tree(root);
        }

        for event in tree.preorder() {
            let (node, entering) = match event {
                WalkEvent::Enter(node) => (node, true),
                WalkEvent::Leave(node) => (node, false),
            };
            for &i in &active {
                if !self.checks[i].descriptor().subscribed().contains(node.kind()) {
                    continue;
                }
                if entering {
                    sessions[i].visit(node);
                } else {
                    sessions[i].leave(node);
                }
            }
        }

        for &i in &active {
            sessions[i].finish_tree(root);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::NodeKind;
    use crate::session::DispatchSession;
    use crate::tree::Node;

    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
    }

    struct Tracer;

    impl JavadocCheck for Tracer {
        type State = Trace;
        const DEFAULT_KINDS: &'static [NodeKind] = &[NodeKind::HtmlElement];

        fn name(&self) -> &'static str {
            "tracer"
        }
        fn code(&self) -> &'static str {
            "TEST100"
        }
        fn begin_tree(&self, session: &mut DispatchSession<'_, Trace>, _root: Node<'_>) {
            session.state().events.push("begin".into());
        }
        fn visit(&self, session: &mut DispatchSession<'_, Trace>, node: Node<'_>) {
            session.state().events.push(format!("enter {}", node.line()));
        }
        fn leave(&self, session: &mut DispatchSession<'_, Trace>, node: Node<'_>) {
            session.state().events.push(format!("leave {}", node.line()));
        }
        fn finish_tree(&self, session: &mut DispatchSession<'_, Trace>, root: Node<'_>) {
            let summary = session.state().events.join(",");
            session.log(root, "trace", &[summary.as_str()]);
            session.state().events.clear();
        }
    }

    #[test]
    fn walk_brackets_subscribed_nodes_with_begin_and_finish() {
        let engine = DispatchEngine::builder().check(Tracer).build().unwrap();
        let file = SourceFile::new("A.java", "/**\n * <b>x</b>\n */\nclass A {}\n");
        let report = engine.process_file(&file);

        assert_eq!(report.comments_found, 1);
        assert_eq!(report.trees.len(), 1);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].args, vec!["begin,enter 2,leave 2"]);
    }

    #[test]
    fn disabled_check_is_not_registered() {
        let config = Config::parse("[rules.tracer]\nenabled = false").unwrap();
        let engine = DispatchEngine::builder()
            .check(Tracer)
            .config(config)
            .build()
            .unwrap();
        assert!(engine.checks().is_empty());
    }

    #[test]
    fn file_without_doc_comments_yields_empty_report() {
        let engine = DispatchEngine::builder().check(Tracer).build().unwrap();
        let file = SourceFile::new("A.java", "/* plain */\n// line\nclass A {}\n");
        let report = engine.process_file(&file);
        assert_eq!(report.comments_found, 0);
        assert!(report.violations.is_empty());
        assert!(report.trees.is_empty());
    }
}
