//! Integration tests: dispatch engine behaviour over whole files.
//!
//! Each test drives the public API end to end: scan, parse, gate and
//! dispatch, observing checks through a shared event log.

use jdoc_lint_core::messages;
use jdoc_lint_core::scanner;
use jdoc_lint_core::{
    Analyzer, Capability, CheckBox, Config, ContractError, DispatchEngine, DispatchSession,
    JavadocCheck, Node, NodeKind, SourceFile,
};
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

// ── Recording check ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Begin(usize),
    Enter(NodeKind, usize),
    Leave(NodeKind, usize),
    Finish(usize),
}

trait Profile: 'static {
    const NAME: &'static str;
    const KINDS: &'static [NodeKind];
    const CAPABILITY: Capability;
}

struct Recorder<P> {
    events: Arc<Mutex<Vec<Event>>>,
    _profile: PhantomData<fn() -> P>,
}

impl<P> Recorder<P> {
    fn new() -> (Self, Arc<Mutex<Vec<Event>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let recorder = Self {
            events: Arc::clone(&events),
            _profile: PhantomData,
        };
        (recorder, events)
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl<P: Profile> JavadocCheck for Recorder<P> {
    type State = ();
    const DEFAULT_KINDS: &'static [NodeKind] = P::KINDS;
    const CAPABILITY: Capability = P::CAPABILITY;

    fn name(&self) -> &'static str {
        P::NAME
    }
    fn code(&self) -> &'static str {
        "TEST200"
    }
    fn begin_tree(&self, _session: &mut DispatchSession<'_, ()>, root: Node<'_>) {
        self.push(Event::Begin(root.line()));
    }
    fn visit(&self, _session: &mut DispatchSession<'_, ()>, node: Node<'_>) {
        self.push(Event::Enter(node.kind(), node.id().index()));
    }
    fn leave(&self, _session: &mut DispatchSession<'_, ()>, node: Node<'_>) {
        self.push(Event::Leave(node.kind(), node.id().index()));
    }
    fn finish_tree(&self, _session: &mut DispatchSession<'_, ()>, root: Node<'_>) {
        self.push(Event::Finish(root.line()));
    }
}

struct Everything;
impl Profile for Everything {
    const NAME: &'static str = "everything";
    const KINDS: &'static [NodeKind] = NodeKind::ALL;
    const CAPABILITY: Capability = Capability::Tolerant;
}

struct StrictRoots;
impl Profile for StrictRoots {
    const NAME: &'static str = "strict-roots";
    const KINDS: &'static [NodeKind] = &[NodeKind::Javadoc];
    const CAPABILITY: Capability = Capability::Strict;
}

struct TolerantRoots;
impl Profile for TolerantRoots {
    const NAME: &'static str = "tolerant-roots";
    const KINDS: &'static [NodeKind] = &[NodeKind::Javadoc];
    const CAPABILITY: Capability = Capability::Tolerant;
}

struct InlineTags;
impl Profile for InlineTags {
    const NAME: &'static str = "inline-tags";
    const KINDS: &'static [NodeKind] = &[NodeKind::JavadocInlineTag];
    const CAPABILITY: Capability = Capability::Tolerant;
}

struct ReturnTags;
impl Profile for ReturnTags {
    const NAME: &'static str = "return-tags";
    const KINDS: &'static [NodeKind] = &[NodeKind::ReturnLiteral];
    const CAPABILITY: Capability = Capability::Tolerant;
}

fn count(events: &[Event], pred: impl Fn(&Event) -> bool) -> usize {
    events.iter().filter(|e| pred(e)).count()
}

// ── Counting check with per-file state ──

struct TreeCounter;

impl JavadocCheck for TreeCounter {
    type State = usize;
    const DEFAULT_KINDS: &'static [NodeKind] = &[NodeKind::Javadoc];

    fn name(&self) -> &'static str {
        "tree-counter"
    }
    fn code(&self) -> &'static str {
        "TEST201"
    }
    fn visit(&self, session: &mut DispatchSession<'_, usize>, _node: Node<'_>) {
        *session.state() += 1;
    }
    fn finish_tree(&self, session: &mut DispatchSession<'_, usize>, root: Node<'_>) {
        let seen = session.state().to_string();
        session.log(root, "tree.count", &[seen.as_str()]);
    }
}

/// Counts trees like [`TreeCounter`] but panics on a comment mentioning "boom".
struct Fragile;

impl JavadocCheck for Fragile {
    type State = usize;
    const DEFAULT_KINDS: &'static [NodeKind] = &[NodeKind::Javadoc];

    fn name(&self) -> &'static str {
        "fragile"
    }
    fn code(&self) -> &'static str {
        "TEST202"
    }
    fn visit(&self, session: &mut DispatchSession<'_, usize>, node: Node<'_>) {
        *session.state() += 1;
        assert!(!node.text().contains("boom"), "boom");
    }
    fn finish_tree(&self, session: &mut DispatchSession<'_, usize>, root: Node<'_>) {
        let seen = session.state().to_string();
        session.log(root, "tree.count", &[seen.as_str()]);
    }
}

struct RequiresUndeclared;

impl JavadocCheck for RequiresUndeclared {
    type State = ();
    const DEFAULT_KINDS: &'static [NodeKind] = &[NodeKind::Text];
    const ACCEPTABLE_KINDS: &'static [NodeKind] =
        &[NodeKind::Text, NodeKind::ParamLiteral, NodeKind::ReturnLiteral];
    const REQUIRED_KINDS: &'static [NodeKind] =
        &[NodeKind::Text, NodeKind::ReturnLiteral, NodeKind::ParamLiteral];

    fn name(&self) -> &'static str {
        "requires-undeclared"
    }
    fn code(&self) -> &'static str {
        "TEST203"
    }
    fn visit(&self, _session: &mut DispatchSession<'_, ()>, _node: Node<'_>) {}
}

// ── Contract invariants ──

#[test]
fn required_outside_default_fails_registration() {
    let err = DispatchEngine::builder()
        .check(RequiresUndeclared)
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Javadoc token \"RETURN_LITERAL\" from required javadoc tokens was not found in default javadoc tokens list in check requires-undeclared"
    );
}

#[test]
fn configured_subscription_outside_acceptable_fails_registration() {
    let config = Config::parse(
        "[rules.inline-tags]\njavadoc_tokens = [\"JAVADOC_INLINE_TAG\", \"TEXT\", \"WS\"]",
    )
    .unwrap();
    let (check, _) = Recorder::<InlineTags>::new();
    let err = DispatchEngine::builder()
        .check(check)
        .config(config)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ContractError::NotAcceptable {
            kind: NodeKind::Text,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "Javadoc token \"TEXT\" was not found in Acceptable javadoc tokens list in check inline-tags"
    );
}

#[test]
fn undeclared_acceptable_and_required_equal_default() {
    let (check, _) = Recorder::<InlineTags>::new();
    let descriptor = CheckBox::new(check).descriptor();
    assert_eq!(descriptor.acceptable_kinds(), descriptor.default_kinds());
    assert_eq!(descriptor.required_kinds(), descriptor.default_kinds());
}

// ── Position parity ──

#[test]
fn block_and_line_run_styles_yield_identical_bodies() {
    let block = "class A {\n  /**\n   * Sums {@code a} and b.\n   * @return the sum\n   */\n  int f();\n}\n";
    let line_run = "class A {\n  /// Sums {@code a} and b.\n  /// @return the sum\n  int f();\n}\n";

    let engine = DispatchEngine::builder().build().unwrap();
    let a = engine.process_file(&SourceFile::new("Block.java", block));
    let b = engine.process_file(&SourceFile::new("Lines.java", line_run));

    assert_eq!(a.comments_found, 1);
    assert_eq!(a.comments_found, b.comments_found);
    assert_eq!(a.trees.len(), b.trees.len());

    let (ta, tb) = (&a.trees[0], &b.trees[0]);
    assert_eq!(ta.root().text(), " Sums {@code a} and b.\n @return the sum");
    assert_eq!(ta.root().text(), tb.root().text());

    let shape = |t: &jdoc_lint_core::CommentTree| {
        t.root().descendants().map(|n| n.kind()).collect::<Vec<_>>()
    };
    assert_eq!(shape(ta), shape(tb));

    let tag_a = ta.root().find_first(NodeKind::JavadocTag).unwrap();
    let tag_b = tb.root().find_first(NodeKind::JavadocTag).unwrap();
    assert_eq!((tag_a.line(), tag_a.column()), (4, 6));
    assert_eq!((tag_b.line(), tag_b.column()), (3, 7));
}

#[test]
fn non_documentation_comments_yield_no_blocks() {
    let src = "// line\n/* block */\n/**/\n/*** banner ***/\n//// not a doc\nString s = \"/** no */\";\nclass A {}\n";
    assert_eq!(scanner::count_doc_comments(src), 0);

    let engine = DispatchEngine::builder().build().unwrap();
    let report = engine.process_file(&SourceFile::new("A.java", src));
    assert_eq!(report.comments_found, 0);
    assert!(report.trees.is_empty());
}

// ── Enter/leave pairing ──

#[test]
fn every_enter_is_closed_after_its_descendants() {
    let src = "/**\n * Text with <b>bold {@code x}</b> and <ul><li>one<li>two</ul>.\n * <i>never closed\n *\n * @param a the {@link Foo#bar(int) bar}\n * @return <br> result\n */\nclass A {}\n";
    let (check, events) = Recorder::<Everything>::new();
    let engine = DispatchEngine::builder().check(check).build().unwrap();
    let report = engine.process_file(&SourceFile::new("A.java", src));
    assert_eq!(report.trees.len(), 1);
    assert!(!report.trees[0].is_tight());

    let events = events.lock().unwrap();
    let mut stack = Vec::new();
    for event in events.iter() {
        match *event {
            Event::Enter(kind, id) => stack.push((kind, id)),
            Event::Leave(kind, id) => assert_eq!(stack.pop(), Some((kind, id))),
            Event::Begin(_) | Event::Finish(_) => assert!(stack.is_empty()),
        }
    }
    assert!(stack.is_empty());

    let enters = count(&events, |e| matches!(e, Event::Enter(..)));
    let leaves = count(&events, |e| matches!(e, Event::Leave(..)));
    assert_eq!(enters, leaves);
    assert_eq!(enters, report.trees[0].len());
}

// ── Tolerance gating ──

const MIXED: &str = "/** First <b>bold</b>. */\nclass A {\n  /** Second <i>open. */\n  void f() {}\n  /** Third <p>para. */\n  void g() {}\n  /** Fourth <code>x. */\n  void h() {}\n}\n";

#[test]
fn strict_checks_skip_non_tight_blocks() {
    let (strict, strict_events) = Recorder::<StrictRoots>::new();
    let (tolerant, tolerant_events) = Recorder::<TolerantRoots>::new();
    let engine = DispatchEngine::builder()
        .check(strict)
        .check(tolerant)
        .build()
        .unwrap();
    let report = engine.process_file(&SourceFile::new("A.java", MIXED));

    assert_eq!(report.comments_found, 4);
    let non_tight: Vec<usize> = report
        .trees
        .iter()
        .filter(|t| !t.is_tight())
        .map(|t| t.span().line)
        .collect();
    assert_eq!(non_tight, vec![3, 5, 7]);

    let strict_events = strict_events.lock().unwrap();
    let begins: Vec<usize> = strict_events
        .iter()
        .filter_map(|e| match e {
            Event::Begin(line) => Some(*line),
            _ => None,
        })
        .collect();
    assert_eq!(begins, vec![1]);
    assert_eq!(count(&strict_events, |e| matches!(e, Event::Finish(_))), 1);
    assert_eq!(count(&strict_events, |e| matches!(e, Event::Enter(..))), 1);
    assert_eq!(count(&strict_events, |e| matches!(e, Event::Leave(..))), 1);

    let tolerant_events = tolerant_events.lock().unwrap();
    assert_eq!(count(&tolerant_events, |e| matches!(e, Event::Begin(_))), 4);

    let unclosed: Vec<(usize, String)> = report
        .violations
        .iter()
        .filter(|v| v.key == messages::UNCLOSED_HTML)
        .map(|v| (v.location.line, v.args[0].clone()))
        .collect();
    assert_eq!(
        unclosed,
        vec![
            (3, "i".to_string()),
            (5, "p".to_string()),
            (7, "code".to_string())
        ]
    );
}

#[test]
fn configuration_can_make_a_tolerant_check_strict() {
    let config =
        Config::parse("[rules.tolerant-roots]\nviolate_on_non_tight_html = true").unwrap();
    let (tolerant, events) = Recorder::<TolerantRoots>::new();
    let engine = DispatchEngine::builder()
        .check(tolerant)
        .config(config)
        .build()
        .unwrap();
    let report = engine.process_file(&SourceFile::new("A.java", MIXED));

    assert_eq!(
        count(&events.lock().unwrap(), |e| matches!(e, Event::Begin(_))),
        1
    );
    // Diagnostics do not depend on any check's capability.
    assert_eq!(
        report
            .violations
            .iter()
            .filter(|v| v.key == messages::UNCLOSED_HTML)
            .count(),
        3
    );
}

#[test]
fn optional_end_elements_left_open_are_reported() {
    let (strict, events) = Recorder::<StrictRoots>::new();
    let engine = DispatchEngine::builder().check(strict).build().unwrap();
    let src = "/**\n * <p>Paragraph never closed.\n */\nclass A {\n  /**\n   * <ul><li>one</ul>\n   */\n  void f() {}\n}\n";
    let report = engine.process_file(&SourceFile::new("A.java", src));

    assert_eq!(report.comments_found, 2);
    assert!(report.trees.iter().all(|t| !t.is_tight()));
    assert!(events.lock().unwrap().is_empty());

    let unclosed: Vec<(usize, &str)> = report
        .violations
        .iter()
        .filter(|v| v.key == messages::UNCLOSED_HTML)
        .map(|v| (v.location.line, v.message.as_str()))
        .collect();
    assert_eq!(
        unclosed,
        vec![
            (2, "Unclosed HTML tag found: p"),
            (6, "Unclosed HTML tag found: li")
        ]
    );
}

#[test]
fn hard_failures_dispatch_nothing() {
    let (check, events) = Recorder::<TolerantRoots>::new();
    let engine = DispatchEngine::builder().check(check).build().unwrap();
    let report = engine.process_file(&SourceFile::new(
        "A.java",
        "/** Broken {@link} here. */\nclass A {}\n",
    ));

    assert_eq!(report.parse_failures, 1);
    assert!(report.trees.is_empty());
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].key, messages::PARSE_RULE_ERROR);
}

// ── Cross-file reuse ──

#[test]
fn nothing_leaks_between_files() {
    let engine = DispatchEngine::builder().check(TreeCounter).build().unwrap();
    let files = [
        SourceFile::new("A.java", "/** Broken {@link} ref. */\nclass A {}\n"),
        SourceFile::new(
            "C.java",
            "/** One. */\nclass C {\n  /** Two. */\n  void f() {}\n}\n",
        ),
        SourceFile::new(
            "B.java",
            "/** Bad {@link} ref. */\nclass B {\n  /** Fine. */\n  void f() {}\n}\n",
        ),
    ];
    let reports = engine.process_batch(&files);

    let a = &reports[0];
    assert_eq!(a.violations.len(), 1);
    assert_eq!(a.violations[0].code, "JD000");
    assert_eq!(a.violations[0].location.file.to_str(), Some("A.java"));

    let c = &reports[1];
    let counts: Vec<&str> = c.violations.iter().map(|v| v.args[0].as_str()).collect();
    assert_eq!(counts, vec!["1", "2"]);

    let b = &reports[2];
    assert_eq!(b.violations.len(), 2);
    assert!(b
        .violations
        .iter()
        .all(|v| v.location.file.to_str() == Some("B.java")));
    assert_eq!(
        (b.violations[0].code.as_str(), b.violations[0].location.line),
        ("JD000", 1)
    );
    assert_eq!(
        (b.violations[1].code.as_str(), b.violations[1].location.line),
        ("TEST201", 3)
    );
    assert_eq!(b.violations[1].args, vec!["1"]);
}

#[test]
fn panicking_check_leaves_no_state_behind() {
    let engine = DispatchEngine::builder().check(Fragile).build().unwrap();
    let bad = SourceFile::new(
        "Bad.java",
        "/** Ok. */\nclass A {\n  /** boom */\n  void f() {}\n}\n",
    );
    let good = SourceFile::new("Good.java", "/** Fine. */\nclass B {}\n");

    let outcome = catch_unwind(AssertUnwindSafe(|| engine.process_file(&bad)));
    assert!(outcome.is_err());

    let report = engine.process_file(&good);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].args, vec!["1"]);
}

// ── Subscription example ──

#[test]
fn checks_receive_only_subscribed_kinds() {
    let src = "/**\n * Uses {@code a} and {@link B}.\n * @return value\n */\nclass A {}\n";
    let (inline, inline_events) = Recorder::<InlineTags>::new();
    let (returns, return_events) = Recorder::<ReturnTags>::new();
    let engine = DispatchEngine::builder()
        .check(inline)
        .check(returns)
        .build()
        .unwrap();
    let _report = engine.process_file(&SourceFile::new("A.java", src));

    let inline_events = inline_events.lock().unwrap();
    assert_eq!(count(&inline_events, |e| matches!(e, Event::Enter(..))), 2);
    assert_eq!(count(&inline_events, |e| matches!(e, Event::Leave(..))), 2);
    assert!(inline_events.iter().all(|e| match e {
        Event::Enter(kind, _) | Event::Leave(kind, _) => *kind == NodeKind::JavadocInlineTag,
        _ => true,
    }));

    let return_events = return_events.lock().unwrap();
    assert_eq!(
        *return_events,
        vec![
            Event::Begin(2),
            Event::Enter(NodeKind::ReturnLiteral, return_id(src)),
            Event::Leave(NodeKind::ReturnLiteral, return_id(src)),
            Event::Finish(2),
        ]
    );
}

fn return_id(src: &str) -> usize {
    let engine = DispatchEngine::builder().build().unwrap();
    let report = engine.process_file(&SourceFile::new("A.java", src));
    let id = report.trees[0]
        .root()
        .descendants()
        .find(|n| n.kind() == NodeKind::ReturnLiteral)
        .map(|n| n.id().index())
        .unwrap();
    id
}

// ── Parallel analysis ──

#[test]
fn parallel_and_sequential_runs_agree() {
    let sources: Vec<SourceFile> = (0..24)
        .map(|i| {
            let body = match i % 3 {
                0 => "/** Fine. */\nclass X {}\n".to_string(),
                1 => format!("/** Open <b>tag {i}. */\nclass X {{}}\n"),
                _ => "/** Broken {@link} ref. */\nclass X {}\n".to_string(),
            };
            SourceFile::new(format!("F{i:02}.java"), body)
        })
        .collect();

    let run = |parallelism: usize| {
        let config = Config::parse(&format!("[analyzer]\nparallelism = {parallelism}")).unwrap();
        let analyzer = Analyzer::builder()
            .root(".")
            .check(TreeCounter)
            .config(config)
            .build()
            .unwrap();
        analyzer.analyze_sources(&sources).unwrap()
    };

    let sequential = run(1);
    let parallel = run(4);
    assert_eq!(sequential.files_checked, 24);
    assert_eq!(sequential.parse_failures, 8);
    let render = |r: &jdoc_lint_core::LintResult| {
        r.violations.iter().map(ToString::to_string).collect::<Vec<_>>()
    };
    assert_eq!(render(&sequential), render(&parallel));
}
