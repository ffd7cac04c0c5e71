//! Tree command implementation.

use anyhow::{Context, Result};
use jdoc_lint_core::metadata::{self, DocMetadata};
use jdoc_lint_core::{
    CommentSpan, CommentTree, DispatchEngine, Node, NodeKind, SourceFile, StructuralIssue,
    Tightness, Violation,
};
use serde::Serialize;
use std::path::Path;

use crate::TreeFormat;

#[derive(Serialize)]
struct TreeOutput<'a> {
    span: &'a CommentSpan,
    tightness: Tightness,
    diagnostics: &'a [StructuralIssue],
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<DocMetadata>,
    root: JsonNode,
}

#[derive(Serialize)]
struct JsonNode {
    kind: NodeKind,
    text: String,
    line: usize,
    column: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode>,
}

impl From<Node<'_>> for JsonNode {
    fn from(node: Node<'_>) -> Self {
        Self {
            kind: node.kind(),
            text: node.text().to_string(),
            line: node.line(),
            column: node.column(),
            children: node.children().map(Self::from).collect(),
        }
    }
}

/// Runs the tree command.
pub fn run(file: &Path, format: TreeFormat, with_metadata: bool) -> Result<()> {
    let source = SourceFile::read(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let engine = DispatchEngine::builder()
        .build()
        .context("Failed to build dispatch engine")?;
    let report = engine.process_file(&source);

    match format {
        TreeFormat::Text => {
            for tree in &report.trees {
                print_text(tree, with_metadata);
            }
            print_problems(&report.violations);
        }
        TreeFormat::Json => {
            let trees: Vec<TreeOutput<'_>> = report
                .trees
                .iter()
                .map(|tree| TreeOutput {
                    span: tree.span(),
                    tightness: tree.tightness(),
                    diagnostics: tree.diagnostics(),
                    metadata: with_metadata.then(|| metadata::extract(tree)),
                    root: JsonNode::from(tree.root()),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&trees)?);
        }
    }

    tracing::debug!(
        "{} comment(s), {} parse failure(s) in {}",
        report.comments_found,
        report.parse_failures,
        file.display()
    );
    Ok(())
}

fn print_text(tree: &CommentTree, with_metadata: bool) {
    let span = tree.span();
    let tightness = match tree.tightness() {
        Tightness::Tight => "tight",
        Tightness::NonTight => "non-tight",
    };
    println!(
        "== {:?} comment at {}:{} ({})",
        span.style, span.line, span.column, tightness
    );
    print!("{}", tree.dump());

    if with_metadata {
        let meta = metadata::extract(tree);
        println!("-- summary: {}", meta.summary);
        for tag in &meta.tags {
            match &tag.argument {
                Some(argument) => println!(
                    "-- @{} {} [{}:{}] {}",
                    tag.name, argument, tag.line, tag.column, tag.description
                ),
                None => println!(
                    "-- @{} [{}:{}] {}",
                    tag.name, tag.line, tag.column, tag.description
                ),
            }
        }
    }
    println!();
}

fn print_problems(violations: &[Violation]) {
    for violation in violations {
        println!("{}", violation.format());
    }
}
