//! Arena-allocated documentation comment trees.
//!
//! Nodes live in a flat `Vec` owned by [`CommentTree`] and are addressed by
//! [`NodeId`]. A node's parent is stored as an index into the same arena, so
//! upward navigation is O(1) and the tree holds no reference cycles.
//! [`Node`] is a borrowed, read-only handle used for all navigation.

use crate::kind::NodeKind;
use crate::scanner::CommentStyle;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Index of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    text: String,
    line: usize,
    column: usize,
    parent: Option<NodeId>,
    index_in_parent: usize,
    children: Vec<NodeId>,
}

/// Whether a parse had well-formed markup nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tightness {
    /// Markup nesting is well-formed.
    Tight,
    /// At least one recoverable structural issue was found.
    NonTight,
}

/// A recoverable markup problem found while building a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StructuralIssue {
    /// An opening tag with no matching close before its scope ended.
    UnclosedTag {
        /// Tag name as written.
        name: String,
        /// Line of the opening tag.
        line: usize,
        /// Column of the opening tag.
        column: usize,
    },
    /// A void element spelled with a closing tag (`</br>`).
    MalformedVoidElement {
        /// Tag name as written.
        name: String,
        /// Line of the closing tag.
        line: usize,
        /// Column of the closing tag.
        column: usize,
    },
}

impl StructuralIssue {
    /// Message key reported to the violation stream.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::UnclosedTag { .. } => crate::messages::UNCLOSED_HTML,
            Self::MalformedVoidElement { .. } => crate::messages::WRONG_SINGLETON_TAG,
        }
    }

    /// Message arguments reported to the violation stream.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::UnclosedTag { name, .. } => vec![name.clone()],
            Self::MalformedVoidElement { name, column, .. } => {
                vec![column.to_string(), name.clone()]
            }
        }
    }

    /// Line the issue is reported at.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnclosedTag { line, .. } | Self::MalformedVoidElement { line, .. } => *line,
        }
    }

    /// Column the issue is reported at, if any.
    ///
    /// Unclosed tags are reported per line only.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::UnclosedTag { .. } => None,
            Self::MalformedVoidElement { column, .. } => Some(*column),
        }
    }
}

/// Where the comment a tree was built from sits in its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSpan {
    /// Comment style.
    pub style: CommentStyle,
    /// Line of the opening marker.
    pub line: usize,
    /// Column of the opening marker.
    pub column: usize,
    /// Last line covered by the comment.
    pub end_line: usize,
}

/// A parsed documentation comment.
#[derive(Debug, Clone)]
pub struct CommentTree {
    nodes: Vec<NodeData>,
    file: PathBuf,
    span: CommentSpan,
    diagnostics: Vec<StructuralIssue>,
}

impl CommentTree {
    /// Returns the `JAVADOC` root node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Returns a handle for `id`, or `None` if it does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Structural issues in detection order.
    #[must_use]
    pub fn diagnostics(&self) -> &[StructuralIssue] {
        &self.diagnostics
    }

    /// Returns true if the markup nesting is well-formed.
    #[must_use]
    pub fn is_tight(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Tight/non-tight classification.
    #[must_use]
    pub fn tightness(&self) -> Tightness {
        if self.is_tight() {
            Tightness::Tight
        } else {
            Tightness::NonTight
        }
    }

    /// File the comment was found in.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Location of the originating comment.
    #[must_use]
    pub fn span(&self) -> &CommentSpan {
        &self.span
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds only its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterates enter/leave events over the whole tree in document order.
    #[must_use]
    pub fn preorder(&self) -> Preorder<'_> {
        self.root().preorder()
    }

    /// Renders the tree as indented text, one node per line.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut depth = 0usize;
        for event in self.preorder() {
            match event {
                WalkEvent::Enter(node) => {
                    let _ = writeln!(
                        out,
                        "{}{} -> {:?} [{}:{}]",
                        "  ".repeat(depth),
                        node.kind(),
                        node.text(),
                        node.line(),
                        node.column()
                    );
                    depth += 1;
                }
                WalkEvent::Leave(_) => depth = depth.saturating_sub(1),
            }
        }
        out
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// Borrowed handle to a node.
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t CommentTree,
    id: NodeId,
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("line", &self.line())
            .field("column", &self.column())
            .finish()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl<'t> Node<'t> {
    /// Arena index of this node.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Tree this node belongs to.
    #[must_use]
    pub fn tree(self) -> &'t CommentTree {
        self.tree
    }

    /// Grammatical category.
    #[must_use]
    pub fn kind(self) -> NodeKind {
        self.tree.data(self.id).kind
    }

    /// Literal text covered by this node.
    #[must_use]
    pub fn text(self) -> &'t str {
        &self.tree.data(self.id).text
    }

    /// File line (1-indexed).
    #[must_use]
    pub fn line(self) -> usize {
        self.tree.data(self.id).line
    }

    /// File column (1-indexed).
    #[must_use]
    pub fn column(self) -> usize {
        self.tree.data(self.id).column
    }

    /// Zero-based position among siblings.
    #[must_use]
    pub fn index_in_parent(self) -> usize {
        self.tree.data(self.id).index_in_parent
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(self) -> Option<Node<'t>> {
        self.tree
            .data(self.id)
            .parent
            .map(|id| Node { tree: self.tree, id })
    }

    /// Children in parse order.
    pub fn children(self) -> impl DoubleEndedIterator<Item = Node<'t>> + ExactSizeIterator {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(self) -> usize {
        self.tree.data(self.id).children.len()
    }

    /// Child at `index`.
    #[must_use]
    pub fn child(self, index: usize) -> Option<Node<'t>> {
        self.tree
            .data(self.id)
            .children
            .get(index)
            .map(|&id| Node { tree: self.tree, id })
    }

    /// First child.
    #[must_use]
    pub fn first_child(self) -> Option<Node<'t>> {
        self.child(0)
    }

    /// Following sibling.
    #[must_use]
    pub fn next_sibling(self) -> Option<Node<'t>> {
        self.parent()?.child(self.index_in_parent() + 1)
    }

    /// Preceding sibling.
    #[must_use]
    pub fn previous_sibling(self) -> Option<Node<'t>> {
        let index = self.index_in_parent().checked_sub(1)?;
        self.parent()?.child(index)
    }

    /// First direct child of the given kind.
    #[must_use]
    pub fn find_first(self, kind: NodeKind) -> Option<Node<'t>> {
        self.children().find(|child| child.kind() == kind)
    }

    /// Siblings (this node included) whose index lies in `from..to`.
    pub fn siblings_between(self, from: usize, to: usize) -> impl Iterator<Item = Node<'t>> {
        let all: Vec<Node<'t>> = match self.parent() {
            Some(parent) => parent.children().collect(),
            None => vec![self],
        };
        all.into_iter()
            .filter(move |node| (from..to).contains(&node.index_in_parent()))
    }

    /// All descendants in pre-order, excluding this node.
    pub fn descendants(self) -> impl Iterator<Item = Node<'t>> {
        let own = self.id;
        self.preorder().filter_map(move |event| match event {
            WalkEvent::Enter(node) if node.id != own => Some(node),
            _ => None,
        })
    }

    /// Nearest ancestor of the given kind.
    #[must_use]
    pub fn ancestor(self, kind: NodeKind) -> Option<Node<'t>> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.kind() == kind {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    /// Enter/leave events over this subtree.
    #[must_use]
    pub fn preorder(self) -> Preorder<'t> {
        Preorder {
            tree: self.tree,
            start: self.id,
            next: Some(WalkEvent::Enter(self.id)),
        }
    }
}

/// Traversal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent<T> {
    /// Node visited before its children.
    Enter(T),
    /// Node completed after all its children.
    Leave(T),
}

/// Pre-order enter/leave iterator over a subtree.
pub struct Preorder<'t> {
    tree: &'t CommentTree,
    start: NodeId,
    next: Option<WalkEvent<NodeId>>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = WalkEvent<Node<'t>>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.next.take()?;
        self.next = match event {
            WalkEvent::Enter(id) => Some(match self.tree.data(id).children.first() {
                Some(&child) => WalkEvent::Enter(child),
                None => WalkEvent::Leave(id),
            }),
            WalkEvent::Leave(id) if id == self.start => None,
            WalkEvent::Leave(id) => {
                let data = self.tree.data(id);
                data.parent.map(|parent| {
                    let siblings = &self.tree.data(parent).children;
                    match siblings.get(data.index_in_parent + 1) {
                        Some(&next) => WalkEvent::Enter(next),
                        None => WalkEvent::Leave(parent),
                    }
                })
            }
        };
        let tree = self.tree;
        Some(match event {
            WalkEvent::Enter(id) => WalkEvent::Enter(Node { tree, id }),
            WalkEvent::Leave(id) => WalkEvent::Leave(Node { tree, id }),
        })
    }
}

/// Incremental tree construction used by the grammar front end.
///
/// Composite nodes are opened and closed like a stack; closing a node sets
/// its text to the concatenation of its children's text.
#[derive(Debug)]
pub(crate) struct TreeBuilder {
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    pub(crate) fn new(line: usize, column: usize) -> Self {
        let mut builder = Self {
            nodes: Vec::new(),
            open: Vec::new(),
        };
        builder.open(NodeKind::Javadoc, line, column);
        builder
    }

    fn attach(&mut self, kind: NodeKind, text: String, line: usize, column: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied();
        let index_in_parent = match parent {
            Some(p) => {
                let siblings = &mut self.nodes[p.0].children;
                siblings.push(id);
                siblings.len() - 1
            }
            None => 0,
        };
        self.nodes.push(NodeData {
            kind,
            text,
            line,
            column,
            parent,
            index_in_parent,
            children: Vec::new(),
        });
        id
    }

    /// Adds a leaf under the innermost open node.
    pub(crate) fn leaf(
        &mut self,
        kind: NodeKind,
        text: impl Into<String>,
        line: usize,
        column: usize,
    ) {
        self.attach(kind, text.into(), line, column);
    }

    /// Opens a composite node under the innermost open node.
    pub(crate) fn open(&mut self, kind: NodeKind, line: usize, column: usize) -> NodeId {
        let id = self.attach(kind, String::new(), line, column);
        self.open.push(id);
        id
    }

    /// Closes the innermost open node.
    pub(crate) fn close(&mut self) {
        if let Some(id) = self.open.pop() {
            let text: String = self.nodes[id.0]
                .children
                .iter()
                .map(|child| self.nodes[child.0].text.as_str())
                .collect();
            self.nodes[id.0].text = text;
        }
    }

    /// Kind of the innermost open node.
    pub(crate) fn current_kind(&self) -> Option<NodeKind> {
        self.open.last().map(|id| self.nodes[id.0].kind)
    }

    /// Number of open composite nodes, the root included.
    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    /// Closes open nodes until only `depth` remain.
    pub(crate) fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            self.close();
        }
    }

    pub(crate) fn finish(
        mut self,
        file: PathBuf,
        span: CommentSpan,
        diagnostics: Vec<StructuralIssue>,
    ) -> CommentTree {
        self.close_to(0);
        CommentTree {
            nodes: self.nodes,
            file,
            span,
            diagnostics,
        }
    }
}
