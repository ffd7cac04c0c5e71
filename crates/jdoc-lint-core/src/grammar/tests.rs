use super::*;
use crate::kind::NodeKind;
use crate::tree::{Node, StructuralIssue, WalkEvent};

fn block(raw: &str) -> Result<CommentTree, ParseError> {
    parse(&DocComment::block(raw, 1, 1), Path::new("Test.java"))
}

fn shape(tree: &CommentTree) -> Vec<(NodeKind, String)> {
    tree.preorder()
        .filter_map(|e| match e {
            WalkEvent::Enter(n) => Some((n.kind(), n.text().to_string())),
            WalkEvent::Leave(_) => None,
        })
        .collect()
}

fn kinds(node: Node<'_>) -> Vec<NodeKind> {
    node.children().map(Node::kind).collect()
}

fn count(tree: &CommentTree, kind: NodeKind) -> usize {
    tree.root().descendants().filter(|n| n.kind() == kind).count()
}

#[test]
fn single_line_comment_with_inline_tag() {
    let tree = parse(
        &DocComment::block("/** Returns {@code x}. */", 3, 5),
        Path::new("A.java"),
    )
    .unwrap();
    let root = tree.root();
    assert_eq!(root.kind(), NodeKind::Javadoc);
    assert_eq!(root.text(), " Returns {@code x}.");
    assert_eq!(
        kinds(root),
        vec![
            NodeKind::Ws,
            NodeKind::Text,
            NodeKind::JavadocInlineTag,
            NodeKind::Text
        ]
    );

    let inline = root.child(2).unwrap();
    assert_eq!((inline.line(), inline.column()), (3, 17));
    assert_eq!(
        kinds(inline),
        vec![
            NodeKind::JavadocInlineTagStart,
            NodeKind::CodeLiteral,
            NodeKind::Ws,
            NodeKind::Text,
            NodeKind::JavadocInlineTagEnd
        ]
    );
    let code = inline.find_first(NodeKind::CodeLiteral).unwrap();
    assert_eq!((code.text(), code.column()), ("@code", 18));
    assert!(tree.is_tight());
}

#[test]
fn block_tags_split_sections() {
    let tree = block("/**\n * Sum.\n *\n * @param a first\n * @return total\n */").unwrap();
    let root = tree.root();
    assert_eq!((root.line(), root.column()), (2, 3));
    assert_eq!(
        kinds(root),
        vec![
            NodeKind::Ws,
            NodeKind::Text,
            NodeKind::Newline,
            NodeKind::Newline,
            NodeKind::Ws,
            NodeKind::JavadocTag,
            NodeKind::Ws,
            NodeKind::JavadocTag,
        ]
    );

    let param = root.child(5).unwrap();
    assert_eq!((param.line(), param.column()), (4, 4));
    assert_eq!(
        kinds(param),
        vec![
            NodeKind::ParamLiteral,
            NodeKind::Ws,
            NodeKind::ParameterName,
            NodeKind::Ws,
            NodeKind::Description
        ]
    );
    let name = param.find_first(NodeKind::ParameterName).unwrap();
    assert_eq!((name.text(), name.line(), name.column()), ("a", 4, 11));
    let description = param.find_first(NodeKind::Description).unwrap();
    assert_eq!(description.text(), "first\n");

    let ret = root.child(7).unwrap();
    assert_eq!(ret.first_child().map(Node::kind), Some(NodeKind::ReturnLiteral));
    assert_eq!(
        ret.find_first(NodeKind::Description).map(Node::text),
        Some("total")
    );
}

#[test]
fn root_text_is_normalized_body() {
    let comment = DocComment::block(
        "/**\n * Line one\n *   indented {@link Foo#bar(int, long) bar}\n */",
        1,
        1,
    );
    let tree = parse(&comment, Path::new("A.java")).unwrap();
    assert_eq!(tree.root().text(), comment.normalized_text());
    let reference = tree
        .root()
        .descendants()
        .find(|n| n.kind() == NodeKind::Reference)
        .unwrap();
    assert_eq!(reference.text(), "Foo#bar(int, long)");
    assert_eq!(count(&tree, NodeKind::Description), 1);
}

#[test]
fn block_and_line_run_styles_share_tree_shape() {
    let block = DocComment::block("/**\n * Sum {@code a}.\n *\n * @param a first\n */", 10, 5);
    let run = DocComment::line_run("/// Sum {@code a}.\n///\n/// @param a first", 20, 1);
    let block_tree = parse(&block, Path::new("A.java")).unwrap();
    let run_tree = parse(&run, Path::new("B.java")).unwrap();
    assert_eq!(shape(&block_tree), shape(&run_tree));
    assert_eq!(block_tree.root().line(), 11);
    assert_eq!(run_tree.root().line(), 20);
}

#[test]
fn unknown_tags_map_to_custom_name() {
    let tree = block("/** Text {@index term} more.\n * @apiNote careful\n */").unwrap();
    assert_eq!(count(&tree, NodeKind::CustomName), 2);
    assert_eq!(count(&tree, NodeKind::JavadocTag), 1);
}

#[test]
fn html_elements_and_attributes() {
    let tree = block(
        "/** See <a href=\"#top\" class=x>top</a> and <br/> or <img src='i.png'>. */",
    )
    .unwrap();
    assert!(tree.is_tight());
    let anchor = tree.root().find_first(NodeKind::HtmlElement).unwrap();
    assert_eq!(
        kinds(anchor),
        vec![
            NodeKind::HtmlElementStart,
            NodeKind::Text,
            NodeKind::HtmlElementEnd
        ]
    );
    let start = anchor.first_child().unwrap();
    let attrs: Vec<_> = start
        .children()
        .filter(|n| n.kind() == NodeKind::Attribute)
        .collect();
    assert_eq!(attrs.len(), 2);
    assert_eq!(
        attrs[0].find_first(NodeKind::AttrValue).map(Node::text),
        Some("\"#top\"")
    );
    assert_eq!(attrs[1].find_first(NodeKind::AttrValue).map(Node::text), Some("x"));
    let names: Vec<&str> = attrs
        .iter()
        .filter_map(|a| a.find_first(NodeKind::AttrName))
        .map(Node::text)
        .collect();
    assert_eq!(names, vec!["href", "class"]);
    assert!(attrs.iter().all(|a| a.find_first(NodeKind::HtmlTagName).is_none()));
    // Element names only: a, /a, br, img.
    assert_eq!(count(&tree, NodeKind::HtmlTagName), 4);
    assert_eq!(count(&tree, NodeKind::AttrName), 3);
    assert_eq!(count(&tree, NodeKind::VoidElement), 2);
    assert_eq!(count(&tree, NodeKind::SlashClose), 1);
}

#[test]
fn unclosed_tag_makes_tree_non_tight() {
    let tree = block("/**\n * Some <b>bold\n * text.\n */").unwrap();
    assert!(!tree.is_tight());
    assert_eq!(
        tree.diagnostics(),
        &[StructuralIssue::UnclosedTag {
            name: "b".into(),
            line: 2,
            column: 9,
        }]
    );
    // the element still spans the rest of its section
    let element = tree.root().find_first(NodeKind::HtmlElement).unwrap();
    assert_eq!(element.text(), "<b>bold\n text.");
}

#[test]
fn inner_unclosed_tag_closed_by_outer_end() {
    let tree = block("/** <b><i>x</b> y */").unwrap();
    assert_eq!(tree.diagnostics().len(), 1);
    assert!(matches!(
        &tree.diagnostics()[0],
        StructuralIssue::UnclosedTag { name, .. } if name == "i"
    ));
    let bold = tree.root().find_first(NodeKind::HtmlElement).unwrap();
    assert_eq!(bold.text(), "<b><i>x</b>");
}

#[test]
fn unclosed_tag_ends_at_block_tag() {
    let tree = block("/**\n * <em>text\n * @return value\n */").unwrap();
    assert_eq!(tree.diagnostics().len(), 1);
    assert_eq!(tree.root().find_first(NodeKind::JavadocTag).map(Node::line), Some(3));
}

#[test]
fn optional_end_tags_are_reported_unclosed() {
    let tree = block("/** <p>One<p>Two <ul><li>a<li>b</ul> */").unwrap();
    assert!(!tree.is_tight());
    let unclosed: Vec<(&str, usize)> = tree
        .diagnostics()
        .iter()
        .filter_map(|issue| match issue {
            StructuralIssue::UnclosedTag { name, column, .. } => Some((name.as_str(), *column)),
            _ => None,
        })
        .collect();
    // Reported as each element is implicitly closed: <p> by <p>, <p> by
    // <ul>, <li> by <li>, and the last <li> by </ul>.
    assert_eq!(unclosed, vec![("p", 5), ("p", 11), ("li", 22), ("li", 27)]);
    assert_eq!(count(&tree, NodeKind::HtmlElementEnd), 1);
    assert_eq!(
        tree.root()
            .descendants()
            .filter(|n| n.kind() == NodeKind::HtmlElement)
            .count(),
        5
    );
}

#[test]
fn explicitly_closed_optional_end_tags_stay_tight() {
    let tree = block("/** <p>One</p> <ul><li>a</li></ul> */").unwrap();
    assert!(tree.is_tight());
}

#[test]
fn unclosed_table_row_is_reported() {
    let tree = block("/** <table><tr><td>x</td></table> */").unwrap();
    assert_eq!(
        tree.diagnostics(),
        &[StructuralIssue::UnclosedTag {
            name: "tr".into(),
            line: 1,
            column: 12,
        }]
    );
}

#[test]
fn closed_void_element_is_reported() {
    let tree = block("/** a<br></br> */").unwrap();
    assert!(!tree.is_tight());
    assert_eq!(
        tree.diagnostics(),
        &[StructuralIssue::MalformedVoidElement {
            name: "br".into(),
            line: 1,
            column: 10,
        }]
    );
    assert_eq!(tree.diagnostics()[0].args(), vec!["10".to_string(), "br".to_string()]);
}

#[test]
fn missing_param_name_is_hard_error() {
    let err = block("/** @param */").unwrap_err();
    assert_eq!(err.rule, NodeKind::JavadocTag);
    assert_eq!(err.found, "<EOF>");
    assert_eq!(err.expected, vec!["PARAMETER_NAME".to_string()]);
    assert_eq!(err.message, "mismatched input '<EOF>' expecting PARAMETER_NAME");
}

#[test]
fn missing_throws_class_is_hard_error() {
    let err = block("/**\n * @throws\n * @return x\n */").unwrap_err();
    assert_eq!(err.rule, NodeKind::JavadocTag);
    assert_eq!(err.line, 2);
    assert_eq!(err.found, "<NEWLINE>");
}

#[test]
fn unterminated_inline_tag_is_hard_error() {
    let err = block("/** {@code x */").unwrap_err();
    assert_eq!(err.rule, NodeKind::JavadocInlineTag);
}

#[test]
fn link_requires_reference() {
    let err = block("/** See {@link}. */").unwrap_err();
    assert_eq!(err.rule, NodeKind::Reference);
    assert_eq!(err.found, "}");
    assert_eq!((err.line, err.column), (1, 15));
}

#[test]
fn unbalanced_reference_parenthesis() {
    let err = block("/** {@link Foo#bar(int} */").unwrap_err();
    assert_eq!(err.rule, NodeKind::Reference);
}

#[test]
fn unterminated_start_tag_is_hard_error() {
    let err = block("/** a <b */").unwrap_err();
    assert_eq!(err.rule, NodeKind::HtmlElementStart);
    assert_eq!(err.expected.len(), 3);
}

#[test]
fn stray_close_tag_is_hard_error() {
    let err = block("/** a </b> */").unwrap_err();
    assert_eq!(err.rule, NodeKind::HtmlElement);
    assert_eq!(err.column, 7);
    assert!(err.message.contains("</b>"));
    assert!(err.to_string().ends_with("while parsing HTML_ELEMENT"));
}

#[test]
fn span_records_comment_origin() {
    let tree = parse(
        &DocComment::block("/**\n * a\n */", 4, 3),
        Path::new("src/A.java"),
    )
    .unwrap();
    assert_eq!(tree.span().line, 4);
    assert_eq!(tree.span().end_line, 6);
    assert_eq!(tree.file(), Path::new("src/A.java"));
}
