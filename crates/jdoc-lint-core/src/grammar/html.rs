//! HTML element classification.

/// Elements that never have content or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "embed", "frame", "hr", "img", "input", "isindex",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose closing tag may be omitted.
const OPTIONAL_END: &[&str] = &[
    "body", "colgroup", "dd", "dt", "head", "html", "li", "option", "p", "tbody", "td", "tfoot",
    "th", "thead", "tr",
];

/// Block-level elements that implicitly end an open paragraph.
const ENDS_PARAGRAPH: &[&str] = &[
    "blockquote", "dl", "div", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "ol", "p", "pre",
    "table", "ul",
];

fn contains(list: &[&str], name: &str) -> bool {
    list.iter().any(|n| n.eq_ignore_ascii_case(name))
}

pub(crate) fn is_void(name: &str) -> bool {
    contains(VOID_ELEMENTS, name)
}

pub(crate) fn has_optional_end(name: &str) -> bool {
    contains(OPTIONAL_END, name)
}

/// Returns true if opening `next` implicitly closes an open `current`.
pub(crate) fn implicitly_closes(current: &str, next: &str) -> bool {
    has_optional_end(current)
        && (current.eq_ignore_ascii_case(next)
            || (current.eq_ignore_ascii_case("p") && contains(ENDS_PARAGRAPH, next)))
}
