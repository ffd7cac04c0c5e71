//! Message keys and their default English templates.
//!
//! Violations carry a key plus positional arguments; the rendered message is
//! derived from the template registered here. Templates use `{0}`, `{1}`, ...
//! placeholders.

/// An opening HTML tag with no matching close.
pub const UNCLOSED_HTML: &str = "javadoc.unclosedHtml";

/// A void element written with a closing tag.
pub const WRONG_SINGLETON_TAG: &str = "javadoc.wrong.singleton.html.tag";

/// A comment that could not be parsed at all.
pub const PARSE_RULE_ERROR: &str = "javadoc.parse.rule.error";

const TEMPLATES: &[(&str, &str)] = &[
    (UNCLOSED_HTML, "Unclosed HTML tag found: {0}"),
    (
        WRONG_SINGLETON_TAG,
        "Javadoc comment at column {0} has parse error. \
         It is forbidden to close singleton HTML tags. Tag: {1}.",
    ),
    (
        PARSE_RULE_ERROR,
        "Javadoc comment at column {0} has parse error. Details: {1} while parsing {2}",
    ),
    (
        "prefer.javadoc.inline.tag",
        "Prefer Javadoc inline tag '{0}' over '{1}'.",
    ),
    (
        "non.empty.atclause",
        "At-clause should have a non-empty description.",
    ),
    (
        "at.clause.order",
        "Block tags have to appear in the order '{0}'.",
    ),
    (
        "summary.first.sentence",
        "First sentence of Javadoc is missing an ending period.",
    ),
    ("summary.javaDoc.missing", "Summary javadoc is missing."),
];

/// Returns the template for `key`, if one is registered.
#[must_use]
pub fn template(key: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find_map(|(k, template)| (*k == key).then_some(*template))
}

/// Renders `key` with `args`.
///
/// Unknown keys render as the key followed by its arguments, so a missing
/// template never hides a violation.
#[must_use]
pub fn render(key: &str, args: &[String]) -> String {
    match template(key) {
        Some(template) => args
            .iter()
            .enumerate()
            .fold(template.to_string(), |acc, (i, arg)| {
                acc.replace(&format!("{{{i}}}"), arg)
            }),
        None if args.is_empty() => key.to_string(),
        None => format!("{key} ({})", args.join(", ")),
    }
}
