//! Node kinds of the documentation comment grammar.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! node_kinds {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)+) => {
        /// Grammatical category of a comment tree node.
        ///
        /// The set is closed: checks declare the kinds they understand using
        /// these variants, and configuration refers to them by [`NodeKind::name`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum NodeKind {
            $($(#[$doc])* $variant,)+
        }

        impl NodeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant,)+];

            /// Returns the configuration name of this kind (e.g. `"PARAM_LITERAL"`).
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => $name,)+
                }
            }
        }

        impl FromStr for NodeKind {
            type Err = UnknownKind;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(NodeKind::$variant),)+
                    other => Err(UnknownKind(other.to_string())),
                }
            }
        }
    };
}

node_kinds! {
    /// Root of a documentation comment.
    Javadoc => "JAVADOC",
    /// Plain text run.
    Text => "TEXT",
    /// Whitespace at the start of a body line.
    Ws => "WS",
    /// Line break inside the comment body.
    Newline => "NEWLINE",

    /// Block tag section (`@param x desc`).
    JavadocTag => "JAVADOC_TAG",
    /// Free text following a tag's arguments.
    Description => "DESCRIPTION",
    /// Parameter name of `@param`.
    ParameterName => "PARAMETER_NAME",
    /// Program element reference (`pkg.Class#member(args)`).
    Reference => "REFERENCE",
    /// `@param`
    ParamLiteral => "PARAM_LITERAL",
    /// `@return`
    ReturnLiteral => "RETURN_LITERAL",
    /// `@throws`
    ThrowsLiteral => "THROWS_LITERAL",
    /// `@exception`
    ExceptionLiteral => "EXCEPTION_LITERAL",
    /// `@see`
    SeeLiteral => "SEE_LITERAL",
    /// `@since`
    SinceLiteral => "SINCE_LITERAL",
    /// `@deprecated`
    DeprecatedLiteral => "DEPRECATED_LITERAL",
    /// `@author`
    AuthorLiteral => "AUTHOR_LITERAL",
    /// `@version`
    VersionLiteral => "VERSION_LITERAL",
    /// `@serial`
    SerialLiteral => "SERIAL_LITERAL",
    /// `@serialData`
    SerialDataLiteral => "SERIAL_DATA_LITERAL",
    /// `@serialField`
    SerialFieldLiteral => "SERIAL_FIELD_LITERAL",
    /// Any tag name the grammar does not know.
    CustomName => "CUSTOM_NAME",

    /// Inline tag (`{@code x}`).
    JavadocInlineTag => "JAVADOC_INLINE_TAG",
    /// `{`
    JavadocInlineTagStart => "JAVADOC_INLINE_TAG_START",
    /// `}`
    JavadocInlineTagEnd => "JAVADOC_INLINE_TAG_END",
    /// `@code`
    CodeLiteral => "CODE_LITERAL",
    /// `@literal`
    LiteralLiteral => "LITERAL_LITERAL",
    /// `@link`
    LinkLiteral => "LINK_LITERAL",
    /// `@linkplain`
    LinkplainLiteral => "LINKPLAIN_LITERAL",
    /// `@value`
    ValueLiteral => "VALUE_LITERAL",
    /// `@inheritDoc`
    InheritDocLiteral => "INHERIT_DOC_LITERAL",
    /// `@docRoot`
    DocRootLiteral => "DOC_ROOT_LITERAL",

    /// Paired HTML element with its content.
    HtmlElement => "HTML_ELEMENT",
    /// Opening tag of a paired element (`<p>`).
    HtmlElementStart => "HTML_ELEMENT_START",
    /// Closing tag (`</p>`).
    HtmlElementEnd => "HTML_ELEMENT_END",
    /// Void element (`<br>`, `<img/>`).
    VoidElement => "VOID_ELEMENT",
    /// Element name inside an HTML tag.
    HtmlTagName => "HTML_TAG_NAME",
    /// HTML attribute.
    Attribute => "ATTRIBUTE",
    /// Attribute name.
    AttrName => "ATTR_NAME",
    /// `=`
    Equals => "EQUALS",
    /// Attribute value, quotes included.
    AttrValue => "ATTR_VALUE",
    /// `<`
    Open => "OPEN",
    /// `>`
    Close => "CLOSE",
    /// `/`
    Slash => "SLASH",
    /// `/>`
    SlashClose => "SLASH_CLOSE",
}

impl NodeKind {
    /// Returns true for the `@xxx` literal of a block tag.
    #[must_use]
    pub fn is_block_tag_literal(self) -> bool {
        matches!(
            self,
            Self::ParamLiteral
                | Self::ReturnLiteral
                | Self::ThrowsLiteral
                | Self::ExceptionLiteral
                | Self::SeeLiteral
                | Self::SinceLiteral
                | Self::DeprecatedLiteral
                | Self::AuthorLiteral
                | Self::VersionLiteral
                | Self::SerialLiteral
                | Self::SerialDataLiteral
                | Self::SerialFieldLiteral
        )
    }

    /// Returns true for the `@xxx` literal of an inline tag.
    #[must_use]
    pub fn is_inline_tag_literal(self) -> bool {
        matches!(
            self,
            Self::CodeLiteral
                | Self::LiteralLiteral
                | Self::LinkLiteral
                | Self::LinkplainLiteral
                | Self::ValueLiteral
                | Self::InheritDocLiteral
                | Self::DocRootLiteral
        )
    }

    /// Maps a block tag name (without `@`) to its literal kind.
    #[must_use]
    pub fn block_tag(name: &str) -> Self {
        match name {
            "param" => Self::ParamLiteral,
            "return" => Self::ReturnLiteral,
            "throws" => Self::ThrowsLiteral,
            "exception" => Self::ExceptionLiteral,
            "see" => Self::SeeLiteral,
            "since" => Self::SinceLiteral,
            "deprecated" => Self::DeprecatedLiteral,
            "author" => Self::AuthorLiteral,
            "version" => Self::VersionLiteral,
            "serial" => Self::SerialLiteral,
            "serialData" => Self::SerialDataLiteral,
            "serialField" => Self::SerialFieldLiteral,
            _ => Self::CustomName,
        }
    }

    /// Maps an inline tag name (without `@`) to its literal kind.
    #[must_use]
    pub fn inline_tag(name: &str) -> Self {
        match name {
            "code" => Self::CodeLiteral,
            "literal" => Self::LiteralLiteral,
            "link" => Self::LinkLiteral,
            "linkplain" => Self::LinkplainLiteral,
            "value" => Self::ValueLiteral,
            "inheritDoc" => Self::InheritDocLiteral,
            "docRoot" => Self::DocRootLiteral,
            _ => Self::CustomName,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for NodeKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A kind name that does not exist in the grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown javadoc token name `{0}`")]
pub struct UnknownKind(pub String);

/// Insertion-ordered set of node kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindSet(IndexSet<NodeKind>);

impl KindSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the set contains `kind`.
    #[must_use]
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.0.contains(&kind)
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of kinds in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Adds a kind, keeping the first insertion position.
    pub fn insert(&mut self, kind: NodeKind) -> bool {
        self.0.insert(kind)
    }

    /// Iterates kinds in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.0.iter().copied()
    }

    /// Returns the first kind of `self` (in insertion order) missing from `other`.
    #[must_use]
    pub fn first_not_in(&self, other: &KindSet) -> Option<NodeKind> {
        self.iter().find(|kind| !other.contains(*kind))
    }

    /// Parses a list of kind names, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns the first name that is not a known kind.
    pub fn parse_names<I, S>(names: I) -> Result<Self, UnknownKind>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| name.as_ref().trim().parse::<NodeKind>())
            .collect()
    }
}

impl From<&[NodeKind]> for KindSet {
    fn from(kinds: &[NodeKind]) -> Self {
        kinds.iter().copied().collect()
    }
}

impl FromIterator<NodeKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = NodeKind>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(NodeKind::name).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
