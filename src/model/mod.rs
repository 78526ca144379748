//! # The document model
//!
//! This module mirrors the JSON serialization of the rich-text editor's
//! nodes: every node is an object tagged with `type`, containers carry their
//! children in `content`, and kind-specific metadata lives in `attrs`.
pub mod de;

use de::Opaque;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The heading levels the editor offers
pub const HEADING_LEVELS: std::ops::RangeInclusive<u8> = 1..=3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadingAttrs {
    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub level: Option<i64>,
}

impl HeadingAttrs {
    pub fn new(level: u8) -> Self {
        Self {
            level: Some(level.into()),
        }
    }

    /// The level to render, `1` when absent or outside of [`HEADING_LEVELS`]
    pub fn level(&self) -> u8 {
        self.level
            .and_then(|level| u8::try_from(level).ok())
            .filter(|level| HEADING_LEVELS.contains(level))
            .unwrap_or(1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodeBlockAttrs {
    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderedListAttrs {
    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub start: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageAttrs {
    #[serde(default, deserialize_with = "de::lenient")]
    pub src: String,
    #[serde(default, deserialize_with = "de::lenient")]
    pub alt: String,
    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinkAttrs {
    #[serde(default, deserialize_with = "de::lenient")]
    pub href: String,
    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<String>,
    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub rel: Option<String>,
}

/// An inline annotation on a text node
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    Bold,
    Italic,
    Strike,
    Code,
    Link {
        #[serde(default)]
        attrs: LinkAttrs,
    },
    /// A mark of a kind we don't know, kept verbatim
    #[serde(skip)]
    Unknown(Value),
}

impl Opaque for Mark {
    fn opaque(raw: Value) -> Self {
        Mark::Unknown(raw)
    }

    fn as_opaque(&self) -> Option<&Value> {
        match self {
            Mark::Unknown(raw) => Some(raw),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    #[serde(alias = "document")]
    Doc {
        #[serde(default, with = "de::seq")]
        content: Fragment,
    },
    Paragraph {
        #[serde(default, with = "de::seq", skip_serializing_if = "Vec::is_empty")]
        content: Fragment,
    },
    Heading {
        #[serde(default)]
        attrs: HeadingAttrs,
        #[serde(default, with = "de::seq", skip_serializing_if = "Vec::is_empty")]
        content: Fragment,
    },
    BulletList {
        #[serde(default, with = "de::seq", skip_serializing_if = "Vec::is_empty")]
        content: Fragment,
    },
    OrderedList {
        #[serde(default)]
        attrs: OrderedListAttrs,
        #[serde(default, with = "de::seq", skip_serializing_if = "Vec::is_empty")]
        content: Fragment,
    },
    ListItem {
        #[serde(default, with = "de::seq", skip_serializing_if = "Vec::is_empty")]
        content: Fragment,
    },
    CodeBlock {
        #[serde(default)]
        attrs: CodeBlockAttrs,
        #[serde(default, with = "de::seq", skip_serializing_if = "Vec::is_empty")]
        content: Fragment,
    },
    Blockquote {
        #[serde(default, with = "de::seq", skip_serializing_if = "Vec::is_empty")]
        content: Fragment,
    },
    Image {
        #[serde(default)]
        attrs: ImageAttrs,
    },
    Text {
        #[serde(default, deserialize_with = "de::deserialize_or_default")]
        text: String,
        #[serde(default, with = "de::seq", skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    HardBreak,
    HorizontalRule,
    /// A node of a kind we don't know, kept verbatim
    #[serde(skip)]
    Unknown(Value),
}

pub type Fragment = Vec<Node>;

impl Opaque for Node {
    fn opaque(raw: Value) -> Self {
        Node::Unknown(raw)
    }

    fn as_opaque(&self) -> Option<&Value> {
        match self {
            Node::Unknown(raw) => Some(raw),
            _ => None,
        }
    }
}

impl Node {
    pub fn doc(content: Fragment) -> Self {
        Node::Doc { content }
    }

    pub fn paragraph(content: Fragment) -> Self {
        Node::Paragraph { content }
    }

    pub fn heading(level: u8, content: Fragment) -> Self {
        Node::Heading {
            attrs: HeadingAttrs::new(level),
            content,
        }
    }

    pub fn code_block(language: Option<&str>, code: &str) -> Self {
        Node::CodeBlock {
            attrs: CodeBlockAttrs {
                language: language.map(str::to_owned),
            },
            content: vec![Node::text(code)],
        }
    }

    pub fn text<S: Into<String>>(text: S) -> Self {
        Node::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked<S: Into<String>>(text: S, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.into(),
            marks,
        }
    }

    /// The `type` tag of this node
    pub fn kind(&self) -> &str {
        match self {
            Node::Doc { .. } => "doc",
            Node::Paragraph { .. } => "paragraph",
            Node::Heading { .. } => "heading",
            Node::BulletList { .. } => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem { .. } => "listItem",
            Node::CodeBlock { .. } => "codeBlock",
            Node::Blockquote { .. } => "blockquote",
            Node::Image { .. } => "image",
            Node::Text { .. } => "text",
            Node::HardBreak => "hardBreak",
            Node::HorizontalRule => "horizontalRule",
            Node::Unknown(raw) => raw.get("type").and_then(Value::as_str).unwrap_or("?"),
        }
    }

    /// The child nodes, empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc { content }
            | Node::Paragraph { content }
            | Node::Heading { content, .. }
            | Node::BulletList { content }
            | Node::OrderedList { content, .. }
            | Node::ListItem { content }
            | Node::CodeBlock { content, .. }
            | Node::Blockquote { content } => content,
            Node::Image { .. }
            | Node::Text { .. }
            | Node::HardBreak
            | Node::HorizontalRule
            | Node::Unknown(_) => &[],
        }
    }

    /// Whether this node holds inline content
    pub fn is_textblock(&self) -> bool {
        matches!(
            self,
            Node::Paragraph { .. } | Node::Heading { .. } | Node::CodeBlock { .. }
        )
    }

    /// All nodes below this one, depth-first in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children().iter().rev().collect(),
        }
    }

    /// The concatenated text of this node and all text nodes below it.
    ///
    /// Hard breaks become a newline.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in std::iter::once(self).chain(self.descendants()) {
            match node {
                Node::Text { text, .. } => out.push_str(text),
                Node::HardBreak => out.push('\n'),
                _ => {}
            }
        }
        out
    }
}

/// Iterator returned by [`Node::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
