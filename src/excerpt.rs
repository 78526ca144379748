//! # Plain-text excerpts
//!
//! Text of a post without any markup, for list previews and meta
//! descriptions.
use crate::model::Node;
use serde::Deserialize;
use std::iter::once;

/// Appended to an excerpt that was cut short
pub const ELLIPSIS: &str = "...";

/// Options for excerpts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExcerptOptions {
    /// Characters before the excerpt is cut
    pub max_length: usize,
}

impl Default for ExcerptOptions {
    fn default() -> Self {
        Self { max_length: 160 }
    }
}

/// All text runs of the document in document order, separated by a single
/// space and trimmed at both ends
pub fn plain_text(doc: &Node) -> String {
    let runs: Vec<&str> = once(doc)
        .chain(doc.descendants())
        .filter_map(|node| match node {
            Node::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    runs.join(" ").trim().to_owned()
}

/// The plain text, cut to at most `max_length` characters plus [`ELLIPSIS`]
pub fn extract_plain_text(doc: &Node, max_length: usize) -> String {
    truncate(plain_text(doc), max_length)
}

fn truncate(text: String, max_length: usize) -> String {
    match text.char_indices().nth(max_length) {
        None => text,
        Some((cut, _)) => {
            let mut excerpt = text[..cut].trim_end().to_owned();
            excerpt.push_str(ELLIPSIS);
            excerpt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_plain_text, plain_text, ELLIPSIS};
    use crate::model::{ImageAttrs, Mark, Node};
    use pretty_assertions::assert_eq;

    fn post() -> Node {
        Node::doc(vec![
            Node::heading(1, vec![Node::text("Firewall basics")]),
            Node::paragraph(vec![
                Node::text("Open the"),
                Node::marked("zones", vec![Mark::Bold]),
                Node::text("page."),
            ]),
            Node::Image {
                attrs: ImageAttrs {
                    src: "/uploads/zones.png".to_owned(),
                    alt: "Zones".to_owned(),
                    title: None,
                },
            },
            Node::BulletList {
                content: vec![
                    Node::ListItem {
                        content: vec![Node::paragraph(vec![Node::text("lan")])],
                    },
                    Node::ListItem {
                        content: vec![Node::paragraph(vec![Node::text("wan")])],
                    },
                ],
            },
            Node::code_block(Some("bash"), "fw4 reload\nfw4 print"),
        ])
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(
            plain_text(&post()),
            "Firewall basics Open the zones page. lan wan fw4 reload\nfw4 print"
        );
    }

    #[test]
    fn test_sibling_runs() {
        let doc = Node::doc(vec![Node::paragraph(vec![
            Node::text("Hello"),
            Node::marked("world", vec![Mark::Bold]),
        ])]);
        assert_eq!(extract_plain_text(&doc, 100), "Hello world");

        let padded = Node::doc(vec![
            Node::paragraph(vec![Node::text("  one ")]),
            Node::paragraph(vec![Node::text("two  ")]),
        ]);
        assert_eq!(plain_text(&padded), "one  two");
    }

    #[test]
    fn test_truncation() {
        assert_eq!(extract_plain_text(&post(), 15), "Firewall basics...");
        assert_eq!(extract_plain_text(&post(), 16), "Firewall basics...");
        assert_eq!(extract_plain_text(&post(), 12), "Firewall bas...");
        assert_eq!(
            extract_plain_text(&post(), 1000),
            "Firewall basics Open the zones page. lan wan fw4 reload\nfw4 print"
        );
    }

    #[test]
    fn test_bound() {
        let doc = post();
        let full = plain_text(&doc).chars().count();
        for max_length in 0..full + 2 {
            let excerpt = extract_plain_text(&doc, max_length);
            assert!(excerpt.chars().count() <= max_length + ELLIPSIS.len());
        }
    }

    #[test]
    fn test_multibyte_cut() {
        let doc = Node::doc(vec![Node::paragraph(vec![Node::text("Grüße aus Köln")])]);
        assert_eq!(extract_plain_text(&doc, 4), "Grüß...");
    }

    #[test]
    fn test_empty() {
        assert_eq!(extract_plain_text(&Node::doc(vec![]), 160), "");
        let blank = Node::doc(vec![
            Node::paragraph(vec![]),
            Node::paragraph(vec![Node::text("  \n ")]),
        ]);
        assert_eq!(extract_plain_text(&blank, 160), "");
    }
}
