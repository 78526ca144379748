//! # Headings and anchors
//!
//! Builds the table of contents for a post. Anchor ids are derived from the
//! heading text; repeated headings get a numeric suffix so that every id is
//! unique within one document.
use crate::model::Node;
use derive_new::new;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Used for headings whose text yields an empty id
const FALLBACK_ID: &str = "section";

/// An entry in the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, new)]
pub struct HeadingRecord {
    #[new(into)]
    pub id: String,
    #[new(into)]
    pub text: String,
    pub level: u8,
}

/// Lower-case the text and replace whitespace runs with a hyphen.
///
/// The first occurrence (`count == 1`) has no suffix.
pub fn heading_id(text: &str, count: usize) -> String {
    heading_id_from_base(&base_id(text), count)
}

fn base_id(text: &str) -> String {
    let mut base = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                base.push('-');
            }
            in_space = true;
        } else {
            base.extend(c.to_lowercase());
            in_space = false;
        }
    }
    if base.is_empty() {
        base.push_str(FALLBACK_ID);
    }
    base
}

/// Occurrence counters for one traversal of one document
#[derive(Debug, Default)]
pub struct Anchors {
    seen: HashMap<String, usize>,
    used: HashSet<String>,
}

impl Anchors {
    /// The id for the next heading with this text
    pub fn next_id(&mut self, text: &str) -> String {
        let base = base_id(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        loop {
            *count += 1;
            let id = heading_id_from_base(&base, *count);
            // a literal "Setup 2" heading may already have taken "setup-2"
            if self.used.insert(id.clone()) {
                return id;
            }
        }
    }
}

fn heading_id_from_base(base: &str, count: usize) -> String {
    if count > 1 {
        format!("{}-{}", base, count)
    } else {
        base.to_owned()
    }
}

/// All headings of the document, in document order
pub fn extract_headings(doc: &Node) -> Vec<HeadingRecord> {
    let mut anchors = Anchors::default();
    doc.descendants()
        .filter_map(|node| match node {
            Node::Heading { attrs, .. } => {
                let text = node.text_content();
                Some(HeadingRecord::new(anchors.next_id(&text), text, attrs.level()))
            }
            _ => None,
        })
        .collect()
}
