//! # Derived views
//!
//! Everything a post page needs from the stored content, computed in one
//! pass over the decoded document.
use crate::codec::{decode, ContentError};
use crate::excerpt::{extract_plain_text, plain_text, ExcerptOptions};
use crate::model::Node;
use crate::outline::{extract_headings, HeadingRecord};
use crate::reading::{estimate_minutes_at, ReadingOptions};
use crate::render::{render_with, RenderOptions};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Shown in place of a post whose content can't be decoded
pub const FALLBACK_HTML: &str =
    r#"<div class="post-error">This post could not be displayed.</div>"#;

/// Options for all derived views
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub render: RenderOptions,
    pub excerpt: ExcerptOptions,
    pub reading: ReadingOptions,
}

/// The views of one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedViews {
    /// The sanitized HTML fragment
    pub html: String,
    /// The table of contents
    pub headings: Vec<HeadingRecord>,
    /// Plain-text preview
    pub excerpt: String,
    /// Estimated reading time
    pub reading_minutes: usize,
}

impl DerivedViews {
    /// Derive the views of a decoded document
    pub fn from_doc(doc: &Node, options: &ViewOptions) -> Self {
        let text = plain_text(doc);
        Self {
            html: render_with(doc, &options.render),
            headings: extract_headings(doc),
            excerpt: extract_plain_text(doc, options.excerpt.max_length),
            reading_minutes: estimate_minutes_at(&text, options.reading.words_per_minute),
        }
    }

    /// Decode stored content and derive its views
    #[instrument(level = "debug", skip(raw, options))]
    pub fn from_content(raw: &str, options: &ViewOptions) -> Result<Self, ContentError> {
        let doc = decode(raw)?;
        Ok(Self::from_doc(&doc, options))
    }

    /// Like [`DerivedViews::from_content`], but content that can't be
    /// decoded yields the [`DerivedViews::fallback`] views
    pub fn derive(raw: &str, options: &ViewOptions) -> Self {
        match Self::from_content(raw, options) {
            Ok(views) => views,
            Err(err) => {
                warn!("Post content could not be displayed: {}", err);
                Self::fallback()
            }
        }
    }

    /// The views of a post that can't be displayed
    pub fn fallback() -> Self {
        Self {
            html: String::from(FALLBACK_HTML),
            headings: Vec::new(),
            excerpt: String::new(),
            reading_minutes: 1,
        }
    }
}
