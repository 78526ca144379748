//! # HTML rendering
//!
//! Turns a document into an HTML fragment that can be embedded in a page as
//! is. All text and attribute values are escaped, and links and images are
//! only emitted for URLs that pass the checks in [`crate::util`].
//!
//! Heading ids are produced by the same [`Anchors`] counter that builds the
//! table of contents, and every heading of the tree is passed through it in
//! document order, so the two always agree.
pub mod highlight;

use crate::model::{ImageAttrs, Mark, Node, OrderedListAttrs};
use crate::outline::Anchors;
use crate::util::{safe_href, safe_src};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use serde::Deserialize;
use std::iter::once;

/// The markup around every code block that the page script attaches its
/// copy-to-clipboard handler to
const COPY_BUTTON: &str = concat!(
    r#"<div class="absolute right-2 top-2 flex items-center gap-2">"#,
    r#"<span class="copy-message opacity-0 text-xs text-green-400 transition-opacity">Copied!</span>"#,
    r#"<button type="button" class="copy-button p-2 rounded-lg bg-gray-800/50 hover:bg-gray-700/50 transition-colors" aria-label="Copy code">"#,
    r#"<svg xmlns="http://www.w3.org/2000/svg" width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-gray-400 hover:text-white transition-colors">"#,
    r#"<rect width="14" height="14" x="8" y="8" rx="2" ry="2"></rect>"#,
    r#"<path d="M4 16c-1.1 0-2-.9-2-2V4c0-1.1.9-2 2-2h10c1.1 0 2 .9 2 2"></path>"#,
    r#"</svg></button></div>"#,
);

/// Language of quotes that are rendered as shell commands
const SHELL_LANGUAGE: &str = "bash";

/// Options for rendering
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Language for code blocks that don't name one
    pub default_language: String,
    /// Guess the language of unlabelled code blocks instead
    pub detect_language: bool,
    /// Wrap code blocks with a copy-to-clipboard button
    pub copy_button: bool,
    /// Class for links
    pub link_class: String,
    /// Class for images
    pub image_class: String,
    /// Name of the page's image viewer, emitted as `data-viewer`
    pub image_viewer: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_language: String::from("typescript"),
            detect_language: false,
            copy_button: true,
            link_class: String::from("text-blue-400 hover:text-blue-300 underline"),
            image_class: String::from("max-w-full rounded-lg cursor-zoom-in"),
            image_viewer: None,
        }
    }
}

/// Render the document with the default options
pub fn render(doc: &Node) -> String {
    render_with(doc, &RenderOptions::default())
}

/// Render the document
pub fn render_with(doc: &Node, options: &RenderOptions) -> String {
    let mut renderer = Renderer::new(options);
    renderer.block(doc);
    renderer.out
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    anchors: Anchors,
    out: String,
}

impl<'a> Renderer<'a> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            anchors: Anchors::default(),
            out: String::new(),
        }
    }

    fn blocks(&mut self, content: &[Node]) {
        for node in content {
            self.block(node);
        }
    }

    fn block(&mut self, node: &Node) {
        match node {
            Node::Doc { content } => self.blocks(content),
            Node::Paragraph { content } => {
                self.out.push_str("<p>");
                self.inline(content);
                self.out.push_str("</p>");
            }
            Node::Heading { attrs, content } => {
                let level = attrs.level();
                let id = self.anchors.next_id(&node.text_content());
                self.out
                    .push_str(&format!("<h{} id=\"{}\">", level, attr(&id)));
                self.inline(content);
                self.out.push_str(&format!("</h{}>", level));
            }
            Node::BulletList { content } => self.list("<ul>", "</ul>", content),
            Node::OrderedList { attrs, content } => {
                self.list(&ordered_list_open(attrs), "</ol>", content)
            }
            // only valid inside a list, keep the item's content
            Node::ListItem { content } => self.blocks(content),
            Node::CodeBlock { attrs, .. } => {
                self.skip_anchors(node);
                let code = node.text_content();
                let language = match attrs.language.as_deref().and_then(highlight::normalize_language)
                {
                    Some(language) => language,
                    None if self.options.detect_language => {
                        highlight::detect_language(&code).to_owned()
                    }
                    None => self.options.default_language.clone(),
                };
                let highlighted = highlight::highlight(&code, &language);
                self.code(&language, &highlighted);
            }
            Node::Blockquote { content } => match shell_command(node) {
                Some(command) => self.code(SHELL_LANGUAGE, &highlight::escape_shell(&command)),
                None => {
                    self.out.push_str("<blockquote>");
                    self.blocks(content);
                    self.out.push_str("</blockquote>");
                }
            },
            Node::Image { attrs } => self.image(attrs),
            Node::Text { .. } | Node::HardBreak => self.inline(std::slice::from_ref(node)),
            Node::HorizontalRule => self.out.push_str("<hr>"),
            Node::Unknown(_) => {}
        }
    }

    fn inline(&mut self, content: &[Node]) {
        for node in content {
            match node {
                Node::Text { text: value, marks } => self.text_run(value, marks),
                Node::HardBreak => self.out.push_str("<br>"),
                Node::Image { attrs } => self.image(attrs),
                Node::Unknown(_) => {}
                other => {
                    self.skip_anchors(other);
                    self.out.push_str(&text(&other.text_content()));
                }
            }
        }
    }

    fn text_run(&mut self, value: &str, marks: &[Mark]) {
        let href = marks.iter().find_map(|mark| match mark {
            Mark::Link { attrs } => safe_href(&attrs.href),
            _ => None,
        });
        let tags: Vec<&str> = marks.iter().filter_map(mark_tag).collect();

        if let Some(href) = href {
            self.out.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"{}\">",
                attr(href),
                attr(&self.options.link_class)
            ));
        }
        for tag in &tags {
            self.out.push_str(&format!("<{}>", tag));
        }
        self.out.push_str(&text(value));
        for tag in tags.iter().rev() {
            self.out.push_str(&format!("</{}>", tag));
        }
        if href.is_some() {
            self.out.push_str("</a>");
        }
    }

    fn list(&mut self, open: &str, close: &str, items: &[Node]) {
        self.out.push_str(open);
        for item in items {
            match item {
                Node::ListItem { content } => {
                    self.out.push_str("<li>");
                    self.list_item(content);
                    self.out.push_str("</li>");
                }
                Node::Unknown(_) => {}
                other => {
                    self.out.push_str("<li>");
                    self.block(other);
                    self.out.push_str("</li>");
                }
            }
        }
        self.out.push_str(close);
    }

    /// Paragraphs of an item are flattened into the item's text
    fn list_item(&mut self, content: &[Node]) {
        let mut after_paragraph = false;
        for node in content {
            match node {
                Node::Paragraph { content } => {
                    if after_paragraph {
                        self.out.push(' ');
                    }
                    self.inline(content);
                    after_paragraph = true;
                }
                other => {
                    self.block(other);
                    after_paragraph = false;
                }
            }
        }
    }

    fn code(&mut self, language: &str, html: &str) {
        let pre = format!(
            "<pre class=\"hljs\"><code class=\"language-{}\">{}</code></pre>",
            attr(language),
            html
        );
        if self.options.copy_button {
            self.out
                .push_str(r#"<div class="code-block-wrapper relative">"#);
            self.out.push_str(COPY_BUTTON);
            self.out.push_str(&pre);
            self.out.push_str("</div>");
        } else {
            self.out.push_str(&pre);
        }
    }

    fn image(&mut self, attrs: &ImageAttrs) {
        let src = match safe_src(&attrs.src) {
            Some(src) => attr(src),
            None => return,
        };
        self.out.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\"",
            src,
            attr(&attrs.alt)
        ));
        if let Some(title) = &attrs.title {
            self.out.push_str(&format!(" title=\"{}\"", attr(title)));
        }
        self.out.push_str(&format!(
            " class=\"{}\" loading=\"lazy\" data-viewer-src=\"{}\"",
            attr(&self.options.image_class),
            src
        ));
        if let Some(viewer) = &self.options.image_viewer {
            self.out.push_str(&format!(" data-viewer=\"{}\"", attr(viewer)));
        }
        self.out.push('>');
    }

    /// Advance the anchor counters past headings that are not rendered as
    /// headings
    fn skip_anchors(&mut self, node: &Node) {
        for heading in once(node).chain(node.descendants()) {
            if let Node::Heading { .. } = heading {
                self.anchors.next_id(&heading.text_content());
            }
        }
    }
}

fn ordered_list_open(attrs: &OrderedListAttrs) -> String {
    match attrs.start {
        Some(start) if start != 1 => format!("<ol start=\"{}\">", start),
        _ => String::from("<ol>"),
    }
}

fn mark_tag(mark: &Mark) -> Option<&'static str> {
    match mark {
        Mark::Bold => Some("strong"),
        Mark::Italic => Some("em"),
        Mark::Strike => Some("s"),
        Mark::Code => Some("code"),
        Mark::Link { .. } | Mark::Unknown(_) => None,
    }
}

/// Quotes that only hold text are how shell commands were written.
///
/// Paragraphs become lines, adjacent inline runs are joined into one line.
/// `None` if the quote holds anything else or nothing at all.
fn shell_command(quote: &Node) -> Option<String> {
    let plain = quote.descendants().all(|node| {
        matches!(
            node,
            Node::Paragraph { .. } | Node::Text { .. } | Node::HardBreak | Node::Unknown(_)
        )
    });
    if !plain {
        return None;
    }

    let mut lines: Vec<String> = Vec::new();
    let mut inline = false;
    for node in quote.children() {
        match node {
            Node::Unknown(_) => {}
            Node::Text { .. } | Node::HardBreak => {
                let run = node.text_content();
                match lines.last_mut() {
                    Some(line) if inline => line.push_str(&run),
                    _ => lines.push(run),
                }
                inline = true;
            }
            block => {
                lines.push(block.text_content());
                inline = false;
            }
        }
    }
    (!lines.is_empty()).then(|| lines.join("\n"))
}
