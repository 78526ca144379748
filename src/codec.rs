//! # Content codec
//!
//! Converts between a [`Node`] tree and the string that is stored in a
//! post's `content` field. Decoding accepts every shape that has been
//! written over the lifetime of the blog:
//!
//! - the current schema, JSON for a `doc` node
//! - JSON that was encoded twice (a JSON string containing the document)
//! - pre-migration posts that are plain HTML, not JSON at all
//!
//! Any of these may additionally be wrapped in a pair of backticks.
use crate::model::Node;
use displaydoc::Display;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

/// Error when decoding or encoding post content
#[derive(Debug, Error, Display)]
pub enum ContentError {
    /// Malformed content: {reason}
    MalformedContent {
        /// Why none of the accepted shapes matched
        reason: String,
    },
    /// Invalid document: {reason}
    InvalidDocument {
        /// What is wrong with the top-level value
        reason: String,
    },
    /// Could not encode document: {0}
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ContentError>;

const BACKTICK: char = '`';

/// Serialize a document for storage
pub fn encode(doc: &Node) -> Result<String> {
    if !matches!(doc, Node::Doc { .. }) {
        return Err(ContentError::InvalidDocument {
            reason: format!("root node is a {:?}, expected \"doc\"", doc.kind()),
        });
    }
    Ok(serde_json::to_string(doc)?)
}

/// Parse stored content into a document
#[instrument(level = "debug", skip(raw), fields(len = raw.len()))]
pub fn decode(raw: &str) -> Result<Node> {
    if raw.trim().is_empty() {
        return Err(ContentError::MalformedContent {
            reason: String::from("content is empty"),
        });
    }

    match serde_json::from_str::<Value>(strip_backticks(raw)) {
        Ok(Value::String(inner)) => {
            debug!("Decoding double-encoded content");
            let value = serde_json::from_str::<Value>(strip_backticks(&inner)).map_err(|err| {
                ContentError::MalformedContent {
                    reason: format!("inner value of double-encoded content: {}", err),
                }
            })?;
            if value.is_string() {
                return Err(ContentError::MalformedContent {
                    reason: String::from("content is encoded more than twice"),
                });
            }
            document_from_value(value)
        }
        Ok(value) => document_from_value(value),
        Err(err) => {
            debug!("Content is not JSON ({}), treating it as legacy HTML", err);
            Ok(legacy_document(raw))
        }
    }
}

/// Rewrite stored content in the current schema
pub fn normalize(raw: &str) -> Result<String> {
    encode(&decode(raw)?)
}

fn strip_backticks(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix(BACKTICK)
        .and_then(|rest| rest.strip_suffix(BACKTICK))
    {
        Some(inner) => inner,
        None => trimmed,
    }
}

fn legacy_document(raw: &str) -> Node {
    Node::doc(vec![Node::paragraph(vec![Node::text(raw)])])
}

fn document_from_value(value: Value) -> Result<Node> {
    let object = match &value {
        Value::Object(object) => object,
        other => {
            return Err(ContentError::InvalidDocument {
                reason: format!("top-level value is {}, expected an object", json_kind(other)),
            })
        }
    };

    match object.get("type").and_then(Value::as_str) {
        Some("doc") | Some("document") => {}
        Some(kind) => {
            return Err(ContentError::InvalidDocument {
                reason: format!("root node is a {:?}, expected \"doc\"", kind),
            })
        }
        None => {
            return Err(ContentError::InvalidDocument {
                reason: String::from("root node has no type"),
            })
        }
    }

    if !object.get("content").map_or(false, Value::is_array) {
        return Err(ContentError::InvalidDocument {
            reason: String::from("root node has no content array"),
        });
    }

    serde_json::from_value(value).map_err(|err| ContentError::InvalidDocument {
        reason: err.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
