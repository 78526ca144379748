//! # postdoc
//!
//! The content pipeline of the blog: stored post content is decoded into a
//! rich-text document ([`model::Node`]) by the [`codec`], and the page
//! views are derived from that document: sanitized HTML ([`render`]), the
//! table of contents ([`outline`]), a plain-text excerpt ([`excerpt`]) and
//! the reading time ([`reading`]).
pub mod codec;
pub mod command;
pub mod config;
pub mod excerpt;
pub mod model;
pub mod outline;
pub mod reading;
pub mod render;
pub mod util;
pub mod views;
