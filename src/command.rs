//! # Commands

use crate::views::DerivedViews;
use displaydoc::Display;
use std::path::PathBuf;
use std::str::FromStr;
use structopt::StructOpt;
use thiserror::Error;

/// Error when parsing a view name
#[derive(Debug, Display, Error)]
pub enum ParseViewError {
    /// The view `{0}` is not known, use html, toc, excerpt, minutes or all
    UnknownView(String),
}

/// A derived view to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum View {
    /// html
    Html,
    /// toc
    Toc,
    /// excerpt
    Excerpt,
    /// minutes
    Minutes,
    /// all
    All,
}

impl FromStr for View {
    type Err = ParseViewError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "toc" => Ok(Self::Toc),
            "excerpt" => Ok(Self::Excerpt),
            "minutes" => Ok(Self::Minutes),
            "all" => Ok(Self::All),
            _ => Err(ParseViewError::UnknownView(s.to_owned())),
        }
    }
}

impl View {
    /// Format this view of the post for output
    pub fn format(self, views: &DerivedViews) -> serde_json::Result<String> {
        match self {
            View::Html => Ok(views.html.clone()),
            View::Toc => serde_json::to_string_pretty(&views.headings),
            View::Excerpt => Ok(views.excerpt.clone()),
            View::Minutes => Ok(views.reading_minutes.to_string()),
            View::All => serde_json::to_string_pretty(views),
        }
    }
}

/// A subcommand
#[derive(Debug, StructOpt)]
pub enum Command {
    /// Print the derived views of stored post content
    Views {
        /// File with the post content, `-` for stdin
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Which view to print
        #[structopt(long, short, default_value = "all")]
        view: View,
        /// Override the excerpt length
        #[structopt(long)]
        max_length: Option<usize>,
    },
    /// Rewrite stored post content in the current schema
    Normalize {
        /// File with the post content, `-` for stdin
        #[structopt(parse(from_os_str))]
        input: PathBuf,
        /// Where to write the result, stdout if absent
        #[structopt(long, short, parse(from_os_str))]
        output: Option<PathBuf>,
    },
}
