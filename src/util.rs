//! # Misc utilities
//!
//! URL checks for the attributes that end up in rendered HTML.
use url::{ParseError, Url};

/// Schemes a link may point to
const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Schemes an image may be loaded from
const IMAGE_SCHEMES: &[&str] = &["http", "https"];

/// Media type prefix of `data:` URLs that may be used as an image source
const DATA_IMAGE: &str = "image/";

/// The link target, if it is safe to put into an `href`
pub fn safe_href(href: &str) -> Option<&str> {
    check_url(href, LINK_SCHEMES, false)
}

/// The image source, if it is safe to put into a `src`
pub fn safe_src(src: &str) -> Option<&str> {
    check_url(src, IMAGE_SCHEMES, true)
}

fn check_url<'a>(raw: &'a str, schemes: &[&str], data_images: bool) -> Option<&'a str> {
    let raw = raw.trim();
    // the parser drops tabs and newlines, which would hide a scheme
    if raw.is_empty() || raw.chars().any(char::is_control) {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) if schemes.contains(&url.scheme()) => Some(raw),
        Ok(url) if data_images && url.scheme() == "data" => url
            .path()
            .to_ascii_lowercase()
            .starts_with(DATA_IMAGE)
            .then_some(raw),
        Ok(_) => None,
        Err(ParseError::RelativeUrlWithoutBase) => is_relative_reference(raw).then_some(raw),
        Err(_) => None,
    }
}

/// A colon in the first path segment would be read as a scheme by some
/// browsers (`java script:...`)
fn is_relative_reference(raw: &str) -> bool {
    raw.split(|c: char| matches!(c, '/' | '?' | '#'))
        .next()
        .map_or(true, |first_segment| !first_segment.contains(':'))
}
