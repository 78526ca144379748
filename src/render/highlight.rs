//! # Code highlighting
//!
//! Highlighting is done with the grammars bundled with `syntect`, emitting
//! `hljs-` prefixed classes so that the site's existing highlight.js theme
//! styles the output.
use html_escape::encode_text;
use std::sync::LazyLock;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::debug;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(|| SyntaxSet::load_defaults_newlines());

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hljs-" };

/// Highlight the code as HTML, falling back to escaped text for languages
/// without a grammar
pub fn highlight(code: &str, language: &str) -> String {
    let syntax = match find_syntax(language) {
        Some(syntax) => syntax,
        None => return encode_text(code).into_owned(),
    };

    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        if let Err(err) = generator.parse_html_for_line_which_includes_newline(line) {
            debug!("Could not highlight {} code: {}", language, err);
            return encode_text(code).into_owned();
        }
    }
    generator.finalize()
}

fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    let token = match language {
        "text" | "plaintext" | "plain" => return None,
        // there is no bundled TypeScript grammar
        "typescript" | "ts" | "tsx" | "javascript" | "jsx" => "js",
        "bash" | "shell" | "zsh" | "console" => "sh",
        "python" => "py",
        "rust" => "rs",
        "ruby" => "rb",
        "c++" => "cpp",
        "csharp" | "c#" => "cs",
        "golang" => "go",
        "xml" | "svg" => "xml",
        "yml" => "yaml",
        other => other,
    };
    SYNTAX_SET.find_syntax_by_token(token)
}

/// Lower-cased language name, if it is safe to use in a class name
pub fn normalize_language(language: &str) -> Option<String> {
    let language = language.trim().to_ascii_lowercase();
    let valid = !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '_'));
    valid.then_some(language)
}

/// Guess the language of a code snippet.
///
/// These are the same checks the editor runs when code is pasted.
pub fn detect_language(code: &str) -> &'static str {
    let has = |needle: &str| code.contains(needle);
    if has("#include") && has("class ") || has("std::") {
        "cpp"
    } else if has("#include") || has("int main(") {
        "c"
    } else if has("def ") || has("import ") && has(":") {
        "python"
    } else if has("func ") && has("package ") {
        "go"
    } else if has("fn ") && has("let mut ") {
        "rust"
    } else if has("class ") && has("end") {
        "ruby"
    } else if has("public class ") {
        "java"
    } else if has("function") || has("=>") {
        "javascript"
    } else if has("<html") || has("</") {
        "html"
    } else if has("{") && has(":") {
        "json"
    } else if has(".class") || has("#id") {
        "css"
    } else if has("#!/") || has("$ ") {
        "bash"
    } else {
        "typescript"
    }
}

/// Escape text for the shell-command rendering of quotes.
///
/// Besides the usual HTML escapes, `;` and `|` are written as character
/// references.
pub fn escape_shell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            ';' => out.push_str("&#59;"),
            '|' => out.push_str("&#124;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{detect_language, escape_shell, highlight, normalize_language};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_highlight_escapes() {
        let html = highlight("if a < b && c > d { }", "rust");
        assert!(html.contains("hljs-"), "{}", html);
        assert!(html.contains("&lt;"), "{}", html);
        assert!(!html.contains(" < "), "{}", html);
    }

    #[test]
    fn test_unknown_language_is_plain() {
        assert_eq!(
            highlight("<none> & nothing", "klingon"),
            "&lt;none&gt; &amp; nothing"
        );
        assert_eq!(highlight("a < b", "plaintext"), "a &lt; b");
    }

    #[test]
    fn test_typescript_is_highlighted() {
        let html = highlight("const x: number = 1;", "typescript");
        assert!(html.contains("hljs-"), "{}", html);
    }

    #[rstest]
    #[case("#include <vector>\nclass A {};", "cpp")]
    #[case("#include <stdio.h>", "c")]
    #[case("def main():\n    pass", "python")]
    #[case("package main\nfunc main() {}", "go")]
    #[case("fn main() { let mut x = 1; }", "rust")]
    #[case("const f = () => 1", "javascript")]
    #[case("<html></html>", "html")]
    #[case("{\"a\": 1}", "json")]
    #[case("$ opkg install luci", "bash")]
    #[case("let x = 1", "typescript")]
    fn test_detect_language(#[case] code: &str, #[case] language: &str) {
        assert_eq!(detect_language(code), language);
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language(" Bash "), Some("bash".to_owned()));
        assert_eq!(normalize_language("c++"), Some("c++".to_owned()));
        assert_eq!(normalize_language("x\" onload=\"y"), None);
        assert_eq!(normalize_language(""), None);
    }

    #[test]
    fn test_escape_shell() {
        assert_eq!(
            escape_shell("cat a | grep b; echo <ok> && done"),
            "cat a &#124; grep b&#59; echo &lt;ok&gt; &amp;&amp; done"
        );
    }
}
