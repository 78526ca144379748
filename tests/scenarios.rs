use postdoc::codec::{decode, encode};
use postdoc::excerpt::{extract_plain_text, plain_text, ELLIPSIS};
use postdoc::model::{Mark, Node};
use postdoc::outline::{extract_headings, HeadingRecord};
use postdoc::reading::estimate_minutes;
use postdoc::render::render;
use postdoc::views::{DerivedViews, ViewOptions};
use pretty_assertions::assert_eq;
use serde_json::json;

fn post() -> Node {
    Node::doc(vec![
        Node::heading(1, vec![Node::text("Setup")]),
        Node::paragraph(vec![
            Node::text("Connect to the router and run "),
            Node::marked("opkg update", vec![Mark::Code]),
            Node::text("."),
        ]),
        Node::heading(2, vec![Node::text("Setup")]),
        Node::Blockquote {
            content: vec![Node::paragraph(vec![Node::text("uci show network | less")])],
        },
        Node::heading(2, vec![Node::text("Setup")]),
    ])
}

#[test]
fn heading_scenario() {
    let doc = decode(
        r#"{"type":"document","content":[{"type":"heading","attrs":{"level":1},"content":[{"type":"text","text":"Intro"}]}]}"#,
    )
    .unwrap();
    assert_eq!(
        extract_headings(&doc),
        vec![HeadingRecord::new("intro", "Intro", 1)]
    );
}

#[test]
fn repeated_headings() {
    let ids: Vec<_> = extract_headings(&post()).into_iter().map(|h| h.id).collect();
    assert_eq!(ids, ["setup", "setup-2", "setup-3"]);

    let html = render(&post());
    for id in &ids {
        assert!(html.contains(&format!("id=\"{}\"", id)), "{}", html);
    }
}

#[test]
fn legacy_html_scenario() {
    let doc = decode("<p>Hello</p>").unwrap();
    assert_eq!(
        doc,
        Node::doc(vec![Node::paragraph(vec![Node::text("<p>Hello</p>")])])
    );
    assert_eq!(render(&doc), "<p>&lt;p&gt;Hello&lt;/p&gt;</p>");
}

#[test]
fn reading_time_scenario() {
    let text = vec!["word"; 400].join(" ");
    assert_eq!(estimate_minutes(&text), 2);
}

#[test]
fn empty_document_scenario() {
    let doc = decode(r#"{"type":"doc","content":[]}"#).unwrap();
    assert_eq!(extract_plain_text(&doc, 160), "");
    assert_eq!(render(&doc), "");
    assert!(extract_headings(&doc).is_empty());
    assert_eq!(estimate_minutes(&plain_text(&doc)), 1);
}

#[test]
fn round_trip() {
    let doc = post();
    assert_eq!(decode(&encode(&doc).unwrap()).unwrap(), doc);
}

#[test]
fn excerpt_bound() {
    let doc = post();
    for max_length in [0, 1, 5, 20, 60, 500] {
        let excerpt = extract_plain_text(&doc, max_length);
        assert!(excerpt.chars().count() <= max_length + ELLIPSIS.chars().count());
    }
}

#[test]
fn unknown_nodes_render_like_missing_ones() {
    let mut with = serde_json::to_value(post()).unwrap();
    with["content"]
        .as_array_mut()
        .unwrap()
        .insert(2, json!({"type": "youtube", "attrs": {"src": "https://youtu.be/x"}}));
    let with = decode(&with.to_string()).unwrap();
    assert_eq!(render(&with), render(&post()));
}

#[test]
fn double_encoded_views() {
    let once = encode(&post()).unwrap();
    let twice = serde_json::to_string(&once).unwrap();
    let options = ViewOptions::default();
    assert_eq!(
        DerivedViews::derive(&twice, &options),
        DerivedViews::derive(&once, &options)
    );
}

#[test]
fn text_only_quote_and_excerpt_spacing() {
    let doc = decode(
        r#"{"type":"doc","content":[
            {"type":"blockquote","content":[{"type":"text","text":"opkg update"},{"type":"youtube"}]},
            {"type":"paragraph","content":[{"type":"text","text":"Hello"},{"type":"text","text":"world","marks":[{"type":"bold"}]}]}
        ]}"#,
    )
    .unwrap();
    let html = render(&doc);
    assert!(
        html.contains(r#"<code class="language-bash">opkg update</code>"#),
        "{}",
        html
    );
    assert_eq!(extract_plain_text(&doc, 100), "opkg update Hello world");
}
