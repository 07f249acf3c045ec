//! Tests for the node content HTML codec

use crate::document::doc::{Block, EditorDoc, LinkMark, Mark, TextRun};
use crate::document::{html, Editor};

#[test]
fn test_parse_single_paragraph() {
    let doc = EditorDoc::from_html("<p>Hello world</p>");

    assert_eq!(doc.blocks().len(), 1);
    assert_eq!(doc.blocks()[0].runs.len(), 1);
    assert_eq!(doc.blocks()[0].runs[0].text, "Hello world");
    assert!(doc.blocks()[0].runs[0].marks.is_empty());
}

#[test]
fn test_parse_link_mark_attributes() {
    let doc =
        EditorDoc::from_html(r#"<p>Hello <a href="/text.s" target="anchor.a1">world</a></p>"#);

    let runs = &doc.blocks()[0].runs;
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].text, "Hello ");
    let link = runs[1].link().expect("second run carries the link");
    assert_eq!(link.href, "/text.s");
    assert_eq!(link.target, "anchor.a1");
}

#[test]
fn test_parse_nested_formatting() {
    let doc = EditorDoc::from_html("<p><strong><em>both</em></strong> plain</p>");

    let runs = &doc.blocks()[0].runs;
    assert_eq!(runs[0].text, "both");
    assert!(runs[0].marks.contains(&Mark::Bold));
    assert!(runs[0].marks.contains(&Mark::Italic));
    assert_eq!(runs[1].text, " plain");
    assert!(runs[1].marks.is_empty());
}

#[test]
fn test_parse_multiple_paragraphs() {
    let doc = EditorDoc::from_html("<p>one</p><p>two</p>");

    assert_eq!(doc.blocks().len(), 2);
    assert_eq!(doc.blocks()[1].runs[0].text, "two");
}

#[test]
fn test_parse_entities() {
    let doc = EditorDoc::from_html("<p>a &amp; b &lt;c&gt; &quot;d&quot;</p>");

    assert_eq!(doc.blocks()[0].runs[0].text, r#"a & b <c> "d""#);
}

#[test]
fn test_parse_unknown_tags_keep_text() {
    let doc = EditorDoc::from_html("<p><span>kept</span></p>");

    assert_eq!(doc.blocks()[0].runs[0].text, "kept");
    assert!(doc.blocks()[0].runs[0].marks.is_empty());
}

#[test]
fn test_parse_bare_text_opens_implicit_block() {
    let doc = EditorDoc::from_html("loose text");

    assert_eq!(doc.blocks().len(), 1);
    assert_eq!(doc.blocks()[0].runs[0].text, "loose text");
}

#[test]
fn test_parse_empty_content() {
    let doc = EditorDoc::from_html("");

    assert!(doc.blocks().is_empty());
}

#[test]
fn test_serialize_escapes_text_and_attributes() {
    let doc = EditorDoc::from_blocks(vec![Block::new(vec![TextRun::marked(
        "a < b",
        vec![Mark::Link(LinkMark::new("/n?x=\"1\"", "anchor.a1"))],
    )])]);

    let html = html::serialize(&doc);
    assert!(html.contains("a &lt; b"));
    assert!(html.contains("href=\"/n?x=&quot;1&quot;\""));
}

#[test]
fn test_serialize_canonical_nesting_order() {
    let doc = EditorDoc::from_blocks(vec![Block::new(vec![TextRun::marked(
        "x",
        vec![Mark::Bold, Mark::Link(LinkMark::new("/n", "anchor.a1"))],
    )])]);

    // Link is always the outermost tag regardless of mark ordering
    assert_eq!(
        html::serialize(&doc),
        r#"<p><a href="/n" target="anchor.a1"><strong>x</strong></a></p>"#
    );
}

#[test]
fn test_round_trip_preserves_document() {
    let original = EditorDoc::from_blocks(vec![
        Block::new(vec![
            TextRun::plain("Hello "),
            TextRun::marked(
                "world",
                vec![Mark::Link(LinkMark::new("/text.s", "anchor.a1"))],
            ),
        ]),
        Block::new(vec![TextRun::marked("code", vec![Mark::Code])]),
    ]);

    let parsed = EditorDoc::from_html(&original.to_html());
    assert_eq!(parsed, original);
}

#[test]
fn test_round_trip_concrete_node_content() {
    let content = "<p>Hello world</p>";
    let doc = EditorDoc::from_html(content);

    assert_eq!(doc.to_html(), content);
}
