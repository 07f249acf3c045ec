//! Node Content HTML Codec
//!
//! Text node content persists as a small HTML dialect: paragraphs with the
//! inline mark tags the editing UI produces. This module converts between
//! that dialect and [`EditorDoc`].
//!
//! Supported tags: `<p>`, `<a href target>`, `<strong>`, `<em>`, `<u>`,
//! `<mark>`, `<code>`. Unknown tags are dropped while their text content is
//! kept, so foreign markup degrades to plain text instead of failing a load.

use std::sync::OnceLock;

use regex::Regex;

use crate::document::doc::{Block, EditorDoc, LinkMark, Mark, TextRun};

// Attribute pairs inside a tag: name="value"
const ATTR_PATTERN: &str = r#"([a-zA-Z-]+)\s*=\s*"([^"]*)""#;

fn attr_regex() -> &'static Regex {
    static ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
    ATTR_REGEX.get_or_init(|| Regex::new(ATTR_PATTERN).expect("attribute pattern compiles"))
}

/// Serialize a document to node content HTML
pub fn serialize(doc: &EditorDoc) -> String {
    let mut out = String::new();
    for block in doc.blocks() {
        out.push_str("<p>");
        for run in &block.runs {
            let ordered = canonical_order(&run.marks);
            for mark in &ordered {
                out.push_str(&open_tag(mark));
            }
            out.push_str(&escape(&run.text));
            for mark in ordered.iter().rev() {
                out.push_str(close_tag(mark));
            }
        }
        out.push_str("</p>");
    }
    out
}

/// Parse node content HTML into a document
///
/// The parser is lenient: unbalanced or unknown tags never fail, and text
/// outside any paragraph opens an implicit one.
pub fn parse(content: &str) -> EditorDoc {
    let mut blocks: Vec<Block> = Vec::new();
    let mut runs: Vec<TextRun> = Vec::new();
    let mut in_block = false;
    let mut marks: Vec<Mark> = Vec::new();

    let mut chars = content.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        if ch == '<' {
            let mut end = None;
            for (idx, c) in chars.by_ref() {
                if c == '>' {
                    end = Some(idx);
                    break;
                }
            }
            let Some(end) = end else { break };
            let tag = &content[start + 1..end];
            apply_tag(tag, &mut blocks, &mut runs, &mut in_block, &mut marks);
        } else {
            let mut text = String::new();
            text.push(ch);
            while let Some((_, c)) = chars.peek() {
                if *c == '<' {
                    break;
                }
                text.push(*c);
                chars.next();
            }
            let decoded = unescape(&text);
            if decoded.is_empty() {
                continue;
            }
            if !in_block {
                in_block = true;
            }
            runs.push(TextRun::marked(decoded, marks.clone()));
        }
    }
    if in_block || !runs.is_empty() {
        blocks.push(Block::new(std::mem::take(&mut runs)));
    }

    EditorDoc::from_blocks(blocks)
}

fn apply_tag(
    tag: &str,
    blocks: &mut Vec<Block>,
    runs: &mut Vec<TextRun>,
    in_block: &mut bool,
    marks: &mut Vec<Mark>,
) {
    let closing = tag.starts_with('/');
    let body = tag.trim_start_matches('/').trim();
    let name = body
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if name == "p" {
        if closing {
            if *in_block {
                blocks.push(Block::new(std::mem::take(runs)));
                *in_block = false;
            }
        } else {
            if *in_block {
                // An unbalanced open closes the previous paragraph
                blocks.push(Block::new(std::mem::take(runs)));
            }
            *in_block = true;
        }
        marks.clear();
        return;
    }

    let mark = match name.as_str() {
        "a" => {
            if closing {
                remove_last(marks, Mark::is_link);
                return;
            }
            let mut href = String::new();
            let mut target = String::new();
            for capture in attr_regex().captures_iter(body) {
                match &capture[1] {
                    "href" => href = unescape(&capture[2]),
                    "target" => target = unescape(&capture[2]),
                    _ => {}
                }
            }
            Some(Mark::Link(LinkMark { href, target }))
        }
        "strong" | "b" => Some(Mark::Bold),
        "em" | "i" => Some(Mark::Italic),
        "u" => Some(Mark::Underline),
        "mark" => Some(Mark::Highlight),
        "code" => Some(Mark::Code),
        _ => None,
    };

    let Some(mark) = mark else { return };
    if closing {
        let kind = std::mem::discriminant(&mark);
        remove_last(marks, |m| std::mem::discriminant(m) == kind);
    } else {
        marks.push(mark);
    }
}

fn remove_last(marks: &mut Vec<Mark>, matches: impl Fn(&Mark) -> bool) {
    if let Some(idx) = marks.iter().rposition(matches) {
        marks.remove(idx);
    }
}

/// Fixed nesting order so serialization is canonical: link outermost
fn canonical_order(marks: &[Mark]) -> Vec<Mark> {
    let mut ordered = Vec::with_capacity(marks.len());
    if let Some(link) = marks.iter().find(|m| m.is_link()) {
        ordered.push(link.clone());
    }
    for kind in [Mark::Bold, Mark::Italic, Mark::Underline, Mark::Highlight, Mark::Code] {
        if marks.contains(&kind) {
            ordered.push(kind);
        }
    }
    ordered
}

fn open_tag(mark: &Mark) -> String {
    match mark {
        Mark::Link(link) => format!(
            r#"<a href="{}" target="{}">"#,
            escape(&link.href),
            escape(&link.target)
        ),
        Mark::Bold => "<strong>".to_string(),
        Mark::Italic => "<em>".to_string(),
        Mark::Underline => "<u>".to_string(),
        Mark::Highlight => "<mark>".to_string(),
        Mark::Code => "<code>".to_string(),
    }
}

fn close_tag(mark: &Mark) -> &'static str {
    match mark {
        Mark::Link(_) => "</a>",
        Mark::Bold => "</strong>",
        Mark::Italic => "</em>",
        Mark::Underline => "</u>",
        Mark::Highlight => "</mark>",
        Mark::Code => "</code>",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();
    while let Some((start, ch)) = chars.next() {
        if ch != '&' {
            out.push(ch);
            continue;
        }
        let rest = &text[start..];
        let entity = rest.find(';').map(|end| &rest[..=end]);
        match entity {
            Some("&amp;") => out.push('&'),
            Some("&lt;") => out.push('<'),
            Some("&gt;") => out.push('>'),
            Some("&quot;") => out.push('"'),
            Some("&#39;") | Some("&apos;") => out.push('\''),
            _ => {
                out.push('&');
                continue;
            }
        }
        // Skip the consumed entity body
        let skip = entity.map(|e| e.chars().count() - 1).unwrap_or(0);
        for _ in 0..skip {
            chars.next();
        }
    }
    out
}
