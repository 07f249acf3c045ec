//! Block/Run Document Tree
//!
//! [`EditorDoc`] models the editor's state as a flat list of blocks
//! (paragraphs), each holding text runs with inline marks. Runs split at
//! mark boundaries and adjacent runs with identical marks coalesce, so the
//! tree stays in the same normal form the editing UI produces.

use serde::{Deserialize, Serialize};

use crate::document::{html, Editor, MarkedRun};

/// Attributes of an inline link mark
///
/// `href` routes navigation to the opposing node; `target` carries the id of
/// the anchor the mark represents. Reconciliation discovers anchors in the
/// document through `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMark {
    pub href: String,
    pub target: String,
}

impl LinkMark {
    pub fn new(href: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: target.into(),
        }
    }
}

/// Inline formatting marks supported by the editing UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Highlight,
    Code,
    Link(LinkMark),
}

impl Mark {
    /// Whether this is a link mark
    pub fn is_link(&self) -> bool {
        matches!(self, Mark::Link(_))
    }
}

/// A run of text sharing one mark set
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub marks: Vec<Mark>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }

    /// The link mark on this run, if any
    pub fn link(&self) -> Option<&LinkMark> {
        self.marks.iter().find_map(|mark| match mark {
            Mark::Link(link) => Some(link),
            _ => None,
        })
    }

    /// Number of characters in the run
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A paragraph-level block of runs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub runs: Vec<TextRun>,
}

impl Block {
    pub fn new(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }
}

/// The built-in [`Editor`] implementation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorDoc {
    blocks: Vec<Block>,
}

impl EditorDoc {
    /// An empty document (no blocks)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut doc = Self { blocks };
        doc.normalize();
        doc
    }

    /// Parse a document from persisted node content HTML
    pub fn from_html(content: &str) -> Self {
        html::parse(content)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The characters covered by the inclusive position range `[from, to]`.
    ///
    /// Block boundaries contribute nothing to the output; the result is the
    /// live substring an extent at those positions covers.
    pub fn text_in_positions(&self, from: usize, to: usize) -> String {
        let mut out = String::new();
        if to < from {
            return out;
        }
        let mut pos = 0;
        for block in &self.blocks {
            pos += 1;
            for run in &block.runs {
                for ch in run.text.chars() {
                    if pos >= from && pos <= to {
                        out.push(ch);
                    }
                    pos += 1;
                }
            }
            pos += 1;
        }
        out
    }

    /// Coalesce adjacent runs with identical marks and drop empty runs
    fn normalize(&mut self) {
        for block in &mut self.blocks {
            block.runs = merge_adjacent(std::mem::take(&mut block.runs));
        }
    }

    /// Rewrite the runs overlapping `[from, to]`, replacing the mark set of
    /// the covered segment with `edit(marks)`.
    fn edit_marks_in_range(&mut self, from: usize, to: usize, edit: &dyn Fn(&[Mark]) -> Vec<Mark>) {
        if to < from {
            return;
        }
        let mut pos = 0;
        for block in &mut self.blocks {
            pos += 1;
            let mut rewritten = Vec::with_capacity(block.runs.len());
            for run in block.runs.drain(..) {
                let len = run.text.chars().count();
                if len == 0 {
                    continue;
                }
                let span_start = pos;
                let span_end = pos + len - 1;
                pos += len;

                if span_end < from || span_start > to {
                    rewritten.push(run);
                    continue;
                }

                let sel_start = from.max(span_start) - span_start;
                let sel_end = to.min(span_end) - span_start;
                let (pre, mid, post) = split3(&run.text, sel_start, sel_end);

                if !pre.is_empty() {
                    rewritten.push(TextRun::marked(pre, run.marks.clone()));
                }
                rewritten.push(TextRun::marked(mid, edit(&run.marks)));
                if !post.is_empty() {
                    rewritten.push(TextRun::marked(post, run.marks));
                }
            }
            block.runs = merge_adjacent(rewritten);
            pos += 1;
        }
    }
}

impl Editor for EditorDoc {
    fn walk(&self) -> Box<dyn Iterator<Item = MarkedRun> + '_> {
        Box::new(DocWalk {
            doc: self,
            block: 0,
            run: 0,
            pos: 0,
        })
    }

    fn set_link_mark(&mut self, from: usize, to: usize, mark: LinkMark) {
        self.edit_marks_in_range(from, to, &|marks| {
            let mut next: Vec<Mark> = marks.iter().filter(|m| !m.is_link()).cloned().collect();
            next.push(Mark::Link(mark.clone()));
            next
        });
    }

    fn unset_link_mark(&mut self, from: usize, to: usize) {
        self.edit_marks_in_range(from, to, &|marks| {
            marks.iter().filter(|m| !m.is_link()).cloned().collect()
        });
    }

    fn to_html(&self) -> String {
        html::serialize(self)
    }
}

/// Walk cursor over an [`EditorDoc`]
struct DocWalk<'a> {
    doc: &'a EditorDoc,
    block: usize,
    run: usize,
    pos: usize,
}

impl Iterator for DocWalk<'_> {
    type Item = MarkedRun;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let block = self.doc.blocks.get(self.block)?;
            if self.run == 0 {
                // block-open boundary
                self.pos += 1;
            }
            match block.runs.get(self.run) {
                Some(run) => {
                    self.run += 1;
                    let position = self.pos;
                    self.pos += run.char_len();
                    if run.text.is_empty() {
                        continue;
                    }
                    return Some(MarkedRun {
                        text: run.text.clone(),
                        position,
                        link: run.link().cloned(),
                    });
                }
                None => {
                    // block-close boundary
                    self.pos += 1;
                    self.block += 1;
                    self.run = 0;
                }
            }
        }
    }
}

fn merge_adjacent(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.marks == run.marks => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    merged
}

/// Split `text` into `[0, a)`, `[a, b]`, `(b, ..]` by character index
fn split3(text: &str, a: usize, b: usize) -> (String, String, String) {
    let start = byte_of_char(text, a);
    let end = byte_of_char(text, b + 1);
    (
        text[..start].to_string(),
        text[start..end].to_string(),
        text[end..].to_string(),
    )
}

fn byte_of_char(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}
