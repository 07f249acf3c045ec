//! Rich-Text Document Abstraction
//!
//! The anchor engine never talks to a concrete rich-text editor. It talks to
//! the [`Editor`] trait, whose read side produces a lazy, finite, restartable
//! sequence of `(text-run, absolute-start-position, link-mark)` triples in
//! document order, and whose write side can set or clear an inline link mark
//! over a position range and serialize the document to HTML. Any rich-text
//! representation satisfying that contract can back reconciliation and
//! projection.
//!
//! # Position numbering
//!
//! Positions count a running cursor through the document: entering a block
//! costs one position, every character costs one, leaving a block costs one.
//! The first character of the first paragraph therefore sits at position 1.
//! Anchor extents store `position - 1` (see [`crate::models::TextExtent`]).
//!
//! [`EditorDoc`] is the built-in implementation: a block/run tree with the
//! mark set of the editing UI (link, bold, italic, underline, highlight,
//! code) and an HTML codec for node content persistence.

pub mod doc;
pub mod html;

#[cfg(test)]
mod html_test;

pub use doc::{Block, EditorDoc, LinkMark, Mark, TextRun};

/// One text run surfaced by a document walk
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedRun {
    /// The run's text
    pub text: String,
    /// Absolute position of the run's first character
    pub position: usize,
    /// Link mark attached to the run, if any
    pub link: Option<LinkMark>,
}

/// Contract between the anchor engine and a rich-text editor
pub trait Editor {
    /// Walk every text run in document order with absolute positions.
    ///
    /// The sequence is finite and each call restarts from the top of the
    /// document.
    fn walk(&self) -> Box<dyn Iterator<Item = MarkedRun> + '_>;

    /// Apply a link mark over the inclusive position range `[from, to]`.
    ///
    /// Ranges outside the document are clamped; an empty range is a no-op.
    /// Any link mark already covering part of the range is replaced.
    fn set_link_mark(&mut self, from: usize, to: usize, mark: LinkMark);

    /// Clear link marks over the inclusive position range `[from, to]`.
    fn unset_link_mark(&mut self, from: usize, to: usize);

    /// Serialize the document to the HTML persisted as node content.
    fn to_html(&self) -> String;
}
