//! Anchor Extents
//!
//! An extent describes *where* inside its node an anchor attaches. Text
//! anchors carry a [`TextExtent`] locating a run of characters; an anchor on
//! a whole image node carries no extent at all (`Option<Extent>::None`).
//!
//! # Offset convention
//!
//! `start_character`/`end_character` are inclusive character offsets into the
//! plain-text projection of the node's rich content. They are one less than
//! the editor's internal position of the run (the editor numbers the first
//! character of the first block as position 1, because the block-open
//! boundary occupies position 0). Reconciliation derives offsets as
//! `position - 1`; projection applies marks over `[start + 1, end + 1]`.

use serde::{Deserialize, Serialize};

use crate::models::ValidationError;

/// Inclusive character range plus the text it covered when last reconciled
///
/// Invariant (restored by every reconciliation pass):
/// `end_character - start_character + 1 == text.chars().count()`, and `text`
/// equals the live substring at those offsets. A stale `text` is exactly the
/// condition that triggers an extent update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextExtent {
    pub text: String,
    pub start_character: usize,
    pub end_character: usize,
}

impl TextExtent {
    /// Extent covering `text` starting at character offset `start`
    pub fn covering(text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            end_character: start + len.saturating_sub(1),
            start_character: start,
            text,
        }
    }

    /// Number of characters covered
    pub fn char_len(&self) -> usize {
        self.end_character - self.start_character + 1
    }

    /// Check the offset/length invariant
    ///
    /// # Errors
    ///
    /// Rejects empty text, inverted bounds, and a bound span that disagrees
    /// with the text length. Store update paths run this before persisting.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::InvalidExtent(
                "text must be non-empty".to_string(),
            ));
        }
        if self.end_character < self.start_character {
            return Err(ValidationError::InvalidExtent(format!(
                "endCharacter {} precedes startCharacter {}",
                self.end_character, self.start_character
            )));
        }
        let len = self.text.chars().count();
        if self.char_len() != len {
            return Err(ValidationError::InvalidExtent(format!(
                "bounds cover {} characters but text has {}",
                self.char_len(),
                len
            )));
        }
        Ok(())
    }
}

/// Tagged extent union
///
/// Only text extents carry data today; whole-node (image) anchors store no
/// extent. The tag survives on the wire as `{"type": "text", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Extent {
    Text(TextExtent),
}

impl Extent {
    /// The text extent, if this is one
    pub fn as_text(&self) -> Option<&TextExtent> {
        match self {
            Extent::Text(extent) => Some(extent),
        }
    }

    /// Validate the contained extent
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Extent::Text(extent) => extent.validate(),
        }
    }
}
