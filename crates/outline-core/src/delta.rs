//! Structured text change deltas.
//!
//! Region spans are computed against one snapshot and compared against regions computed on a
//! later one. To compare them, the old spans are translated through the deltas that separate
//! the two versions, without diffing old/new text.
//!
//! Deltas are expressed in **character offsets** (Unicode scalar values).

use crate::snapshot::TextSpan;

/// A single text edit expressed in character offsets.
///
/// Semantics:
/// - `start` is a character offset in the document **at the time this edit is applied**.
/// - The deleted range is defined by the length (in `char`s) of `deleted_text`.
/// - Edits inside a [`TextDelta`] must be applied **in order** to transform the "before" document
///   into the "after" document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        self.deleted_text.chars().count()
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        self.inserted_text.chars().count()
    }

    /// Exclusive end character offset in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// Map a position through this edit.
    ///
    /// `positive` tracking moves a position sitting at the edit point to the end of the
    /// inserted text; negative tracking leaves it before the inserted text.
    pub fn map_offset(&self, pos: usize, positive: bool) -> usize {
        let start = self.start;
        let end = self.end();
        let inserted = self.inserted_len();

        if pos < start {
            pos
        } else if pos > end || (pos == end && end > start) {
            // After the replaced range: shift by the net length change.
            pos + inserted - (end - start)
        } else if positive {
            start + inserted
        } else {
            start
        }
    }

    /// Map a span through this edit with edge-exclusive tracking.
    ///
    /// Inserting at either edge does not grow the span; a span swallowed by a deletion
    /// collapses to an empty span.
    pub fn map_span(&self, span: TextSpan) -> TextSpan {
        let start = self.map_offset(span.start, true);
        let end = self.map_offset(span.end, false).max(start);
        TextSpan { start, end }
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    /// Snapshot version the edits apply to (the result has `before_version + 1`).
    pub before_version: u64,
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Ordered list of edits that transforms the "before" document into the "after" document.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Map a span from the "before" document onto the "after" document.
    pub fn map_span(&self, span: TextSpan) -> TextSpan {
        self.edits
            .iter()
            .fold(span, |span, edit| edit.map_span(span))
    }
}
