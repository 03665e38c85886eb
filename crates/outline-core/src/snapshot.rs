//! Versioned text snapshots.
//!
//! A [`TextSnapshot`] is an immutable, cheaply clonable view of a document at one version,
//! backed by a Rope (O(log N) line access). Offsets are **character offsets** (Unicode scalar
//! values), and line numbers are zero-based.
//!
//! Snapshots are produced by a single-writer [`TextBuffer`]. Each edit records a
//! [`TextDelta`] so spans computed on an older snapshot can be translated onto a newer one.

use crate::delta::{TextDelta, TextDeltaEdit};
use crate::error::OutlineError;
use crate::text::is_line_break;
use ropey::Rope;
use std::collections::VecDeque;
use std::sync::Arc;

/// Default number of deltas a [`TextBuffer`] keeps for span translation.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// A half-open character span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextSpan {
    /// Start character offset (inclusive).
    pub start: usize,
    /// End character offset (exclusive).
    pub end: usize,
}

impl TextSpan {
    /// Create a span; the bounds are ordered so that `start <= end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// An empty span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if the span contains `pos`.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Check if `other` lies entirely within this span.
    pub fn contains_span(&self, other: &TextSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if two spans overlap.
    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The smallest span covering both spans.
    pub fn cover(&self, other: &TextSpan) -> TextSpan {
        TextSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// An immutable, versioned text snapshot.
#[derive(Debug, Clone)]
pub struct TextSnapshot {
    rope: Rope,
    version: u64,
    /// Consecutive deltas ending at this version (oldest first).
    history: Arc<[Arc<TextDelta>]>,
}

impl TextSnapshot {
    /// Create a version-0 snapshot from text.
    pub fn new(text: &str) -> Self {
        Self::with_version(text, 0)
    }

    /// Create a snapshot with an explicit version and no delta history.
    pub fn with_version(text: &str, version: u64) -> Self {
        Self {
            rope: Rope::from_str(text),
            version,
            history: Arc::from(Vec::new()),
        }
    }

    /// Snapshot version (monotonically increasing per buffer).
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Get total character count
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns `true` if the snapshot holds no text.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// The span covering the whole document.
    pub fn full_span(&self) -> TextSpan {
        TextSpan::new(0, self.len_chars())
    }

    /// Character at `offset`, if in bounds.
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.rope.get_char(offset)
    }

    /// Get complete text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of `span`, clamped to the document.
    pub fn slice(&self, span: TextSpan) -> String {
        let (start, end) = self.clamp(span);
        self.rope.slice(start..end).to_string()
    }

    /// Returns `true` if `span` (clamped) contains only whitespace.
    pub fn is_whitespace(&self, span: TextSpan) -> bool {
        let (start, end) = self.clamp(span);
        self.rope.slice(start..end).chars().all(char::is_whitespace)
    }

    /// Get total line count (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line containing `offset` (clamped to the document).
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    /// Start offset of `line` (clamped to the last line).
    pub fn line_start(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.last_line()))
    }

    /// Offset of the end of `line`, excluding its line break.
    pub fn line_end(&self, line: usize) -> usize {
        let start = self.line_start(line);
        let mut end = self.line_end_including_break(line);

        // CRLF counts as one break; any other break char stands alone.
        if end > start && self.rope.char(end - 1) == '\n' {
            end -= 1;
            if end > start && self.rope.char(end - 1) == '\r' {
                end -= 1;
            }
        } else if end > start && is_line_break(self.rope.char(end - 1)) {
            end -= 1;
        }
        end
    }

    /// Offset of the end of `line`, including its line break.
    pub fn line_end_including_break(&self, line: usize) -> usize {
        let line = line.min(self.last_line());
        if line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line + 1)
        } else {
            self.rope.len_chars()
        }
    }

    /// Get text of the specified line (excluding the line break)
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        Some(
            self.rope
                .slice(self.line_start(line)..self.line_end(line))
                .to_string(),
        )
    }

    /// Returns `true` if the line is empty or contains only whitespace.
    pub fn is_blank_line(&self, line: usize) -> bool {
        if line >= self.rope.len_lines() {
            return true;
        }
        self.is_whitespace(TextSpan::new(self.line_start(line), self.line_end(line)))
    }

    /// Translate a span expressed in snapshot version `from_version` onto this snapshot.
    ///
    /// Tracking is edge-exclusive: text inserted exactly at either edge stays outside the span.
    pub fn translate_span(&self, span: TextSpan, from_version: u64) -> Result<TextSpan, OutlineError> {
        if from_version == self.version {
            return Ok(span);
        }

        let gap = OutlineError::VersionGap {
            from: from_version,
            to: self.version,
        };
        if from_version > self.version {
            return Err(gap);
        }

        let Some(first) = self
            .history
            .iter()
            .position(|delta| delta.before_version == from_version)
        else {
            return Err(gap);
        };

        let mut span = span;
        let mut version = from_version;
        for delta in &self.history[first..] {
            if delta.before_version != version {
                return Err(gap);
            }
            span = delta.map_span(span);
            version += 1;
        }

        if version == self.version {
            Ok(span)
        } else {
            Err(gap)
        }
    }

    fn last_line(&self) -> usize {
        self.rope.len_lines().saturating_sub(1)
    }

    fn clamp(&self, span: TextSpan) -> (usize, usize) {
        let len = self.rope.len_chars();
        let end = span.end.min(len);
        (span.start.min(end), end)
    }
}

/// Single-writer owner of the current snapshot.
///
/// Every edit produces a new [`TextSnapshot`] with `version + 1` and records a [`TextDelta`]
/// in a bounded history, which snapshots carry for span translation.
#[derive(Debug)]
pub struct TextBuffer {
    current: TextSnapshot,
    history: VecDeque<Arc<TextDelta>>,
    history_limit: usize,
}

impl TextBuffer {
    /// Create a buffer whose first snapshot has version 0.
    pub fn new(text: &str) -> Self {
        Self {
            current: TextSnapshot::new(text),
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Limit how many deltas are retained (at least one).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
        self
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> TextSnapshot {
        self.current.clone()
    }

    /// Current version.
    pub fn version(&self) -> u64 {
        self.current.version
    }

    /// Insert `text` at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<TextSnapshot, OutlineError> {
        self.replace(TextSpan::empty(offset), text)
    }

    /// Delete the characters in `span`.
    pub fn delete(&mut self, span: TextSpan) -> Result<TextSnapshot, OutlineError> {
        self.replace(span, "")
    }

    /// Replace the characters in `span` with `text`.
    pub fn replace(&mut self, span: TextSpan, text: &str) -> Result<TextSnapshot, OutlineError> {
        let len = self.current.len_chars();
        if span.start > span.end || span.end > len {
            return Err(OutlineError::SpanOutOfBounds {
                start: span.start,
                end: span.end,
                len,
            });
        }

        let mut rope = self.current.rope.clone();
        let deleted_text = rope.slice(span.start..span.end).to_string();
        rope.remove(span.start..span.end);
        rope.insert(span.start, text);

        let delta = TextDelta {
            before_version: self.current.version,
            before_char_count: len,
            after_char_count: rope.len_chars(),
            edits: vec![TextDeltaEdit {
                start: span.start,
                deleted_text,
                inserted_text: text.to_string(),
            }],
        };

        self.history.push_back(Arc::new(delta));
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }

        self.current = TextSnapshot {
            rope,
            version: self.current.version + 1,
            history: self.history.iter().cloned().collect(),
        };
        Ok(self.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_queries() {
        let snapshot = TextSnapshot::new("ABC\r\nDEF\n\nGHI");

        assert_eq!(snapshot.line_count(), 4);
        assert_eq!(snapshot.line_of_offset(0), 0);
        assert_eq!(snapshot.line_of_offset(5), 1);
        assert_eq!(snapshot.line_start(1), 5);
        assert_eq!(snapshot.line_end(0), 3); // excludes "\r\n"
        assert_eq!(snapshot.line_end_including_break(0), 5);
        assert_eq!(snapshot.line_text(1).as_deref(), Some("DEF"));
        assert!(snapshot.is_blank_line(2));
        assert_eq!(snapshot.line_end(3), snapshot.len_chars());
        assert_eq!(snapshot.line_text(4), None);
    }

    #[test]
    fn test_empty_document_has_one_line() {
        let snapshot = TextSnapshot::new("");
        assert_eq!(snapshot.line_count(), 1);
        assert_eq!(snapshot.line_end(0), 0);
        assert!(snapshot.is_blank_line(0));
    }

    #[test]
    fn test_utf8_cjk_offsets_are_chars() {
        let snapshot = TextSnapshot::new("你好\n世界");
        assert_eq!(snapshot.len_chars(), 5);
        assert_eq!(snapshot.line_of_offset(3), 1);
        assert_eq!(snapshot.char_at(3), Some('世'));
        assert_eq!(snapshot.slice(TextSpan::new(3, 5)), "世界");
    }

    #[test]
    fn test_buffer_versions_and_translation() {
        let mut buffer = TextBuffer::new("0123456789");
        let span = TextSpan::new(2, 6);

        buffer.insert(4, "xx").unwrap();
        let snapshot = buffer.delete(TextSpan::new(0, 1)).unwrap();

        assert_eq!(snapshot.version(), 2);
        assert_eq!(snapshot.text(), "123xx456789");
        assert_eq!(snapshot.translate_span(span, 0), Ok(TextSpan::new(1, 7)));
        assert_eq!(snapshot.translate_span(span, 2), Ok(span));
    }

    #[test]
    fn test_translation_beyond_history_fails() {
        let mut buffer = TextBuffer::new("abc").with_history_limit(1);
        buffer.insert(0, "x").unwrap();
        let snapshot = buffer.insert(0, "y").unwrap();

        assert_eq!(
            snapshot.translate_span(TextSpan::new(0, 1), 0),
            Err(OutlineError::VersionGap { from: 0, to: 2 })
        );
        assert!(snapshot.translate_span(TextSpan::new(0, 1), 1).is_ok());
        assert!(snapshot.translate_span(TextSpan::new(0, 1), 3).is_err());
    }

    #[test]
    fn test_reversed_span_edit_is_rejected() {
        let mut buffer = TextBuffer::new("abcdef");
        assert_eq!(
            buffer.replace(TextSpan { start: 4, end: 2 }, "x").unwrap_err(),
            OutlineError::SpanOutOfBounds {
                start: 4,
                end: 2,
                len: 6
            }
        );
        assert_eq!(buffer.version(), 0);
        assert_eq!(buffer.snapshot().text(), "abcdef");
    }

    #[test]
    fn test_out_of_bounds_edit() {
        let mut buffer = TextBuffer::new("abc");
        assert_eq!(
            buffer.delete(TextSpan::new(1, 9)).unwrap_err(),
            OutlineError::SpanOutOfBounds {
                start: 1,
                end: 9,
                len: 3
            }
        );
        assert_eq!(buffer.version(), 0);
    }

    proptest::proptest! {
        #[test]
        fn prop_edits_outside_span_preserve_its_text(
            text in "[a-z\\n]{1,60}",
            start in 0usize..60,
            len in 0usize..20,
            at in 0usize..80,
            inserted in "[x\\n]{0,5}",
        ) {
            let total = text.chars().count();
            let span = TextSpan::new(start.min(total), (start + len).min(total));
            let at = at.min(total);
            proptest::prop_assume!(at <= span.start || at >= span.end);

            let mut buffer = TextBuffer::new(&text);
            let before = buffer.snapshot().slice(span);
            let snapshot = buffer.insert(at, &inserted).unwrap();
            let moved = snapshot.translate_span(span, 0).unwrap();

            proptest::prop_assert_eq!(snapshot.slice(moved), before);
        }
    }

    #[test]
    fn test_span_cover_and_overlap() {
        let a = TextSpan::new(2, 5);
        let b = TextSpan::new(4, 9);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&TextSpan::new(5, 6)));
        assert_eq!(a.cover(&b), TextSpan::new(2, 9));
        assert!(TextSpan::new(0, 10).contains_span(&a));
        assert_eq!(TextSpan::new(7, 3), TextSpan::new(3, 7));
    }
}
