//! Sequential, read-only token cursor over a snapshot.

use crate::classify::ClassifiedSpan;
use crate::snapshot::TextSnapshot;

/// A monotonic position in one snapshot plus the classified span covering it.
///
/// The cursor jumps over whole spans, except for coalesced classes (punctuation) and
/// unclassified text, which it walks one character at a time. That way a span such as `"]]"`
/// is seen as two closing brackets.
#[derive(Debug)]
pub struct TokenCursor<'a> {
    snapshot: &'a TextSnapshot,
    /// Sorted, non-overlapping, non-empty spans.
    spans: Vec<ClassifiedSpan>,
    /// Index of the first span starting at or after `position`.
    next: usize,
    position: usize,
    current: Option<ClassifiedSpan>,
}

impl<'a> TokenCursor<'a> {
    /// Create a cursor at offset 0.
    ///
    /// Spans are sorted; empty spans, spans past the end of the snapshot and spans overlapping
    /// an earlier span are dropped.
    pub fn new(snapshot: &'a TextSnapshot, mut spans: Vec<ClassifiedSpan>) -> Self {
        let len = snapshot.len_chars();
        spans.sort_by_key(|s| (s.span.start, s.span.end));

        let mut sanitized = Vec::with_capacity(spans.len());
        let mut covered = 0usize;
        for span in spans {
            if span.span.is_empty() || span.span.end > len || span.span.start < covered {
                continue;
            }
            covered = span.span.end;
            sanitized.push(span);
        }

        let mut cursor = Self {
            snapshot,
            spans: sanitized,
            next: 0,
            position: 0,
            current: None,
        };
        cursor.sync_span();
        cursor
    }

    /// The snapshot being read.
    pub fn snapshot(&self) -> &'a TextSnapshot {
        self.snapshot
    }

    /// Returns `true` once the cursor has reached the end of the text.
    pub fn at_end(&self) -> bool {
        self.position >= self.snapshot.len_chars()
    }

    /// Current character offset.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The classified span covering the current position, if any.
    pub fn current_span(&self) -> Option<&ClassifiedSpan> {
        self.current.as_ref()
    }

    /// The character under the cursor.
    pub fn current_char(&self) -> Option<char> {
        self.snapshot.char_at(self.position)
    }

    /// Text of the current span.
    pub fn current_text(&self) -> Option<String> {
        self.current.map(|span| self.snapshot.slice(span.span))
    }

    /// Move to the next token boundary.
    ///
    /// Returns `false` (and does nothing) if the cursor is already at the end.
    pub fn advance(&mut self) -> bool {
        if self.at_end() {
            return false;
        }

        self.position = match self.current {
            Some(span) if !span.class.is_coalesced() => span.span.end,
            _ => self.position + 1,
        };
        self.sync_span();
        true
    }

    fn sync_span(&mut self) {
        while self
            .spans
            .get(self.next)
            .is_some_and(|span| span.span.start < self.position)
        {
            self.next += 1;
        }

        match self.spans.get(self.next) {
            Some(span) if span.span.start == self.position => {
                self.current = Some(*span);
                self.next += 1;
            }
            _ => {
                if self
                    .current
                    .is_some_and(|span| self.position >= span.span.end)
                {
                    self.current = None;
                }
            }
        }
    }
}
