//! Minimal brace/comment dialect shared by unit tests.

use crate::builder::{OutlinePolicy, RegionBuilder};
use crate::classify::{ClassifiedSpan, TokenClass};
use crate::cursor::TokenCursor;
use crate::region::{Region, RegionKind, RegionTree};
use crate::snapshot::{TextSnapshot, TextSpan};

/// `{}` blocks, `[]` arrays and `//` line comments; counts hook calls.
#[derive(Debug, Default)]
pub(crate) struct TestPolicy {
    pub(crate) found: usize,
    pub(crate) levels: usize,
}

impl OutlinePolicy for TestPolicy {
    fn try_start(&mut self, cursor: &TokenCursor<'_>) -> Option<Region> {
        let span = cursor.current_span()?;
        match span.class {
            TokenClass::Comment if span.span.start == cursor.position() => {
                Some(Region::new(span.span.start, RegionKind::Comment).with_end(span.span.end))
            }
            TokenClass::Punctuation => match cursor.current_char()? {
                '{' => Some(Region::new(cursor.position(), RegionKind::Block)),
                '[' => Some(Region::new(cursor.position(), RegionKind::Array)),
                _ => None,
            },
            _ => None,
        }
    }

    fn try_close(&self, region: &Region, cursor: &TokenCursor<'_>) -> Option<usize> {
        let span = cursor.current_span()?;
        if span.class != TokenClass::Punctuation {
            return None;
        }
        match (region.kind(), cursor.current_char()?) {
            (RegionKind::Block, '}') | (RegionKind::Array, ']') => Some(cursor.position() + 1),
            _ => None,
        }
    }

    fn on_region_found(&mut self, _region: &mut Region) {
        self.found += 1;
    }

    fn begin_level(&mut self) {
        self.levels += 1;
    }
}

/// Classify runs of brackets as punctuation and `//` to end of line as comments.
pub(crate) fn classify(snapshot: &TextSnapshot) -> Vec<ClassifiedSpan> {
    let chars: Vec<char> = snapshot.text().chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let start = i;
        if chars[i] == '/' && chars.get(i + 1) == Some(&'/') {
            while i < chars.len() && chars[i] != '\n' && chars[i] != '\r' {
                i += 1;
            }
            spans.push(ClassifiedSpan::new(TextSpan::new(start, i), TokenClass::Comment));
        } else if "{}[]".contains(chars[i]) {
            while i < chars.len() && "{}[]".contains(chars[i]) {
                i += 1;
            }
            spans.push(ClassifiedSpan::new(TextSpan::new(start, i), TokenClass::Punctuation));
        } else {
            i += 1;
        }
    }
    spans
}

pub(crate) fn build_with(policy: &mut TestPolicy, text: &str) -> RegionTree {
    let snapshot = TextSnapshot::new(text);
    let mut cursor = TokenCursor::new(&snapshot, classify(&snapshot));
    RegionBuilder::new(policy).build(&mut cursor)
}

pub(crate) fn build(text: &str) -> RegionTree {
    build_with(&mut TestPolicy::default(), text)
}
