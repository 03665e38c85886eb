//! The classification boundary.
//!
//! Tokenization is not part of the outlining engine. A host-provided [`Classifier`] turns a
//! snapshot into [`ClassifiedSpan`]s (lexical category + character range); the
//! [`TokenCursor`](crate::TokenCursor) walks them.

use crate::snapshot::{TextSnapshot, TextSpan};
use std::convert::Infallible;
use std::fmt::Display;

/// Lexical category of a classified span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Structural punctuation (`{`, `}`, `[`, `]`, `;`, ...).
    ///
    /// Classifiers may coalesce several punctuation characters (`"]]"`, `"};"`) into one span,
    /// so the cursor walks punctuation one character at a time.
    Punctuation,
    /// Operators (`+`, `=>`, `&&`, ...).
    Operator,
    /// Line or block comment, including its delimiters.
    Comment,
    /// Preprocessor-style directive line (`#region`, `#if`, ...).
    Directive,
    /// Language keyword.
    Keyword,
    /// Identifier.
    Identifier,
    /// String or character literal.
    String,
    /// Numeric literal.
    Number,
    /// Anything else the classifier chose to tag.
    Other,
}

impl TokenClass {
    /// Whether spans of this class may contain several independent tokens.
    pub fn is_coalesced(self) -> bool {
        matches!(self, Self::Punctuation)
    }
}

/// A classified range of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassifiedSpan {
    /// Character range of the token.
    pub span: TextSpan,
    /// Lexical category.
    pub class: TokenClass,
}

impl ClassifiedSpan {
    /// Create a classified span.
    pub fn new(span: TextSpan, class: TokenClass) -> Self {
        Self { span, class }
    }
}

/// A tokenization service.
///
/// Implementations return spans in any order; empty, out-of-bounds and overlapping spans are
/// dropped by the cursor. A failing classifier is not fatal: the outline is built as if the
/// text were unclassified.
pub trait Classifier {
    /// The error type returned by [`Classifier::classify`].
    type Error: Display;

    /// Classify the whole snapshot.
    fn classify(&self, snapshot: &TextSnapshot) -> Result<Vec<ClassifiedSpan>, Self::Error>;
}

impl<F> Classifier for F
where
    F: Fn(&TextSnapshot) -> Vec<ClassifiedSpan>,
{
    type Error = Infallible;

    fn classify(&self, snapshot: &TextSnapshot) -> Result<Vec<ClassifiedSpan>, Self::Error> {
        Ok(self(snapshot))
    }
}
