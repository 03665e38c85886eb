#![warn(missing_docs)]
//! `outline-core-classify` - Simple (regex-based) token classification for `outline-core`.
//!
//! This crate is intended for hosts without a real tokenizer (tests, benches, simple tools).
//! It is *not* a lexer for any particular language: comments, directives, strings, numbers,
//! identifiers and brackets are recognized by a handful of regular expressions.

use outline_core::{ClassifiedSpan, Classifier, TextSnapshot, TextSpan, TokenClass};
use regex::Regex;
use std::collections::HashSet;
use std::convert::Infallible;

/// A single classification rule.
#[derive(Debug, Clone)]
pub struct RegexRule {
    pattern: String,
    class: TokenClass,
}

impl RegexRule {
    /// Create a rule; the pattern is validated immediately.
    pub fn new(pattern: &str, class: TokenClass) -> Result<Self, regex::Error> {
        Regex::new(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            class,
        })
    }

    /// The class assigned to matches.
    pub fn class(&self) -> TokenClass {
        self.class
    }

    /// The rule's pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// A regex-based classifier.
///
/// Rules are tried left to right at each position and the first matching rule wins, so
/// comment rules must come before operator rules. Identifiers listed as keywords are
/// reported as [`TokenClass::Keyword`].
#[derive(Debug, Clone)]
pub struct RegexClassifier {
    scanner: Regex,
    /// Capture group index and class of each rule.
    groups: Vec<(usize, TokenClass)>,
    keywords: HashSet<String>,
}

impl RegexClassifier {
    /// Combine `rules` into one scanner.
    pub fn new(rules: Vec<RegexRule>) -> Result<Self, regex::Error> {
        let pattern = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("(?P<r{i}>{})", rule.pattern))
            .collect::<Vec<_>>()
            .join("|");
        let scanner = Regex::new(&pattern)?;

        let groups = rules
            .iter()
            .enumerate()
            .filter_map(|(i, rule)| {
                let name = format!("r{i}");
                scanner
                    .capture_names()
                    .position(|group| group == Some(name.as_str()))
                    .map(|index| (index, rule.class))
            })
            .collect();

        Ok(Self {
            scanner,
            groups,
            keywords: HashSet::new(),
        })
    }

    /// Report these identifiers as keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Rules for C-like brace languages: `//` and `/* */` comments, `#` directives, quoted
    /// strings, numbers, identifiers, brackets and operators.
    pub fn c_like() -> Result<Self, regex::Error> {
        Self::new(vec![
            RegexRule::new(r"//[^\r\n]*", TokenClass::Comment)?,
            RegexRule::new(r"/\*(?s:.*?)(?:\*/|\z)", TokenClass::Comment)?,
            RegexRule::new(r"#[^\r\n]*", TokenClass::Directive)?,
            RegexRule::new(r#""(?:\\.|[^"\\\r\n])*"?"#, TokenClass::String)?,
            RegexRule::new(r"'(?:\\.|[^'\\\r\n])*'?", TokenClass::String)?,
            RegexRule::new(r"`(?:\\.|[^`\\])*`?", TokenClass::String)?,
            RegexRule::new(r"\d[\w.]*", TokenClass::Number)?,
            RegexRule::new(r"[\p{L}_$][\p{L}\p{N}_$]*", TokenClass::Identifier)?,
            RegexRule::new(r"[{}\[\]();,]+", TokenClass::Punctuation)?,
            RegexRule::new(r"[-+*/%=<>!&|^~?:.@]+", TokenClass::Operator)?,
        ])
    }

    /// [`c_like`](Self::c_like) rules with a keyword set.
    pub fn brace_language<I, S>(keywords: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::c_like()?.with_keywords(keywords))
    }

    /// Classify `text`, returning sorted, non-overlapping spans in char offsets.
    pub fn classify_text(&self, text: &str) -> Vec<ClassifiedSpan> {
        let mut spans = Vec::new();
        let mut byte_pos = 0;
        let mut char_pos = 0;

        for caps in self.scanner.captures_iter(text) {
            let Some(m) = caps.get(0) else {
                continue;
            };
            if m.start() == m.end() {
                continue;
            }
            let Some(mut class) = self
                .groups
                .iter()
                .find(|(index, _)| caps.get(*index).is_some())
                .map(|(_, class)| *class)
            else {
                continue;
            };

            let start = char_pos + text[byte_pos..m.start()].chars().count();
            let end = start + m.as_str().chars().count();
            byte_pos = m.end();
            char_pos = end;

            if class == TokenClass::Identifier && self.keywords.contains(m.as_str()) {
                class = TokenClass::Keyword;
            }
            spans.push(ClassifiedSpan::new(TextSpan::new(start, end), class));
        }

        spans
    }
}

impl Classifier for RegexClassifier {
    type Error = Infallible;

    fn classify(&self, snapshot: &TextSnapshot) -> Result<Vec<ClassifiedSpan>, Self::Error> {
        Ok(self.classify_text(&snapshot.text()))
    }
}
