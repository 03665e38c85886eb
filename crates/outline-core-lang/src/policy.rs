//! Outlining policy for brace languages.

use crate::config::{LanguageConfig, RegionMarkerConfig};
use crate::error::LanguageError;
use outline_core::{OutlinePolicy, Region, RegionKind, RegionSubKind, TokenClass, TokenCursor};
use regex::Regex;
use std::collections::HashSet;
use tracing::trace;

/// Compiled named-region markers.
#[derive(Debug, Clone)]
struct Markers {
    comment_start: Option<Regex>,
    comment_end: Option<Regex>,
    directive_start: Option<Regex>,
    directive_end: Option<Regex>,
}

impl Markers {
    fn compile(config: &RegionMarkerConfig) -> Result<Self, LanguageError> {
        Ok(Self {
            comment_start: compile_start("comment start", config.comment_start.as_deref())?,
            comment_end: compile("comment end", config.comment_end.as_deref())?,
            directive_start: compile_start("directive start", config.directive_start.as_deref())?,
            directive_end: compile("directive end", config.directive_end.as_deref())?,
        })
    }
}

fn compile(which: &'static str, pattern: Option<&str>) -> Result<Option<Regex>, LanguageError> {
    pattern
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| LanguageError::InvalidPattern {
                which,
                pattern: pattern.to_string(),
                source,
            })
        })
        .transpose()
}

fn compile_start(
    which: &'static str,
    pattern: Option<&str>,
) -> Result<Option<Regex>, LanguageError> {
    let regex = compile(which, pattern)?;
    if let Some(regex) = &regex
        && regex.captures_len() < 2
    {
        return Err(LanguageError::MissingNameGroup {
            which,
            pattern: regex.as_str().to_string(),
        });
    }
    Ok(regex)
}

/// Name captured by a start marker, or `None` if `text` is not a start marker.
fn marker_name(marker: Option<&Regex>, text: &str) -> Option<String> {
    let caps = marker?.captures(text)?;
    let name = caps.get(1).map_or("", |m| m.as_str());
    Some(if name.is_empty() {
        text.trim().to_string()
    } else {
        name.to_string()
    })
}

fn is_marker(marker: Option<&Regex>, text: &str) -> bool {
    marker.is_some_and(|marker| marker.is_match(text))
}

/// Brace-language outlining rules.
///
/// - `{` opens a block and `[` an array; the matching `}`/`]` closes them.
/// - A comment or directive token matching a start marker opens a named region, closed by the
///   matching end marker.
/// - Any other comment token (except a stray end marker) is a comment region.
/// - A block opened right after a function keyword is a function body.
#[derive(Debug, Clone)]
pub struct BraceOutlinePolicy {
    markers: Markers,
    function_keywords: HashSet<String>,
    function_seen: bool,
}

impl BraceOutlinePolicy {
    /// Compile the policy for `config`.
    pub fn new(config: &LanguageConfig) -> Result<Self, LanguageError> {
        Ok(Self {
            markers: Markers::compile(&config.region_markers)?,
            function_keywords: config.function_keywords.iter().cloned().collect(),
            function_seen: false,
        })
    }

    fn start_comment(&self, cursor: &TokenCursor<'_>) -> Option<Region> {
        let token = cursor.current_span()?;
        if token.span.start != cursor.position() {
            return None;
        }
        let text = cursor.current_text()?;

        if let Some(name) = marker_name(self.markers.comment_start.as_ref(), &text) {
            return Some(Region::new(token.span.start, RegionKind::NamedRegion).with_name(name));
        }
        if is_marker(self.markers.comment_end.as_ref(), &text) {
            return None;
        }
        Some(Region::new(token.span.start, RegionKind::Comment).with_end(token.span.end))
    }

    fn start_directive(&self, cursor: &TokenCursor<'_>) -> Option<Region> {
        let token = cursor.current_span()?;
        let text = cursor.current_text()?;
        let name = marker_name(self.markers.directive_start.as_ref(), &text)?;
        Some(Region::new(token.span.start, RegionKind::NamedRegion).with_name(name))
    }
}

impl OutlinePolicy for BraceOutlinePolicy {
    fn observe_token(&mut self, cursor: &TokenCursor<'_>) {
        let Some(token) = cursor.current_span() else {
            return;
        };
        if token.class == TokenClass::Keyword
            && token.span.start == cursor.position()
            && cursor
                .current_text()
                .is_some_and(|text| self.function_keywords.contains(&text))
        {
            self.function_seen = true;
        }
    }

    fn try_start(&mut self, cursor: &TokenCursor<'_>) -> Option<Region> {
        let token = cursor.current_span()?;
        match token.class {
            TokenClass::Punctuation => match cursor.current_char()? {
                '{' => Some(Region::new(cursor.position(), RegionKind::Block)),
                '[' => Some(Region::new(cursor.position(), RegionKind::Array)),
                _ => None,
            },
            TokenClass::Comment => self.start_comment(cursor),
            TokenClass::Directive => self.start_directive(cursor),
            _ => None,
        }
    }

    fn try_close(&self, region: &Region, cursor: &TokenCursor<'_>) -> Option<usize> {
        let token = cursor.current_span()?;
        match (region.kind(), token.class) {
            (RegionKind::Block, TokenClass::Punctuation) => {
                (cursor.current_char()? == '}').then(|| cursor.position() + 1)
            }
            (RegionKind::Array, TokenClass::Punctuation) => {
                (cursor.current_char()? == ']').then(|| cursor.position() + 1)
            }
            (RegionKind::NamedRegion, TokenClass::Comment) => {
                let text = cursor.current_text()?;
                is_marker(self.markers.comment_end.as_ref(), &text).then_some(token.span.end)
            }
            (RegionKind::NamedRegion, TokenClass::Directive) => {
                let text = cursor.current_text()?;
                is_marker(self.markers.directive_end.as_ref(), &text).then_some(token.span.end)
            }
            _ => None,
        }
    }

    fn on_region_found(&mut self, region: &mut Region) {
        if region.kind() == RegionKind::Block && self.function_seen {
            trace!(start = region.start(), "function body");
            region.set_sub_kind(RegionSubKind::Function);
        }
        self.function_seen = false;
    }

    fn begin_level(&mut self) {
        self.function_seen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern() {
        let config = LanguageConfig::default().with_region_markers(RegionMarkerConfig {
            comment_end: Some("#endregion(".to_string()),
            ..RegionMarkerConfig::default()
        });

        let err = BraceOutlinePolicy::new(&config).unwrap_err();
        assert!(matches!(
            err,
            LanguageError::InvalidPattern { which: "comment end", .. }
        ));
        assert!(err.to_string().contains("#endregion("));
    }

    #[test]
    fn test_start_pattern_needs_name_group() {
        let config = LanguageConfig::default().with_region_markers(RegionMarkerConfig {
            directive_start: Some(r"^#region".to_string()),
            ..RegionMarkerConfig::default()
        });

        assert!(matches!(
            BraceOutlinePolicy::new(&config),
            Err(LanguageError::MissingNameGroup { which: "directive start", .. })
        ));
    }

    #[test]
    fn test_marker_names() {
        let markers = Markers::compile(&RegionMarkerConfig::default()).unwrap();
        let comment = markers.comment_start.as_ref();
        let directive = markers.directive_start.as_ref();

        assert_eq!(marker_name(comment, "//#region Types").as_deref(), Some("Types"));
        assert_eq!(marker_name(comment, "// #region A b").as_deref(), Some("A b"));
        assert_eq!(marker_name(comment, "/* #region X */").as_deref(), Some("X "));
        assert_eq!(marker_name(comment, "//#regionX"), None);
        assert_eq!(marker_name(comment, "// plain"), None);
        assert_eq!(marker_name(directive, "#region Helpers  ").as_deref(), Some("Helpers"));
        assert_eq!(marker_name(directive, "#region").as_deref(), Some("#region"));
        assert_eq!(marker_name(directive, "#if DEBUG"), None);
        assert!(is_marker(markers.comment_end.as_ref(), "//#endregion"));
        assert!(is_marker(markers.directive_end.as_ref(), "# endregion"));
        assert!(!is_marker(markers.directive_end.as_ref(), "#endregions"));
    }
}
