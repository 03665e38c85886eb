//! Data-driven language configuration.

use serde::Deserialize;

/// `//#region Name` and `/* #region Name */`.
pub const COMMENT_REGION_START: &str = r"^/[/*]\s*#region\s(.+?)(\*/)?$";
/// `//#endregion` and `/* #endregion */`.
pub const COMMENT_REGION_END: &str = r"^/[/*]\s*#endregion";
/// `#region Name`.
pub const DIRECTIVE_REGION_START: &str = r"^#\s*region\b[ \t]*(.*?)[ \t]*$";
/// `#endregion`.
pub const DIRECTIVE_REGION_END: &str = r"^#\s*endregion\b";

/// Patterns recognizing named-region markers.
///
/// Start patterns must capture the region name in group 1. Patterns are matched against the
/// whole text of one comment or directive token. `None` disables a marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegionMarkerConfig {
    /// Named-region start inside a comment token.
    pub comment_start: Option<String>,
    /// Named-region end inside a comment token.
    pub comment_end: Option<String>,
    /// Named-region start as a directive token.
    pub directive_start: Option<String>,
    /// Named-region end as a directive token.
    pub directive_end: Option<String>,
}

impl Default for RegionMarkerConfig {
    fn default() -> Self {
        Self {
            comment_start: Some(COMMENT_REGION_START.to_string()),
            comment_end: Some(COMMENT_REGION_END.to_string()),
            directive_start: Some(DIRECTIVE_REGION_START.to_string()),
            directive_end: Some(DIRECTIVE_REGION_END.to_string()),
        }
    }
}

impl RegionMarkerConfig {
    /// No named regions at all.
    pub fn none() -> Self {
        Self {
            comment_start: None,
            comment_end: None,
            directive_start: None,
            directive_end: None,
        }
    }

    /// Comment markers only (`//#region Name` ... `//#endregion`).
    pub fn comments_only() -> Self {
        Self {
            directive_start: None,
            directive_end: None,
            ..Self::default()
        }
    }
}

/// Outlining configuration for a brace language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Language name, for diagnostics.
    pub name: String,
    /// Keywords a host classifier should report as [`TokenClass::Keyword`](outline_core::TokenClass::Keyword).
    pub keywords: Vec<String>,
    /// Keywords that mark the next block as a function body.
    pub function_keywords: Vec<String>,
    /// Named-region markers.
    pub region_markers: RegionMarkerConfig,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            name: "brace".to_string(),
            keywords: words(&["function"]),
            function_keywords: words(&["function"]),
            region_markers: RegionMarkerConfig::default(),
        }
    }
}

impl LanguageConfig {
    /// C#: `#region` directives and comment markers, no function keyword.
    pub fn csharp() -> Self {
        Self {
            name: "csharp".to_string(),
            keywords: words(&[
                "abstract", "as", "base", "bool", "break", "case", "catch", "class", "const",
                "continue", "default", "delegate", "do", "else", "enum", "event", "false",
                "finally", "for", "foreach", "get", "if", "in", "interface", "internal", "is",
                "namespace", "new", "null", "object", "override", "private", "protected",
                "public", "readonly", "return", "set", "static", "string", "struct", "switch",
                "this", "throw", "true", "try", "using", "var", "virtual", "void", "while",
            ]),
            function_keywords: Vec::new(),
            region_markers: RegionMarkerConfig::default(),
        }
    }

    /// JavaScript: comment markers and the `function` keyword.
    pub fn javascript() -> Self {
        Self {
            name: "javascript".to_string(),
            keywords: words(&[
                "break", "case", "catch", "class", "const", "continue", "default", "delete",
                "do", "else", "export", "extends", "false", "finally", "for", "function", "if",
                "import", "in", "instanceof", "let", "new", "null", "return", "switch", "this",
                "throw", "true", "try", "typeof", "undefined", "var", "void", "while", "yield",
            ]),
            function_keywords: words(&["function"]),
            region_markers: RegionMarkerConfig::comments_only(),
        }
    }

    /// Set the keywords reported to classifiers.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the function keywords.
    pub fn with_function_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.function_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the named-region markers.
    pub fn with_region_markers(mut self, markers: RegionMarkerConfig) -> Self {
        self.region_markers = markers;
        self
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}
