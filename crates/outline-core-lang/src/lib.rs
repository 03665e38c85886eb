#![warn(missing_docs)]
//! `outline-core-lang` - data-driven language configuration and the brace-language policy for
//! `outline-core`.
//!
//! A [`LanguageConfig`] describes a dialect (function keywords, named-region markers, keywords
//! for host classifiers); [`BraceOutlinePolicy`] compiles it into an
//! [`OutlinePolicy`](outline_core::OutlinePolicy).
//!
//! ```rust
//! use outline_core::{OutlineOptions, Outliner, RegionKind, TextSnapshot};
//! use outline_core_classify::RegexClassifier;
//! use outline_core_lang::{BraceOutlinePolicy, LanguageConfig};
//!
//! let config = LanguageConfig::csharp();
//! let policy = BraceOutlinePolicy::new(&config).unwrap();
//! let classifier = RegexClassifier::brace_language(config.keywords.iter().cloned()).unwrap();
//! let mut outliner = Outliner::new(policy, classifier, OutlineOptions::default());
//!
//! let text = "#region Fields\nint a;\nint b;\n#endregion\n";
//! let update = outliner.rebuild(&TextSnapshot::new(text));
//! let region = update.outline.regions().next().unwrap();
//!
//! assert_eq!(region.kind(), RegionKind::NamedRegion);
//! assert_eq!(region.name(), Some("Fields"));
//! ```

mod config;
mod error;
mod policy;

pub use config::{
    COMMENT_REGION_END, COMMENT_REGION_START, DIRECTIVE_REGION_END, DIRECTIVE_REGION_START,
    LanguageConfig, RegionMarkerConfig,
};
pub use error::LanguageError;
pub use policy::BraceOutlinePolicy;
