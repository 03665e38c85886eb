//! Outlining options.

use crate::region::RegionKind;
use serde::Deserialize;

/// Options read once per rebuild.
///
/// Deserializable so hosts can load them from their settings (missing fields use defaults).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    /// Number of spaces a tab expands to in collapsed hints.
    pub tab_size: usize,
    /// Collapse named regions when a document is first outlined.
    pub auto_collapse_regions: bool,
    /// Collapse comment blocks when a document is first outlined.
    pub auto_collapse_comments: bool,
    /// Collapse blocks and arrays when a document is first outlined.
    pub auto_collapse_braces: bool,
    /// Collapse definition-like regions when a document is first outlined.
    pub auto_collapse_to_definitions: bool,
    /// Publish `Array` regions. Hosts that fold brackets natively turn this off.
    pub outline_arrays: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            auto_collapse_regions: true,
            auto_collapse_comments: false,
            auto_collapse_braces: false,
            auto_collapse_to_definitions: false,
            outline_arrays: true,
        }
    }
}

impl OutlineOptions {
    /// Set the tab width used by collapsed hints.
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    /// Set whether named regions start collapsed.
    pub fn with_auto_collapse_regions(mut self, collapse: bool) -> Self {
        self.auto_collapse_regions = collapse;
        self
    }

    /// Set whether comment blocks start collapsed.
    pub fn with_auto_collapse_comments(mut self, collapse: bool) -> Self {
        self.auto_collapse_comments = collapse;
        self
    }

    /// Set whether blocks and arrays start collapsed.
    pub fn with_auto_collapse_braces(mut self, collapse: bool) -> Self {
        self.auto_collapse_braces = collapse;
        self
    }

    /// Set whether definition-like regions start collapsed.
    pub fn with_auto_collapse_to_definitions(mut self, collapse: bool) -> Self {
        self.auto_collapse_to_definitions = collapse;
        self
    }

    /// Set whether `Array` regions are published.
    pub fn with_outline_arrays(mut self, outline_arrays: bool) -> Self {
        self.outline_arrays = outline_arrays;
        self
    }

    /// Whether regions of `kind` belong in the published list.
    pub fn publishes(&self, kind: RegionKind) -> bool {
        kind != RegionKind::Array || self.outline_arrays
    }
}
