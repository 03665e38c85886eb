#![warn(missing_docs)]
//! Outline Core - Headless Incremental Code Outlining Engine
//!
//! # Overview
//!
//! `outline-core` computes foldable "outline" regions (braces, brackets, named directive regions,
//! comment blocks) over a text snapshot, and re-computes them as the buffer changes.
//! It does not tokenize text and does not render anything: the upper layer provides a
//! classified token stream (via [`Classifier`]) and consumes the published region list.
//!
//! # Core Features
//!
//! - **Region Tree**: single-pass recursive descent over classified tokens, arena-backed
//! - **Pluggable Dialects**: per-language rules behind the [`OutlinePolicy`] trait
//! - **Natural Fold Starts**: blocks fold together with their header line
//! - **Comment Merging**: consecutive line comments collapse into one region
//! - **Change Detection**: set-difference diff of old/new regions, remapped across edits
//! - **Collapsed Hints**: bounded, de-indented preview text for folded regions
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Outliner (rebuild + publish, ArcSwap)      │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Diff Engine        │  Hint Formatter       │  ← Incremental Update / Preview
//! ├─────────────────────────────────────────────┤
//! │  Region Builder  +  OutlinePolicy (dialect) │  ← Region Tree
//! ├─────────────────────────────────────────────┤
//! │  Token Cursor  (classified spans)           │  ← Token Access
//! ├─────────────────────────────────────────────┤
//! │  TextSnapshot / TextBuffer (Rope + deltas)  │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use outline_core::{
//!     ClassifiedSpan, OutlineOptions, OutlinePolicy, Outliner, Region, RegionKind, RegionRef,
//!     TextSnapshot, TextSpan, TokenClass, TokenCursor,
//! };
//!
//! /// Folds `{ ... }` blocks only.
//! struct Braces;
//!
//! impl OutlinePolicy for Braces {
//!     fn try_start(&mut self, cursor: &TokenCursor<'_>) -> Option<Region> {
//!         (cursor.current_char()? == '{').then(|| Region::new(cursor.position(), RegionKind::Block))
//!     }
//!
//!     fn try_close(&self, region: &Region, cursor: &TokenCursor<'_>) -> Option<usize> {
//!         (region.kind() == RegionKind::Block && cursor.current_char()? == '}')
//!             .then(|| cursor.position() + 1)
//!     }
//! }
//!
//! let classify = |snapshot: &TextSnapshot| {
//!     (0..snapshot.len_chars())
//!         .filter(|&i| matches!(snapshot.char_at(i), Some('{' | '}')))
//!         .map(|i| ClassifiedSpan::new(TextSpan::new(i, i + 1), TokenClass::Punctuation))
//!         .collect::<Vec<_>>()
//! };
//!
//! let mut outliner = Outliner::new(Braces, classify, OutlineOptions::default());
//! let update = outliner.rebuild(&TextSnapshot::new("fn main()\n{\n    body();\n}\n"));
//!
//! let regions: Vec<RegionRef<'_>> = update.outline.regions().collect();
//! assert_eq!(regions.len(), 1);
//! // The block folds together with its header line.
//! assert_eq!(regions[0].start_line(), 0);
//! ```
//!
//! # Module Description
//!
//! - [`snapshot`] - Versioned text snapshots, spans and the single-writer [`TextBuffer`]
//! - [`delta`] - Structured text deltas and edge-exclusive span remapping
//! - [`classify`] - The classification boundary (token classes, [`Classifier`])
//! - [`cursor`] - Sequential token cursor over a snapshot
//! - [`region`] - Region arena, kinds and derived region properties
//! - [`builder`] - Region Builder and the [`OutlinePolicy`] strategy trait
//! - [`diff`] - Flattening and change detection
//! - [`hint`] - Collapsed hint formatting
//! - [`options`] - Outlining options
//! - [`outliner`] - Rebuild driver and atomically published results

pub mod builder;
pub mod classify;
pub mod cursor;
pub mod delta;
pub mod diff;
mod error;
pub mod hint;
pub mod options;
pub mod outliner;
pub mod region;
pub mod snapshot;
mod text;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{OutlinePolicy, RegionBuilder, comments_adjacent};
pub use classify::{ClassifiedSpan, Classifier, TokenClass};
pub use cursor::TokenCursor;
pub use delta::{TextDelta, TextDeltaEdit};
pub use diff::{diff_spans, flatten};
pub use error::OutlineError;
pub use hint::{ELLIPSIS, MAX_HINT_LINES, format_collapsed_hint};
pub use options::OutlineOptions;
pub use outliner::{
    OutlineReader, OutlineTag, OutlineUpdate, OutlineUpdateMode, Outliner, PublishedOutline,
    RebuildTrigger,
};
pub use region::{Region, RegionId, RegionKind, RegionRef, RegionSubKind, RegionTree};
pub use snapshot::{TextBuffer, TextSnapshot, TextSpan};
