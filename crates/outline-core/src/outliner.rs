//! Rebuild driver and published results.
//!
//! An [`Outliner`] owns one document's policy, classifier and options. Each rebuild runs the
//! Region Builder over a complete snapshot, diffs the flattened result against the previous
//! publication and swaps the new [`PublishedOutline`] in atomically. Readers holding an
//! [`OutlineReader`] see either the old or the new outline, never a mix.

use crate::builder::{OutlinePolicy, RegionBuilder};
use crate::classify::Classifier;
use crate::cursor::TokenCursor;
use crate::diff::{diff_spans, flatten};
use crate::error::OutlineError;
use crate::options::OutlineOptions;
use crate::region::{RegionId, RegionKind, RegionRef, RegionTree};
use crate::snapshot::{TextSnapshot, TextSpan};
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What caused a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildTrigger {
    /// The document was (re)loaded. Collapse defaults apply to the result.
    InitialLoad,
    /// The buffer settled after edits.
    Idle,
    /// The token classification changed without a text change.
    ClassificationChanged,
}

impl RebuildTrigger {
    fn forces_rebuild(self) -> bool {
        matches!(self, Self::InitialLoad | Self::ClassificationChanged)
    }
}

/// How the last rebuild computed its changed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutlineUpdateMode {
    /// First publication for this outliner.
    Initial,
    /// Previous regions were remapped onto the new snapshot and diffed.
    Incremental,
    /// Previous regions could not be remapped; the whole document is reported changed.
    FullRefresh,
    /// No work was performed (the snapshot was already outlined, or is older).
    Skipped,
}

/// Result of one [`Outliner::rebuild_for`] call.
#[derive(Debug, Clone)]
pub struct OutlineUpdate {
    /// How the update was computed.
    pub mode: OutlineUpdateMode,
    /// Interval whose fold markers must be re-queried, if any.
    pub changed: Option<TextSpan>,
    /// The outline published after this call.
    pub outline: Arc<PublishedOutline>,
}

/// A fold marker as handed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineTag {
    /// Folded span.
    pub span: TextSpan,
    /// Region kind.
    pub kind: RegionKind,
    /// Whether the host should show the region collapsed.
    pub collapsed: bool,
    /// Whether the region takes part in "collapse to definitions".
    pub definition_like: bool,
    /// Text shown in place of the collapsed region.
    pub placeholder: String,
    /// Preview shown when hovering the collapsed region.
    pub hint: String,
}

/// One published outline: a region tree, its publishable region list and the changed interval.
#[derive(Debug)]
pub struct PublishedOutline {
    tree: RegionTree,
    regions: Vec<RegionId>,
    changed: Option<TextSpan>,
    initial: bool,
}

impl PublishedOutline {
    /// An outline with no regions over an empty document.
    pub fn empty() -> Self {
        Self {
            tree: RegionTree::new(TextSnapshot::new("")),
            regions: Vec::new(),
            changed: None,
            initial: false,
        }
    }

    /// Version of the snapshot the outline was computed on.
    pub fn version(&self) -> u64 {
        self.tree.snapshot().version()
    }

    /// The snapshot the outline was computed on.
    pub fn snapshot(&self) -> &TextSnapshot {
        self.tree.snapshot()
    }

    /// The full region tree, including unpublished regions.
    pub fn tree(&self) -> &RegionTree {
        &self.tree
    }

    /// Interval reported changed by the rebuild that produced this outline.
    pub fn changed(&self) -> Option<TextSpan> {
        self.changed
    }

    /// Whether this is the first outline of the document (collapse defaults apply).
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Published regions, depth-first in document order.
    pub fn regions(&self) -> impl Iterator<Item = RegionRef<'_>> + '_ {
        self.regions.iter().map(|&id| self.tree.view(id))
    }

    /// Spans of the published regions.
    pub fn spans(&self) -> Vec<TextSpan> {
        self.regions().filter_map(|region| region.span()).collect()
    }

    /// Published regions whose lines intersect the lines of `span`.
    pub fn regions_overlapping(&self, span: TextSpan) -> impl Iterator<Item = RegionRef<'_>> + '_ {
        let snapshot = self.tree.snapshot();
        let first_line = snapshot.line_of_offset(span.start);
        let last_line = snapshot.line_of_offset(span.end);

        self.regions().filter(move |region| {
            region.start_line() <= last_line
                && region.end_line().is_some_and(|end| end >= first_line)
        })
    }

    /// Published regions whose lines intersect the lines of `span`, where `span` is given in
    /// `snapshot`, a later version of the document.
    ///
    /// Each hit carries the region's span translated onto `snapshot`. Hosts use this between an
    /// edit and the next rebuild. Fails if `snapshot` is older than the outline or the edit
    /// history between the two versions is no longer available.
    pub fn regions_overlapping_in(
        &self,
        snapshot: &TextSnapshot,
        span: TextSpan,
    ) -> Result<Vec<(RegionRef<'_>, TextSpan)>, OutlineError> {
        let first_line = snapshot.line_of_offset(span.start);
        let last_line = snapshot.line_of_offset(span.end);

        let mut hits = Vec::new();
        for region in self.regions() {
            let Some(published) = region.span() else {
                continue;
            };
            let moved = snapshot.translate_span(published, self.version())?;
            if snapshot.line_of_offset(moved.start) <= last_line
                && snapshot.line_of_offset(moved.end) >= first_line
            {
                hits.push((region, moved));
            }
        }
        Ok(hits)
    }

    /// Fold markers for the regions overlapping `span`.
    pub fn tags(&self, span: TextSpan, options: &OutlineOptions) -> Vec<OutlineTag> {
        self.regions_overlapping(span)
            .filter_map(|region| Some(self.tag(region, region.span()?, options)))
            .collect()
    }

    /// Fold markers for the regions overlapping `span` in a later `snapshot`; tag spans are
    /// expressed in `snapshot`. See [`PublishedOutline::regions_overlapping_in`].
    pub fn tags_in(
        &self,
        snapshot: &TextSnapshot,
        span: TextSpan,
        options: &OutlineOptions,
    ) -> Result<Vec<OutlineTag>, OutlineError> {
        Ok(self
            .regions_overlapping_in(snapshot, span)?
            .into_iter()
            .map(|(region, moved)| self.tag(region, moved, options))
            .collect())
    }

    fn tag(&self, region: RegionRef<'_>, span: TextSpan, options: &OutlineOptions) -> OutlineTag {
        OutlineTag {
            span,
            kind: region.kind(),
            collapsed: self.initial && region.is_collapsed_by_default(options),
            definition_like: region.is_definition_like(),
            placeholder: region.collapsed_placeholder(),
            hint: region.collapsed_hint(options.tab_size),
        }
    }
}

/// A cloneable handle observing an [`Outliner`]'s latest publication from any thread.
#[derive(Debug, Clone)]
pub struct OutlineReader {
    published: Arc<ArcSwap<PublishedOutline>>,
}

impl OutlineReader {
    /// The latest published outline.
    pub fn load(&self) -> Arc<PublishedOutline> {
        self.published.load_full()
    }
}

/// Incremental outliner for one document.
pub struct Outliner<P, C> {
    policy: P,
    classifier: C,
    options: OutlineOptions,
    published: Arc<ArcSwap<PublishedOutline>>,
    last_version: Option<u64>,
    options_changed: bool,
}

impl<P, C> Outliner<P, C>
where
    P: OutlinePolicy,
    C: Classifier,
{
    /// Create an outliner with nothing published yet.
    pub fn new(policy: P, classifier: C, options: OutlineOptions) -> Self {
        Self {
            policy,
            classifier,
            options,
            published: Arc::new(ArcSwap::from_pointee(PublishedOutline::empty())),
            last_version: None,
            options_changed: false,
        }
    }

    /// Current options.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Replace the options used by subsequent rebuilds.
    ///
    /// The next rebuild runs even if its snapshot was already outlined, so the published
    /// region list reflects the new options.
    pub fn set_options(&mut self, options: OutlineOptions) {
        self.options = options;
        self.options_changed = true;
    }

    /// The language policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// A handle to the published outline.
    pub fn reader(&self) -> OutlineReader {
        OutlineReader {
            published: Arc::clone(&self.published),
        }
    }

    /// The latest published outline.
    pub fn published(&self) -> Arc<PublishedOutline> {
        self.published.load_full()
    }

    /// Rebuild after the buffer settled ([`RebuildTrigger::Idle`]).
    pub fn rebuild(&mut self, snapshot: &TextSnapshot) -> OutlineUpdate {
        self.rebuild_for(snapshot, RebuildTrigger::Idle)
    }

    /// Rebuild the outline for `snapshot` and publish it.
    ///
    /// Snapshots older than the published one are ignored, and so is the published version
    /// itself unless `trigger` forces a rebuild or the options changed since.
    pub fn rebuild_for(&mut self, snapshot: &TextSnapshot, trigger: RebuildTrigger) -> OutlineUpdate {
        let previous = self.published.load_full();
        let version = snapshot.version();

        if let Some(last) = self.last_version
            && (version < last
                || (version == last && !trigger.forces_rebuild() && !self.options_changed))
        {
            trace!(version, last, ?trigger, "outline rebuild skipped");
            return OutlineUpdate {
                mode: OutlineUpdateMode::Skipped,
                changed: None,
                outline: previous,
            };
        }

        let tree = self.build_tree(snapshot);
        let regions: Vec<RegionId> = flatten(&tree)
            .into_iter()
            .filter(|&id| self.options.publishes(tree.view(id).kind()))
            .collect();
        let spans: Vec<TextSpan> = regions
            .iter()
            .filter_map(|&id| tree.view(id).span())
            .collect();

        let (mode, changed) = match self.last_version {
            None => (OutlineUpdateMode::Initial, diff_spans(&[], &spans)),
            Some(last) => match remap_spans(&previous.spans(), snapshot, last) {
                Ok(old) => (OutlineUpdateMode::Incremental, diff_spans(&old, &spans)),
                Err(err) => {
                    trace!(%err, "previous outline not remappable, refreshing everything");
                    (OutlineUpdateMode::FullRefresh, Some(snapshot.full_span()))
                }
            },
        };

        let outline = Arc::new(PublishedOutline {
            tree,
            regions,
            changed,
            initial: self.last_version.is_none() || trigger == RebuildTrigger::InitialLoad,
        });
        self.published.store(Arc::clone(&outline));
        self.last_version = Some(version);
        self.options_changed = false;

        debug!(
            version,
            ?trigger,
            ?mode,
            regions = outline.regions.len(),
            ?changed,
            "outline published"
        );

        OutlineUpdate {
            mode,
            changed,
            outline,
        }
    }

    fn build_tree(&mut self, snapshot: &TextSnapshot) -> RegionTree {
        let spans = match self.classifier.classify(snapshot) {
            Ok(spans) => spans,
            Err(err) => {
                warn!(
                    version = snapshot.version(),
                    error = %err,
                    "classification failed, outlining unclassified text"
                );
                Vec::new()
            }
        };

        let mut cursor = TokenCursor::new(snapshot, spans);
        RegionBuilder::new(&mut self.policy).build(&mut cursor)
    }
}

fn remap_spans(
    spans: &[TextSpan],
    snapshot: &TextSnapshot,
    from_version: u64,
) -> Result<Vec<TextSpan>, OutlineError> {
    spans
        .iter()
        .map(|&span| snapshot.translate_span(span, from_version))
        .collect()
}
