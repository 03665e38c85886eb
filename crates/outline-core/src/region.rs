//! Regions and the region arena.
//!
//! A build produces a [`RegionTree`]: an arena of [`Region`] nodes owned by the tree, with
//! parent links stored as plain [`RegionId`] indices. Trees are immutable once built and are
//! replaced wholesale on the next rebuild; ids are only meaningful within their own tree.

use crate::hint;
use crate::options::OutlineOptions;
use crate::snapshot::{TextSnapshot, TextSpan};

/// Region kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// The synthetic root container.
    None,
    /// `{ ... }`
    Block,
    /// `[ ... ]`
    Array,
    /// A directive-delimited region (`#region Name` ... `#endregion`).
    NamedRegion,
    /// A comment, or several merged consecutive comments.
    Comment,
    /// A dialect-specific kind.
    Custom(&'static str),
}

/// Optional refinement of a region's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RegionSubKind {
    /// No refinement.
    #[default]
    None,
    /// The block is a function body.
    Function,
}

/// Index of a region inside its [`RegionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(usize);

impl RegionId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A foldable range of the document.
///
/// Policies create regions with [`Region::new`]; the builder wires up parents and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    start: usize,
    end: Option<usize>,
    kind: RegionKind,
    sub_kind: RegionSubKind,
    name: Option<String>,
    parent: Option<RegionId>,
    children: Vec<RegionId>,
}

impl Region {
    /// Create an open (incomplete) region starting at `start`.
    pub fn new(start: usize, kind: RegionKind) -> Self {
        Self {
            start,
            end: None,
            kind,
            sub_kind: RegionSubKind::None,
            name: None,
            parent: None,
            children: Vec::new(),
        }
    }

    fn root() -> Self {
        Self::new(0, RegionKind::None)
    }

    /// Complete the region at `end` (for regions that end with their start token).
    pub fn with_end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    /// Attach a name (named regions).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive), once the region is closed.
    pub fn end(&self) -> Option<usize> {
        self.end
    }

    /// Whether the region has been closed.
    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// The region's span, once it is complete.
    pub fn span(&self) -> Option<TextSpan> {
        self.end.map(|end| TextSpan::new(self.start, end))
    }

    /// Region kind.
    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// Region sub-kind.
    pub fn sub_kind(&self) -> RegionSubKind {
        self.sub_kind
    }

    /// Set the sub-kind.
    pub fn set_sub_kind(&mut self, sub_kind: RegionSubKind) {
        self.sub_kind = sub_kind;
    }

    /// Name of a named region.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parent region (`None` for the root).
    pub fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    /// Child regions in document order.
    pub fn children(&self) -> &[RegionId] {
        &self.children
    }

    pub(crate) fn set_start(&mut self, start: usize) {
        self.start = start;
    }

    pub(crate) fn set_end(&mut self, end: usize) {
        self.end = Some(end.max(self.start));
    }
}

/// Arena holding one build's regions, plus the snapshot they were computed on.
#[derive(Debug, Clone)]
pub struct RegionTree {
    snapshot: TextSnapshot,
    nodes: Vec<Region>,
}

impl RegionTree {
    /// Id of the synthetic root region.
    pub const ROOT: RegionId = RegionId(0);

    /// Create a tree containing only the root.
    pub fn new(snapshot: TextSnapshot) -> Self {
        Self {
            snapshot,
            nodes: vec![Region::root()],
        }
    }

    /// The snapshot the regions refer to.
    pub fn snapshot(&self) -> &TextSnapshot {
        &self.snapshot
    }

    /// Number of allocated regions, including the root and regions merged away.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds only the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// The root region.
    pub fn root(&self) -> RegionRef<'_> {
        self.view(Self::ROOT)
    }

    /// A view of a region, or `None` if `id` does not belong to this tree.
    pub fn get(&self, id: RegionId) -> Option<RegionRef<'_>> {
        (id.0 < self.nodes.len()).then(|| self.view(id))
    }

    /// A view of a region whose id came from this tree.
    pub(crate) fn view(&self, id: RegionId) -> RegionRef<'_> {
        RegionRef { tree: self, id }
    }

    /// All regions attached below the root, depth-first in document order.
    pub fn descendants(&self) -> impl Iterator<Item = RegionRef<'_>> + '_ {
        let mut stack: Vec<RegionId> = self.nodes[0].children.iter().rev().copied().collect();
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
            Some(self.view(id))
        })
    }

    pub(crate) fn region(&self, id: RegionId) -> &Region {
        &self.nodes[id.0]
    }

    pub(crate) fn region_mut(&mut self, id: RegionId) -> &mut Region {
        &mut self.nodes[id.0]
    }

    /// Store a region under `parent` without attaching it to the parent's children.
    pub(crate) fn alloc(&mut self, mut region: Region, parent: RegionId) -> RegionId {
        region.parent = Some(parent);
        self.nodes.push(region);
        RegionId(self.nodes.len() - 1)
    }

    pub(crate) fn attach(&mut self, parent: RegionId, child: RegionId) {
        self.nodes[parent.0].children.push(child);
    }

    /// Fold `merged` into `into`: `into` takes over its end and children.
    pub(crate) fn merge(&mut self, into: RegionId, merged: RegionId) {
        let end = self.nodes[merged.0].end;
        let children = std::mem::take(&mut self.nodes[merged.0].children);
        for &child in &children {
            self.nodes[child.0].parent = Some(into);
        }

        let target = &mut self.nodes[into.0];
        target.end = end;
        target.children.extend(children);
    }
}

/// A borrowed view of a region with its derived, snapshot-dependent properties.
#[derive(Debug, Clone, Copy)]
pub struct RegionRef<'a> {
    tree: &'a RegionTree,
    id: RegionId,
}

impl<'a> RegionRef<'a> {
    /// The region's id.
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// The underlying region.
    pub fn region(&self) -> &'a Region {
        self.tree.region(self.id)
    }

    /// The tree this region belongs to.
    pub fn tree(&self) -> &'a RegionTree {
        self.tree
    }

    /// Start offset.
    pub fn start(&self) -> usize {
        self.region().start
    }

    /// End offset, once complete.
    pub fn end(&self) -> Option<usize> {
        self.region().end
    }

    /// Span, once complete.
    pub fn span(&self) -> Option<TextSpan> {
        self.region().span()
    }

    /// Region kind.
    pub fn kind(&self) -> RegionKind {
        self.region().kind
    }

    /// Region sub-kind.
    pub fn sub_kind(&self) -> RegionSubKind {
        self.region().sub_kind
    }

    /// Name of a named region.
    pub fn name(&self) -> Option<&'a str> {
        self.region().name.as_deref()
    }

    /// Whether the region has been closed.
    pub fn is_complete(&self) -> bool {
        self.region().is_complete()
    }

    /// Parent region.
    pub fn parent(&self) -> Option<RegionRef<'a>> {
        self.region().parent.map(|id| self.tree.view(id))
    }

    /// Children in document order.
    pub fn children(self) -> impl Iterator<Item = RegionRef<'a>> + 'a {
        let tree = self.tree;
        self.region()
            .children
            .iter()
            .map(move |&id| tree.view(id))
    }

    /// Line containing the start offset.
    pub fn start_line(&self) -> usize {
        self.tree.snapshot.line_of_offset(self.start())
    }

    /// Line containing the end offset, once complete.
    pub fn end_line(&self) -> Option<usize> {
        self.end().map(|end| self.tree.snapshot.line_of_offset(end))
    }

    /// Whether the region is complete and spans more than one line.
    pub fn is_multi_line(&self) -> bool {
        self.end_line().is_some_and(|end| end != self.start_line())
    }

    /// Text from start to end (to the end of the document for incomplete regions).
    pub fn inner_text(&self) -> String {
        let snapshot = &self.tree.snapshot;
        let end = self.end().unwrap_or_else(|| snapshot.len_chars());
        snapshot.slice(TextSpan::new(self.start(), end))
    }

    /// Text on the start line before the region begins.
    pub fn text_before(&self) -> String {
        let snapshot = &self.tree.snapshot;
        let line = self.start_line();
        let line_start = snapshot.line_start(line);
        let end = self.start().min(snapshot.line_end(line));
        snapshot.slice(TextSpan::new(line_start, end))
    }

    /// Whether the region takes part in "collapse to definitions".
    ///
    /// True for function bodies, named regions, and regions directly below the root or a
    /// named region.
    pub fn is_definition_like(&self) -> bool {
        if self.sub_kind() == RegionSubKind::Function || self.kind() == RegionKind::NamedRegion {
            return true;
        }
        self.parent()
            .is_some_and(|p| matches!(p.kind(), RegionKind::None | RegionKind::NamedRegion))
    }

    /// Whether the region starts collapsed when a document is first outlined.
    pub fn is_collapsed_by_default(&self, options: &OutlineOptions) -> bool {
        if self.is_definition_like() && options.auto_collapse_to_definitions {
            return true;
        }
        match self.kind() {
            RegionKind::Block | RegionKind::Array => options.auto_collapse_braces,
            RegionKind::Comment => options.auto_collapse_comments,
            RegionKind::NamedRegion => options.auto_collapse_regions,
            RegionKind::None | RegionKind::Custom(_) => false,
        }
    }

    /// Short text shown in place of the collapsed region.
    pub fn collapsed_placeholder(&self) -> String {
        match self.kind() {
            RegionKind::NamedRegion => self.name().unwrap_or_default().to_string(),
            RegionKind::Comment => {
                let snapshot = &self.tree.snapshot;
                let line_end = snapshot.line_end_including_break(self.start_line());
                let first_line = snapshot.slice(TextSpan::new(self.start(), line_end));
                format!("{} {}", first_line.trim_end(), hint::ELLIPSIS)
            }
            _ => hint::ELLIPSIS.to_string(),
        }
    }

    /// De-indented preview of the region's text.
    pub fn collapsed_hint(&self, tab_size: usize) -> String {
        hint::format_collapsed_hint(*self, tab_size)
    }
}
