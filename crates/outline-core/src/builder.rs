//! Region Builder.
//!
//! Turns a [`TokenCursor`] into a [`RegionTree`] by recursive descent, one frame per open
//! region. The generic part (tree wiring, merging, start-point extension) lives here; what
//! opens and closes a region is decided by an [`OutlinePolicy`].
//!
//! Frames are kept on an explicit stack rather than the call stack, so deeply nested input
//! cannot overflow it.

use crate::cursor::TokenCursor;
use crate::region::{Region, RegionId, RegionKind, RegionRef, RegionTree};
use crate::snapshot::TextSpan;

/// Dialect-specific outlining rules.
///
/// One policy instance serves one document and is used for every rebuild of it. Hooks are
/// called in this order at each cursor position: [`observe_token`](Self::observe_token),
/// [`try_start`](Self::try_start), then [`try_close`](Self::try_close) for the innermost open
/// region.
pub trait OutlinePolicy {
    /// Inspect the current token before region detection (stateful detection, e.g. keywords).
    fn observe_token(&mut self, _cursor: &TokenCursor<'_>) {}

    /// Return a new region if the current position starts one.
    ///
    /// Regions returned with an end (see [`Region::with_end`]) are complete and get no children.
    fn try_start(&mut self, cursor: &TokenCursor<'_>) -> Option<Region>;

    /// Return the end offset if the current position closes `region`.
    ///
    /// Policies only close kinds they open themselves; the root is never closed.
    fn try_close(&self, region: &Region, cursor: &TokenCursor<'_>) -> Option<usize>;

    /// Whether the finished region `new` should be folded into its preceding sibling `last`
    /// instead of being attached.
    fn can_merge(&self, last: RegionRef<'_>, new: RegionRef<'_>) -> bool {
        comments_adjacent(last, new)
    }

    /// Called when a region has been recognized, before its children are built.
    fn on_region_found(&mut self, _region: &mut Region) {}

    /// Called whenever scanning (re)starts at a nesting level: at the start of a build, when a
    /// region opens, and after each child is finished.
    fn begin_level(&mut self) {}
}

/// Comment-merging rule: two comments merge when the new one starts at most one line after
/// the previous one ends and only whitespace separates them.
pub fn comments_adjacent(last: RegionRef<'_>, new: RegionRef<'_>) -> bool {
    if last.kind() != RegionKind::Comment || new.kind() != RegionKind::Comment {
        return false;
    }
    let (Some(last_end), Some(last_end_line)) = (last.end(), last.end_line()) else {
        return false;
    };
    if !new.is_complete() || new.start() < last_end {
        return false;
    }

    new.start_line() <= last_end_line + 1
        && last
            .tree()
            .snapshot()
            .is_whitespace(TextSpan::new(last_end, new.start()))
}

/// Builds region trees with a policy.
pub struct RegionBuilder<'p, P: OutlinePolicy + ?Sized> {
    policy: &'p mut P,
}

impl<'p, P: OutlinePolicy + ?Sized> RegionBuilder<'p, P> {
    /// Create a builder driving `policy`.
    pub fn new(policy: &'p mut P) -> Self {
        Self { policy }
    }

    /// Build the region tree for the cursor's snapshot, consuming the cursor to the end.
    pub fn build(&mut self, cursor: &mut TokenCursor<'_>) -> RegionTree {
        let mut tree = RegionTree::new(cursor.snapshot().clone());
        let mut open = vec![RegionTree::ROOT];
        self.policy.begin_level();

        while !cursor.at_end() {
            let parent = open.last().copied().unwrap_or(RegionTree::ROOT);
            self.policy.observe_token(cursor);

            if let Some(mut region) = self.policy.try_start(cursor) {
                self.policy.on_region_found(&mut region);
                let complete = region.is_complete();
                let id = tree.alloc(region, parent);
                cursor.advance();

                if complete {
                    self.finish(&mut tree, id);
                } else {
                    open.push(id);
                }
                self.policy.begin_level();
                continue;
            }

            if let Some(end) = self.policy.try_close(tree.region(parent), cursor) {
                cursor.advance();
                if parent != RegionTree::ROOT {
                    tree.region_mut(parent).set_end(end);
                    open.pop();
                    self.finish(&mut tree, parent);
                    self.policy.begin_level();
                }
                continue;
            }

            cursor.advance();
        }

        // Unterminated regions stay in the tree, innermost first.
        while open.len() > 1 {
            if let Some(id) = open.pop() {
                self.finish(&mut tree, id);
            }
        }

        tree
    }

    /// Merge a resolved region into its previous sibling, or attach it and extend its start.
    fn finish(&self, tree: &mut RegionTree, id: RegionId) {
        let Some(parent) = tree.region(id).parent() else {
            return;
        };

        if let Some(&last) = tree.region(parent).children().last()
            && self.policy.can_merge(tree.view(last), tree.view(id))
        {
            tree.merge(last, id);
            return;
        }

        tree.attach(parent, id);
        extend_start(tree, id);
    }
}

/// Move a block's start up to the end of the nearest preceding non-blank line, so that
///
/// ```text
/// for (var k in obj)
/// {            <- folds from here
/// ```
///
/// folds from the end of the `for` line instead. The start never moves above the previous
/// sibling (or the line after the parent's start).
fn extend_start(tree: &mut RegionTree, id: RegionId) {
    let region = tree.view(id);
    let Some(end_line) = region.end_line() else {
        return;
    };
    let start_line = region.start_line();
    if matches!(region.kind(), RegionKind::NamedRegion | RegionKind::Comment)
        || start_line == end_line
        || !region.text_before().chars().all(char::is_whitespace)
    {
        return;
    }

    let Some(parent) = region.parent() else {
        return;
    };
    let siblings = parent.region().children();
    let position = siblings
        .iter()
        .position(|&child| child == id)
        .unwrap_or(siblings.len());

    let upper_limit = if position == 0 {
        if parent.kind() == RegionKind::None {
            0
        } else {
            parent.start_line() + 1
        }
    } else {
        let previous = tree.view(siblings[position - 1]);
        let previous_end = previous.end_line().unwrap_or_else(|| previous.start_line());
        if previous_end == previous.start_line() {
            previous_end
        } else {
            previous_end + 1
        }
    };

    let snapshot = tree.snapshot();
    let new_start = (upper_limit..start_line)
        .rev()
        .find(|&line| !snapshot.is_blank_line(line))
        .map(|line| snapshot.line_end(line));

    if let Some(new_start) = new_start {
        tree.region_mut(id).set_start(new_start);
    }
}
