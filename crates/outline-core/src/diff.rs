//! Diff Engine.
//!
//! Flattens a region tree into the publishable region list and reports the buffer interval
//! whose fold markers may have changed since the previous list.

use crate::region::{RegionId, RegionTree};
use crate::snapshot::TextSpan;
use std::collections::HashSet;

/// The publishable regions of `tree`, depth-first in document order.
///
/// A region is listed iff it is complete and spans more than one line. Regions that are not
/// listed are still walked for their descendants.
pub fn flatten(tree: &RegionTree) -> Vec<RegionId> {
    tree.descendants()
        .filter(|region| region.is_multi_line())
        .map(|region| region.id())
        .collect()
}

/// The interval to re-query after replacing `old` spans with `new` spans.
///
/// Both lists must be in the new snapshot's coordinates. The result covers every span present
/// in exactly one of the lists, plus the whole new list. `None` means nothing to publish.
pub fn diff_spans(old: &[TextSpan], new: &[TextSpan]) -> Option<TextSpan> {
    let old_set: HashSet<TextSpan> = old.iter().copied().collect();
    let new_set: HashSet<TextSpan> = new.iter().copied().collect();

    old_set
        .symmetric_difference(&new_set)
        .chain(new.iter())
        .copied()
        .reduce(|acc, span| acc.cover(&span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionKind;
    use crate::test_support::build;
    use pretty_assertions::assert_eq;

    fn span(start: usize, end: usize) -> TextSpan {
        TextSpan::new(start, end)
    }

    #[test]
    fn test_flatten_skips_single_line_and_incomplete() {
        let tree = build("{ [] \n  [\n  ]\n  {\n");
        let kinds: Vec<_> = flatten(&tree)
            .into_iter()
            .map(|id| (tree.view(id).kind(), tree.view(id).span()))
            .collect();

        // The outer block and the trailing block never close; the inline `[]` is single-line.
        // The listed array starts at the end of line 0 after extension.
        assert_eq!(kinds, vec![(RegionKind::Array, Some(span(5, 13)))]);
    }

    #[test]
    fn test_flatten_is_pre_order() {
        let tree = build("{\n[\n]\n}\n{\n}");
        let kinds: Vec<_> = flatten(&tree)
            .into_iter()
            .map(|id| tree.view(id).kind())
            .collect();
        assert_eq!(
            kinds,
            vec![RegionKind::Block, RegionKind::Array, RegionKind::Block]
        );
    }

    #[test]
    fn test_identical_empty_lists() {
        assert_eq!(diff_spans(&[], &[]), None);
    }

    #[test]
    fn test_removed_region_is_covered() {
        let old = [span(0, 10), span(40, 50)];
        let new = [span(0, 10)];
        assert_eq!(diff_spans(&old, &new), Some(span(0, 50)));
    }

    #[test]
    fn test_everything_removed() {
        assert_eq!(diff_spans(&[span(5, 9)], &[]), Some(span(5, 9)));
    }

    #[test]
    fn test_unchanged_lists_still_report_new_extent() {
        let spans = [span(3, 8), span(12, 20)];
        assert_eq!(diff_spans(&spans, &spans), Some(span(3, 20)));
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let old = [span(3, 8), span(3, 8)];
        let new = [span(3, 8)];
        assert_eq!(diff_spans(&old, &new), Some(span(3, 8)));
    }
}
