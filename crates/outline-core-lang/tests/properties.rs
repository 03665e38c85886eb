use outline_core::{
    OutlineOptions, OutlineUpdateMode, Outliner, RebuildTrigger, RegionTree, TextBuffer,
    TextSnapshot, TextSpan, diff_spans,
};
use outline_core_classify::RegexClassifier;
use outline_core_lang::{BraceOutlinePolicy, LanguageConfig};
use proptest::prelude::*;
use std::collections::HashSet;

const FRAGMENTS: &[&str] = &[
    "{", "}", "[", "]", "\n", "\n\n", "  ", "x", "f();", "// c\n", "/* b */", "#region R\n",
    "#endregion\n", "//#region S\n", "//#endregion\n", "function ", "\"{\"", "]]", "};",
];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..80).prop_map(|parts| parts.concat())
}

fn outliner() -> Outliner<BraceOutlinePolicy, RegexClassifier> {
    let config = LanguageConfig::default();
    Outliner::new(
        BraceOutlinePolicy::new(&config).unwrap(),
        RegexClassifier::brace_language(config.keywords.iter().cloned()).unwrap(),
        OutlineOptions::default(),
    )
}

fn tree_of(text: &str) -> RegionTree {
    outliner()
        .rebuild(&TextSnapshot::new(text))
        .outline
        .tree()
        .clone()
}

fn span_strategy() -> impl Strategy<Value = TextSpan> {
    (0usize..200, 0usize..40).prop_map(|(start, len)| TextSpan::new(start, start + len))
}

proptest! {
    #[test]
    fn prop_regions_are_balanced(text in document()) {
        let tree = tree_of(&text);

        for region in tree.descendants().chain(std::iter::once(tree.root())) {
            if let Some(end) = region.end() {
                prop_assert!(end > region.start(), "empty region {:?}", region.span());
            }

            let siblings: Vec<_> = region.children().filter_map(|c| c.span()).collect();
            for pair in siblings.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start, "siblings overlap: {:?}", pair);
            }
        }
    }

    #[test]
    fn prop_children_nest_in_parents(text in document()) {
        let tree = tree_of(&text);

        for region in tree.descendants() {
            let Some(parent) = region.parent() else { continue };
            if parent.id() == RegionTree::ROOT {
                continue;
            }
            prop_assert!(parent.start() <= region.start());
            if let (Some(child_end), Some(parent_end)) = (region.end(), parent.end()) {
                prop_assert!(child_end <= parent_end);
            }
        }
    }

    #[test]
    fn prop_rebuild_is_idempotent(text in document()) {
        let snapshot = TextSnapshot::new(&text);
        let mut outliner = outliner();
        let first = outliner.rebuild(&snapshot);
        let second = outliner.rebuild(&snapshot);

        prop_assert_eq!(second.mode, OutlineUpdateMode::Skipped);
        prop_assert_eq!(second.changed, None);
        prop_assert_eq!(first.outline.spans(), second.outline.spans());

        let forced = outliner.rebuild_for(&snapshot, RebuildTrigger::ClassificationChanged);
        prop_assert_eq!(first.outline.spans(), forced.outline.spans());
        prop_assert_eq!(tree_of(&text).len(), first.outline.tree().len());
    }

    #[test]
    fn prop_published_regions_are_complete_and_multi_line(text in document()) {
        let outline = outliner().rebuild(&TextSnapshot::new(&text)).outline;
        for region in outline.regions() {
            prop_assert!(region.is_multi_line());
        }
    }

    #[test]
    fn prop_diff_covers_symmetric_difference(
        old in prop::collection::vec(span_strategy(), 0..12),
        new in prop::collection::vec(span_strategy(), 0..12),
    ) {
        let changed = diff_spans(&old, &new);
        let old_set: HashSet<_> = old.iter().copied().collect();
        let new_set: HashSet<_> = new.iter().copied().collect();

        for span in old_set.symmetric_difference(&new_set) {
            let changed = changed.expect("a differing span implies a changed interval");
            prop_assert!(changed.contains_span(span));
        }
        if old.is_empty() && new.is_empty() {
            prop_assert_eq!(changed, None);
        }
    }

    #[test]
    fn prop_incremental_diff_is_sound(
        text in document(),
        insert in document(),
        at in any::<prop::sample::Index>(),
    ) {
        let mut buffer = TextBuffer::new(&text);
        let mut outliner = outliner();
        let before = outliner.rebuild(&buffer.snapshot()).outline;

        let offset = at.index(text.chars().count() + 1);
        let snapshot = buffer.insert(offset, &insert).unwrap();
        let update = outliner.rebuild(&snapshot);
        prop_assert_eq!(update.mode, OutlineUpdateMode::Incremental);

        let old: HashSet<TextSpan> = before
            .spans()
            .into_iter()
            .map(|span| snapshot.translate_span(span, before.version()).unwrap())
            .collect();
        let new: HashSet<TextSpan> = update.outline.spans().into_iter().collect();

        for span in old.symmetric_difference(&new) {
            let changed = update.changed.expect("a differing span implies a changed interval");
            prop_assert!(changed.contains_span(span));
        }
    }
}
