use outline_core::{
    OutlineOptions, OutlineUpdateMode, Outliner, RebuildTrigger, TextBuffer, TextSpan,
};
use outline_core_classify::RegexClassifier;
use outline_core_lang::{BraceOutlinePolicy, LanguageConfig};
use pretty_assertions::assert_eq;

const SOURCE: &str = "function a()\n{\n    return [\n        1,\n        2\n    ];\n}";

fn outliner() -> Outliner<BraceOutlinePolicy, RegexClassifier> {
    let config = LanguageConfig::javascript();
    Outliner::new(
        BraceOutlinePolicy::new(&config).unwrap(),
        RegexClassifier::brace_language(config.keywords.iter().cloned()).unwrap(),
        OutlineOptions::default(),
    )
}

fn span(start: usize, end: usize) -> TextSpan {
    TextSpan::new(start, end)
}

#[test]
fn test_initial_outline() {
    let buffer = TextBuffer::new(SOURCE);
    let update = outliner().rebuild_for(&buffer.snapshot(), RebuildTrigger::InitialLoad);

    assert_eq!(update.mode, OutlineUpdateMode::Initial);
    assert_eq!(update.outline.spans(), vec![span(12, 57), span(26, 54)]);
    assert_eq!(update.changed, Some(span(12, 57)));
}

#[test]
fn test_unbalancing_and_rebalancing_a_block() {
    let mut buffer = TextBuffer::new(SOURCE);
    let mut outliner = outliner();
    outliner.rebuild(&buffer.snapshot());

    // Deleting the closing brace leaves the function body unterminated.
    let snapshot = buffer.delete(span(56, 57)).unwrap();
    let update = outliner.rebuild(&snapshot);
    assert_eq!(update.mode, OutlineUpdateMode::Incremental);
    assert_eq!(update.outline.spans(), vec![span(26, 54)]);
    assert_eq!(update.changed, Some(span(12, 56)));

    let snapshot = buffer.insert(56, "}").unwrap();
    let update = outliner.rebuild(&snapshot);
    assert_eq!(update.outline.spans(), vec![span(12, 57), span(26, 54)]);
    assert_eq!(update.changed, Some(span(12, 57)));
}

#[test]
fn test_edit_above_shifts_regions() {
    let mut buffer = TextBuffer::new(SOURCE);
    let mut outliner = outliner();
    outliner.rebuild(&buffer.snapshot());

    let snapshot = buffer.insert(0, "// note\n").unwrap();
    let update = outliner.rebuild(&snapshot);

    assert_eq!(update.mode, OutlineUpdateMode::Incremental);
    assert_eq!(update.outline.spans(), vec![span(20, 65), span(34, 62)]);
    assert_eq!(update.changed, Some(span(20, 65)));
}

#[test]
fn test_several_edits_between_rebuilds() {
    let mut buffer = TextBuffer::new(SOURCE);
    let mut outliner = outliner();
    outliner.rebuild(&buffer.snapshot());

    buffer.insert(0, "\n").unwrap();
    buffer.insert(0, "\n").unwrap();
    let snapshot = buffer.delete(span(0, 1)).unwrap();
    let update = outliner.rebuild(&snapshot);

    assert_eq!(update.mode, OutlineUpdateMode::Incremental);
    assert_eq!(update.outline.spans(), vec![span(13, 58), span(27, 55)]);
}

#[test]
fn test_history_gap_falls_back_to_full_refresh() {
    let mut buffer = TextBuffer::new(SOURCE).with_history_limit(2);
    let mut outliner = outliner();
    outliner.rebuild(&buffer.snapshot());

    for _ in 0..3 {
        buffer.insert(0, " ").unwrap();
    }
    let snapshot = buffer.snapshot();
    let update = outliner.rebuild(&snapshot);

    assert_eq!(update.mode, OutlineUpdateMode::FullRefresh);
    assert_eq!(update.changed, Some(snapshot.full_span()));
    assert_eq!(update.outline.spans().len(), 2);
}

#[test]
fn test_readers_observe_complete_publications() {
    let mut buffer = TextBuffer::new(SOURCE);
    let mut outliner = outliner();
    let reader = outliner.reader();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..200 {
                let outline = reader.load();
                let len = outline.snapshot().len_chars();
                for region in outline.regions() {
                    assert!(region.is_multi_line());
                    assert!(region.span().is_some_and(|s| s.end <= len));
                }
            }
        });

        for i in 0..50 {
            let snapshot = if i % 2 == 0 {
                buffer.insert(0, "x\n").unwrap()
            } else {
                buffer.delete(span(0, 2)).unwrap()
            };
            outliner.rebuild(&snapshot);
        }
    });

    assert_eq!(reader.load().version(), 50);
}
