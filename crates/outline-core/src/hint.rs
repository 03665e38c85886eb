//! Collapsed hint formatting.
//!
//! The hint is the preview shown when hovering a folded region: the region's text with leading
//! blank lines dropped, tabs expanded, common indentation removed, and at most
//! [`MAX_HINT_LINES`] lines kept.

use crate::region::RegionRef;
use crate::text::{is_blank, split_lines};

/// Maximum number of lines in a collapsed hint.
pub const MAX_HINT_LINES: usize = 30;

/// Marker used for elided text.
pub const ELLIPSIS: &str = "...";

/// Format the collapsed hint for `region`.
pub fn format_collapsed_hint(region: RegionRef<'_>, tab_size: usize) -> String {
    let text_before = region.text_before();
    // Leading text only counts when it is pure indentation.
    let indent = if is_blank(&text_before) {
        text_before.as_str()
    } else {
        ""
    };
    format_hint_text(&format!("{indent}{}", region.inner_text()), tab_size)
}

fn format_hint_text(text: &str, tab_size: usize) -> String {
    let tab = " ".repeat(tab_size);
    let lines: Vec<&str> = split_lines(text).skip_while(|line| is_blank(line)).collect();

    let kept: Vec<String> = lines
        .iter()
        .take(MAX_HINT_LINES)
        .map(|line| line.replace('\t', &tab))
        .collect();

    let min_indent = kept
        .iter()
        .filter_map(|line| indentation(line))
        .min()
        .unwrap_or(usize::MAX);

    let mut hint = kept
        .iter()
        .map(|line| {
            if line.chars().count() > min_indent {
                line.chars().skip(min_indent).collect()
            } else {
                String::new()
            }
        })
        .collect::<Vec<String>>()
        .join("\n");

    if lines.len() > MAX_HINT_LINES {
        hint.push('\n');
        hint.push_str(ELLIPSIS);
    }
    hint
}

/// Leading whitespace width; `None` for lines made only of whitespace.
fn indentation(line: &str) -> Option<usize> {
    let mut width = 0;
    for c in line.chars() {
        if !c.is_whitespace() {
            return Some(width);
        }
        width += 1;
    }
    None
}
