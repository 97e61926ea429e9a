#![forbid(unsafe_code)]

//! Nested inline-tag parsing and layout.
//!
//! The vocabulary is fixed at startup: `<b>`, `<u>`, `<h>`, plus one tag
//! per palette color. Nesting is supported and close tags are strictly
//! enforced, but only for strings that are scanned to the end — a scan
//! that stops early because it ran out of drawable width is never
//! validated, since the unscanned remainder might well close the tags.
//!
//! Text inside multiple color tags (for instance
//! `<blue><red>hello</red></blue>`) gets the bitwise OR of both color
//! attributes. That is usually not what the author wants; it is allowed
//! anyway because the display model cannot prevent it.

use panekit_core::attr::{Attr, Palette};
use rustc_hash::FxHashMap;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Markup authoring errors.
///
/// Surfaced to the caller rather than recovered: an unclosed tag indicates
/// a programming error in panel content, not a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupError {
    /// One or more formatting tags were still open after the whole string
    /// was scanned. `tags` holds the expected close tags in open order.
    UnclosedTags {
        /// Expected close tags, in the order their open tags appeared.
        tags: Vec<String>,
        /// The offending input string.
        input: String,
    },
}

impl std::fmt::Display for MarkupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnclosedTags { tags, input } => {
                let plural = if tags.len() > 1 { "s" } else { "" };
                write!(
                    f,
                    "unclosed formatting tag{plural}: '{}' in {input:?}",
                    tags.join("', '")
                )
            }
        }
    }
}

impl std::error::Error for MarkupError {}

/// The fixed tag vocabulary, built once at process start.
///
/// Maps open-tag text (`"<b>"`, `"<red>"`, ...) to the attribute it
/// activates. The color entries come from the palette, so they must be
/// enumerated before the first panel draws and stay stable afterwards.
#[derive(Debug, Clone)]
pub struct TagTable {
    open_tags: FxHashMap<String, Attr>,
}

impl TagTable {
    /// Build the table from the static style set plus the palette's colors.
    pub fn new(palette: &Palette) -> Self {
        let mut open_tags = FxHashMap::default();
        open_tags.insert("<b>".to_string(), Attr::BOLD);
        open_tags.insert("<u>".to_string(), Attr::UNDERLINE);
        open_tags.insert("<h>".to_string(), Attr::STANDOUT);
        for name in palette.color_names() {
            open_tags.insert(format!("<{name}>"), palette.attr(name));
        }
        Self { open_tags }
    }

    /// The attribute an open tag activates, if the tag is in the vocabulary.
    pub fn open_attr(&self, tag: &str) -> Option<Attr> {
        self.open_tags.get(tag).copied()
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::new(&Palette::default())
    }
}

/// One styled run of text positioned on the draw cursor's track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Column the run starts at.
    pub x: usize,
    /// The (already clipped) text to draw.
    pub text: String,
    /// Bitwise OR of every tag active where the run appears.
    pub attr: Attr,
}

/// Longest prefix of `text` whose display width fits in `budget` columns.
fn clip_to_width(text: &str, budget: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for grapheme in text.graphemes(true) {
        let width = grapheme.width();
        if used + width > budget {
            break;
        }
        used += width;
        end += grapheme.len();
    }
    &text[..end]
}

/// `"<b>"` → `"</b>"`.
fn close_of(open_tag: &str) -> String {
    format!("</{}", &open_tag[1..])
}

/// Lay out a markup string into styled runs.
///
/// Scans `msg` left to right starting the draw cursor at `start_x`. At
/// each step the next `<...>` span matching either an open tag from the
/// vocabulary or the top expected close tag is consumed; anything else in
/// angle brackets is literal text. The text before the consumed tag is
/// emitted with the OR of all active attributes, clipped to
/// `max_x - cursor - 1` columns (one boundary column is reserved), and the
/// cursor advances by the segment's full width.
///
/// Scanning stops without error once the cursor reaches `max_x`. If the
/// whole string was consumed and open tags remain, this fails with
/// [`MarkupError::UnclosedTags`].
pub fn layout(
    msg: &str,
    start_x: usize,
    max_x: usize,
    tags: &TagTable,
) -> Result<Vec<Run>, MarkupError> {
    let mut runs = Vec::new();
    let mut x = start_x;
    let mut active: Vec<Attr> = Vec::new();
    let mut expected_close: Vec<String> = Vec::new();
    let mut rest = msg;

    while x < max_x && !rest.is_empty() {
        // Find the next consumable tag, skipping unrecognized spans.
        let mut next: Option<(usize, usize)> = None;
        let mut checked = 0;
        loop {
            let Some(offset) = rest[checked..].find('<') else {
                break;
            };
            let tag_start = checked + offset;
            let Some(len) = rest[tag_start..].find('>') else {
                break;
            };
            let tag_end = tag_start + len + 1;
            let candidate = &rest[tag_start..tag_end];
            let matches_open = tags.open_attr(candidate).is_some();
            let matches_close = expected_close
                .last()
                .is_some_and(|expected| expected == candidate);
            if matches_open || matches_close {
                next = Some((tag_start, tag_end));
                break;
            }
            checked = tag_end;
        }

        let scanned = rest;
        let (segment, tag) = match next {
            Some((tag_start, tag_end)) => {
                rest = &scanned[tag_end..];
                (&scanned[..tag_start], Some(&scanned[tag_start..tag_end]))
            }
            None => {
                rest = "";
                (scanned, None)
            }
        };

        // Emit the text before the tag with the current combined attribute.
        let attr = active
            .iter()
            .copied()
            .fold(Attr::empty(), |acc, entry| acc | entry);
        let clipped = clip_to_width(segment, max_x - x - 1);
        if !clipped.is_empty() {
            runs.push(Run {
                x,
                text: clipped.to_string(),
                attr,
            });
        }
        x += segment.width();

        // Apply the tag's effect on the attribute/expectation stacks.
        if let Some(tag) = tag {
            if tag.starts_with("</") {
                expected_close.pop();
                active.pop();
            } else {
                expected_close.push(close_of(tag));
                active.push(tags.open_attr(tag).unwrap_or_default());
            }
        }
    }

    // Only a fully scanned string is checked for closure; stopping early
    // leaves the remainder unjudged.
    if !expected_close.is_empty() && rest.is_empty() {
        return Err(MarkupError::UnclosedTags {
            tags: expected_close,
            input: msg.to_string(),
        });
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TagTable {
        TagTable::default()
    }

    fn cursor_after(runs: &[Run]) -> usize {
        runs.last().map_or(0, |run| run.x + run.text.width())
    }

    // --- Basic emission ---

    #[test]
    fn plain_text_is_one_normal_run() {
        let runs = layout("hello", 0, 20, &table()).unwrap();
        assert_eq!(runs, vec![Run {
            x: 0,
            text: "hello".into(),
            attr: Attr::empty(),
        }]);
    }

    #[test]
    fn bold_then_normal_matches_documented_example() {
        // "<b>hi</b> there" starting at column 1: "hi" bold, " there"
        // normal, cursor ends at column 9.
        let runs = layout("<b>hi</b> there", 1, 20, &table()).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], Run {
            x: 1,
            text: "hi".into(),
            attr: Attr::BOLD,
        });
        assert_eq!(runs[1], Run {
            x: 3,
            text: " there".into(),
            attr: Attr::empty(),
        });
        assert_eq!(cursor_after(&runs), 9);
    }

    #[test]
    fn nested_tags_or_their_attributes() {
        let runs = layout("<b>a<red>b</red>c</b>", 0, 40, &table()).unwrap();
        let texts: Vec<(&str, Attr)> = runs
            .iter()
            .map(|run| (run.text.as_str(), run.attr))
            .collect();
        assert_eq!(texts, vec![
            ("a", Attr::BOLD),
            ("b", Attr::BOLD | Attr::RED),
            ("c", Attr::BOLD),
        ]);
    }

    #[test]
    fn sibling_color_tags_combine_by_or() {
        let runs = layout("<blue><red>x</red></blue>", 0, 40, &table()).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].attr, Attr::BLUE | Attr::RED);
    }

    // --- Unrecognized spans ---

    #[test]
    fn unknown_tags_are_literal_text() {
        let runs = layout("a <xyz> b", 0, 40, &table()).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "a <xyz> b");
    }

    #[test]
    fn stray_close_tag_is_literal_text() {
        let runs = layout("a </b> b", 0, 40, &table()).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "a </b> b");
    }

    #[test]
    fn close_tag_for_non_top_open_is_literal() {
        // Only the most recently opened tag's close is consumable, so the
        // out-of-order "</b>" stays literal and <b> must close at the end.
        let runs = layout("<b><u>x</b></u></b>", 0, 40, &table()).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "x</b>");
        assert_eq!(runs[0].attr, Attr::BOLD | Attr::UNDERLINE);
    }

    #[test]
    fn out_of_order_close_leaves_tag_unclosed() {
        let err = layout("<b><u>x</b></u>", 0, 40, &table()).unwrap_err();
        let MarkupError::UnclosedTags { tags, .. } = err;
        assert_eq!(tags, vec!["</b>".to_string()]);
    }

    #[test]
    fn unterminated_angle_bracket_is_literal() {
        let runs = layout("a < b", 0, 40, &table()).unwrap();
        assert_eq!(runs[0].text, "a < b");
    }

    // --- Closure validation ---

    #[test]
    fn unclosed_tag_fails_naming_the_close_tag() {
        let err = layout("<b>hi", 0, 40, &table()).unwrap_err();
        assert_eq!(err, MarkupError::UnclosedTags {
            tags: vec!["</b>".into()],
            input: "<b>hi".into(),
        });
    }

    #[test]
    fn multiple_unclosed_tags_reported_in_open_order() {
        let err = layout("<b><red>hi", 0, 40, &table()).unwrap_err();
        let MarkupError::UnclosedTags { tags, .. } = err;
        assert_eq!(tags, vec!["</b>".to_string(), "</red>".to_string()]);
    }

    #[test]
    fn truncated_scan_skips_validation() {
        // The unclosed <b> sits past the drawable width, so the scan stops
        // early and no closure check runs.
        let runs = layout("wide text<b>tail", 0, 5, &table()).unwrap();
        assert!(runs.iter().all(|run| !run.text.contains('<')));
    }

    // --- Clipping ---

    #[test]
    fn runs_reserve_the_boundary_column() {
        let runs = layout("abcdef", 0, 5, &table()).unwrap();
        assert_eq!(runs[0].text, "abcd");
    }

    #[test]
    fn styled_run_clips_but_cursor_advances_fully() {
        let runs = layout("<b>abcdef</b>xyz", 2, 6, &table()).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "abc");
        assert_eq!(runs[0].x, 2);
    }

    #[test]
    fn start_at_or_past_budget_emits_nothing() {
        assert!(layout("hello", 10, 10, &table()).unwrap().is_empty());
        assert!(layout("hello", 12, 10, &table()).unwrap().is_empty());
    }

    #[test]
    fn wide_graphemes_clip_by_display_width() {
        let runs = layout("日本語", 0, 5, &table()).unwrap();
        // Each glyph is two columns wide; budget is 4 columns.
        assert_eq!(runs[0].text, "日本");
    }

    // --- Table construction ---

    #[test]
    fn table_has_styles_and_every_palette_color() {
        let palette = Palette::default();
        let tags = TagTable::new(&palette);
        assert_eq!(tags.open_attr("<b>"), Some(Attr::BOLD));
        assert_eq!(tags.open_attr("<u>"), Some(Attr::UNDERLINE));
        assert_eq!(tags.open_attr("<h>"), Some(Attr::STANDOUT));
        for name in palette.color_names() {
            assert_eq!(tags.open_attr(&format!("<{name}>")), Some(palette.attr(name)));
        }
        assert_eq!(tags.open_attr("<bold>"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Arbitrary tag soup must never panic, and every emitted run has
        // to respect the clipping budget.
        #[test]
        fn layout_is_total_and_runs_fit_budget(
            msg in "[a-z<>/buh ]{0,40}",
            start in 0usize..8,
            max in 1usize..30,
        ) {
            let tags = TagTable::default();
            if let Ok(runs) = layout(&msg, start, max, &tags) {
                for run in &runs {
                    prop_assert!(run.x >= start);
                    prop_assert!(run.x < max);
                    prop_assert!(
                        unicode_width::UnicodeWidthStr::width(run.text.as_str())
                            <= max - run.x - 1
                    );
                }
            }
        }

        // Without any '<' there is nothing to consume, so layout can
        // never report unclosed tags.
        #[test]
        fn tagless_text_always_succeeds(msg in "[a-z >/]{0,40}") {
            let tags = TagTable::default();
            prop_assert!(layout(&msg, 0, 20, &tags).is_ok());
        }
    }
}
