#![forbid(unsafe_code)]

//! Bounded drawing primitives.
//!
//! A [`Pad`] borrows the panel's subwindow for the duration of one draw
//! callback and is the only way content code touches the terminal. Every
//! primitive is clipped to the panel's last-observed bounds, and every
//! underlying write is best-effort: drawing at the extreme edge races
//! concurrent resizes, so a transient failure from the terminal layer is
//! discarded rather than surfaced. At worst a single glyph goes missing
//! for one frame.

use panekit_core::attr::Attr;
use panekit_core::backend::{DrawError, Window};
use panekit_text::markup::{MarkupError, TagTable, layout};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::scrollbar::slider_span;

/// Discard a transient draw failure on purpose.
///
/// This is the named best-effort contract for edge-case terminal writes:
/// the affected cells are simply not drawn this frame.
pub(crate) fn best_effort(result: Result<(), DrawError>) {
    if let Err(err) = result {
        tracing::trace!(error = %err, "edge-case terminal write dropped");
    }
}

/// Longest prefix of `text` that fits in `budget` display columns.
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

/// A panel's drawing surface for one redraw.
pub struct Pad<'a> {
    win: &'a mut dyn Window,
    /// Bounds observed when the redraw started, in rows/cols.
    rows: u16,
    cols: u16,
    tags: &'a TagTable,
}

impl<'a> Pad<'a> {
    pub(crate) fn new(win: &'a mut dyn Window, rows: u16, cols: u16, tags: &'a TagTable) -> Self {
        Self {
            win,
            rows,
            cols,
            tags,
        }
    }

    /// The bounds drawing is clipped to, as `(rows, cols)`.
    pub fn size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    fn in_bounds(&self, y: u16, x: u16) -> bool {
        y < self.rows && x < self.cols
    }

    /// Draw a horizontal line, clipped to the right edge.
    pub fn hline(&mut self, y: u16, x: u16, length: u16, attr: Attr) {
        if self.in_bounds(y, x) {
            let length = length.min(self.cols - x);
            best_effort(self.win.hline(y, x, length, attr));
        }
    }

    /// Draw a vertical line, clipped to the bottom edge.
    pub fn vline(&mut self, y: u16, x: u16, length: u16, attr: Attr) {
        if self.in_bounds(y, x) {
            let length = length.min(self.rows - y);
            best_effort(self.win.vline(y, x, length, attr));
        }
    }

    /// Draw a single character.
    pub fn addch(&mut self, y: u16, x: u16, ch: char, attr: Attr) {
        if self.in_bounds(y, x) {
            best_effort(self.win.put_char(y, x, ch, attr));
        }
    }

    /// Write a string, clipped so it never crosses the right boundary.
    ///
    /// One column next to the edge stays blank: writing into the very last
    /// cell is what upsets terminals mid-shrink.
    pub fn addstr(&mut self, y: u16, x: u16, text: &str, attr: Attr) {
        if self.in_bounds(y, x) {
            let clipped = clip_to_width(text, (self.cols - x).saturating_sub(1) as usize);
            if !clipped.is_empty() {
                best_effort(self.win.put_str(y, x, clipped, attr));
            }
        }
    }

    /// Write a string containing inline formatting tags.
    ///
    /// See [`panekit_text::markup`] for the tag vocabulary and nesting
    /// rules. Markup authoring errors surface to the caller; transient
    /// draw failures do not.
    pub fn addfstr(&mut self, y: u16, x: u16, msg: &str) -> Result<(), MarkupError> {
        if y >= self.rows {
            return Ok(());
        }
        let runs = layout(msg, x as usize, self.cols as usize, self.tags)?;
        for run in runs {
            best_effort(self.win.put_str(y, run.x as u16, &run.text, run.attr));
        }
        Ok(())
    }

    /// Draw a left-justified scroll bar reflecting position within a
    /// vertical listing.
    ///
    /// `top` and `bottom` are the list indices of the first and last
    /// visible element, `size` the total list length. `draw_bottom` of
    /// `None` spans to the panel's bottom row. Left undrawn when fewer
    /// than two rows are available. The bottom is squared off:
    ///
    /// ```text
    ///  |
    /// *|
    /// *|
    ///  |
    /// ─┘
    /// ```
    pub fn scroll_bar(
        &mut self,
        top: usize,
        bottom: usize,
        size: usize,
        draw_top: u16,
        draw_bottom: Option<u16>,
    ) {
        if self.rows.saturating_sub(draw_top) < 2 || size == 0 {
            return;
        }
        let draw_bottom = match draw_bottom {
            None => self.rows - 1,
            Some(row) => row.min(self.rows - 1),
        };
        let track = (draw_bottom.saturating_sub(draw_top)) as usize;
        if track == 0 {
            return;
        }

        let (slider_top, slider_len) = slider_span(top, bottom, size, track);
        for i in 0..track {
            if i >= slider_top && i <= slider_top + slider_len {
                self.addstr(draw_top + i as u16, 0, " ", Attr::STANDOUT);
            }
        }

        // Track line and the squared-off corner.
        best_effort(
            self.win
                .vline(draw_top, 1, self.rows.saturating_sub(2), Attr::empty()),
        );
        best_effort(self.win.put_char(draw_bottom, 1, '┘', Attr::empty()));
        best_effort(self.win.put_char(draw_bottom, 0, '─', Attr::empty()));
    }
}
