#![forbid(unsafe_code)]

//! Single-line edit buffer for the modal text field.
//!
//! Grapheme-aware: the cursor moves over user-perceived characters, and
//! the column reported for the hardware cursor accounts for wide glyphs.

use panekit_core::backend::Key;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Edit state for one modal input session.
#[derive(Debug)]
pub(crate) struct LineEditor {
    text: String,
    /// Cursor position as a grapheme index.
    cursor: usize,
    /// Maximum content length in graphemes; inserts past it are refused.
    max_graphemes: usize,
}

impl LineEditor {
    pub(crate) fn new(initial: &str, max_graphemes: usize) -> Self {
        let mut text = String::new();
        for grapheme in initial.graphemes(true).take(max_graphemes) {
            text.push_str(grapheme);
        }
        let cursor = text.graphemes(true).count();
        Self {
            text,
            cursor,
            max_graphemes,
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    fn len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Byte offset of the given grapheme index.
    fn byte_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Column to place the hardware cursor at.
    pub(crate) fn cursor_col(&self) -> u16 {
        let offset = self.byte_at(self.cursor);
        self.text[..offset].width().min(u16::MAX as usize) as u16
    }

    /// Apply one key. Confirm/cancel keys are handled by the caller.
    pub(crate) fn handle(&mut self, key: Key) {
        match key {
            Key::Char(ch) => {
                if self.len() < self.max_graphemes {
                    let offset = self.byte_at(self.cursor);
                    self.text.insert(offset, ch);
                    self.cursor += 1;
                }
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    let start = self.byte_at(self.cursor - 1);
                    let end = self.byte_at(self.cursor);
                    self.text.replace_range(start..end, "");
                    self.cursor -= 1;
                }
            }
            Key::Delete => {
                if self.cursor < self.len() {
                    let start = self.byte_at(self.cursor);
                    let end = self.byte_at(self.cursor + 1);
                    self.text.replace_range(start..end, "");
                }
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            // Right refuses to move past the end of the content.
            Key::Right => self.cursor = (self.cursor + 1).min(self.len()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.len(),
            _ => {}
        }
    }
}
