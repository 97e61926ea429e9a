#![forbid(unsafe_code)]

//! Scripted in-memory backend for exercising the panel layer in tests.
//!
//! [`TestScreen`] simulates a resizable parent region with a scripted key
//! queue; every subwindow it hands out shares its cell grid with the
//! screen's log, so tests can assert on what was drawn after the panel has
//! consumed the window. [`WindowProbe`] is the inspection handle.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use crate::attr::Attr;
use crate::backend::{BackendError, DrawError, Key, Screen, Window};
use crate::geometry::Rect;

#[derive(Debug)]
struct GridState {
    area: Rect,
    cells: Vec<(char, Attr)>,
    cursor: Option<(u16, u16)>,
    erase_count: usize,
    refresh_count: usize,
    /// Remaining writes that should fail with a synthetic terminal error.
    fail_writes: usize,
}

impl GridState {
    fn new(area: Rect) -> Self {
        let cells = vec![(' ', Attr::empty()); area.width as usize * area.height as usize];
        Self {
            area,
            cells,
            cursor: None,
            erase_count: 0,
            refresh_count: 0,
            fail_writes: 0,
        }
    }

    fn index(&self, y: u16, x: u16) -> Option<usize> {
        if y < self.area.height && x < self.area.width {
            Some(y as usize * self.area.width as usize + x as usize)
        } else {
            None
        }
    }

    fn put(&mut self, y: u16, x: u16, ch: char, attr: Attr) -> Result<(), DrawError> {
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(DrawError::Terminal("injected failure".into()));
        }
        match self.index(y, x) {
            Some(i) => {
                self.cells[i] = (ch, attr);
                Ok(())
            }
            None => Err(DrawError::OutOfBounds { y, x }),
        }
    }
}

/// A subwindow handed out by [`TestScreen`].
#[derive(Debug)]
pub struct TestWindow {
    state: Arc<Mutex<GridState>>,
}

impl Window for TestWindow {
    fn size(&self) -> (u16, u16) {
        let state = self.state.lock().unwrap();
        (state.area.height, state.area.width)
    }

    fn origin(&self) -> (u16, u16) {
        let state = self.state.lock().unwrap();
        (state.area.y, state.area.x)
    }

    fn erase(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.cells.fill((' ', Attr::empty()));
        state.erase_count += 1;
    }

    fn refresh(&mut self) -> Result<(), DrawError> {
        self.state.lock().unwrap().refresh_count += 1;
        Ok(())
    }

    fn put_str(&mut self, y: u16, x: u16, text: &str, attr: Attr) -> Result<(), DrawError> {
        let mut state = self.state.lock().unwrap();
        let mut col = x;
        for ch in text.chars() {
            state.put(y, col, ch, attr)?;
            col = col.saturating_add(1);
        }
        Ok(())
    }

    fn put_char(&mut self, y: u16, x: u16, ch: char, attr: Attr) -> Result<(), DrawError> {
        self.state.lock().unwrap().put(y, x, ch, attr)
    }

    fn hline(&mut self, y: u16, x: u16, length: u16, attr: Attr) -> Result<(), DrawError> {
        let mut state = self.state.lock().unwrap();
        for offset in 0..length {
            state.put(y, x.saturating_add(offset), '─', attr)?;
        }
        Ok(())
    }

    fn vline(&mut self, y: u16, x: u16, length: u16, attr: Attr) -> Result<(), DrawError> {
        let mut state = self.state.lock().unwrap();
        for offset in 0..length {
            state.put(y.saturating_add(offset), x, '│', attr)?;
        }
        Ok(())
    }

    fn move_cursor(&mut self, y: u16, x: u16) -> Result<(), DrawError> {
        self.state.lock().unwrap().cursor = Some((y, x));
        Ok(())
    }
}

/// Inspection handle for a window created by [`TestScreen`].
///
/// Stays valid after the panel drops or replaces the window itself.
#[derive(Debug, Clone)]
pub struct WindowProbe {
    state: Arc<Mutex<GridState>>,
}

impl WindowProbe {
    /// The area the window was created with.
    pub fn area(&self) -> Rect {
        self.state.lock().unwrap().area
    }

    /// Character and attribute at `(y, x)`.
    pub fn cell(&self, y: u16, x: u16) -> (char, Attr) {
        let state = self.state.lock().unwrap();
        let index = state.index(y, x).expect("probe out of bounds");
        state.cells[index]
    }

    /// The full text of a row, without trailing blanks.
    pub fn row_text(&self, y: u16) -> String {
        let state = self.state.lock().unwrap();
        let width = state.area.width;
        let mut text: String = (0..width)
            .filter_map(|x| state.index(y, x))
            .map(|i| state.cells[i].0)
            .collect();
        while text.ends_with(' ') {
            text.pop();
        }
        text
    }

    /// How many times the window was erased.
    pub fn erase_count(&self) -> usize {
        self.state.lock().unwrap().erase_count
    }

    /// How many times the window was refreshed.
    pub fn refresh_count(&self) -> usize {
        self.state.lock().unwrap().refresh_count
    }

    /// Cursor position recorded by the last `move_cursor`, if any.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.state.lock().unwrap().cursor
    }

    /// Make the next `count` writes fail with a synthetic terminal error.
    pub fn fail_next_writes(&self, count: usize) {
        self.state.lock().unwrap().fail_writes = count;
    }
}

#[derive(Debug)]
struct ScreenState {
    size: (u16, u16),
    keys: VecDeque<Key>,
    windows: Vec<Arc<Mutex<GridState>>>,
    cursor_visible: bool,
}

/// A scripted parent region.
#[derive(Debug)]
pub struct TestScreen {
    state: Mutex<ScreenState>,
}

impl TestScreen {
    /// Create a screen with the given dimensions.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            state: Mutex::new(ScreenState {
                size: (rows, cols),
                keys: VecDeque::new(),
                windows: Vec::new(),
                cursor_visible: false,
            }),
        }
    }

    /// Simulate a terminal resize.
    pub fn set_size(&self, rows: u16, cols: u16) {
        self.state.lock().unwrap().size = (rows, cols);
    }

    /// Queue keys for subsequent `read_key` calls.
    pub fn push_keys(&self, keys: impl IntoIterator<Item = Key>) {
        self.state.lock().unwrap().keys.extend(keys);
    }

    /// How many subwindows have been requested so far.
    pub fn subwindow_count(&self) -> usize {
        self.state.lock().unwrap().windows.len()
    }

    /// Inspection handle for the `index`-th created subwindow.
    pub fn probe(&self, index: usize) -> WindowProbe {
        let state = self.state.lock().unwrap();
        WindowProbe {
            state: Arc::clone(&state.windows[index]),
        }
    }

    /// Inspection handle for the most recently created subwindow.
    pub fn last_probe(&self) -> WindowProbe {
        let state = self.state.lock().unwrap();
        let grid = state.windows.last().expect("no subwindows created");
        WindowProbe {
            state: Arc::clone(grid),
        }
    }

    /// Current cursor visibility.
    pub fn cursor_visible(&self) -> bool {
        self.state.lock().unwrap().cursor_visible
    }
}

impl Screen for TestScreen {
    fn size(&self) -> (u16, u16) {
        self.state.lock().unwrap().size
    }

    fn subwindow(&self, area: Rect) -> Result<Box<dyn Window>, BackendError> {
        let mut state = self.state.lock().unwrap();
        let (rows, cols) = state.size;
        if !Rect::from_size(cols, rows).encloses(&area) {
            return Err(BackendError::Unsupported(
                "subwindow outside parent region",
            ));
        }
        let grid = Arc::new(Mutex::new(GridState::new(area)));
        state.windows.push(Arc::clone(&grid));
        Ok(Box::new(TestWindow { state: grid }))
    }

    fn set_cursor_visible(&self, visible: bool) -> Result<bool, BackendError> {
        let mut state = self.state.lock().unwrap();
        let previous = state.cursor_visible;
        state.cursor_visible = visible;
        Ok(previous)
    }

    fn read_key(&self) -> Result<Key, BackendError> {
        self.state.lock().unwrap().keys.pop_front().ok_or_else(|| {
            BackendError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "scripted key queue exhausted",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subwindow_records_and_probes() {
        let screen = TestScreen::new(24, 80);
        let mut win = screen.subwindow(Rect::new(0, 2, 80, 10)).unwrap();
        win.put_str(0, 0, "hello", Attr::BOLD).unwrap();
        win.refresh().unwrap();

        let probe = screen.last_probe();
        assert_eq!(probe.row_text(0), "hello");
        assert_eq!(probe.cell(0, 0), ('h', Attr::BOLD));
        assert_eq!(probe.refresh_count(), 1);
        assert_eq!(screen.subwindow_count(), 1);
    }

    #[test]
    fn subwindow_outside_parent_is_rejected() {
        let screen = TestScreen::new(10, 10);
        assert!(screen.subwindow(Rect::new(0, 8, 10, 5)).is_err());
    }

    #[test]
    fn writes_out_of_bounds_error() {
        let screen = TestScreen::new(10, 10);
        let mut win = screen.subwindow(Rect::new(0, 0, 5, 2)).unwrap();
        assert!(matches!(
            win.put_char(0, 5, 'x', Attr::empty()),
            Err(DrawError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn injected_failures_fire_once_each() {
        let screen = TestScreen::new(10, 10);
        let mut win = screen.subwindow(Rect::new(0, 0, 5, 2)).unwrap();
        screen.last_probe().fail_next_writes(1);
        assert!(win.put_char(0, 0, 'x', Attr::empty()).is_err());
        assert!(win.put_char(0, 0, 'x', Attr::empty()).is_ok());
    }

    #[test]
    fn key_queue_drains_then_errors() {
        let screen = TestScreen::new(10, 10);
        screen.push_keys([Key::Char('a'), Key::Enter]);
        assert_eq!(screen.read_key().unwrap(), Key::Char('a'));
        assert_eq!(screen.read_key().unwrap(), Key::Enter);
        assert!(screen.read_key().is_err());
    }
}
