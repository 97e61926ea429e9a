#![forbid(unsafe_code)]

//! Crossterm-backed [`Screen`] and [`Window`] implementations.
//!
//! A [`TtyWindow`] keeps an owned cell grid and only touches the real
//! terminal on `refresh`, when the whole grid is queued as cursor moves
//! and styled prints and flushed in one burst. Partial updates are not
//! worth the bookkeeping at panel sizes.
//!
//! Input and resize notifications come through crossterm's event stream;
//! resizes surface as [`Key::Resize`] so modal input loops can cancel.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::{Attribute, Color};
use crossterm::{cursor, queue, style};
use panekit_core::attr::Attr;
use panekit_core::backend::{BackendError, DrawError, Key, Screen, Window};
use panekit_core::geometry::Rect;

/// Fallback dimensions when the terminal size cannot be queried.
const FALLBACK_SIZE: (u16, u16) = (24, 80);

/// The crossterm foreground for an attribute's color bits.
///
/// Several color bits may be set at once (nested markup tags OR their
/// attributes together); the lowest set bit wins.
fn foreground(attr: Attr) -> Option<Color> {
    const COLORS: [(Attr, Color); 8] = [
        (Attr::RED, Color::Red),
        (Attr::GREEN, Color::Green),
        (Attr::YELLOW, Color::Yellow),
        (Attr::BLUE, Color::Blue),
        (Attr::CYAN, Color::Cyan),
        (Attr::MAGENTA, Color::Magenta),
        (Attr::BLACK, Color::Black),
        (Attr::WHITE, Color::White),
    ];
    COLORS
        .iter()
        .find(|(bit, _)| attr.contains(*bit))
        .map(|(_, color)| *color)
}

fn queue_attr(out: &mut impl Write, attr: Attr) -> io::Result<()> {
    queue!(out, style::SetAttribute(Attribute::Reset))?;
    if attr.contains(Attr::BOLD) {
        queue!(out, style::SetAttribute(Attribute::Bold))?;
    }
    if attr.contains(Attr::UNDERLINE) {
        queue!(out, style::SetAttribute(Attribute::Underlined))?;
    }
    if attr.contains(Attr::STANDOUT) {
        queue!(out, style::SetAttribute(Attribute::Reverse))?;
    }
    if let Some(color) = foreground(attr) {
        queue!(out, style::SetForegroundColor(color))?;
    }
    Ok(())
}

fn map_key_code(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;
    match code {
        KeyCode::Char(ch) => Some(Key::Char(ch)),
        KeyCode::Tab => Some(Key::Char('\t')),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        // Function keys follow the curses KEY_F(n) numbering.
        KeyCode::F(n) => Some(Key::Other(264 + u32::from(n))),
        _ => None,
    }
}

/// A subregion of the real terminal.
///
/// Writes land in an owned grid; `refresh` paints the grid to stdout.
#[derive(Debug)]
pub struct TtyWindow {
    area: Rect,
    cells: Vec<(char, Attr)>,
    cursor: Option<(u16, u16)>,
}

impl TtyWindow {
    fn new(area: Rect) -> Self {
        let cells = vec![(' ', Attr::empty()); area.width as usize * area.height as usize];
        Self {
            area,
            cells,
            cursor: None,
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
        match self.index(y, x) {
            Some(i) => {
                self.cells[i] = (ch, attr);
                Ok(())
            }
            None => Err(DrawError::OutOfBounds { y, x }),
        }
    }

    fn paint(&self, out: &mut impl Write) -> io::Result<()> {
        for row in 0..self.area.height {
            queue!(out, cursor::MoveTo(self.area.x, self.area.y + row))?;
            let mut current = Attr::empty();
            queue!(out, style::SetAttribute(Attribute::Reset))?;
            for col in 0..self.area.width {
                let (ch, attr) = self.cells[row as usize * self.area.width as usize + col as usize];
                if attr != current {
                    queue_attr(out, attr)?;
                    current = attr;
                }
                queue!(out, style::Print(ch))?;
            }
        }
        queue!(out, style::SetAttribute(Attribute::Reset))?;
        if let Some((y, x)) = self.cursor {
            queue!(
                out,
                cursor::MoveTo(self.area.x.saturating_add(x), self.area.y.saturating_add(y))
            )?;
        }
        out.flush()
    }
}

impl Window for TtyWindow {
    fn size(&self) -> (u16, u16) {
        (self.area.height, self.area.width)
    }

    fn origin(&self) -> (u16, u16) {
        (self.area.y, self.area.x)
    }

    fn erase(&mut self) {
        self.cells.fill((' ', Attr::empty()));
        self.cursor = None;
    }

    fn refresh(&mut self) -> Result<(), DrawError> {
        let mut stdout = io::stdout();
        self.paint(&mut stdout)
            .map_err(|err| DrawError::Terminal(err.to_string()))
    }

    fn put_str(&mut self, y: u16, x: u16, text: &str, attr: Attr) -> Result<(), DrawError> {
        let mut col = x;
        for ch in text.chars() {
            self.put(y, col, ch, attr)?;
            col = col.saturating_add(1);
        }
        Ok(())
    }

    fn put_char(&mut self, y: u16, x: u16, ch: char, attr: Attr) -> Result<(), DrawError> {
        self.put(y, x, ch, attr)
    }

    fn hline(&mut self, y: u16, x: u16, length: u16, attr: Attr) -> Result<(), DrawError> {
        for offset in 0..length {
            self.put(y, x.saturating_add(offset), '─', attr)?;
        }
        Ok(())
    }

    fn vline(&mut self, y: u16, x: u16, length: u16, attr: Attr) -> Result<(), DrawError> {
        for offset in 0..length {
            self.put(y.saturating_add(offset), x, '│', attr)?;
        }
        Ok(())
    }

    fn move_cursor(&mut self, y: u16, x: u16) -> Result<(), DrawError> {
        self.cursor = Some((y, x));
        Ok(())
    }
}

#[derive(Debug)]
struct ScreenState {
    /// Last successfully queried size, as `(rows, cols)`.
    size: (u16, u16),
    cursor_visible: bool,
}

/// The real terminal as a parent region.
///
/// Usually wrapped in an `Arc` and shared by every panel; a
/// [`TtySession`](crate::TtySession) should be alive for its whole
/// lifetime so raw mode is restored on exit.
#[derive(Debug)]
pub struct TtyScreen {
    state: Mutex<ScreenState>,
}

impl TtyScreen {
    /// Create a screen over the controlling terminal.
    pub fn new() -> Self {
        let size = match crossterm::terminal::size() {
            Ok((cols, rows)) => (rows, cols),
            Err(_) => FALLBACK_SIZE,
        };
        Self {
            state: Mutex::new(ScreenState {
                size,
                cursor_visible: true,
            }),
        }
    }
}

impl Default for TtyScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for TtyScreen {
    fn size(&self) -> (u16, u16) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let Ok((cols, rows)) = crossterm::terminal::size() {
            state.size = (rows, cols);
        }
        state.size
    }

    fn subwindow(&self, area: Rect) -> Result<Box<dyn Window>, BackendError> {
        let (rows, cols) = self.size();
        if !Rect::from_size(cols, rows).encloses(&area) {
            return Err(BackendError::Unsupported(
                "subwindow outside parent region",
            ));
        }
        Ok(Box::new(TtyWindow::new(area)))
    }

    fn set_cursor_visible(&self, visible: bool) -> Result<bool, BackendError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let mut stdout = io::stdout();
        if visible {
            crossterm::execute!(stdout, cursor::Show)?;
        } else {
            crossterm::execute!(stdout, cursor::Hide)?;
        }
        let previous = state.cursor_visible;
        state.cursor_visible = visible;
        Ok(previous)
    }

    fn read_key(&self) -> Result<Key, BackendError> {
        loop {
            match crossterm::event::read()? {
                crossterm::event::Event::Key(key) => {
                    if key.kind == crossterm::event::KeyEventKind::Release {
                        continue;
                    }
                    if let Some(mapped) = map_key_code(key.code) {
                        return Ok(mapped);
                    }
                }
                crossterm::event::Event::Resize(cols, rows) => {
                    let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
                    state.size = (rows, cols);
                    return Ok(Key::Resize);
                }
                // Mouse, focus, and paste events are not part of the
                // panel input vocabulary.
                _ => {}
            }
        }
    }
}
