#![forbid(unsafe_code)]

//! Backend traits and error types.
//!
//! A [`Screen`] is a parent region that can hand out [`Window`] subregions
//! and deliver input. A [`Window`] is a positional character grid: writes
//! mutate its cells and `refresh` pushes them to the physical display.
//!
//! Neither trait promises thread safety for drawing; callers are expected
//! to serialize all window mutation behind the panel layer's global draw
//! lock. Individual writes can fail transiently (a terminal resize racing
//! an edge-of-window write, for instance) which is why every drawing
//! operation returns a [`DrawError`] the caller may intentionally discard.

use std::io;

use crate::attr::Attr;
use crate::geometry::Rect;

/// A transient failure from the terminal layer during a single write.
///
/// These are expected near window edges during concurrent resizes and are
/// recovered by simply not drawing the affected cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// The target cell is outside the window.
    OutOfBounds {
        /// Row of the rejected write.
        y: u16,
        /// Column of the rejected write.
        x: u16,
    },
    /// The terminal layer rejected the write.
    Terminal(String),
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfBounds { y, x } => {
                write!(f, "write at ({y}, {x}) landed outside the window")
            }
            Self::Terminal(msg) => write!(f, "terminal write failed: {msg}"),
        }
    }
}

impl std::error::Error for DrawError {}

/// A failure from the terminal layer outside the best-effort drawing path.
#[derive(Debug)]
pub enum BackendError {
    /// An I/O error from the underlying terminal.
    Io(io::Error),
    /// The backend cannot provide the requested operation.
    Unsupported(&'static str),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o error: {err}"),
            Self::Unsupported(what) => write!(f, "unsupported terminal operation: {what}"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Unsupported(_) => None,
        }
    }
}

impl From<io::Error> for BackendError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// A key delivered by the terminal layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Enter / carriage return.
    Enter,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Home.
    Home,
    /// End.
    End,
    /// The terminal was resized. Surfaced as a key so modal input loops
    /// can cancel instead of editing over stale geometry.
    Resize,
    /// Anything else, carrying a backend-specific code.
    Other(u32),
}

/// A rectangular subregion of a [`Screen`].
///
/// Writes take `(row, col)` coordinates relative to the window's own
/// origin. Nothing reaches the display until [`Window::refresh`].
pub trait Window: Send {
    /// Current dimensions as `(rows, cols)`.
    fn size(&self) -> (u16, u16);

    /// Parent-relative position as `(row, col)`.
    fn origin(&self) -> (u16, u16);

    /// Clear all cells to blanks.
    fn erase(&mut self);

    /// Push the window's contents to the physical display.
    fn refresh(&mut self) -> Result<(), DrawError>;

    /// Write a string starting at `(y, x)`.
    fn put_str(&mut self, y: u16, x: u16, text: &str, attr: Attr) -> Result<(), DrawError>;

    /// Write a single character at `(y, x)`.
    fn put_char(&mut self, y: u16, x: u16, ch: char, attr: Attr) -> Result<(), DrawError>;

    /// Draw a horizontal line of `length` cells starting at `(y, x)`.
    fn hline(&mut self, y: u16, x: u16, length: u16, attr: Attr) -> Result<(), DrawError>;

    /// Draw a vertical line of `length` cells starting at `(y, x)`.
    fn vline(&mut self, y: u16, x: u16, length: u16, attr: Attr) -> Result<(), DrawError>;

    /// Place the hardware cursor at `(y, x)` on the next refresh.
    fn move_cursor(&mut self, y: u16, x: u16) -> Result<(), DrawError>;
}

/// A parent terminal region: the source of subwindows and input.
pub trait Screen: Send + Sync {
    /// Current dimensions as `(rows, cols)`.
    fn size(&self) -> (u16, u16);

    /// Request a subregion at the given offset and size.
    fn subwindow(&self, area: Rect) -> Result<Box<dyn Window>, BackendError>;

    /// Set cursor visibility, returning the previous state.
    ///
    /// Not every terminal supports this; callers treat failure as benign.
    fn set_cursor_visible(&self, visible: bool) -> Result<bool, BackendError>;

    /// Block until the next key (or resize notification) arrives.
    fn read_key(&self) -> Result<Key, BackendError>;
}
