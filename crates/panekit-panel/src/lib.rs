#![forbid(unsafe_code)]

//! Safe panel management over a character-grid terminal.
//!
//! This crate wraps raw terminal subwindows in [`Panel`]s: durable,
//! concurrency-aware drawing surfaces that survive terminal resizes. A
//! panel owns a disposable subwindow handle and recreates it whenever
//! geometry changes pull the rug out; content code never sees any of
//! that, it just implements [`PanelContent::draw`] against the bounded
//! [`Pad`] primitives.
//!
//! Drawing from several threads is serialized by a single injected
//! [`DrawLock`]; blocking text input runs under an
//! [`InputCaptureGuard`] that silences every other redraw for its
//! duration. [`PauseTracker`] gives screens a uniform way to freeze what
//! the user sees while live values keep changing.

mod editor;
mod lock;
mod pad;
mod panel;
mod pause;
mod scrollbar;

pub use lock::{DrawGuard, DrawLock, InputCaptureGuard};
pub use pad::Pad;
pub use panel::{HelpEntry, Panel, PanelConfig, PanelContent};
pub use pause::PauseTracker;
pub use scrollbar::slider_span;
