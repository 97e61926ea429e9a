#![forbid(unsafe_code)]

//! Terminal backend abstraction for panekit.
//!
//! This crate defines the seam between the panel layer and whatever is
//! actually driving the terminal: geometry primitives, text attributes and
//! the color palette, and the object-safe [`Screen`]/[`Window`] traits a
//! backend implements. The panel layer never talks to a terminal library
//! directly; everything goes through these traits so that panels can be
//! exercised against the scripted in-memory backend (behind the
//! `test-helpers` feature) as easily as against a real terminal.
//!
//! The traits are deliberately close to a character-grid model: a
//! [`Screen`] hands out rectangular [`Window`] subregions, writes are
//! positional `(row, col)` cell updates, and nothing reaches the physical
//! display until `refresh` is called.

pub mod attr;
pub mod backend;
pub mod geometry;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_backend;

pub use attr::{Attr, Palette};
pub use backend::{BackendError, DrawError, Key, Screen, Window};
pub use geometry::{Extent, Rect};
