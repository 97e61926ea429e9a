#![forbid(unsafe_code)]

//! Inline markup rendering for panekit panels.
//!
//! Panels accept strings with xhtml-style inline formatting tags
//! (`<b>bold</b>`, `<u>underline</u>`, `<h>highlight</h>`, and one tag per
//! named color such as `<red>...</red>`). This crate turns such a string
//! into a sequence of positioned, attribute-styled runs that the panel
//! layer feeds to the terminal backend.

pub mod markup;

pub use markup::{MarkupError, Run, TagTable, layout};
