#![forbid(unsafe_code)]

//! Crossterm terminal backend for panekit.
//!
//! [`TtySession`] is the RAII lifecycle guard: raw mode in, raw mode out,
//! even on panic. [`TtyScreen`] implements the
//! [`Screen`](panekit_core::backend::Screen) trait over the controlling
//! terminal so panels can be hosted on it.
//!
//! ```no_run
//! use std::sync::Arc;
//! use panekit_tty::{SessionOptions, TtyScreen, TtySession};
//!
//! let _session = TtySession::new(SessionOptions {
//!     alternate_screen: true,
//! })?;
//! let screen = Arc::new(TtyScreen::new());
//! // build panels on `screen`...
//! # Ok::<(), std::io::Error>(())
//! ```

mod screen;
mod session;

pub use screen::{TtyScreen, TtyWindow};
pub use session::{SessionOptions, TtySession};
