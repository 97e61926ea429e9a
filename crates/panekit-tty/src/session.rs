#![forbid(unsafe_code)]

//! Terminal session lifecycle guard.
//!
//! RAII-based terminal lifecycle management that ensures cleanup even on
//! panic. The guard owns raw-mode entry/exit and tracks the state changes
//! it made so it only undoes those.
//!
//! On drop, cleanup happens in reverse order of enabling:
//! 1. Show cursor (always)
//! 2. Leave alternate screen (if entered)
//! 3. Exit raw mode (always)
//! 4. Flush stdout
//!
//! A process-wide panic hook performs the same cleanup before the panic
//! message prints, so the message lands on a usable terminal.

use std::io::{self, Write};
use std::sync::OnceLock;

/// Terminal session configuration options.
///
/// All options default to `false` for maximum portability.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Enter the alternate screen buffer (`CSI ? 1049 h`).
    ///
    /// The original screen and scrollback are restored on exit. Leave this
    /// `false` for inline use.
    pub alternate_screen: bool,
}

/// A terminal session that manages raw mode and cleanup.
///
/// Only one session should exist at a time; creating several will leave
/// the terminal in whatever state the last one to drop restores.
#[derive(Debug)]
pub struct TtySession {
    alternate_screen_enabled: bool,
}

impl TtySession {
    /// Enter raw mode and optionally the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode cannot be enabled.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        crossterm::terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");

        let mut session = Self {
            alternate_screen_enabled: false,
        };

        if options.alternate_screen {
            crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
            session.alternate_screen_enabled = true;
            tracing::info!("alternate screen enabled");
        }

        Ok(session)
    }

    /// Create a minimal session (raw mode only).
    pub fn minimal() -> io::Result<Self> {
        Self::new(SessionOptions::default())
    }

    fn cleanup(&mut self) {
        let mut stdout = io::stdout();

        // Always show the cursor before leaving; modal input may have
        // toggled it.
        let _ = crossterm::execute!(stdout, crossterm::cursor::Show);

        if self.alternate_screen_enabled {
            let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
            self.alternate_screen_enabled = false;
            tracing::info!("alternate screen disabled");
        }

        // Exit raw mode last.
        let _ = crossterm::terminal::disable_raw_mode();
        tracing::info!("terminal raw mode disabled");

        let _ = stdout.flush();
    }
}

impl Drop for TtySession {
    fn drop(&mut self) {
        self.cleanup();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_cleanup();
            previous(info);
        }));
    });
}

fn best_effort_cleanup() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(stdout, crossterm::cursor::Show);
    let _ = crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen);
    let _ = crossterm::terminal::disable_raw_mode();
    let _ = stdout.flush();
}
