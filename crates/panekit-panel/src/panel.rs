#![forbid(unsafe_code)]

//! The panel abstraction.
//!
//! A [`Panel`] is a durable wrapper for a terminal subwindow. It hides the
//! ugliness in common character-grid operations: locking when several
//! threads draw concurrently, graceful handling of terminal resizing, and
//! clipping of text that falls outside the panel.
//!
//! The subwindow handle is owned exclusively by the panel and treated as
//! disposable: changing any geometry parameter invalidates it, and the
//! redraw path lazily recreates it from the parent when needed. Content is
//! supplied through the [`PanelContent`] capability; panels never draw on
//! their own.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use panekit_core::attr::Attr;
use panekit_core::backend::{BackendError, Key, Screen, Window};
use panekit_core::geometry::{Extent, Rect};
use panekit_text::markup::TagTable;
use tracing::Level;

use crate::editor::LineEditor;
use crate::lock::DrawLock;
use crate::pad::{Pad, best_effort};

/// Panel-layer configuration.
///
/// One recognized option: the severity used when a subwindow is recreated.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Log level for subwindow recreation events.
    pub recreate_log_level: Level,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            recreate_log_level: Level::DEBUG,
        }
    }
}

/// One row of an externally-rendered help overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// The control (for instance a key name).
    pub control: String,
    /// What the control does.
    pub description: String,
    /// Current state of whatever the control toggles, if any.
    pub status: Option<String>,
}

/// The display implementation a panel hosts.
///
/// Concrete screens implement `draw` against the bounded [`Pad`]; the
/// dimensions passed are the drawable dimensions, which in terms of width
/// is a column less than the actual space.
pub trait PanelContent: Send {
    /// Draw the content. Called under the global draw lock; never call it
    /// directly, go through [`Panel::redraw`].
    fn draw(&mut self, pad: &mut Pad<'_>, width: u16, height: u16);

    /// Handle user input. Return true if the key press was consumed.
    fn handle_key(&mut self, _key: Key) -> bool {
        false
    }

    /// Help information for the controls this content provides.
    fn help(&self) -> Vec<HelpEntry> {
        Vec::new()
    }

    /// Notification that the hosting panel's pause state changed. Screens
    /// with a [`PauseTracker`](crate::PauseTracker) refresh their
    /// snapshots here when `paused` is true, then forward the flag.
    fn on_pause_changed(&mut self, _paused: bool) {}
}

/// A content that draws nothing; useful as a placeholder.
impl PanelContent for () {
    fn draw(&mut self, _pad: &mut Pad<'_>, _width: u16, _height: u16) {}
}

/// A lazily-backed rectangular drawing surface within a parent region.
pub struct Panel {
    name: String,
    parent: Arc<dyn Screen>,
    lock: DrawLock,
    tags: Arc<TagTable>,
    config: PanelConfig,
    content: Box<dyn PanelContent>,

    visible: bool,
    title_visible: bool,
    paused: bool,
    pause_since: Option<Instant>,

    top: u16,
    left: u16,
    height: Extent,
    width: Extent,

    /// The subwindow handle. `None` means not yet created or invalidated;
    /// it is never drawn to directly, only through the bounded wrappers.
    win: Option<Box<dyn Window>>,
    /// Subwindow dimensions when last redrawn, as `(rows, cols)`.
    last_size: Option<(u16, u16)>,
}

impl Panel {
    /// Create a panel within `parent`, identified by `name`, placed at row
    /// `top`. It starts hidden, unbounded (fills available space), and
    /// with empty content; use the `with_*` builders to adjust.
    pub fn new(
        parent: Arc<dyn Screen>,
        lock: DrawLock,
        tags: Arc<TagTable>,
        name: impl Into<String>,
        top: u16,
    ) -> Self {
        Self {
            name: name.into(),
            parent,
            lock,
            tags,
            config: PanelConfig::default(),
            content: Box::new(()),
            visible: false,
            title_visible: true,
            paused: false,
            pause_since: None,
            top,
            left: 0,
            height: Extent::Fill,
            width: Extent::Fill,
            win: None,
            last_size: None,
        }
    }

    /// Set the content capability (builder).
    pub fn with_content(mut self, content: Box<dyn PanelContent>) -> Self {
        self.content = content;
        self
    }

    /// Set the maximum height (builder).
    pub fn with_height(mut self, height: Extent) -> Self {
        self.height = height;
        self
    }

    /// Set the maximum width (builder).
    pub fn with_width(mut self, width: Extent) -> Self {
        self.width = width;
        self
    }

    /// Set the left offset (builder).
    pub fn with_left(mut self, left: u16) -> Self {
        self.left = left;
        self
    }

    /// Set the configuration (builder).
    pub fn with_config(mut self, config: PanelConfig) -> Self {
        self.config = config;
        self
    }

    // --- Identity and flags ---

    /// The panel's identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the panel is redrawn when requested.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Toggle visibility. Hidden panels skip redraws entirely.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the title is configured to be visible.
    pub fn is_title_visible(&self) -> bool {
        self.title_visible
    }

    /// Configure title visibility for the next redraw. Not guaranteed to
    /// be respected; not all contents render a title.
    pub fn set_title_visible(&mut self, visible: bool) {
        self.title_visible = visible;
    }

    // --- Geometry ---

    /// Row within the parent where subwindows are placed.
    pub fn top(&self) -> u16 {
        self.top
    }

    /// Change the top offset, invalidating the subwindow if it moved.
    pub fn set_top(&mut self, top: u16) {
        if self.top != top {
            self.top = top;
            self.win = None;
        }
    }

    /// Column within the parent where subwindows are placed.
    pub fn left(&self) -> u16 {
        self.left
    }

    /// Change the left offset, invalidating the subwindow if it moved.
    pub fn set_left(&mut self, left: u16) {
        if self.left != left {
            self.left = left;
            self.win = None;
        }
    }

    /// Configured maximum height.
    pub fn height(&self) -> Extent {
        self.height
    }

    /// Change the maximum height, invalidating the subwindow on change.
    pub fn set_height(&mut self, height: Extent) {
        if self.height != height {
            self.height = height;
            self.win = None;
        }
    }

    /// Configured maximum width.
    pub fn width(&self) -> Extent {
        self.width
    }

    /// Change the maximum width, invalidating the subwindow on change.
    pub fn set_width(&mut self, width: Extent) {
        if self.width != width {
            self.width = width;
            self.win = None;
        }
    }

    /// The parent region subwindows are created in.
    pub fn parent(&self) -> Arc<dyn Screen> {
        Arc::clone(&self.parent)
    }

    /// Change the parent, invalidating the subwindow if it is a different
    /// region.
    pub fn set_parent(&mut self, parent: Arc<dyn Screen>) {
        if !Arc::ptr_eq(&self.parent, &parent) {
            self.parent = parent;
            self.win = None;
        }
    }

    /// The dimensions the subwindow would use if redrawn right now, as
    /// `(rows, cols)`: the parent's remaining space past this panel's
    /// offsets, clamped by the configured maximums.
    ///
    /// Recomputed on every redraw; the parent's size changes under us on
    /// terminal resize.
    pub fn preferred_size(&self) -> (u16, u16) {
        let (rows, cols) = self.parent.size();
        let avail_rows = rows.saturating_sub(self.top);
        let avail_cols = cols.saturating_sub(self.left);
        (
            self.height.clamp_to(avail_rows),
            self.width.clamp_to(avail_cols),
        )
    }

    // --- Pause ---

    /// Whether the panel is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// When the panel was last paused. `None` if never paused.
    pub fn pause_time(&self) -> Option<Instant> {
        self.pause_since
    }

    /// Toggle the pause state, returning whether a transition occurred.
    ///
    /// Entering pause notifies the content (which snapshots its tracked
    /// state) and, unless suppressed, forces a redraw so the visible
    /// content reflects the frozen state immediately rather than changing
    /// the next time something else redraws it.
    pub fn set_paused(&mut self, paused: bool, suppress_redraw: bool) -> bool {
        if paused == self.paused {
            return false;
        }
        if paused {
            self.pause_since = Some(Instant::now());
        }
        self.paused = paused;
        self.content.on_pause_changed(paused);
        if !suppress_redraw {
            self.redraw(true, false);
        }
        true
    }

    // --- Input and help ---

    /// Forward a key press to the content. Returns true if consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        self.content.handle_key(key)
    }

    /// Help information for the content's controls.
    pub fn help(&self) -> Vec<HelpEntry> {
        self.content.help()
    }

    // --- Redraw ---

    /// Redraw the panel's content, or just refresh it if nothing changed.
    ///
    /// `force_redraw` clears and redraws the content even if the subwindow
    /// is unchanged. `block` decides what happens when another panel holds
    /// the draw lock: wait for a turn, or abandon this redraw silently and
    /// let the next call retry. The force request is overridden to true
    /// whenever the subwindow was recreated or its dimensions changed
    /// since the last draw; stale content after a resize is never
    /// acceptable.
    pub fn redraw(&mut self, force_redraw: bool, block: bool) {
        if !self.visible {
            return;
        }
        // A modal input session owns the terminal's full attention.
        if self.lock.is_input_captured() {
            return;
        }

        // A panel entirely outside its parent draws nothing this round.
        let (preferred_rows, _) = self.preferred_size();
        if preferred_rows == 0 {
            self.win = None;
            return;
        }

        let is_new = self.reset_subwindow();
        let Some(win) = self.win.as_mut() else {
            return;
        };

        let size = win.size();
        let force = force_redraw || is_new || self.last_size != Some(size);
        self.last_size = Some(size);

        let _guard = if block {
            self.lock.acquire()
        } else {
            match self.lock.try_acquire() {
                Some(guard) => guard,
                None => return,
            }
        };

        if force {
            win.erase();
            let (rows, cols) = size;
            let mut pad = Pad::new(win.as_mut(), rows, cols, &self.tags);
            self.content.draw(&mut pad, cols.saturating_sub(1), rows);
        }
        best_effort(win.refresh());
    }

    /// Recreate the subwindow if the validity state machine demands it:
    /// the handle is absent, there is room to grow vertically, the
    /// subwindow has been displaced from its configured top, or the
    /// preferred size shrank below the actual size.
    ///
    /// Returns true if a new subwindow was created.
    fn reset_subwindow(&mut self) -> bool {
        let (rows, cols) = self.preferred_size();
        if rows == 0 {
            return false;
        }

        let mut recreate = self.win.is_none();
        if let Some(win) = &self.win {
            let (win_rows, win_cols) = win.size();
            recreate |= win_rows < rows; // room to grow vertically
            recreate |= win.origin().0 != self.top; // displaced
            recreate |= win_cols > cols || win_rows > rows; // shrinking
        }

        if recreate {
            // Release the prior handle before requesting its replacement.
            self.win = None;
            match self
                .parent
                .subwindow(Rect::new(self.left, self.top, cols, rows))
            {
                Ok(win) => {
                    self.win = Some(win);
                    log_recreated(self.config.recreate_log_level, &self.name, rows, cols);
                }
                Err(err) => {
                    tracing::warn!(panel = %self.name, error = %err, "subwindow creation failed");
                }
            }
        }
        recreate
    }

    // --- Modal input ---

    /// Run a blocking text field, returning the trimmed entered text or
    /// `None` if the user cancelled with escape (or the terminal resized
    /// mid-edit, which would otherwise corrupt the field).
    ///
    /// The field is a temporary single-line subwindow at `(top + y,
    /// left + x)`. For its duration this panel owns the terminal's full
    /// attention: an input-capture guard turns every other redraw in the
    /// process into a no-op. The draw lock itself is deliberately NOT held
    /// while awaiting keystrokes.
    pub fn getstr(&mut self, y: u16, x: u16, initial: &str) -> Result<Option<String>, BackendError> {
        let _capture = self.lock.capture_input();

        // Cursor visibility is best-effort; not all terminals support it.
        let previous_cursor = self.parent.set_cursor_visible(true).unwrap_or(false);
        let result = self.edit_loop(y, x, initial);
        let _ = self.parent.set_cursor_visible(previous_cursor);
        result
    }

    fn edit_loop(&mut self, y: u16, x: u16, initial: &str) -> Result<Option<String>, BackendError> {
        let (_, preferred_cols) = self.preferred_size();
        if preferred_cols <= x {
            return Ok(None);
        }
        let field_cols = preferred_cols - x;
        let mut field = self.parent.subwindow(Rect::new(
            self.left + x,
            self.top.saturating_add(y),
            field_cols,
            1,
        ))?;
        let mut editor = LineEditor::new(initial, field_cols.saturating_sub(1) as usize);

        loop {
            field.erase();
            best_effort(field.put_str(0, 0, editor.text(), Attr::empty()));
            best_effort(field.move_cursor(0, editor.cursor_col()));
            best_effort(field.refresh());

            match self.parent.read_key()? {
                Key::Esc | Key::Resize => return Ok(None),
                Key::Enter => return Ok(Some(editor.text().trim().to_string())),
                key => editor.handle(key),
            }
        }
    }
}

impl fmt::Debug for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("name", &self.name)
            .field("top", &self.top)
            .field("left", &self.left)
            .field("height", &self.height)
            .field("width", &self.width)
            .field("visible", &self.visible)
            .field("paused", &self.paused)
            .field("has_win", &self.win.is_some())
            .field("last_size", &self.last_size)
            .finish()
    }
}

fn log_recreated(level: Level, name: &str, rows: u16, cols: u16) {
    if level == Level::ERROR {
        tracing::error!(panel = name, rows, cols, "recreated subwindow");
    } else if level == Level::WARN {
        tracing::warn!(panel = name, rows, cols, "recreated subwindow");
    } else if level == Level::INFO {
        tracing::info!(panel = name, rows, cols, "recreated subwindow");
    } else if level == Level::DEBUG {
        tracing::debug!(panel = name, rows, cols, "recreated subwindow");
    } else {
        tracing::trace!(panel = name, rows, cols, "recreated subwindow");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, mpsc};
    use std::thread;

    use panekit_core::test_backend::TestScreen;

    use super::*;

    struct CountingContent {
        draws: Arc<AtomicUsize>,
        last_dims: Arc<Mutex<(u16, u16)>>,
        pause_events: Arc<Mutex<Vec<bool>>>,
    }

    impl PanelContent for CountingContent {
        fn draw(&mut self, pad: &mut Pad<'_>, width: u16, height: u16) {
            self.draws.fetch_add(1, Ordering::SeqCst);
            *self.last_dims.lock().unwrap() = (width, height);
            pad.addstr(0, 0, "content", Attr::empty());
        }

        fn handle_key(&mut self, key: Key) -> bool {
            key == Key::Char('q')
        }

        fn help(&self) -> Vec<HelpEntry> {
            vec![HelpEntry {
                control: "q".into(),
                description: "quit".into(),
                status: None,
            }]
        }

        fn on_pause_changed(&mut self, paused: bool) {
            self.pause_events.lock().unwrap().push(paused);
        }
    }

    struct Fixture {
        screen: Arc<TestScreen>,
        panel: Panel,
        draws: Arc<AtomicUsize>,
        last_dims: Arc<Mutex<(u16, u16)>>,
        pause_events: Arc<Mutex<Vec<bool>>>,
        lock: DrawLock,
    }

    fn fixture(rows: u16, cols: u16, top: u16) -> Fixture {
        let screen = Arc::new(TestScreen::new(rows, cols));
        let lock = DrawLock::new();
        let tags = Arc::new(TagTable::default());
        let draws = Arc::new(AtomicUsize::new(0));
        let last_dims = Arc::new(Mutex::new((0, 0)));
        let pause_events = Arc::new(Mutex::new(Vec::new()));
        let content = CountingContent {
            draws: Arc::clone(&draws),
            last_dims: Arc::clone(&last_dims),
            pause_events: Arc::clone(&pause_events),
        };
        let mut panel = Panel::new(
            Arc::clone(&screen) as Arc<dyn Screen>,
            lock.clone(),
            tags,
            "test",
            top,
        )
        .with_content(Box::new(content));
        panel.set_visible(true);
        Fixture {
            screen,
            panel,
            draws,
            last_dims,
            pause_events,
            lock,
        }
    }

    // --- Visibility and lifecycle ---

    #[test]
    fn hidden_panels_skip_redraw() {
        let mut fx = fixture(24, 80, 0);
        fx.panel.set_visible(false);
        fx.panel.redraw(true, true);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 0);
        assert_eq!(fx.screen.subwindow_count(), 0);
    }

    #[test]
    fn redraw_twice_without_changes_draws_content_once() {
        let mut fx = fixture(24, 80, 0);
        fx.panel.redraw(false, true);
        fx.panel.redraw(false, true);
        // First call creates the subwindow and must draw; the second is a
        // pure refresh.
        assert_eq!(fx.draws.load(Ordering::SeqCst), 1);
        assert_eq!(fx.screen.last_probe().refresh_count(), 2);
    }

    #[test]
    fn force_redraw_redraws_content() {
        let mut fx = fixture(24, 80, 0);
        fx.panel.redraw(false, true);
        fx.panel.redraw(true, true);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn drawable_width_reserves_a_boundary_column() {
        let mut fx = fixture(24, 80, 0);
        fx.panel.redraw(false, true);
        assert_eq!(*fx.last_dims.lock().unwrap(), (79, 24));
    }

    #[test]
    fn zero_preferred_height_draws_nothing() {
        let mut fx = fixture(24, 80, 30);
        fx.panel.redraw(true, true);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 0);
        assert_eq!(fx.screen.subwindow_count(), 0);
    }

    // --- Resize handling ---

    #[test]
    fn parent_shrink_recreates_and_forces_full_redraw() {
        let mut fx = fixture(24, 80, 2);
        fx.panel.redraw(false, true);
        assert_eq!(fx.screen.subwindow_count(), 1);

        fx.screen.set_size(10, 40);
        fx.panel.redraw(false, true);

        assert_eq!(fx.screen.subwindow_count(), 2);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 2);
        let area = fx.screen.last_probe().area();
        assert_eq!((area.height, area.width), (8, 40));
    }

    #[test]
    fn parent_regrow_recreates_for_vertical_growth() {
        let mut fx = fixture(10, 80, 0);
        fx.panel.redraw(false, true);
        fx.screen.set_size(24, 80);
        fx.panel.redraw(false, true);
        assert_eq!(fx.screen.subwindow_count(), 2);
        assert_eq!(fx.screen.last_probe().area().height, 24);
    }

    #[test]
    fn shrinking_below_the_panel_top_invalidates_the_handle() {
        let mut fx = fixture(24, 80, 20);
        fx.panel.redraw(false, true);
        assert_eq!(fx.screen.subwindow_count(), 1);

        fx.screen.set_size(15, 80);
        fx.panel.redraw(false, true);
        // Outside the parent: nothing new created, nothing drawn.
        assert_eq!(fx.screen.subwindow_count(), 1);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 1);

        fx.screen.set_size(24, 80);
        fx.panel.redraw(false, true);
        assert_eq!(fx.screen.subwindow_count(), 2);
    }

    // --- Geometry setters ---

    #[test]
    fn changing_top_invalidates_and_relocates_the_subwindow() {
        let mut fx = fixture(24, 80, 0);
        fx.panel.redraw(false, true);
        fx.panel.set_top(3);
        fx.panel.redraw(false, true);
        assert_eq!(fx.screen.subwindow_count(), 2);
        assert_eq!(fx.screen.last_probe().area().y, 3);
    }

    #[test]
    fn unchanged_setters_are_noops() {
        let mut fx = fixture(24, 80, 0);
        fx.panel.redraw(false, true);
        fx.panel.set_top(0);
        fx.panel.set_height(Extent::Fill);
        fx.panel.set_width(Extent::Fill);
        fx.panel.redraw(false, true);
        assert_eq!(fx.screen.subwindow_count(), 1);
    }

    #[test]
    fn height_cap_clamps_the_subwindow() {
        let mut fx = fixture(24, 80, 0);
        fx.panel.set_height(Extent::Cells(5));
        fx.panel.redraw(false, true);
        let area = fx.screen.last_probe().area();
        assert_eq!((area.height, area.width), (5, 80));
    }

    #[test]
    fn preferred_size_accounts_for_offsets_and_caps() {
        let fx = fixture(24, 80, 4);
        assert_eq!(fx.panel.preferred_size(), (20, 80));
    }

    // --- Locking ---

    #[test]
    fn nonblocking_redraw_is_abandoned_while_lock_is_held() {
        let mut fx = fixture(24, 80, 0);
        let remote = fx.lock.clone();
        let (held_tx, held_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let holder = thread::spawn(move || {
            let _guard = remote.acquire();
            held_tx.send(()).unwrap();
            release_rx.recv().unwrap();
        });

        held_rx.recv().unwrap();
        fx.panel.redraw(true, false);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 0);

        release_tx.send(()).unwrap();
        holder.join().unwrap();
        fx.panel.redraw(true, false);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn redraw_is_a_noop_during_modal_input_capture() {
        let mut fx = fixture(24, 80, 0);
        let capture = fx.lock.capture_input();
        fx.panel.redraw(true, true);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 0);
        drop(capture);
        fx.panel.redraw(true, true);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 1);
    }

    // --- Pause protocol ---

    #[test]
    fn set_paused_transitions_once_and_notifies_content() {
        let mut fx = fixture(24, 80, 0);
        assert!(fx.panel.set_paused(true, true));
        assert!(!fx.panel.set_paused(true, true));
        assert!(fx.panel.set_paused(false, true));
        assert_eq!(*fx.pause_events.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn pause_records_its_timestamp_on_entry() {
        let mut fx = fixture(24, 80, 0);
        assert_eq!(fx.panel.pause_time(), None);
        fx.panel.set_paused(true, true);
        let stamp = fx.panel.pause_time().unwrap();
        fx.panel.set_paused(false, true);
        assert_eq!(fx.panel.pause_time(), Some(stamp));
    }

    #[test]
    fn pause_forces_a_redraw_unless_suppressed() {
        let mut fx = fixture(24, 80, 0);
        fx.panel.redraw(false, true);
        fx.panel.set_paused(true, false);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 2);
        fx.panel.set_paused(false, true);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 2);
    }

    // --- Key handling and help ---

    #[test]
    fn keys_are_delegated_to_content() {
        let mut fx = fixture(24, 80, 0);
        assert!(fx.panel.handle_key(Key::Char('q')));
        assert!(!fx.panel.handle_key(Key::Char('x')));
    }

    #[test]
    fn help_comes_from_content() {
        let fx = fixture(24, 80, 0);
        let help = fx.panel.help();
        assert_eq!(help.len(), 1);
        assert_eq!(help[0].control, "q");
    }

    // --- Modal input ---

    #[test]
    fn getstr_returns_the_trimmed_entry() {
        let mut fx = fixture(24, 80, 0);
        fx.screen.push_keys([
            Key::Char(' '),
            Key::Char('h'),
            Key::Char('i'),
            Key::Enter,
        ]);
        let entered = fx.panel.getstr(1, 4, "").unwrap();
        assert_eq!(entered, Some("hi".to_string()));
        // The field window was placed at (top + y, left + x).
        let area = fx.screen.last_probe().area();
        assert_eq!((area.y, area.x), (1, 4));
        assert_eq!(area.height, 1);
    }

    #[test]
    fn getstr_escape_cancels() {
        let mut fx = fixture(24, 80, 0);
        fx.screen.push_keys([Key::Char('a'), Key::Esc]);
        assert_eq!(fx.panel.getstr(0, 0, "").unwrap(), None);
    }

    #[test]
    fn getstr_resize_cancels() {
        let mut fx = fixture(24, 80, 0);
        fx.screen.push_keys([Key::Char('a'), Key::Resize]);
        assert_eq!(fx.panel.getstr(0, 0, "").unwrap(), None);
    }

    #[test]
    fn getstr_edits_around_the_initial_text() {
        let mut fx = fixture(24, 80, 0);
        fx.screen.push_keys([
            Key::Home,
            Key::Char('X'),
            Key::End,
            Key::Char('Y'),
            Key::Enter,
        ]);
        let entered = fx.panel.getstr(0, 0, "abc").unwrap();
        assert_eq!(entered, Some("XabcY".to_string()));
    }

    #[test]
    fn getstr_restores_cursor_and_releases_capture() {
        let mut fx = fixture(24, 80, 0);
        fx.screen.push_keys([Key::Enter]);
        fx.panel.getstr(0, 0, "").unwrap();
        assert!(!fx.screen.cursor_visible());
        assert!(!fx.lock.is_input_captured());

        // Redraws work again afterwards.
        fx.panel.redraw(true, true);
        assert_eq!(fx.draws.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn getstr_without_room_yields_nothing() {
        let mut fx = fixture(24, 80, 0);
        assert_eq!(fx.panel.getstr(0, 80, "").unwrap(), None);
    }
}
