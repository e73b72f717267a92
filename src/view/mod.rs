//! TUI rendering and terminal management (impure shell).
//!
//! [`TuiApp`] is the host loop around the pure [`ViewportShell`]: it owns
//! the terminal, the history and the demo content, converts crossterm
//! events into shell events, and draws one frame per step.

pub mod catalog;
pub mod content;
mod layout;
pub mod styles;

pub use catalog::{Row, ViewKind};
pub use content::{ContentPane, TrackList};
pub use layout::{render_screen, row_height, split, visible_rows, Screen, ScreenAreas};
pub use styles::{ColorConfig, ShellStyles};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::fetch::{fetch_to_object, Fetch, FileFetcher};
use crate::history::MemoryHistory;
use crate::model::settings::COMPACT;
use crate::model::{KeyAction, LayoutSettings, RoutePath, ShellError, ViewportDimensions};
use crate::state::{
    ConnectivitySignal, VirtualListHandle, VirtualizationAccessor, ViewportShell,
};
use crate::store::{MemoryStore, ShellStore};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Poll timeout when nothing is scheduled.
const IDLE_INTERVAL: Duration = Duration::from_millis(250);

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    shell: ViewportShell<MemoryStore>,
    history: MemoryHistory,
    key_bindings: KeyBindings,
    styles: ShellStyles,
    pane: ContentPane,
    /// Virtual list of the mounted view. Replaced on every mount.
    list: Rc<RefCell<TrackList>>,
    mounted_path: Option<RoutePath>,
    title: String,
    rows: Vec<Row>,
    liked: HashMap<String, bool>,
    fetcher: Box<dyn Fetch>,
    pending_library: Option<String>,
    simulated_online: bool,
    frame_interval: Duration,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    ///
    /// The configuration is validated before the terminal is touched, and
    /// the terminal is restored if setup fails after that.
    pub fn new(config: &ResolvedConfig) -> Result<Self, ShellError> {
        config.initial_route()?;

        enable_raw_mode()?;
        let setup = || -> Result<Self, ShellError> {
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            let backend = CrosstermBackend::new(stdout);
            let terminal = Terminal::new(backend)?;
            Self::with_terminal(terminal, config, Box::new(FileFetcher::new()))
        };

        setup().inspect_err(|_| {
            if let Err(e) = restore_terminal() {
                warn!(error = %e, "Failed to restore terminal after setup error");
            }
        })
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app on an existing terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured initial route is invalid.
    pub fn with_terminal(
        terminal: Terminal<B>,
        config: &ResolvedConfig,
        fetcher: Box<dyn Fetch>,
    ) -> Result<Self, ShellError> {
        let initial = config.initial_route()?;
        let mut store = MemoryStore::new();
        if config.library_url.is_none() {
            store.set_loaded(true);
        }

        Ok(Self {
            terminal,
            shell: ViewportShell::new(store, config.shell_timing()),
            history: MemoryHistory::new(initial),
            key_bindings: KeyBindings::default(),
            styles: ShellStyles::new(),
            pane: ContentPane::new(),
            list: Rc::new(RefCell::new(TrackList::new())),
            mounted_path: None,
            title: String::new(),
            rows: Vec::new(),
            liked: HashMap::new(),
            fetcher,
            pending_library: config.library_url.clone(),
            simulated_online: true,
            frame_interval: config.frame_interval(),
        })
    }

    /// Mount the shell, run the event loop, unmount.
    ///
    /// Returns when the user quits.
    pub fn run(&mut self) -> Result<(), ShellError> {
        self.mount(Instant::now());
        let result = self.event_loop();
        self.unmount();
        result
    }

    /// Attach the shell to the history and report the initial size.
    pub fn mount(&mut self, now: Instant) {
        self.shell.mount(&mut self.history);
        self.report_size(now);
    }

    /// Detach the shell.
    pub fn unmount(&mut self) {
        self.shell.unmount();
    }

    fn event_loop(&mut self) -> Result<(), ShellError> {
        // First frame shows the spinner while the library loads.
        self.step(Instant::now())?;
        self.load_library();

        loop {
            let timeout = self.poll_timeout(Instant::now());
            if event::poll(timeout)? {
                let now = Instant::now();
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key, now) {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => {
                        self.shell
                            .handle_resize(ViewportDimensions::new(width, height), now);
                    }
                    _ => {}
                }
            }
            self.step(Instant::now())?;
        }
    }

    /// How long the loop may block waiting for input.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let base = if self.shell.is_restoring() {
            self.frame_interval
        } else {
            IDLE_INTERVAL
        };
        self.shell
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(base))
            .unwrap_or(base)
    }

    /// One host iteration: advance the shell, mount the view the history
    /// points at, run the frame boundary, then draw.
    pub fn step(&mut self, now: Instant) -> Result<(), ShellError> {
        self.shell.tick(now);
        self.sync_mounted_view();

        let visible = self.visible_rows()?;
        self.pane.set_extent(self.rows.len() as u32, visible);

        self.shell.frame(Some(&mut self.pane));
        self.forward_scroll_events(now);

        self.draw()
    }

    /// Fetch the liked-track index, if a library is configured.
    pub fn load_library(&mut self) {
        let Some(url) = self.pending_library.take() else {
            return;
        };
        match fetch_to_object(self.fetcher.as_ref(), &url) {
            Ok(index) => {
                info!(url = %url, liked = index.len(), "Library loaded");
                self.liked = index;
                self.shell.store_mut().set_loaded(true);
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Library load failed");
                self.shell.store_mut().set_loading_error(Some(e.to_string()));
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,

            KeyAction::ScrollUp => self.pane.scroll_by(-1),
            KeyAction::ScrollDown => self.pane.scroll_by(1),
            KeyAction::PageUp => self.pane.page(false),
            KeyAction::PageDown => self.pane.page(true),
            KeyAction::ScrollToTop => self.pane.scroll_to_top(),
            KeyAction::ScrollToBottom => self.pane.scroll_to_end(),

            KeyAction::Open => {
                if let Some(target) = self.selected_target() {
                    self.history.push(target);
                }
            }
            KeyAction::ReplaceWith => {
                if let Some(target) = self.selected_target() {
                    self.history.replace(target);
                }
            }
            KeyAction::Back => {
                self.history.back();
            }
            KeyAction::Forward => {
                self.history.forward();
            }
            KeyAction::Home => {
                if self.history.location() != &RoutePath::root() {
                    self.history.push(RoutePath::root());
                }
            }

            KeyAction::ToggleConnectivity => {
                self.simulated_online = !self.simulated_online;
                let signal = if self.simulated_online {
                    ConnectivitySignal::Online
                } else {
                    ConnectivitySignal::Offline
                };
                self.shell.handle_connectivity(signal);
            }
            KeyAction::ClearToasts => self.shell.store_mut().clear_toasts(),
            KeyAction::ToggleCompact => {
                let compact = !self.compact();
                self.shell
                    .merge_settings(LayoutSettings::empty().with(COMPACT, compact));
            }
        }

        self.forward_scroll_events(now);
        false
    }

    /// The viewport shell.
    pub fn shell(&self) -> &ViewportShell<MemoryStore> {
        &self.shell
    }

    /// The navigation history.
    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    /// The scroll container.
    pub fn pane(&self) -> &ContentPane {
        &self.pane
    }

    /// First row the virtual list renders.
    pub fn list_offset(&self) -> u32 {
        self.list.borrow().first_visible()
    }

    /// Rows of the mounted view.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn compact(&self) -> bool {
        self.shell
            .channel()
            .settings()
            .get_bool(COMPACT)
            .unwrap_or(false)
    }

    fn selected_target(&self) -> Option<RoutePath> {
        self.rows
            .get(self.pane.offset() as usize)
            .and_then(|row| row.target.clone())
    }

    fn report_size(&mut self, now: Instant) {
        match self.terminal.size() {
            Ok(size) => self
                .shell
                .handle_resize(ViewportDimensions::new(size.width, size.height), now),
            Err(e) => debug!(error = %e, "Terminal size unavailable"),
        }
    }

    /// Mount the view for the shell's current path if it changed.
    ///
    /// A fresh list registers itself with the layout channel on every
    /// mount; the previous one is dropped.
    fn sync_mounted_view(&mut self) {
        let path = self.shell.current_path();
        if self.mounted_path.as_ref() == Some(path) {
            return;
        }

        let kind = ViewKind::resolve(path);
        debug!(%path, ?kind, "Mounting view");
        self.title = kind.title();
        self.rows = kind.rows();
        self.mounted_path = Some(path.clone());
        self.pane.reset();

        self.list = Rc::new(RefCell::new(TrackList::new()));
        let handle: VirtualListHandle = self.list.clone();
        self.shell
            .register_accessor(VirtualizationAccessor::from_weak(Rc::downgrade(&handle)));
    }

    fn forward_scroll_events(&mut self, now: Instant) {
        for offset in self.pane.take_scroll_events() {
            self.shell.handle_scroll(offset, now);
        }
    }

    fn visible_rows(&self) -> Result<u32, ShellError> {
        let size = self.terminal.size()?;
        let content = split(Rect::new(0, 0, size.width, size.height)).content;
        Ok(visible_rows(content, self.compact()))
    }

    fn draw(&mut self) -> Result<(), ShellError> {
        let visible = self.visible_rows()? as usize;
        let list = self.list.borrow();
        let screen = Screen {
            shell: self.shell.view(),
            title: &self.title,
            rows: &self.rows,
            window: list.window(visible, self.rows.len()),
            offset: self.pane.offset(),
            max_offset: self.pane.max_offset(),
            liked: &self.liked,
        };
        let styles = self.styles;

        self.terminal
            .draw(|frame| render_screen(frame, &screen, &styles))?;
        Ok(())
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including after an error.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(config: &ResolvedConfig) -> Result<(), ShellError> {
    let mut app = TuiApp::new(config)?;
    let result = app.run();
    restore_terminal()?;
    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), ShellError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
