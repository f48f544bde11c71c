//! Application state and event handling.
//!
//! This module implements the Elm Architecture pattern for state
//! management, with a centralized App struct holding all application
//! state: the catalog, content geometry, scroll position, the scroll-spy
//! controller and its location/history, and the chrome (sidebar, help
//! overlay, log strip).

#![allow(dead_code)]

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::Catalog;
use crate::layout::{ContentLayout, LayoutPort, ScrollState};
use crate::location::Location;
use crate::scrollspy::{ScrollSpy, SpyConfig};

/// Header pane height including borders
pub const HEADER_ROWS: u16 = 3;
/// Log strip height including borders
pub const LOG_ROWS: u16 = 4;
/// Sidebar width when expanded
pub const SIDEBAR_COLS: u16 = 28;

/// How long the "copied" flash stays in the header
const COPY_FLASH: Duration = Duration::from_secs(2);

/// Which pane receives movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Content,
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for the message strip
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: Instant,
    pub message: String,
    pub level: LogLevel,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Success,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            timestamp: Instant::now(),
            message: message.into(),
            level: LogLevel::Error,
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// The content being displayed
    pub catalog: Catalog,

    /// Flattened content rows and section extents
    pub layout: ContentLayout,

    /// Content scroll position and smooth-scroll animation
    pub scroll: ScrollState,

    /// Scroll-spy controller
    pub spy: ScrollSpy,

    /// Address fragment and history
    pub location: Location,

    /// Focused pane
    pub focus: Focus,

    /// Sidebar visibility
    pub sidebar_collapsed: bool,

    /// Sidebar cursor (index into catalog sections)
    pub sidebar_selected: usize,

    /// Show help overlay
    pub show_help: bool,

    /// Log messages
    pub logs: Vec<LogEntry>,
    /// Maximum number of log entries to keep
    max_logs: usize,

    /// When the last clipboard copy happened, for the header flash
    pub copied_at: Option<Instant>,

    /// Content pane inner height as of the last tick
    pub content_height: i32,
}

impl App {
    /// Create the application around a validated catalog
    pub fn new(catalog: Catalog) -> Self {
        Self::with_location(catalog, Location::new())
    }

    /// Create the application with a pre-seeded location, as when opened
    /// via a shared `#fragment` link
    pub fn with_location(catalog: Catalog, location: Location) -> Self {
        let layout = ContentLayout::build(&catalog);
        let mut spy = ScrollSpy::new(catalog.section_ids(), SpyConfig::default());
        spy.init(&location);

        let mut app = Self {
            should_quit: false,
            catalog,
            layout,
            scroll: ScrollState::default(),
            spy,
            location,
            focus: Focus::Content,
            sidebar_collapsed: false,
            sidebar_selected: 0,
            show_help: false,
            logs: Vec::new(),
            max_logs: 100,
            copied_at: None,
            content_height: 0,
        };
        app.sync_sidebar_selection();

        let sections = app.catalog.sections.len();
        let examples = app.catalog.example_count();
        app.log(LogEntry::info(format!(
            "Loaded {} sections, {} code examples",
            sections, examples
        )));
        app.log(LogEntry::info("Press ? for help"));
        app
    }

    /// Inner height of the content pane for a given terminal height
    pub fn content_viewport_height(terminal_height: u16) -> i32 {
        terminal_height.saturating_sub(HEADER_ROWS + LOG_ROWS + 2) as i32
    }

    /// Add a log entry
    pub fn log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    /// Per-frame update: advance the smooth scroll and spy timers, derive
    /// the visibility batch from current geometry, and feed it to the spy
    /// under the current generation.
    pub fn tick(&mut self, terminal_height: u16) {
        self.content_height = Self::content_viewport_height(terminal_height);
        self.scroll
            .set_bounds(self.layout.total_rows(), self.content_height);
        self.scroll.tick();

        let mut port = LayoutPort {
            layout: &self.layout,
            scroll: &mut self.scroll,
        };
        self.spy.tick(&mut port, &mut self.location);

        // Batches derived while a smooth scroll is in flight describe
        // transitional geometry; sections being scrolled past must not
        // take the highlight
        if !self.scroll.is_animating() {
            let (margin, threshold) = {
                let config = self.spy.config();
                (config.root_margin, config.threshold)
            };
            let batch = self.layout.observe(
                self.scroll.row_offset(),
                self.content_height,
                &margin,
                threshold,
            );
            self.spy
                .handle_observations(&batch, self.spy.generation(), &mut self.location);
        }

        self.sync_sidebar_selection();

        if let Some(copied) = self.copied_at {
            if copied.elapsed() > COPY_FLASH {
                self.copied_at = None;
            }
        }
    }

    /// Keep the sidebar cursor on the active section while the user is
    /// not browsing the sidebar itself
    fn sync_sidebar_selection(&mut self) {
        if self.focus == Focus::Sidebar {
            return;
        }
        if let Some(active) = self.spy.active_section() {
            if let Some(index) = self.catalog.sections.iter().position(|s| s.id == active) {
                self.sidebar_selected = index;
            }
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        // Global shortcuts
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            KeyCode::Char('s') => {
                self.sidebar_collapsed = !self.sidebar_collapsed;
                if self.sidebar_collapsed {
                    self.focus = Focus::Content;
                }
                return;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Content if !self.sidebar_collapsed => Focus::Sidebar,
                    _ => Focus::Content,
                };
                return;
            }
            KeyCode::Char('n') => {
                self.jump_section(1);
                return;
            }
            KeyCode::Char('p') => {
                self.jump_section(-1);
                return;
            }
            KeyCode::Char('[') => {
                self.history_back();
                return;
            }
            KeyCode::Char(']') => {
                self.history_forward();
                return;
            }
            KeyCode::Char('y') => {
                self.copy_active_example();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Content => self.handle_content_key(key),
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        let total = self.catalog.sections.len();
        if total == 0 {
            return;
        }
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.sidebar_selected = (self.sidebar_selected + 1) % total;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.sidebar_selected = self
                    .sidebar_selected
                    .checked_sub(1)
                    .unwrap_or(total - 1);
            }
            KeyCode::Char('g') => {
                self.sidebar_selected = 0;
            }
            KeyCode::Char('G') => {
                self.sidebar_selected = total - 1;
            }
            KeyCode::Enter => {
                // The navigation click: optimistic activation plus a new
                // history entry
                if let Some(section) = self.catalog.sections.get(self.sidebar_selected) {
                    let id = section.id.clone();
                    self.navigate_to(&id);
                }
            }
            _ => {}
        }
    }

    fn handle_content_key(&mut self, key: KeyEvent) {
        let half_page = (self.content_height / 2).max(1);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.scroll.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll.scroll_by(-1),
            KeyCode::Char('d') | KeyCode::PageDown => self.scroll.scroll_by(half_page),
            KeyCode::Char('u') | KeyCode::PageUp => self.scroll.scroll_by(-half_page),
            KeyCode::Char('g') | KeyCode::Home => self.scroll.jump_to(0),
            KeyCode::Char('G') | KeyCode::End => self.scroll.jump_to_bottom(),
            _ => {}
        }
    }

    /// Jump to the next/previous section relative to the active one
    fn jump_section(&mut self, delta: i32) {
        let ids = self.catalog.section_ids();
        if ids.is_empty() {
            return;
        }
        let current = self
            .spy
            .active_section()
            .and_then(|active| ids.iter().position(|id| id == active))
            .unwrap_or(0) as i32;
        let next = (current + delta).clamp(0, ids.len() as i32 - 1) as usize;
        if next as i32 != current {
            let id = ids[next].clone();
            self.navigate_to(&id);
        }
    }

    /// User-initiated navigation to a section: smooth scroll, optimistic
    /// active-section update, new history entry
    fn navigate_to(&mut self, id: &str) {
        let mut port = LayoutPort {
            layout: &self.layout,
            scroll: &mut self.scroll,
        };
        self.spy
            .scroll_to_section(id, true, &mut port, &mut self.location);
    }

    fn history_back(&mut self) {
        let Some(fragment) = self.location.back().map(str::to_string) else {
            self.log(LogEntry::warning("Already at the oldest history entry"));
            return;
        };
        self.apply_fragment(&fragment);
    }

    fn history_forward(&mut self) {
        let Some(fragment) = self.location.forward().map(str::to_string) else {
            self.log(LogEntry::warning("Already at the newest history entry"));
            return;
        };
        self.apply_fragment(&fragment);
    }

    /// Feed a history-driven fragment change to the spy; this path never
    /// creates further history entries
    fn apply_fragment(&mut self, fragment: &str) {
        let mut port = LayoutPort {
            layout: &self.layout,
            scroll: &mut self.scroll,
        };
        self.spy
            .handle_fragment_change(fragment, &mut port, &mut self.location);
    }

    /// Copy the active section's first code example to the clipboard
    fn copy_active_example(&mut self) {
        let Some(active) = self.spy.active_section().map(str::to_string) else {
            return;
        };
        let Some(example) = self.catalog.first_example(&active) else {
            self.log(LogEntry::warning(format!(
                "No code example in #{}",
                active
            )));
            return;
        };
        let code = example.code.clone();
        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(code.clone()));
        match result {
            Ok(()) => {
                self.copied_at = Some(Instant::now());
                self.log(LogEntry::success(format!(
                    "Copied {} bytes from #{}",
                    code.len(),
                    active
                )));
            }
            Err(err) => {
                self.log(LogEntry::error(format!("Clipboard error: {}", err)));
            }
        }
    }

    /// Header status: address fragment plus scroll position
    pub fn address_text(&self) -> String {
        let fragment = self.location.current();
        if fragment.is_empty() {
            String::from("#")
        } else {
            format!("#{}", fragment)
        }
    }
}
