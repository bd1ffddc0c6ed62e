//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. All input handling lives
//! on [`AppState`] so it can be exercised without a terminal.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction},
    theme::Theme,
    widgets::{
        calendar::{CalendarState, CalendarView},
        command_bar::{CommandBar, CommandBarState},
        data_table::{self, DataTable, DataTableState},
        faq::{Faq, FaqState},
        header::Header,
        help::HelpPopup,
        profile_form::{ProfileFormState, ProfileFormView},
        query_bar::QueryBar,
        sidebar::{Sidebar, SidebarState, TreeNode, RAIL_WIDTH},
        text_input::TextInput,
    },
};
use atrium_core::{calendar::Calendar, config::Config, FilterableList, Record};
use atrium_data::{invoices::FetchError, mock, Dataset};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    text::Line,
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use std::{io, path::Path, time::Duration};
use tokio::sync::oneshot::{self, error::TryRecvError};

// ---------------------------------------------------------------------------
// Focus + view types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    View,
    QueryBar,
    /// Vim-style `:` command line is active.
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Team,
    Contacts,
    Invoices,
    Profile,
    Calendar,
    Faq,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Team,
        View::Contacts,
        View::Invoices,
        View::Profile,
        View::Calendar,
        View::Faq,
    ];

    /// Identifier used by the sidebar and the `:view` command.
    pub fn key(self) -> &'static str {
        match self {
            View::Team => "team",
            View::Contacts => "contacts",
            View::Invoices => "invoices",
            View::Profile => "form",
            View::Calendar => "calendar",
            View::Faq => "faq",
        }
    }

    pub fn from_key(key: &str) -> Option<View> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|v| v.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Team => "Team",
            View::Contacts => "Contacts",
            View::Invoices => "Invoices",
            View::Profile => "Create User",
            View::Calendar => "Calendar",
            View::Faq => "FAQ",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            View::Team => "Managing the Team Members",
            View::Contacts => "List of Contacts for Future Reference",
            View::Invoices => "List of Invoice Balances",
            View::Profile => "Create a New User Profile",
            View::Calendar => "Full Calendar Interactive Page",
            View::Faq => "Frequently Asked Questions Page",
        }
    }

    pub fn searchable(self) -> bool {
        !matches!(self, View::Profile | View::Calendar)
    }

    /// Default file name for `:export`, or `None` when the view has nothing
    /// to export.
    pub fn export_file(self) -> Option<&'static str> {
        match self {
            View::Team => Some("team.csv"),
            View::Contacts => Some("contacts.csv"),
            View::Invoices => Some("invoices.csv"),
            View::Calendar => Some("calendar_events.csv"),
            View::Profile | View::Faq => None,
        }
    }
}

fn sidebar_tree() -> Vec<TreeNode> {
    vec![
        TreeNode::new("data", "Data").with_children(vec![
            TreeNode::new(View::Team.key(), "Manage Team"),
            TreeNode::new(View::Contacts.key(), "Contacts"),
            TreeNode::new(View::Invoices.key(), "Invoices"),
        ]),
        TreeNode::new("pages", "Pages").with_children(vec![
            TreeNode::new(View::Profile.key(), "Profile Form"),
            TreeNode::new(View::Calendar.key(), "Calendar"),
            TreeNode::new(View::Faq.key(), "FAQ"),
        ]),
    ]
}

// ---------------------------------------------------------------------------
// Search seam
// ---------------------------------------------------------------------------

/// A view with its own query driving a [`FilterableList`].
pub trait Searchable {
    fn query_input(&self) -> &TextInput;
    fn query_input_mut(&mut self) -> &mut TextInput;
    /// Re-filter after the query input changed.
    fn apply_query(&mut self);
    /// `(matched, total)`.
    fn counts(&self) -> (usize, usize);
}

impl Searchable for DataTableState {
    fn query_input(&self) -> &TextInput {
        &self.query
    }
    fn query_input_mut(&mut self) -> &mut TextInput {
        &mut self.query
    }
    fn apply_query(&mut self) {
        DataTableState::apply_query(self)
    }
    fn counts(&self) -> (usize, usize) {
        (self.list.len(), self.list.records().len())
    }
}

impl Searchable for FaqState {
    fn query_input(&self) -> &TextInput {
        &self.query
    }
    fn query_input_mut(&mut self) -> &mut TextInput {
        &mut self.query
    }
    fn apply_query(&mut self) {
        FaqState::apply_query(self)
    }
    fn counts(&self) -> (usize, usize) {
        (self.list.len(), self.list.records().len())
    }
}

// ---------------------------------------------------------------------------
// Invoice source
// ---------------------------------------------------------------------------

pub type InvoiceReceiver = oneshot::Receiver<Result<Vec<Record>, FetchError>>;

/// Where the invoices view gets its rows.
pub enum InvoiceSource {
    /// Rows known up front (offline mode, tests).
    Static(Vec<Record>),
    /// A fetch in flight; the view shows a loading state until it resolves.
    Pending(InvoiceReceiver),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub view: View,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub sidebar: SidebarState,
    pub team: DataTableState,
    pub contacts: DataTableState,
    pub invoices: DataTableState,
    pub faq: FaqState,
    pub calendar: CalendarState,
    pub profile: ProfileFormState,
    pub theme: Theme,
    pub config: Config,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// One-line result of the last command, cleared by the next key.
    pub notice: Option<String>,
    invoice_rx: Option<InvoiceReceiver>,
    pub quit: bool,
}

impl AppState {
    pub fn new(config: Config, theme: Theme, invoices: InvoiceSource) -> Self {
        let view = View::Team;
        let (invoices, invoice_rx) = match invoices {
            InvoiceSource::Static(rows) => (
                DataTableState::new(
                    "Invoices",
                    FilterableList::new(rows, atrium_data::invoices::SEARCH_FIELDS),
                    data_table::invoice_columns(),
                ),
                None,
            ),
            InvoiceSource::Pending(rx) => (
                DataTableState::loading(
                    "Invoices",
                    FilterableList::empty(atrium_data::invoices::SEARCH_FIELDS),
                    data_table::invoice_columns(),
                ),
                Some(rx),
            ),
        };

        Self {
            view,
            focus: Focus::View,
            prev_focus: Focus::View,
            sidebar: SidebarState::new(sidebar_tree(), view.key(), config.ui.sidebar_expanded),
            team: DataTableState::new("Team", Dataset::Team.list(), data_table::team_columns()),
            contacts: DataTableState::new(
                "Contacts",
                Dataset::Contacts.list(),
                data_table::contact_columns(),
            ),
            invoices,
            faq: FaqState::new(Dataset::Faq.list()),
            calendar: CalendarState::new(Calendar::new(mock::calendar_events())),
            profile: ProfileFormState::default(),
            theme,
            config,
            show_help: false,
            command_bar: CommandBarState::default(),
            notice: None,
            invoice_rx,
            quit: false,
        }
    }

    pub fn searchable(&self) -> Option<&dyn Searchable> {
        match self.view {
            View::Team => Some(&self.team),
            View::Contacts => Some(&self.contacts),
            View::Invoices => Some(&self.invoices),
            View::Faq => Some(&self.faq),
            View::Profile | View::Calendar => None,
        }
    }

    pub fn searchable_mut(&mut self) -> Option<&mut dyn Searchable> {
        match self.view {
            View::Team => Some(&mut self.team),
            View::Contacts => Some(&mut self.contacts),
            View::Invoices => Some(&mut self.invoices),
            View::Faq => Some(&mut self.faq),
            View::Profile | View::Calendar => None,
        }
    }

    pub fn switch_view(&mut self, view: View) {
        tracing::info!(from = ?self.view, to = ?view, "view switched");
        self.view = view;
        self.sidebar.set_active(view.key());
        if self.focus == Focus::QueryBar && !view.searchable() {
            self.focus = Focus::View;
        }
    }

    /// Write the active view's rows to `path` as CSV. Tables export their
    /// visible rows in display order; the calendar exports every event.
    pub fn export(&self, path: &Path) -> Result<usize, String> {
        let result = match self.view {
            View::Team => self.team.export(path),
            View::Contacts => self.contacts.export(path),
            View::Invoices => self.invoices.export(path),
            View::Calendar => self.calendar.export(path),
            View::Profile | View::Faq => {
                return Err(format!("nothing to export on {}", self.view.key()))
            }
        };
        result.map_err(|e| e.to_string())
    }

    /// Check once whether the invoice fetch has resolved.
    pub fn poll_invoices(&mut self) {
        let Some(rx) = self.invoice_rx.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Closed) => Err("invoice request was abandoned".to_string()),
        };
        self.invoice_rx = None;
        self.invoices.finish_loading(result);
    }

    /// True when alphabetic keys should be typed rather than trigger
    /// shortcuts.
    pub fn is_typing(&self) -> bool {
        match self.focus {
            Focus::QueryBar | Focus::Command => true,
            Focus::Sidebar => false,
            Focus::View => match self.view {
                View::Profile => true,
                View::Calendar => self.calendar.is_modal(),
                _ => false,
            },
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        if !matches!(event, AppEvent::Resize(..)) {
            self.notice = None;
        }

        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            self.handle_command(event);
            return;
        }

        let typing = self.is_typing();
        match event {
            AppEvent::Char('?') if !typing => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if !typing => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::ToggleSidebar => self.sidebar.toggle_rail(),

            AppEvent::Escape if self.focus == Focus::QueryBar => {
                tracing::debug!("focus: QueryBar -> View");
                self.focus = Focus::View;
            }

            // Calendar dialogs take Tab themselves.
            AppEvent::FocusNext if !(self.focus == Focus::View && self.calendar.is_modal()) => {
                let next = match self.focus {
                    Focus::Sidebar => Focus::View,
                    Focus::View if self.view.searchable() => Focus::QueryBar,
                    Focus::View | Focus::QueryBar | Focus::Command => Focus::Sidebar,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::QueryFocus => {
                if self.view.searchable() {
                    tracing::debug!("focus -> QueryBar");
                    self.focus = Focus::QueryBar;
                }
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => self.dispatch_to_focused(other),
        }
    }

    fn handle_command(&mut self, event: AppEvent) {
        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.command_bar.clear();
                self.focus = self.prev_focus;
            }
            AppEvent::Enter => {
                let input = self.command_bar.input.value().to_string();
                match Command::parse(&input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                        if let Err(msg) = execute_command(self, cmd) {
                            // Reopen the bar to show why
                            self.command_bar.error = Some(msg);
                            self.focus = Focus::Command;
                        }
                    }
                    Err(msg) if msg.is_empty() => {
                        self.command_bar.clear();
                        self.focus = self.prev_focus;
                    }
                    Err(msg) => {
                        // Show the error; bar stays open
                        self.command_bar.error = Some(msg);
                    }
                }
            }
            AppEvent::Quit => self.quit = true,
            other => self.command_bar.handle(&other),
        }
    }

    /// Route an event to the widget that owns the current focus.
    fn dispatch_to_focused(&mut self, event: AppEvent) {
        match self.focus {
            Focus::Sidebar => {
                if let Some(view) = self.sidebar.handle(&event).and_then(|id| View::from_key(&id)) {
                    self.switch_view(view);
                    self.focus = Focus::View;
                }
            }
            Focus::View => self.dispatch_to_view(&event),
            Focus::QueryBar => match event {
                AppEvent::Enter => self.focus = Focus::View,
                // Up/down keep moving the selection while typing
                AppEvent::Nav(Direction::Up | Direction::Down) => self.dispatch_to_view(&event),
                other => {
                    if let Some(search) = self.searchable_mut() {
                        if search.query_input_mut().handle(&other) {
                            search.apply_query();
                        }
                    }
                }
            },
            Focus::Command => {} // handled before dispatch, should not reach here
        }
    }

    fn dispatch_to_view(&mut self, event: &AppEvent) {
        match self.view {
            View::Team => self.team.handle(event),
            View::Contacts => self.contacts.handle(event),
            View::Invoices => self.invoices.handle(event),
            View::Faq => self.faq.handle(event),
            View::Calendar => self.calendar.handle(event),
            View::Profile => self.profile.handle(event),
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(config: Config, theme: Theme, invoices: InvoiceSource) -> Self {
        Self {
            state: AppState::new(config, theme, invoices),
        }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.poll_invoices();

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if self.state.is_typing() {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(
                                focus = ?self.state.focus,
                                view = ?self.state.view,
                                event = ?ev,
                                "key event"
                            );
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 1-line header | body | 3-line query bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

    let sidebar_width = if state.sidebar.expanded {
        Constraint::Percentage(state.config.ui.sidebar_width_pct)
    } else {
        Constraint::Length(RAIL_WIDTH)
    };
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([sidebar_width, Constraint::Fill(1)])
        .split(vert[1]);

    let theme = &state.theme;
    let view_focused = state.focus == Focus::View;

    frame.render_widget(
        Header::new(state.view.title(), state.view.subtitle(), theme),
        vert[0],
    );
    frame.render_widget(
        Sidebar::new(&state.sidebar, state.focus == Focus::Sidebar, theme),
        horiz[0],
    );
    match state.view {
        View::Team => frame.render_widget(DataTable::new(&state.team, view_focused, theme), horiz[1]),
        View::Contacts => {
            frame.render_widget(DataTable::new(&state.contacts, view_focused, theme), horiz[1])
        }
        View::Invoices => {
            frame.render_widget(DataTable::new(&state.invoices, view_focused, theme), horiz[1])
        }
        View::Faq => frame.render_widget(Faq::new(&state.faq, view_focused, theme), horiz[1]),
        View::Calendar => {
            frame.render_widget(CalendarView::new(&state.calendar, view_focused, theme), horiz[1])
        }
        View::Profile => {
            frame.render_widget(ProfileFormView::new(&state.profile, view_focused, theme), horiz[1])
        }
    }

    let search = state.searchable();
    let query_bar = QueryBar::new(
        search.map(|s| s.query_input()),
        search.map(|s| s.counts()).unwrap_or((0, 0)),
        state.focus == Focus::QueryBar,
        theme,
    );
    let query_cursor = query_bar.cursor_position(vert[2]);
    frame.render_widget(query_bar, vert[2]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(theme), area);
        return;
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&state.command_bar, theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if let Some(notice) = &state.notice {
        let row = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(Clear, row);
        frame.render_widget(
            Paragraph::new(Line::styled(notice.clone(), theme.status_success)),
            row,
        );
    }

    match state.focus {
        Focus::QueryBar => frame.set_cursor_position(query_cursor),
        Focus::View if state.view == View::Profile => {
            let (dx, dy) = state.profile.cursor_offset();
            let view = horiz[1];
            let x = (view.x + 1 + dx).min(view.right().saturating_sub(2));
            let y = (view.y + 1 + dy).min(view.bottom().saturating_sub(2));
            frame.set_cursor_position((x, y));
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    fn offline() -> AppState {
        AppState::new(
            Config::defaults(),
            Theme::load_dark(),
            InvoiceSource::Static(Dataset::Invoices.records()),
        )
    }

    fn type_str(s: &mut AppState, text: &str) {
        for c in text.chars() {
            s.handle(AppEvent::Char(c));
        }
    }

    fn run_command(s: &mut AppState, cmd: &str) {
        s.handle(AppEvent::Char(':'));
        type_str(s, cmd);
        s.handle(AppEvent::Enter);
    }

    fn screen(s: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| draw(f, s)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn view_keys_round_trip() {
        for view in View::ALL {
            assert_eq!(View::from_key(view.key()), Some(view));
        }
        assert_eq!(View::from_key("dashboard"), None);
    }

    #[test]
    fn query_bar_filters_active_view_only() {
        let mut s = offline();
        s.handle(AppEvent::QueryFocus);
        type_str(&mut s, "stark");
        assert_eq!(s.team.list.len(), 1);
        assert_eq!(s.contacts.list.len(), s.contacts.list.records().len());

        s.handle(AppEvent::Escape);
        s.switch_view(View::Contacts);
        assert_eq!(s.searchable().unwrap().query_input().value(), "");
        s.switch_view(View::Team);
        assert_eq!(s.searchable().unwrap().query_input().value(), "stark");
    }

    #[test]
    fn focus_cycle_skips_query_bar_on_unsearchable_views() {
        let mut s = offline();
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::QueryBar);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Sidebar);

        s.switch_view(View::Calendar);
        s.handle(AppEvent::FocusNext);
        s.handle(AppEvent::FocusNext);
        assert_eq!(s.focus, Focus::Sidebar);
    }

    #[test]
    fn sidebar_enter_opens_view() {
        let mut s = offline();
        s.focus = Focus::Sidebar;
        // data, team, contacts, invoices
        s.handle(AppEvent::Nav(Direction::Down));
        s.handle(AppEvent::Nav(Direction::Down));
        s.handle(AppEvent::Enter);
        assert_eq!(s.view, View::Invoices);
        assert_eq!(s.focus, Focus::View);
    }

    #[test]
    fn commands_switch_view_and_theme() {
        let mut s = offline();
        run_command(&mut s, "view faq");
        assert_eq!(s.view, View::Faq);
        assert_eq!(s.focus, Focus::View);

        run_command(&mut s, "theme light");
        assert_eq!(s.theme.name, "light");

        run_command(&mut s, "theme neon");
        assert_eq!(s.focus, Focus::Command);
        assert_eq!(s.command_bar.error.as_deref(), Some("unknown theme: neon"));
    }

    #[test]
    fn quit_refuses_with_unsaved_form() {
        let mut s = offline();
        s.switch_view(View::Profile);
        type_str(&mut s, "Ada");
        // Profile fields capture ':' so leave the view first
        s.focus = Focus::Sidebar;
        run_command(&mut s, "q");
        assert!(!s.quit);
        assert!(s.command_bar.error.is_some());

        s.handle(AppEvent::Escape);
        run_command(&mut s, "q!");
        assert!(s.quit);
    }

    #[test]
    fn clear_command_resets_query() {
        let mut s = offline();
        s.handle(AppEvent::QueryFocus);
        type_str(&mut s, "zzz");
        assert!(s.team.list.is_empty());
        s.handle(AppEvent::Escape);
        run_command(&mut s, "clear");
        assert_eq!(s.team.list.len(), s.team.list.records().len());
    }

    #[test]
    fn typing_mode_follows_focus() {
        let mut s = offline();
        assert!(!s.is_typing());
        s.switch_view(View::Profile);
        assert!(s.is_typing());
        s.switch_view(View::Calendar);
        assert!(!s.is_typing());
        s.handle(AppEvent::Char('a'));
        assert!(s.is_typing());
    }

    #[test]
    fn pending_invoices_resolve() {
        let (tx, rx) = oneshot::channel();
        let mut s = AppState::new(Config::defaults(), Theme::load_dark(), InvoiceSource::Pending(rx));
        s.poll_invoices();
        assert_eq!(s.invoices.load, data_table::LoadState::Loading);

        tx.send(Ok(Dataset::Invoices.records())).unwrap();
        s.poll_invoices();
        assert_eq!(s.invoices.load, data_table::LoadState::Ready);
        assert_eq!(s.invoices.list.len(), 8);
    }

    #[test]
    fn dropped_sender_is_a_failure() {
        let (tx, rx) = oneshot::channel::<Result<Vec<Record>, FetchError>>();
        let mut s = AppState::new(Config::defaults(), Theme::load_dark(), InvoiceSource::Pending(rx));
        drop(tx);
        s.poll_invoices();
        assert!(matches!(s.invoices.load, data_table::LoadState::Failed(_)));
    }

    #[test]
    fn draws_layout() {
        let mut s = offline();
        let text = screen(&s);
        assert!(text.contains("TEAM"));
        assert!(text.contains("Manage Team"));
        assert!(text.contains("Jon Snow"));

        s.handle(AppEvent::ToggleSidebar);
        assert!(!screen(&s).contains("Manage Team"));
    }

    #[test]
    fn export_command_writes_filtered_contacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let mut s = offline();
        s.switch_view(View::Contacts);
        s.handle(AppEvent::QueryFocus);
        type_str(&mut s, "lannister");
        s.handle(AppEvent::Escape);

        run_command(&mut s, &format!("export {}", path.display()));
        assert_eq!(s.focus, Focus::View);
        assert_eq!(s.command_bar.error, None);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("id,registrar_id,name,"));

        let notice = s.notice.clone().unwrap();
        assert!(notice.starts_with("exported 2 rows to "));
        assert!(screen(&s).contains("exported 2 rows"));
        s.handle(AppEvent::Nav(Direction::Down));
        assert_eq!(s.notice, None);
    }

    #[test]
    fn export_refused_where_there_is_nothing_to_export() {
        let mut s = offline();
        s.switch_view(View::Faq);
        run_command(&mut s, "export");
        assert_eq!(s.command_bar.error.as_deref(), Some("nothing to export on faq"));
        assert_eq!(s.notice, None);
    }

    #[test]
    fn export_failure_is_shown_in_command_bar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("team.csv");
        let mut s = offline();
        run_command(&mut s, &format!("export {}", path.display()));
        assert_eq!(s.focus, Focus::Command);
        assert!(s.command_bar.error.as_deref().unwrap().starts_with("cannot create"));
    }

    #[test]
    fn calendar_delete_prompt_captures_keys() {
        let mut s = offline();
        s.switch_view(View::Calendar);
        s.handle(AppEvent::Char('d'));
        assert!(s.is_typing());
        // 'q' answers the prompt instead of quitting
        s.handle(AppEvent::Char('q'));
        assert!(!s.quit);
        assert_eq!(s.calendar.calendar.len(), 2);

        s.handle(AppEvent::Char('d'));
        s.handle(AppEvent::Char('y'));
        assert_eq!(s.calendar.calendar.len(), 1);
    }
}
