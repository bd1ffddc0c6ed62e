//! Calendar view — the event list, a category legend and the add-event
//! draft.
//!
//! # Keys
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `↓` | Select event (or draft field while drafting) |
//! | `a` | Open a draft dated today |
//! | `d` | Ask to delete the selected event; `y` confirms, any other key keeps it |
//! | `←` / `→` | Cycle the draft category |
//! | `Enter` | Submit the draft |
//! | `Escape` | Discard the draft |

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::text_input::TextInput;
use atrium_core::calendar::{self, Calendar, EventCategory, EventDraft};
use atrium_core::export::{self, ExportError};
use chrono::NaiveDate;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};
use std::path::Path;

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Date,
    Category,
}

impl DraftField {
    const ORDER: [DraftField; 3] = [DraftField::Title, DraftField::Date, DraftField::Category];

    fn step(self, forward: bool) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let n = Self::ORDER.len();
        Self::ORDER[if forward { (i + 1) % n } else { (i + n - 1) % n }]
    }
}

#[derive(Debug, Clone)]
pub struct DraftState {
    pub title: TextInput,
    pub date: TextInput,
    pub category: EventCategory,
    pub field: DraftField,
    pub error: Option<String>,
}

impl DraftState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: TextInput::default(),
            date: TextInput::new(date.format("%Y-%m-%d").to_string()),
            category: EventCategory::default(),
            field: DraftField::Title,
            error: None,
        }
    }

    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.value().to_string(),
            category: self.category,
            date: self.date.value().to_string(),
        }
    }

    fn handle(&mut self, event: &AppEvent) {
        match (self.field, event) {
            (_, AppEvent::Nav(Direction::Up)) => self.field = self.field.step(false),
            (_, AppEvent::Nav(Direction::Down)) | (_, AppEvent::FocusNext) => {
                self.field = self.field.step(true)
            }
            (DraftField::Category, AppEvent::Nav(Direction::Right)) => {
                self.category = self.category.next()
            }
            (DraftField::Category, AppEvent::Nav(Direction::Left)) => {
                self.category = self.category.prev()
            }
            (DraftField::Category, _) => {}
            (DraftField::Title, ev) => {
                self.title.handle(ev);
            }
            (DraftField::Date, ev) => {
                self.date.handle(ev);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct CalendarState {
    pub calendar: Calendar,
    pub cursor: usize,
    pub draft: Option<DraftState>,
    /// Id of the event awaiting delete confirmation.
    pub pending_delete: Option<String>,
}

impl CalendarState {
    pub fn new(calendar: Calendar) -> Self {
        Self {
            calendar,
            cursor: 0,
            draft: None,
            pending_delete: None,
        }
    }

    /// True while the draft dialog captures typing.
    pub fn is_drafting(&self) -> bool {
        self.draft.is_some()
    }

    /// True while a dialog (draft or delete confirmation) owns the keyboard.
    pub fn is_modal(&self) -> bool {
        self.draft.is_some() || self.pending_delete.is_some()
    }

    /// Write every event to `path` as CSV.
    pub fn export(&self, path: &Path) -> Result<usize, ExportError> {
        export::export_csv(path, &calendar::EXPORT_COLUMNS, &self.calendar.export_rows())
    }

    /// Open a draft for `date`.
    pub fn open_draft(&mut self, date: NaiveDate) {
        tracing::debug!(%date, "calendar: draft opened");
        self.draft = Some(DraftState::new(date));
    }

    pub fn handle(&mut self, event: &AppEvent) {
        if let Some(id) = self.pending_delete.take() {
            if *event == AppEvent::Char('y') {
                self.calendar.remove(&id);
                self.cursor = self.cursor.min(self.calendar.len().saturating_sub(1));
            } else {
                tracing::debug!(id = %id, "calendar: delete cancelled");
            }
            return;
        }

        if let Some(draft) = self.draft.as_mut() {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("calendar: draft discarded");
                    self.draft = None;
                }
                AppEvent::Enter => self.submit(),
                other => draft.handle(other),
            }
            return;
        }

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) if self.cursor + 1 < self.calendar.len() => {
                self.cursor += 1
            }
            AppEvent::Char('a') => self.open_draft(chrono::Local::now().date_naive()),
            AppEvent::Char('d') => {
                self.pending_delete = self.calendar.events().get(self.cursor).map(|e| e.id.clone());
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        match self.calendar.add(&draft.to_draft()) {
            Ok(id) => {
                self.cursor = self
                    .calendar
                    .events()
                    .iter()
                    .position(|e| e.id == id)
                    .unwrap_or(0);
                self.draft = None;
            }
            Err(e) => {
                tracing::debug!(error = %e, "calendar: draft rejected");
                draft.error = Some(e.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct CalendarView<'a> {
    state: &'a CalendarState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> CalendarView<'a> {
    pub fn new(state: &'a CalendarState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    fn legend(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("Legend: ", self.theme.status_muted)];
        for category in EventCategory::ALL {
            spans.push(Span::styled("■ ", self.theme.event_style(category)));
            spans.push(Span::raw(format!("{category}  ")));
        }
        Line::from(spans)
    }

    fn render_confirm(&self, id: &str, area: Rect, buf: &mut Buffer) {
        let title = self
            .state
            .calendar
            .events()
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.title.as_str())
            .unwrap_or(id);
        let text = format!("Delete the event '{title}'? (y/n)");
        let width = (text.chars().count() as u16 + 4).min(area.width);
        let popup = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(3) / 2,
            width,
            height: 3.min(area.height),
        };
        Clear.render(popup, buf);
        Paragraph::new(Line::styled(text, self.theme.status_error))
            .block(Block::bordered().border_style(self.theme.border_focused))
            .render(popup, buf);
    }

    fn render_draft(&self, draft: &DraftState, area: Rect, buf: &mut Buffer) {
        let popup = Rect {
            x: area.x + area.width.saturating_sub(50) / 2,
            y: area.y + area.height.saturating_sub(8) / 2,
            width: 50.min(area.width),
            height: 8.min(area.height),
        };
        Clear.render(popup, buf);
        let block = Block::bordered()
            .title(" Add Event (Enter to save, Esc to cancel) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let label = |field: DraftField, name: &'static str| {
            let style = if draft.field == field {
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            Span::styled(format!("{name:<10}"), style)
        };
        let mut lines = vec![
            Line::from(vec![
                label(DraftField::Title, "Title"),
                Span::raw(draft.title.value().to_string()),
            ]),
            Line::from(vec![
                label(DraftField::Date, "Date"),
                Span::raw(draft.date.value().to_string()),
            ]),
            Line::from(vec![
                label(DraftField::Category, "Category"),
                Span::raw("‹ "),
                Span::styled(draft.category.to_string(), self.theme.event_style(draft.category)),
                Span::raw(" ›"),
            ]),
            Line::default(),
        ];
        if let Some(err) = &draft.error {
            lines.push(Line::styled(err.clone(), self.theme.status_error));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for CalendarView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Calendar ")
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Fill(1)])
            .split(inner);

        Paragraph::new(self.legend()).render(chunks[0], buf);

        let events = self.state.calendar.events();
        if events.is_empty() {
            Paragraph::new(Line::styled("No events. Press a to add one.", self.theme.status_muted))
                .render(chunks[2], buf);
        } else {
            let items: Vec<ListItem> = events
                .iter()
                .map(|e| {
                    ListItem::new(Line::from(vec![
                        Span::styled("● ", self.theme.event_style(e.category)),
                        Span::styled(format!("{:<14}", e.display_date()), self.theme.status_muted),
                        Span::raw(e.title.clone()),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
            let selected = self.focused.then_some(self.state.cursor);
            let mut list_state = ListState::default().with_selected(selected);
            StatefulWidget::render(list, chunks[2], buf, &mut list_state);
        }

        if let Some(draft) = &self.state.draft {
            self.render_draft(draft, area, buf);
        }
        if let Some(id) = &self.state.pending_delete {
            self.render_confirm(id, area, buf);
        }
    }
}
