//! Data table widget — the Team, Contacts and Invoices views.
//!
//! Every table owns a [`FilterableList`] and its own query. The query bar
//! edits [`DataTableState::query`]; the app shell then calls
//! [`DataTableState::apply_query`] so the list re-filters and the cursor is
//! clamped to the new result.
//!
//! # Navigation (when the view is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Previous row |
//! | `↓` / `j` | Next row |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `G` | Last row |
//! | `s` | Sort by the next column (after the last one, back to filter order) |
//! | `S` | Reverse the sort direction |
//!
//! Sorting only reorders what is displayed and exported. The list's
//! `filtered()` output keeps source order; ties keep it too.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::text_input::TextInput;
use atrium_core::export::{self, ExportError};
use atrium_core::{FilterableList, Record, Segment};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap},
};
use std::cmp::Ordering;
use std::path::Path;

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// How a column's values are decorated on top of search highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Plain,
    /// Access level, coloured by [`Theme::access_style`].
    Access,
    /// Dollar amount.
    Money,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub field: &'static str,
    pub header: &'static str,
    pub width: Constraint,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(field: &'static str, header: &'static str, width: Constraint) -> Self {
        Self {
            field,
            header,
            width,
            kind: ColumnKind::Plain,
        }
    }

    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }
}

pub fn team_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID", Constraint::Length(4)),
        Column::new("name", "Name", Constraint::Fill(2)),
        Column::new("age", "Age", Constraint::Length(5)),
        Column::new("phone", "Phone", Constraint::Length(15)),
        Column::new("email", "Email", Constraint::Fill(3)),
        Column::new("access", "Access", Constraint::Length(9)).kind(ColumnKind::Access),
    ]
}

pub fn contact_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID", Constraint::Length(4)),
        Column::new("registrar_id", "Registrar", Constraint::Length(10)),
        Column::new("name", "Name", Constraint::Fill(2)),
        Column::new("age", "Age", Constraint::Length(5)),
        Column::new("phone", "Phone", Constraint::Length(15)),
        Column::new("email", "Email", Constraint::Fill(3)),
        Column::new("address", "Address", Constraint::Fill(4)),
        Column::new("city", "City", Constraint::Fill(1)),
        Column::new("zip_code", "Zip", Constraint::Length(7)),
    ]
}

pub fn invoice_columns() -> Vec<Column> {
    vec![
        Column::new("id", "ID", Constraint::Length(4)),
        Column::new("name", "Name", Constraint::Fill(2)),
        Column::new("phone", "Phone", Constraint::Length(18)),
        Column::new("email", "Email", Constraint::Fill(3)),
        Column::new("cost", "Cost", Constraint::Length(10)).kind(ColumnKind::Money),
    ]
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Where the table's collection currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Ready,
    Loading,
    /// Terminal: the collection stays empty for the rest of the session.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Index into the table's columns.
    pub column: usize,
    pub descending: bool,
}

#[derive(Debug)]
pub struct DataTableState {
    pub title: &'static str,
    pub list: FilterableList,
    pub columns: Vec<Column>,
    /// Index into the displayed rows.
    pub cursor: usize,
    pub query: TextInput,
    pub load: LoadState,
    pub sort: Option<SortKey>,
    /// Positions in the filtered view, in display order.
    order: Vec<usize>,
}

impl DataTableState {
    pub fn new(title: &'static str, list: FilterableList, columns: Vec<Column>) -> Self {
        let order = (0..list.len()).collect();
        Self {
            title,
            list,
            columns,
            cursor: 0,
            query: TextInput::default(),
            load: LoadState::Ready,
            sort: None,
            order,
        }
    }

    /// A table waiting for its collection to arrive.
    pub fn loading(title: &'static str, list: FilterableList, columns: Vec<Column>) -> Self {
        Self {
            load: LoadState::Loading,
            ..Self::new(title, list, columns)
        }
    }

    /// Push the current query text into the list and clamp the cursor.
    pub fn apply_query(&mut self) {
        self.list.set_query(self.query.value());
        self.reorder();
    }

    /// Install a fetched collection, or record a terminal failure.
    pub fn finish_loading(&mut self, result: Result<Vec<Record>, String>) {
        match result {
            Ok(records) => {
                tracing::info!(table = self.title, rows = records.len(), "table: loaded");
                self.list.replace_records(records);
                self.load = LoadState::Ready;
            }
            Err(message) => {
                tracing::warn!(table = self.title, error = %message, "table: load failed");
                self.list.replace_records(Vec::new());
                self.load = LoadState::Failed(message);
            }
        }
        self.reorder();
    }

    pub fn selected(&self) -> Option<&Record> {
        self.order.get(self.cursor).and_then(|&n| self.list.nth(n))
    }

    /// The filtered records in display order.
    pub fn rows(&self) -> Vec<&Record> {
        self.order.iter().filter_map(|&n| self.list.nth(n)).collect()
    }

    /// Advance the sort column: unsorted, then each column ascending, then
    /// back to unsorted.
    pub fn cycle_sort(&mut self) {
        self.sort = match self.sort {
            None if !self.columns.is_empty() => Some(SortKey { column: 0, descending: false }),
            Some(key) if key.column + 1 < self.columns.len() => Some(SortKey {
                column: key.column + 1,
                descending: false,
            }),
            _ => None,
        };
        self.reorder();
    }

    pub fn reverse_sort(&mut self) {
        if let Some(key) = self.sort.as_mut() {
            key.descending = !key.descending;
            self.reorder();
        }
    }

    /// Write the displayed rows to `path` as CSV, one column per table column.
    pub fn export(&self, path: &Path) -> Result<usize, ExportError> {
        let fields: Vec<&str> = self.columns.iter().map(|c| c.field).collect();
        export::export_csv(path, &fields, self.rows())
    }

    /// Rebuild the display order from the filtered view and the sort key.
    fn reorder(&mut self) {
        self.order = (0..self.list.len()).collect();
        let key_field = self
            .sort
            .and_then(|key| Some((key, self.columns.get(key.column)?.field)));
        if let Some((key, field)) = key_field {
            let list = &self.list;
            // Stable: equal keys keep filter order
            self.order
                .sort_by(|&a, &b| compare_field(list.nth(a), list.nth(b), field, key.descending));
            tracing::debug!(table = self.title, field, descending = key.descending, "table: sorted");
        }
        self.clamp_cursor();
    }

    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.list.len();
        if total == 0 {
            return;
        }
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < total {
                    self.cursor += 1;
                }
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
            }
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + PAGE_STEP).min(total - 1);
            }
            AppEvent::ScrollToEnd => {
                self.cursor = total - 1;
            }
            AppEvent::Char('s') => {
                self.cycle_sort();
                return;
            }
            AppEvent::Char('S') => {
                self.reverse_sort();
                return;
            }
            _ => return,
        }
        tracing::debug!(table = self.title, cursor = self.cursor, "table: cursor moved");
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.list.len().saturating_sub(1));
    }
}

/// Missing values sort after present ones.
/// Missing values go last whichever the direction.
fn compare_field(a: Option<&Record>, b: Option<&Record>, field: &str, descending: bool) -> Ordering {
    match (a.and_then(|r| r.get(field)), b.and_then(|r| r.get(field))) {
        (Some(x), Some(y)) if descending => y.sort_cmp(x),
        (Some(x), Some(y)) => x.sort_cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct DataTable<'a> {
    state: &'a DataTableState,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> DataTable<'a> {
    pub fn new(state: &'a DataTableState, focused: bool, theme: &'a Theme) -> Self {
        Self { state, focused, theme }
    }

    fn cell(&self, column: &Column, record: &Record) -> Cell<'static> {
        let Some(value) = record.get(column.field) else {
            return Cell::from("");
        };
        let base = match column.kind {
            ColumnKind::Access => self.theme.access_style(&value.to_string()),
            _ => Style::default(),
        };
        let segments = if self.state.list.fields().iter().any(|f| f == column.field) {
            self.state.list.highlight_value(value)
        } else {
            vec![Segment::plain(value.to_string())]
        };

        let mut spans = Vec::with_capacity(segments.len() + 1);
        if column.kind == ColumnKind::Money {
            spans.push(Span::styled("$", base));
        }
        spans.extend(segment_spans(segments, base, self.theme.search_highlight));
        Cell::from(Line::from(spans))
    }
}

/// Turn highlight segments into spans, patching the highlight style over
/// `base` for matched runs.
pub fn segment_spans(segments: Vec<Segment>, base: Style, highlight: Style) -> Vec<Span<'static>> {
    segments
        .into_iter()
        .map(|seg| {
            let style = if seg.matched { base.patch(highlight) } else { base };
            Span::styled(seg.text, style)
        })
        .collect()
}

impl Widget for DataTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ({}) ", self.state.title, self.state.list.len());
        let block = Block::bordered()
            .title(title)
            .border_style(self.theme.border(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let notice = match &self.state.load {
            LoadState::Loading => Some(Line::styled(
                format!("Loading {}...", self.state.title.to_lowercase()),
                self.theme.status_muted,
            )),
            LoadState::Failed(message) => Some(Line::styled(
                format!("Error: {message}"),
                self.theme.status_error,
            )),
            LoadState::Ready if self.state.list.is_empty() => Some(Line::styled(
                if self.state.list.query().is_empty() {
                    "No records".to_string()
                } else {
                    format!("No matches for \"{}\"", self.state.list.query())
                },
                self.theme.status_muted,
            )),
            LoadState::Ready => None,
        };
        if let Some(line) = notice {
            Paragraph::new(line).wrap(Wrap { trim: true }).render(inner, buf);
            return;
        }

        let header = Row::new(
            self.state
                .columns
                .iter()
                .enumerate()
                .map(|(i, c)| match self.state.sort {
                    Some(key) if key.column == i => {
                        Cell::from(format!("{}{}", c.header, if key.descending { "▼" } else { "▲" }))
                    }
                    _ => Cell::from(c.header),
                })
                .collect::<Vec<_>>(),
        )
        .style(self.theme.table_header);

        let rows: Vec<Row> = self
            .state
            .rows()
            .into_iter()
            .map(|record| {
                Row::new(
                    self.state
                        .columns
                        .iter()
                        .map(|c| self.cell(c, record))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let selected = if self.focused {
            self.theme.table_selected
        } else {
            self.theme.table_selected.remove_modifier(Modifier::BOLD)
        };
        let table = Table::new(rows, self.state.columns.iter().map(|c| c.width))
            .header(header)
            .column_spacing(1)
            .row_highlight_style(selected);

        let mut table_state = TableState::default().with_selected(Some(self.state.cursor));
        StatefulWidget::render(table, inner, buf, &mut table_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
